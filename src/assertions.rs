//! Rewrite two-argument assertion calls as infix equivalences.
//!
//! A line such as `assert.Equal(t, 100000, c1.getYearlyCost())` becomes
//! `100000 ⇔ c1.getYearlyCost()`; the not-equals form uses `⇎`. Argument
//! boundaries are found by scanning the call text while skipping string
//! literals and nested brackets, so commas and parentheses inside quoted
//! arguments or inner calls never split the call in the wrong place.

use std::borrow::Cow;

use thiserror::Error;
use tracing::trace;

use crate::dialect::Dialect;

/// Failure to take an assertion call apart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SplitError {
    /// The call prefix was recognised but its arguments have no top-level
    /// comma, so there is no second argument to compare against.
    #[error("no top-level comma separates the assertion arguments in `{text}`")]
    MissingArgumentBoundary { text: String },
}

const BACKSLASH_BYTE: u8 = b'\\';

/// Check if the byte at `idx` is preceded by an odd number of backslashes.
fn has_odd_backslash_escape_bytes(bytes: &[u8], mut idx: usize) -> bool {
    let mut count = 0;
    while idx > 0 {
        idx -= 1;
        if bytes[idx] == BACKSLASH_BYTE {
            count += 1;
        } else {
            break;
        }
    }
    count % 2 == 1
}

/// Iterates over the bytes of a line that lie outside double-quoted string
/// literals, yielding their byte offsets.
///
/// Quote bytes themselves are consumed and never yielded.
struct CodeBytes<'a> {
    bytes: &'a [u8],
    idx: usize,
    in_string: bool,
}

impl<'a> CodeBytes<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            bytes: text.as_bytes(),
            idx: 0,
            in_string: false,
        }
    }
}

impl Iterator for CodeBytes<'_> {
    type Item = (usize, u8);

    fn next(&mut self) -> Option<Self::Item> {
        while self.idx < self.bytes.len() {
            let idx = self.idx;
            let b = self.bytes[idx];
            self.idx += 1;
            if b == b'"' && !has_odd_backslash_escape_bytes(self.bytes, idx) {
                self.in_string = !self.in_string;
                continue;
            }
            if !self.in_string {
                return Some((idx, b));
            }
        }
        None
    }
}

/// Split the argument text of a comparison call at its first top-level
/// comma.
///
/// `text` starts at the first compared argument; the opening parenthesis of
/// the call has already been consumed. A comma is top-level when it lies
/// outside string literals and outside any `()`, `{}` or `[]` nesting. The
/// scan stops at the parenthesis that closes the call, so commas in a
/// trailing comment are never taken as the boundary.
///
/// Returns the first argument and the remaining text after the comma and
/// its single-space separator. The remainder still carries the closing
/// parenthesis of the call; see [`strip_trailing_unmatched_paren`].
///
/// # Errors
/// Returns [`SplitError::MissingArgumentBoundary`] if no top-level comma
/// exists.
///
/// # Examples
///
/// ```
/// use go2md::split_top_level_args;
///
/// let (expected, rest) = split_top_level_args(r#""a,b", somevalue)"#).unwrap();
/// assert_eq!(expected, r#""a,b""#);
/// assert_eq!(rest, "somevalue)");
/// ```
pub fn split_top_level_args(text: &str) -> Result<(&str, &str), SplitError> {
    let mut parens: isize = 0;
    let mut brackets: isize = 0;
    for (idx, b) in CodeBytes::new(text) {
        match b {
            b'(' => parens += 1,
            b')' => {
                parens -= 1;
                if parens < 0 {
                    break;
                }
            }
            b'{' | b'[' => brackets += 1,
            b'}' | b']' => brackets -= 1,
            b',' if parens == 0 && brackets == 0 => {
                let rest = &text[idx + 1..];
                let rest = rest.strip_prefix(' ').unwrap_or(rest);
                return Ok((&text[..idx], rest));
            }
            _ => {}
        }
    }
    Err(SplitError::MissingArgumentBoundary {
        text: text.to_string(),
    })
}

/// Remove the closing parenthesis that has no opening partner in `text`.
///
/// `text` is the second argument of a call whose opening parenthesis was
/// stripped earlier, so the first `)` that drives the nesting depth below
/// zero belongs to the outer call. That byte is excised; balanced
/// parentheses of nested calls and anything after the call (such as a
/// trailing comment) are preserved. Text whose parentheses all balance is
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use go2md::strip_trailing_unmatched_paren;
///
/// assert_eq!(strip_trailing_unmatched_paren("append(s, 5))"), "append(s, 5)");
/// assert_eq!(strip_trailing_unmatched_paren("src2"), "src2");
/// ```
#[must_use]
pub fn strip_trailing_unmatched_paren(text: &str) -> Cow<'_, str> {
    let mut depth: isize = 0;
    for (idx, b) in CodeBytes::new(text) {
        match b {
            b'(' => depth += 1,
            b')' => {
                depth -= 1;
                if depth < 0 {
                    let mut out = String::with_capacity(text.len() - 1);
                    out.push_str(&text[..idx]);
                    out.push_str(&text[idx + 1..]);
                    return Cow::Owned(out);
                }
            }
            _ => {}
        }
    }
    Cow::Borrowed(text)
}

/// Rewrite the assertion call in `line` as `expected SYMBOL actual`.
///
/// Trailing whitespace is dropped before the call is located. Text that
/// precedes the call prefix, usually indentation, is kept. Lines without a
/// recognised call prefix are returned untouched.
///
/// # Errors
/// Returns [`SplitError::MissingArgumentBoundary`] when the call prefix is
/// present but its arguments cannot be separated.
///
/// # Examples
///
/// ```
/// use go2md::{Dialect, rewrite_assertion};
///
/// let d = Dialect::go();
/// let out = rewrite_assertion("assert.NotEqual(t, dst2, src2)", &d).unwrap();
/// assert_eq!(out, "dst2 ⇎ src2");
/// ```
pub fn rewrite_assertion<'a>(line: &'a str, dialect: &Dialect) -> Result<Cow<'a, str>, SplitError> {
    let trimmed = line.trim_end();
    let Some(call) = dialect.find_assertion(trimmed) else {
        return Ok(Cow::Borrowed(line));
    };
    let head = &trimmed[..call.start];
    let (expected, rest) = split_top_level_args(&trimmed[call.args_start..])?;
    let actual = strip_trailing_unmatched_paren(rest);
    trace!(comparison = ?call.comparison, expected, actual = %actual, "rewrote assertion");
    Ok(Cow::Owned(format!(
        "{head}{expected} {} {actual}",
        call.comparison.symbol()
    )))
}
