//! Line markers recognised by the converter.
//!
//! A [`Dialect`] names every prefix the classifier looks for, the language
//! tag written on fence openers, and the assertion calls the splitter
//! rewrites. [`Dialect::go`] reproduces the conventions of annotated Go test
//! files, and is what the command-line tool uses.

use std::sync::LazyLock;

use regex::Regex;

use crate::lazy_regex;

/// Glyph placed between the two arguments of an equality assertion.
pub const EQUALS_SYMBOL: &str = "⇔";

/// Glyph placed between the two arguments of an inequality assertion.
pub const NOT_EQUALS_SYMBOL: &str = "⇎";

const GO_EQUALS_PREFIX: &str = "assert.Equal(t, ";
const GO_NOT_EQUALS_PREFIX: &str = "assert.NotEqual(t, ";

static GO_ASSERTION_RE: LazyLock<Regex> = lazy_regex!(
    &assertion_pattern(GO_EQUALS_PREFIX, GO_NOT_EQUALS_PREFIX),
    "valid Go assertion regex"
);

/// Alternation matching either literal prefix, naming the matched side.
fn assertion_pattern(equals: &str, not_equals: &str) -> String {
    format!(
        "(?P<eq>{})|(?P<ne>{})",
        regex::escape(equals),
        regex::escape(not_equals)
    )
}

/// Which comparison an assertion call expresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equals,
    NotEquals,
}

impl Comparison {
    /// The glyph written between the rewritten arguments.
    #[must_use]
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Equals => EQUALS_SYMBOL,
            Self::NotEquals => NOT_EQUALS_SYMBOL,
        }
    }
}

/// A recognised assertion prefix inside a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssertionCall {
    /// Byte offset where the call prefix starts.
    pub start: usize,
    /// Byte offset just past the prefix, i.e. where the first compared
    /// argument begins.
    pub args_start: usize,
    pub comparison: Comparison,
}

/// Markers and call prefixes for one annotated source language.
#[derive(Debug, Clone)]
pub struct Dialect {
    pub ignore_start: String,
    pub ignore_end: String,
    /// Comment token followed by one space.
    pub prose: String,
    pub test_start: String,
    pub test_end: String,
    /// Info string written after the opening fence.
    pub language: String,
    assertion_re: Regex,
}

impl Dialect {
    /// Markers for annotated Go test files.
    #[must_use]
    pub fn go() -> Self {
        Self {
            ignore_start: "// Ignore-On".to_string(),
            ignore_end: "// Ignore-Off".to_string(),
            prose: "// ".to_string(),
            test_start: "func Test_".to_string(),
            test_end: "}".to_string(),
            language: "go".to_string(),
            assertion_re: GO_ASSERTION_RE.clone(),
        }
    }

    /// Replace the assertion call prefixes.
    ///
    /// Both prefixes are matched literally and must include everything up
    /// to the first compared argument, e.g. `assert.Equal(t, `.
    ///
    /// # Errors
    /// Returns an error if the combined pattern exceeds the regex size limit.
    pub fn with_assertions(mut self, equals: &str, not_equals: &str) -> Result<Self, regex::Error> {
        self.assertion_re = Regex::new(&assertion_pattern(equals, not_equals))?;
        Ok(self)
    }

    /// Locate the first assertion call prefix in `line`.
    #[must_use]
    pub fn find_assertion(&self, line: &str) -> Option<AssertionCall> {
        let caps = self.assertion_re.captures(line)?;
        let (m, comparison) = match (caps.name("eq"), caps.name("ne")) {
            (Some(m), _) => (m, Comparison::Equals),
            (None, Some(m)) => (m, Comparison::NotEquals),
            (None, None) => return None,
        };
        Some(AssertionCall {
            start: m.start(),
            args_start: m.end(),
            comparison,
        })
    }
}

impl Default for Dialect {
    fn default() -> Self {
        Self::go()
    }
}
