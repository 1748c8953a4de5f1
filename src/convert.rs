//! Assemble Markdown from classified source lines.
//!
//! [`Converter`] owns the classifier state and the output buffer for one
//! input file. Lines are pushed one at a time and never revisited;
//! [`Converter::finish`] closes a trailing fence and hands back the document.

use std::path::Path;

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    assertions::{SplitError, rewrite_assertion},
    classify::{ClassifierState, LineKind, classify_line},
    dialect::Dialect,
};

/// Settings applied to every converted file.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    /// Prefix placed verbatim before the file name in source links.
    pub src_root: String,
    pub dialect: Dialect,
}

/// Errors raised while converting a file.
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("unable to read file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed assertion on line {line}")]
    MalformedAssertion {
        line: usize,
        #[source]
        source: SplitError,
    },
}

const CLOSE_FENCE: &str = "```\n";

/// Streaming converter for a single annotated source file.
#[derive(Debug)]
pub struct Converter<'o> {
    file_name: String,
    base_name: String,
    options: &'o ConvertOptions,
    state: ClassifierState,
    out: String,
}

impl<'o> Converter<'o> {
    /// Start converting the file known as `file_name`.
    ///
    /// The name appears verbatim in source links; its last path component is
    /// used as the link text.
    #[must_use]
    pub fn new(file_name: &str, options: &'o ConvertOptions) -> Self {
        let base_name = Path::new(file_name)
            .file_name()
            .map_or_else(|| file_name.to_string(), |n| n.to_string_lossy().into_owned());
        Self {
            file_name: file_name.to_string(),
            base_name,
            options,
            state: ClassifierState::default(),
            out: String::new(),
        }
    }

    /// State after the most recent line.
    #[must_use]
    pub fn state(&self) -> &ClassifierState {
        &self.state
    }

    /// Process the next line of the file.
    ///
    /// # Errors
    /// Returns [`ConvertError::MalformedAssertion`] if a test-body line holds
    /// an assertion call whose arguments cannot be split.
    pub fn push_line(&mut self, line: &str) -> Result<(), ConvertError> {
        self.state.line_counter += 1;
        match classify_line(line, &self.state, &self.options.dialect) {
            LineKind::IgnoreStart => self.toggle_ignore(true),
            LineKind::IgnoreEnd => self.toggle_ignore(false),
            LineKind::Prose(text) => self.emit_prose(text),
            LineKind::TestStart => self.state.inside_test_block = true,
            LineKind::TestEnd => self.state.inside_test_block = false,
            LineKind::Content => self.emit_code(line)?,
            LineKind::Blank => self.out.push('\n'),
            LineKind::Ignored => trace!(line = self.state.line_counter, "ignored"),
        }
        Ok(())
    }

    /// Close any open fence and return the finished document.
    #[must_use]
    pub fn finish(mut self) -> String {
        self.close_block();
        self.out
    }

    fn toggle_ignore(&mut self, ignoring: bool) {
        debug!(line = self.state.line_counter, ignoring, "ignore toggle");
        self.close_block();
        self.state.ignoring = ignoring;
        self.state.inside_test_block = false;
    }

    fn emit_prose(&mut self, text: &str) {
        self.state.ignoring = false;
        self.close_block();
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn emit_code(&mut self, line: &str) -> Result<(), ConvertError> {
        if !self.state.inside_code_block {
            self.open_block();
        }
        if self.state.inside_test_block {
            let line = rewrite_assertion(line, &self.options.dialect).map_err(|source| {
                ConvertError::MalformedAssertion {
                    line: self.state.line_counter,
                    source,
                }
            })?;
            self.out.push_str(strip_first_char(&line));
        } else {
            self.out.push_str(line);
        }
        self.out.push('\n');
        Ok(())
    }

    fn open_block(&mut self) {
        debug!(line = self.state.line_counter, "opening code block");
        let header = anchor_header(
            &self.base_name,
            &self.options.src_root,
            &self.file_name,
            self.state.line_counter,
        );
        self.out.push_str(&header);
        self.out.push_str("\n``` ");
        self.out.push_str(&self.options.dialect.language);
        self.out.push('\n');
        self.state.inside_code_block = true;
    }

    fn close_block(&mut self) {
        if self.state.inside_code_block {
            self.out.push_str(CLOSE_FENCE);
            self.state.inside_code_block = false;
        }
    }
}

/// Build the link line that precedes every code block.
///
/// # Examples
///
/// ```
/// use go2md::anchor_header;
///
/// assert_eq!(
///     anchor_header("a_test.go", "https://host/", "src/a_test.go", 7),
///     "\n\nSource: [a_test.go](https://host/src/a_test.go#L7) | [Top](#top)\n\n"
/// );
/// ```
#[must_use]
pub fn anchor_header(base_name: &str, src_root: &str, file_name: &str, line: usize) -> String {
    format!("\n\nSource: [{base_name}]({src_root}{file_name}#L{line}) | [Top](#top)\n\n")
}

/// Drop the leading indentation character of a test-body line.
fn strip_first_char(line: &str) -> &str {
    let mut chars = line.chars();
    chars.next();
    chars.as_str()
}

/// Convert an in-memory sequence of lines.
///
/// # Errors
/// Returns [`ConvertError::MalformedAssertion`] as described on
/// [`Converter::push_line`].
pub fn convert_lines<S: AsRef<str>>(
    file_name: &str,
    lines: &[S],
    options: &ConvertOptions,
) -> Result<String, ConvertError> {
    let mut converter = Converter::new(file_name, options);
    for line in lines {
        converter.push_line(line.as_ref())?;
    }
    Ok(converter.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_lines;

    fn convert(lines: &[String]) -> String {
        convert_lines("pkg/sample_test.go", lines, &ConvertOptions::default()).expect("convert")
    }

    const HEADER_L2: &str =
        "\n\nSource: [sample_test.go](pkg/sample_test.go#L2) | [Top](#top)\n\n\n``` go\n";

    #[test]
    fn prose_then_code() {
        let input = source_lines!["// # Title", "package sample", "// More"];
        let expected = format!("# Title\n{HEADER_L2}package sample\n```\nMore\n");
        assert_eq!(convert(&input), expected);
    }

    #[test]
    fn code_lines_pass_through_verbatim() {
        let input = source_lines!["// x", "  weird := `a, b)`   ", "\tassert.Equal(t, 1, 2)"];
        let out = convert(&input);
        assert!(out.contains("\n  weird := `a, b)`   \n"));
        assert!(out.contains("\n\tassert.Equal(t, 1, 2)\n"));
    }

    #[test]
    fn eof_closes_block_once() {
        let input = source_lines!["// x", "var a = 1", "var b = 2"];
        let out = convert(&input);
        assert!(out.ends_with("var b = 2\n```\n"));
        assert_eq!(out.matches("```\n").count(), 1);
    }

    #[test]
    fn ignore_block_is_excluded_and_fence_closed_once() {
        let input = source_lines![
            "// x",
            "var kept = 1",
            "// Ignore-On",
            "var hidden = 2",
            "",
            "// Ignore-Off",
            "var shown = 3",
        ];
        let out = convert(&input);
        assert!(!out.contains("hidden"));
        assert_eq!(out.matches("```\n").count(), 2);
        assert!(out.contains("var kept = 1\n```\n\n\nSource:"));
        assert!(out.contains("#L7)"));
    }

    #[test]
    fn prose_ends_ignoring() {
        let input = source_lines!["// Ignore-On", "package p", "// Back", "var x = 1"];
        let out = convert(&input);
        assert!(out.starts_with("Back\n"));
        assert!(!out.contains("package p"));
        assert!(out.contains("#L4)"));
    }

    #[test]
    fn test_bodies_are_dedented_and_rewritten() {
        let input = source_lines![
            "// ## Init",
            "func Test_Init(t *testing.T) {",
            "\tvar s []int",
            "\t// Assertions",
            "\tassert.Equal(t, []int{5}, append(s, 5))",
            "}",
            "var after = 1",
        ];
        let out = convert(&input);
        let header = "\n\nSource: [sample_test.go](pkg/sample_test.go#L3) | [Top](#top)\n\n\n``` go\n";
        let expected = format!(
            "## Init\n{header}var s []int\n// Assertions\n[]int{{5}} ⇔ append(s, 5)\nvar after = 1\n```\n"
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn blank_lines_emit_newline_only() {
        let input = source_lines!["// a", "   ", "// b"];
        assert_eq!(convert(&input), "a\n\nb\n");
    }

    #[test]
    fn malformed_assertion_reports_line() {
        let input = source_lines!["func Test_X(t *testing.T) {", "\tassert.Equal(t, f(a, b))", "}"];
        let err = convert_lines("x_test.go", &input, &ConvertOptions::default()).unwrap_err();
        assert!(matches!(err, ConvertError::MalformedAssertion { line: 2, .. }));
    }

    #[test]
    fn src_root_prefixes_links() {
        let options = ConvertOptions {
            src_root: "https://example.com/blob/main/".to_string(),
            ..ConvertOptions::default()
        };
        let out = convert_lines("src/a_test.go", &["x := 1"], &options).expect("convert");
        assert!(out.contains("[a_test.go](https://example.com/blob/main/src/a_test.go#L1)"));
    }

    #[test]
    fn ignore_toggle_ends_test_body() {
        let input = source_lines![
            "func Test_A(t *testing.T) {",
            "\tx := 1",
            "// Ignore-On",
            "}",
            "// Ignore-Off",
            "var after = 1",
        ];
        let out = convert(&input);
        assert!(out.ends_with("\nvar after = 1\n```\n"));
        assert!(out.starts_with(
            "\n\nSource: [sample_test.go](pkg/sample_test.go#L2) | [Top](#top)\n\n\n``` go\nx := 1\n```\n"
        ));
    }

    #[test]
    fn state_resets_per_converter() {
        let options = ConvertOptions::default();
        let mut c = Converter::new("a.go", &options);
        c.push_line("// Ignore-On").expect("line");
        c.push_line("func Test_A(t *testing.T) {").expect("line");
        assert!(c.state().ignoring);
        assert_eq!(c.state().line_counter, 2);
        let fresh = Converter::new("a.go", &options);
        assert_eq!(fresh.state(), &ClassifierState::default());
    }
}
