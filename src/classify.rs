//! Line classification for annotated source files.
//!
//! Each input line is tagged exactly once with a [`LineKind`]. The tag
//! depends on the line text and on the [`ClassifierState`] left behind by the
//! previous lines; the assembler in [`crate::convert`] then maps every tag to
//! one emission action.

use crate::dialect::Dialect;

/// State carried from one line to the next while converting a file.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClassifierState {
    /// Lines are dropped until a prose line or the ignore-end marker.
    pub ignoring: bool,
    /// A fenced code block is open and accumulating lines.
    pub inside_code_block: bool,
    /// The current line sits inside a test function body.
    pub inside_test_block: bool,
    /// 1-based number of the line being processed.
    pub line_counter: usize,
}

/// What a single line contributes to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    IgnoreStart,
    IgnoreEnd,
    /// Narrative text with the comment prefix removed.
    Prose(&'a str),
    TestStart,
    TestEnd,
    /// Non-blank source to be emitted inside a fenced block.
    Content,
    Blank,
    /// Dropped because an ignore block is active.
    Ignored,
}

/// Classify `line` against the markers of `dialect`.
///
/// Markers are case-sensitive line prefixes. Ignore toggles win over every
/// other category, and prose wins over test-body tracking, so a comment
/// inside a test function still ends up as narrative text.
///
/// # Examples
///
/// ```
/// use go2md::{ClassifierState, Dialect, LineKind, classify_line};
///
/// let state = ClassifierState::default();
/// let kind = classify_line("// # Slices", &state, &Dialect::go());
/// assert_eq!(kind, LineKind::Prose("# Slices"));
/// ```
#[must_use]
pub fn classify_line<'a>(line: &'a str, state: &ClassifierState, dialect: &Dialect) -> LineKind<'a> {
    if line.starts_with(&dialect.ignore_start) {
        return LineKind::IgnoreStart;
    }
    if line.starts_with(&dialect.ignore_end) {
        return LineKind::IgnoreEnd;
    }
    if let Some(text) = line.strip_prefix(dialect.prose.as_str()) {
        return LineKind::Prose(text);
    }
    if state.ignoring {
        return LineKind::Ignored;
    }
    if line.starts_with(&dialect.test_start) {
        return LineKind::TestStart;
    }
    if state.inside_test_block && line.starts_with(&dialect.test_end) {
        return LineKind::TestEnd;
    }
    if line.trim().is_empty() {
        LineKind::Blank
    } else {
        LineKind::Content
    }
}
