//! Helper macros used across the crate.

/// Lazily compile a [`Regex`] with a custom panic message.
///
/// The pattern is a literal known at compile time, so a failure to compile
/// is a bug in the crate rather than a runtime condition.
///
/// # Examples
///
/// ```
/// use std::sync::LazyLock;
///
/// use regex::Regex;
/// static CALL_RE: LazyLock<Regex> = go2md::lazy_regex!(r"assert\.\w+\(", "assert call");
/// assert!(CALL_RE.is_match("\tassert.Equal(t, 1, x)"));
/// ```
#[macro_export]
macro_rules! lazy_regex {
    ($pattern:expr, $msg:expr $(,)?) => {
        LazyLock::new(|| Regex::new($pattern).expect($msg))
    };
}
