//! Helper utilities for tests.

/// Collect a list of source lines (or anything that can become a `String`)
/// into a `Vec<String>`, ready to feed to the converter.
#[macro_export]
macro_rules! source_lines {
    ( $($elem:expr),* $(,)? ) => {
        vec![ $( ::std::string::ToString::to_string(&$elem) ),* ]
    };
}
