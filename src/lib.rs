//! Library for turning annotated Go sources into Markdown.
//!
//! Comment lines become prose, runs of code become fenced blocks headed by a
//! link back to the source line, and `assert.Equal` / `assert.NotEqual`
//! calls inside test bodies are rewritten as `expected ⇔ actual`.

mod macros;

pub mod assertions;
pub mod classify;
pub mod convert;
pub mod dialect;
pub mod io;

#[doc(hidden)]
pub mod test_utils;

pub use assertions::{
    SplitError,
    rewrite_assertion,
    split_top_level_args,
    strip_trailing_unmatched_paren,
};
pub use classify::{ClassifierState, LineKind, classify_line};
pub use convert::{ConvertError, ConvertOptions, Converter, anchor_header, convert_lines};
pub use dialect::{Comparison, Dialect, EQUALS_SYMBOL, NOT_EQUALS_SYMBOL};
pub use io::convert_file;
