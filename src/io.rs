//! File helpers for converting annotated sources.

use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use tracing::debug;

use crate::convert::{ConvertError, ConvertOptions, Converter};

/// Convert the file at `path` to Markdown.
///
/// The file is streamed line by line and closed before returning, whether
/// conversion succeeds or fails.
///
/// # Errors
/// Returns [`ConvertError::Io`] if the file cannot be opened or read, and
/// [`ConvertError::MalformedAssertion`] if an assertion line cannot be split.
pub fn convert_file(path: &Path, options: &ConvertOptions) -> Result<String, ConvertError> {
    let name = path.to_string_lossy();
    let io_err = |source| ConvertError::Io {
        path: name.to_string(),
        source,
    };
    let reader = BufReader::new(File::open(path).map_err(io_err)?);
    let mut converter = Converter::new(&name, options);
    for line in reader.lines() {
        converter.push_line(&line.map_err(io_err)?)?;
    }
    debug!(file = %name, lines = converter.state().line_counter, "converted");
    Ok(converter.finish())
}
