//! Utility helpers shared across integration tests.

use std::{
    fs::File,
    io::Write,
    path::{Path, PathBuf},
};

/// Build a `Vec<String>` from a list of string slices.
///
/// Used to spell out annotated source files line by line, so trailing
/// spaces and tabs stay visible in the test body.
macro_rules! lines_vec {
    ($($line:expr),* $(,)?) => {
        vec![$($line.to_string()),*]
    };
}

/// Write `lines` to `dir/name`, one per line, and return the path.
pub fn write_source(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    let mut f = File::create(&path).expect("failed to create source file");
    for line in lines {
        writeln!(f, "{line}").expect("failed to write line");
    }
    f.flush().expect("failed to flush file");
    path
}

/// The header and fence opener emitted before a code block.
pub fn block_header(base: &str, link: &str, line: usize) -> String {
    format!("\n\nSource: [{base}]({link}#L{line}) | [Top](#top)\n\n\n``` go\n")
}
