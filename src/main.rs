use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context;
use clap::{CommandFactory, Parser};
use go2md::{ConvertOptions, convert_file};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "GO2MD_LOG";

#[derive(Parser)]
#[command(
    version,
    about = "Go to Markdown (go2md) converts annotated .go files to Markdown"
)]
struct Cli {
    /// Prefix prepended to file names in source links
    #[arg(short = 'r', long = "src-root", value_name = "SRC_ROOT", default_value = "")]
    src_root: String,
    /// Go source files to convert, in order
    files: Vec<PathBuf>,
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Entry point for the command-line converter.
///
/// Each file is announced on stderr, converted, and its Markdown written to
/// stdout before the next file is read. The first failure stops the run and
/// is reported on stderr with a non-zero exit status.
///
/// # Examples
///
/// ```sh
/// # Convert two files, linking sources relative to a repository URL
/// go2md -r https://github.com/user/repo/blob/master/ src/slices/slices_test.go src/maps/maps_test.go
/// ```
fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    if cli.files.is_empty() {
        Cli::command().print_help()?;
        return Ok(());
    }

    let options = ConvertOptions {
        src_root: cli.src_root,
        ..ConvertOptions::default()
    };
    let mut stdout = io::stdout().lock();
    for path in &cli.files {
        eprintln!("{}", path.display());
        let markdown = convert_file(path, &options)
            .with_context(|| format!("failed to convert {}", path.display()))?;
        stdout.write_all(markdown.as_bytes())?;
        stdout.flush()?;
    }
    Ok(())
}
