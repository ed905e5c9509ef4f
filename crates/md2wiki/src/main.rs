//! md2wiki CLI - Markdown to Confluence wiki markup.
//!
//! Reads a Markdown file (or standard input with `-`), converts it, and
//! writes the wiki markup to the diagnostic stream.

mod error;
mod output;

use std::io::Read;
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use error::CliError;
use output::Output;

/// Markdown to Confluence wiki markup converter.
#[derive(Parser)]
#[command(name = "md2wiki", version, about)]
struct Cli {
    /// Path to the markdown file, or "-" to read from standard input.
    markdown_file: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    // Log level comes from RUST_LOG; silent by default.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let output = Output::new();
    match run(&cli) {
        Ok(markup) => output.print(&markup),
        Err(err) => {
            output.error(&format!("Error: {err}"));
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> Result<String, CliError> {
    let source = read_source(cli)?;
    tracing::debug!(bytes = source.len(), "read markdown source");
    Ok(md2wiki_core::convert(&source)?)
}

fn read_source(cli: &Cli) -> Result<String, CliError> {
    if cli.markdown_file.as_os_str() == "-" {
        let mut source = String::new();
        std::io::stdin().read_to_string(&mut source)?;
        Ok(source)
    } else {
        Ok(std::fs::read_to_string(&cli.markdown_file)?)
    }
}
