//! Report the 7-bit ASCII characters that never occur in the input
//!
//! Reads the files given as arguments, or stdin when there are none, and
//! prints one line per unused character: its escaped form, a tab, and its
//! code point. Any of them is a safe `--delimiter` for `auction_loader`.

use anyhow::{Context, Result};
use auction_loader::app::services::charset::{CharsetScanner, report_line};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "unused-chars",
    version,
    about = "List ASCII characters absent from the input, for choosing a delimiter"
)]
struct Args {
    /// Files to scan; stdin when omitted
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut scanner = CharsetScanner::new();

    if args.files.is_empty() {
        scanner
            .scan(io::stdin().lock())
            .context("Failed to read stdin")?;
    } else {
        for path in &args.files {
            let file =
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            scanner
                .scan(file)
                .with_context(|| format!("Failed to read {}", path.display()))?;
        }
    }

    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for code in scanner.unused() {
        writeln!(out, "{}", report_line(code))?;
    }
    out.flush()?;
    Ok(())
}
