//! Command-line argument definitions for the auction loader
//!
//! This module defines the CLI interface using the clap derive API and
//! resolves it, together with an optional configuration file, into a
//! [`LoaderConfig`].

use crate::config::{LoaderConfig, parse_delimiter};
use crate::error::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the auction document loader
///
/// Converts XML auction documents into nine delimited tables ready for bulk
/// loading into a relational database.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "auction_loader",
    version,
    about = "Convert XML auction listings into delimited relational tables",
    long_about = "Streams XML auction documents (items, bids, bidders, sellers, categories \
                  and locations) and writes one delimited file per relation: listing, \
                  listing_category, listing_buy_price, bid, bidder, bidder_location, \
                  bidder_country, seller and listing_coordinates. Duplicate listings or \
                  bids abort the run; repeated bidders, sellers and categories are written once."
)]
pub struct Args {
    /// Input documents, directories or glob patterns
    ///
    /// Directories are searched recursively for .xml files. Inputs are loaded
    /// in the order given and share one deduplication ledger.
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub inputs: Vec<PathBuf>,

    /// Directory receiving the table files
    ///
    /// Created if it does not exist. Existing table files are overwritten.
    #[arg(
        short = 'o',
        long = "output-dir",
        value_name = "DIR",
        help = "Directory receiving the table files [default: .]"
    )]
    pub output_dir: Option<PathBuf>,

    /// Extension for the table files
    #[arg(
        long = "extension",
        value_name = "EXT",
        help = "Extension for the table files [default: dat]"
    )]
    pub extension: Option<String>,

    /// Column delimiter
    ///
    /// A single character. `\t` is accepted for tab. Use the unused-chars
    /// tool to find a character that never occurs in the input.
    #[arg(
        long = "delimiter",
        value_name = "CHAR",
        help = "Column delimiter [default: tab]"
    )]
    pub delimiter: Option<String>,

    /// Maximum description length in characters
    #[arg(
        long = "description-limit",
        value_name = "N",
        help = "Maximum description length written [default: 4000]"
    )]
    pub description_limit: Option<usize>,

    /// Path to configuration file
    ///
    /// JSON file with any of the keys output_dir, extension, delimiter,
    /// description_limit, dry_run, read_buffer_bytes and write_buffer_bytes.
    /// Command-line flags take precedence.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Parse and validate without writing table files
    #[arg(
        long = "dry-run",
        help = "Parse and validate the input without writing table files"
    )]
    pub dry_run: bool,

    /// Format of the end-of-run summary
    #[arg(
        long = "summary-format",
        value_enum,
        default_value = "human",
        help = "Format of the run summary printed on completion"
    )]
    pub summary_format: SummaryFormat,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output (quiet mode)
    ///
    /// Only show errors. Overrides verbose settings.
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format options for the run summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SummaryFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }

    /// Resolve the configuration file (if any) and apply flag overrides
    pub fn to_config(&self) -> Result<LoaderConfig> {
        let mut config = match &self.config_file {
            Some(path) => LoaderConfig::from_file(path)?,
            None => LoaderConfig::default(),
        };

        if let Some(output_dir) = &self.output_dir {
            config = config.with_output_dir(output_dir);
        }
        if let Some(extension) = &self.extension {
            config = config.with_extension(extension);
        }
        if let Some(delimiter) = &self.delimiter {
            config = config.with_delimiter(parse_delimiter(delimiter)?);
        }
        if let Some(limit) = self.description_limit {
            config = config.with_description_limit(limit);
        }
        if self.dry_run {
            config = config.with_dry_run();
        }

        config.validate()?;
        Ok(config)
    }
}
