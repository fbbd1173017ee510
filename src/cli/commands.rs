//! Command implementations for the auction loader CLI
//!
//! `run` wires the pieces together: logging, configuration, input discovery,
//! the table sink, the document loop and the final summary.

use crate::app::adapters::filesystem::discover_inputs;
use crate::app::adapters::xml_source::process_file;
use crate::app::models::Table;
use crate::app::services::dispatcher::{DocumentProcessor, RunStats};
use crate::app::services::row_sink::{NullSink, RowSink, TableFiles};
use crate::cli::args::{Args, SummaryFormat};
use crate::config::LoaderConfig;
use crate::error::{LoaderError, Result};
use colored::*;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// Main entry point for the loader binary
pub fn run(args: Args) -> Result<RunStats> {
    setup_logging(&args)?;

    let config = args.to_config()?;
    debug!("Resolved configuration: {:?}", config);

    let start = Instant::now();
    let stats = load(&config, &args.inputs, args.show_progress())?;
    let elapsed = start.elapsed();

    info!("{}", stats.summary());
    match args.summary_format {
        SummaryFormat::Human => print_human_summary(&stats, &config, elapsed),
        SummaryFormat::Json => print_json_summary(&stats, &config, elapsed)?,
    }
    Ok(stats)
}

/// Load every input into the configured tables
///
/// Table files are flushed even when loading fails, so rows written before
/// a fatal error are kept.
pub fn load(config: &LoaderConfig, inputs: &[PathBuf], show_progress: bool) -> Result<RunStats> {
    let files = discover_inputs(inputs)?;
    info!("Loading {} documents", files.len());

    let sink: Box<dyn RowSink> = if config.dry_run {
        info!("Dry run: table files will not be written");
        Box::new(NullSink)
    } else {
        Box::new(TableFiles::create(
            &config.output_dir,
            &config.extension,
            config.write_buffer_bytes,
        )?)
    };

    let mut processor = DocumentProcessor::new(sink, config.row_format());
    let outcome = load_files(&files, &mut processor, config, show_progress);
    let flushed = processor.flush();

    if let Err(e) = &outcome {
        error!("Load aborted: {}", e);
    }
    outcome?;
    flushed?;

    let (_, stats) = processor.into_parts();
    Ok(stats)
}

fn load_files<S: RowSink>(
    files: &[PathBuf],
    processor: &mut DocumentProcessor<S>,
    config: &LoaderConfig,
    show_progress: bool,
) -> Result<()> {
    let pb = if show_progress {
        create_progress_bar(files.len() as u64, "Loading documents")
    } else {
        ProgressBar::hidden()
    };

    for file in files {
        pb.set_message(format!("Loading {}", display_name(file)));
        if let Err(e) = process_file(file, processor, config.read_buffer_bytes) {
            pb.abandon_with_message(format!("Failed on {}", display_name(file)));
            return Err(e);
        }
        pb.inc(1);
    }

    pb.finish_with_message(format!("Loaded {} documents", files.len()));
    Ok(())
}

/// Set up structured logging
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("auction_loader={}", log_level)));

    let initialized = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };
    initialized.map_err(|e| {
        LoaderError::configuration(format!("Failed to initialize logging: {}", e))
    })?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Create a progress bar with appropriate styling
pub fn create_progress_bar(total: u64, message: &str) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb.set_message(message.to_string());
    pb
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

// =============================================================================
// Summary
// =============================================================================

fn print_human_summary(stats: &RunStats, config: &LoaderConfig, elapsed: Duration) {
    println!("\n{}", "Auction Load Complete".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   • Documents loaded: {}", stats.documents);
    println!("   • Rows written: {}", stats.total_rows());
    println!("   • Duplicates skipped: {}", stats.total_duplicates());
    if stats.timestamp_fallbacks > 0 {
        println!(
            "   • {} {}",
            "Unparsed timestamps kept as-is:".yellow(),
            stats.timestamp_fallbacks
        );
    }
    println!("   • Load time: {}", HumanDuration(elapsed));

    println!("\n{}", "Tables:".bold());
    for table in Table::ALL {
        let skipped = stats.duplicates(table);
        let suffix = if skipped > 0 {
            format!(" ({} duplicates skipped)", skipped).dimmed().to_string()
        } else {
            String::new()
        };
        println!(
            "   • {:<22} {:>10}{}",
            table.file_name(&config.extension),
            stats.rows(table),
            suffix
        );
    }

    if config.dry_run {
        println!("\n{}", "Dry run: no table files were written".yellow());
    } else {
        println!("\nOutput directory: {}", config.output_dir.display());
    }
    println!();
}

fn print_json_summary(stats: &RunStats, config: &LoaderConfig, elapsed: Duration) -> Result<()> {
    let report = serde_json::json!({
        "stats": stats,
        "output_dir": config.output_dir,
        "dry_run": config.dry_run,
        "elapsed_seconds": elapsed.as_secs_f64(),
    });
    let rendered = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
    println!("{}", rendered);
    Ok(())
}
