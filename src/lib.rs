//! Auction Loader Library
//!
//! A Rust library for converting nested XML auction documents into flat,
//! delimited relational tables ready for bulk loading.
//!
//! This library provides tools for:
//! - Streaming XML events through an explicit context stack
//! - Building typed records for nine output tables as elements open and close
//! - Normalizing currency and timestamp text into canonical forms
//! - Deduplicating records per table with strict or lenient key policies
//! - Writing one buffered, append-only file per table
//! - Finding ASCII characters that are safe to use as a delimiter

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod charset;
        pub mod dedup_ledger;
        pub mod dispatcher;
        pub mod normalizer;
        pub mod record_builder;
        pub mod row_sink;
    }
    pub mod adapters {
        pub mod filesystem;
        pub mod xml_source;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Attributes, DedupPolicy, ElementKind, Table};
pub use app::services::dispatcher::{DocumentProcessor, RunStats};
pub use app::services::record_builder::RowFormat;
pub use app::services::row_sink::{MemorySink, NullSink, RowSink, TableFiles};
pub use config::LoaderConfig;
pub use error::{LoaderError, Result};
