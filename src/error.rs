//! Error handling for auction document loading.
//!
//! Every fatal condition of a run is a variant of [`LoaderError`]. The only
//! recoverable parse failure (timestamps) never reaches this type: it is
//! logged and passed through by the normalizer.

use crate::app::models::{ElementKind, Table};
use crate::constants::{EXIT_FAILURE, EXIT_MALFORMED_CURRENCY};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to access {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("XML error in {path} at byte {position}: {source}")]
    Xml {
        path: PathBuf,
        position: usize,
        #[source]
        source: quick_xml::Error,
    },

    #[error("Malformed currency value: {value:?}")]
    MalformedCurrency { value: String },

    #[error("Unknown element <{name}> under {parent}")]
    UnknownElement { name: String, parent: String },

    #[error("Unexpected <{element}> under {parent}")]
    UnexpectedNesting { element: String, parent: String },

    #[error("Repeated <{element}> under {parent}: field already complete")]
    RepeatedField { element: ElementKind, parent: String },

    #[error("Bidder {bidder} has a location with coordinates")]
    UnexpectedCoordinates { bidder: String },

    #[error("Duplicate {table} key: {key:?}")]
    DuplicateKey { table: Table, key: String },

    #[error("Truncated document: unclosed {unclosed}")]
    TruncatedDocument { unclosed: String },

    #[error("Missing required field {table}.{field}")]
    MissingRequiredField { table: Table, field: &'static str },

    #[error("Input not found: {path}")]
    InputNotFound { path: PathBuf },

    #[error("Invalid glob pattern {pattern:?}: {source}")]
    InvalidGlob {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error("Directory traversal failed: {0}")]
    DirectoryTraversal(#[from] walkdir::Error),

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl LoaderError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            LoaderError::MalformedCurrency { .. } => EXIT_MALFORMED_CURRENCY,
            _ => EXIT_FAILURE,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn unexpected_nesting(element: impl Into<String>, parent: Option<ElementKind>) -> Self {
        Self::UnexpectedNesting {
            element: element.into(),
            parent: describe_parent(parent),
        }
    }
}

/// Human-readable parent context for error messages
pub fn describe_parent(parent: Option<ElementKind>) -> String {
    match parent {
        Some(kind) => format!("<{}>", kind),
        None => "document root".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, LoaderError>;
