//! Configuration management and validation.
//!
//! Provides the loader configuration: where tables are written, how rows are
//! formatted and how large the I/O buffers are. A configuration can be read
//! from a JSON file and then refined with builder methods, which is how CLI
//! flags override file settings.

use crate::app::services::record_builder::RowFormat;
use crate::constants::{
    DEFAULT_DELIMITER, DEFAULT_EXTENSION, DEFAULT_OUTPUT_DIR, DEFAULT_READ_BUFFER_BYTES,
    DEFAULT_WRITE_BUFFER_BYTES, DESCRIPTION_MAX_CHARS,
};
use crate::error::{LoaderError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings for one loader run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Directory receiving the table files
    pub output_dir: PathBuf,

    /// Extension of the table files, without the dot
    pub extension: String,

    /// Column delimiter
    pub delimiter: char,

    /// Maximum description length written, in characters
    pub description_limit: usize,

    /// Parse and validate without writing any table file
    pub dry_run: bool,

    /// Read buffer per input document, in bytes
    pub read_buffer_bytes: usize,

    /// Write buffer per table file, in bytes
    pub write_buffer_bytes: usize,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            extension: DEFAULT_EXTENSION.to_string(),
            delimiter: DEFAULT_DELIMITER,
            description_limit: DESCRIPTION_MAX_CHARS,
            dry_run: false,
            read_buffer_bytes: DEFAULT_READ_BUFFER_BYTES,
            write_buffer_bytes: DEFAULT_WRITE_BUFFER_BYTES,
        }
    }
}

impl LoaderConfig {
    /// Load a configuration from a JSON file; missing keys take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| LoaderError::FileAccess {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            LoaderError::configuration(format!(
                "Invalid configuration file '{}': {}",
                path.display(),
                e
            ))
        })?;
        debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Set the output directory
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// Set the table file extension
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Set the column delimiter
    pub fn with_delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Set the description length limit
    pub fn with_description_limit(mut self, limit: usize) -> Self {
        self.description_limit = limit;
        self
    }

    /// Enable dry-run mode
    pub fn with_dry_run(mut self) -> Self {
        self.dry_run = true;
        self
    }

    /// Set the read buffer size
    pub fn with_read_buffer_bytes(mut self, bytes: usize) -> Self {
        self.read_buffer_bytes = bytes;
        self
    }

    /// Set the write buffer size
    pub fn with_write_buffer_bytes(mut self, bytes: usize) -> Self {
        self.write_buffer_bytes = bytes;
        self
    }

    /// Row formatting derived from this configuration
    pub fn row_format(&self) -> RowFormat {
        RowFormat {
            delimiter: self.delimiter,
            description_limit: self.description_limit,
        }
    }

    /// Reject settings that would produce unreadable tables
    pub fn validate(&self) -> Result<()> {
        if matches!(self.delimiter, '\n' | '\r') {
            return Err(LoaderError::configuration(
                "Delimiter cannot be a line terminator",
            ));
        }
        if self.description_limit == 0 {
            return Err(LoaderError::configuration(
                "Description limit must be greater than 0",
            ));
        }
        if self.extension.contains(['/', '\\']) {
            return Err(LoaderError::configuration(format!(
                "Extension '{}' must not contain a path separator",
                self.extension
            )));
        }
        if self.read_buffer_bytes == 0 || self.write_buffer_bytes == 0 {
            return Err(LoaderError::configuration(
                "Buffer sizes must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Parse a delimiter argument, accepting `\t` as an escape for tab
pub fn parse_delimiter(value: &str) -> Result<char> {
    if value == "\\t" {
        return Ok('\t');
    }

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(delimiter), None) => Ok(delimiter),
        _ => Err(LoaderError::configuration(format!(
            "Delimiter must be a single character, got {:?}",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LoaderConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("."));
        assert_eq!(config.extension, "dat");
        assert_eq!(config.delimiter, '\t');
        assert_eq!(config.description_limit, 4000);
        assert!(!config.dry_run);
        assert!(config.validate().is_ok());
        assert_eq!(config.row_format(), RowFormat::default());
    }

    #[test]
    fn test_builder_pattern() {
        let config = LoaderConfig::default()
            .with_output_dir("/tmp/out")
            .with_extension("tsv")
            .with_delimiter('|')
            .with_description_limit(100)
            .with_dry_run();

        assert_eq!(config.output_dir, PathBuf::from("/tmp/out"));
        assert_eq!(config.extension, "tsv");
        assert_eq!(config.row_format().delimiter, '|');
        assert_eq!(config.row_format().description_limit, 100);
        assert!(config.dry_run);
    }

    #[test]
    fn test_partial_json_file_uses_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"extension": "csv", "delimiter": ","}}"#).unwrap();

        let config = LoaderConfig::from_file(file.path()).unwrap();
        assert_eq!(config.extension, "csv");
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.description_limit, 4000);
    }

    #[test]
    fn test_malformed_json_is_configuration_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        assert!(matches!(
            LoaderConfig::from_file(file.path()),
            Err(LoaderError::Configuration { .. })
        ));
    }

    #[test]
    fn test_validation_rejects_bad_settings() {
        assert!(LoaderConfig::default().with_delimiter('\n').validate().is_err());
        assert!(LoaderConfig::default().with_description_limit(0).validate().is_err());
        assert!(LoaderConfig::default().with_extension("a/b").validate().is_err());
        assert!(LoaderConfig::default().with_write_buffer_bytes(0).validate().is_err());
    }

    #[test]
    fn test_parse_delimiter() {
        assert_eq!(parse_delimiter("\\t").unwrap(), '\t');
        assert_eq!(parse_delimiter("\t").unwrap(), '\t');
        assert_eq!(parse_delimiter("|").unwrap(), '|');
        assert_eq!(parse_delimiter("\u{1f}").unwrap(), '\u{1f}');
        assert!(parse_delimiter("ab").is_err());
        assert!(parse_delimiter("").is_err());
    }
}
