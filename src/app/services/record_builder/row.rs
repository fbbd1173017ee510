//! Canonical row serialization
//!
//! [`RowBuilder`] appends columns in table order, applying the normalizer
//! each column calls for, and fails on the first unset required field.

use super::field::TextField;
use crate::app::models::Table;
use crate::app::services::normalizer::{normalize_currency, normalize_timestamp};
use crate::constants::{DEFAULT_DELIMITER, DESCRIPTION_MAX_CHARS, KEY_SEPARATOR};
use crate::error::{LoaderError, Result};

/// Output formatting knobs shared by every table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowFormat {
    pub delimiter: char,
    pub description_limit: usize,
}

impl Default for RowFormat {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
            description_limit: DESCRIPTION_MAX_CHARS,
        }
    }
}

/// A serialized row ready for its table sink
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub table: Table,
    /// Delimited columns without the trailing newline
    pub line: String,
    /// Timestamp columns written through unchanged because they did not parse
    pub timestamp_fallbacks: usize,
}

#[derive(Debug)]
pub struct RowBuilder {
    table: Table,
    format: RowFormat,
    line: String,
    columns: usize,
    timestamp_fallbacks: usize,
}

impl RowBuilder {
    pub fn new(table: Table, format: RowFormat) -> Self {
        Self {
            table,
            format,
            line: String::new(),
            columns: 0,
            timestamp_fallbacks: 0,
        }
    }

    /// Column written verbatim
    pub fn text(&mut self, field: &'static str, value: &TextField) -> Result<()> {
        let value = required(self.table, field, value)?;
        self.push(value);
        Ok(())
    }

    /// Column passed through the currency normalizer
    pub fn money(&mut self, field: &'static str, value: &TextField) -> Result<()> {
        let value = required(self.table, field, value)?;
        let normalized = normalize_currency(value)?;
        self.push(&normalized);
        Ok(())
    }

    /// Column passed through the timestamp normalizer
    pub fn timestamp(&mut self, field: &'static str, value: &TextField) -> Result<()> {
        let value = required(self.table, field, value)?;
        let normalized = normalize_timestamp(value);
        if normalized.is_fallback() {
            self.timestamp_fallbacks += 1;
        }
        self.push(&normalized.into_string());
        Ok(())
    }

    /// Column cut to the configured description limit, counted in characters
    pub fn truncated(&mut self, field: &'static str, value: &TextField) -> Result<()> {
        let value = required(self.table, field, value)?;
        let cut = truncate_chars(value, self.format.description_limit);
        self.push(cut);
        Ok(())
    }

    fn push(&mut self, column: &str) {
        if self.columns > 0 {
            self.line.push(self.format.delimiter);
        }
        self.line.push_str(column);
        self.columns += 1;
    }

    pub fn finish(self) -> Row {
        debug_assert_eq!(self.columns, self.table.columns().len());
        Row {
            table: self.table,
            line: self.line,
            timestamp_fallbacks: self.timestamp_fallbacks,
        }
    }
}

fn required<'f>(table: Table, field: &'static str, value: &'f TextField) -> Result<&'f str> {
    value
        .value()
        .ok_or(LoaderError::MissingRequiredField { table, field })
}

/// Longest prefix of `value` holding at most `limit` characters
pub fn truncate_chars(value: &str, limit: usize) -> &str {
    match value.char_indices().nth(limit) {
        Some((end, _)) => &value[..end],
        None => value,
    }
}

/// Join the key fields of a record; every part must be set
pub fn composite_key(table: Table, parts: &[(&'static str, &TextField)]) -> Result<String> {
    let mut key = String::new();
    for (i, (field, value)) in parts.iter().enumerate() {
        if i > 0 {
            key.push(KEY_SEPARATOR);
        }
        key.push_str(required(table, field, value)?);
    }
    Ok(key)
}
