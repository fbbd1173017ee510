//! In-memory and discarding sinks

use super::RowSink;
use crate::app::models::Table;
use crate::error::Result;
use std::collections::BTreeMap;

/// Collects rows per table, in write order
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    rows: BTreeMap<Table, Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows written to `table` so far
    pub fn rows(&self, table: Table) -> &[String] {
        self.rows.get(&table).map_or(&[], Vec::as_slice)
    }

    pub fn total_rows(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }
}

impl RowSink for MemorySink {
    fn write_row(&mut self, table: Table, line: &str) -> Result<()> {
        self.rows.entry(table).or_default().push(line.to_string());
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Drops every row
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl RowSink for NullSink {
    fn write_row(&mut self, _table: Table, _line: &str) -> Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}
