//! Row sinks: where completed rows go
//!
//! The dispatcher pushes each admitted row to a [`RowSink`] together with its
//! table. Implementations:
//! - [`TableFiles`] - one buffered append-only file per table
//! - [`MemorySink`] - rows collected per table in memory
//! - [`NullSink`] - rows discarded, for validation-only runs

pub mod file_sink;
pub mod memory_sink;

pub use file_sink::TableFiles;
pub use memory_sink::{MemorySink, NullSink};

use crate::app::models::Table;
use crate::error::Result;

/// Destination for serialized rows, one stream per table
pub trait RowSink {
    /// Append one row (without trailing newline) to `table`
    fn write_row(&mut self, table: Table, line: &str) -> Result<()>;

    /// Push buffered rows to their destination
    fn flush(&mut self) -> Result<()>;
}

impl<S: RowSink + ?Sized> RowSink for Box<S> {
    fn write_row(&mut self, table: Table, line: &str) -> Result<()> {
        (**self).write_row(table, line)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

impl<S: RowSink + ?Sized> RowSink for &mut S {
    fn write_row(&mut self, table: Table, line: &str) -> Result<()> {
        (**self).write_row(table, line)
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}
