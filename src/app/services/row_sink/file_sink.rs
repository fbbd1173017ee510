//! File-backed table sink
//!
//! All nine files are created (and truncated) up front so that a run either
//! has every output stream or fails before reading any input.

use super::RowSink;
use crate::app::models::Table;
use crate::error::{LoaderError, Result};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug)]
struct TableFile {
    path: PathBuf,
    writer: BufWriter<File>,
}

/// One buffered writer per output table
#[derive(Debug)]
pub struct TableFiles {
    files: BTreeMap<Table, TableFile>,
}

impl TableFiles {
    /// Create `dir` if needed and open `<table>.<extension>` for every table
    pub fn create(dir: &Path, extension: &str, buffer_bytes: usize) -> Result<Self> {
        fs::create_dir_all(dir).map_err(|source| LoaderError::FileAccess {
            path: dir.to_path_buf(),
            source,
        })?;

        let mut files = BTreeMap::new();
        for table in Table::ALL {
            let path = dir.join(table.file_name(extension));
            let file = File::create(&path).map_err(|source| LoaderError::FileAccess {
                path: path.clone(),
                source,
            })?;
            debug!("Opened {} table at {}", table, path.display());
            files.insert(
                table,
                TableFile {
                    path,
                    writer: BufWriter::with_capacity(buffer_bytes, file),
                },
            );
        }

        Ok(Self { files })
    }

    /// Output path of `table`
    pub fn path(&self, table: Table) -> Option<&Path> {
        self.files.get(&table).map(|file| file.path.as_path())
    }

    fn file_mut(&mut self, table: Table) -> Result<&mut TableFile> {
        self.files
            .get_mut(&table)
            .ok_or_else(|| LoaderError::configuration(format!("No output file for table {}", table)))
    }
}

impl RowSink for TableFiles {
    fn write_row(&mut self, table: Table, line: &str) -> Result<()> {
        let file = self.file_mut(table)?;
        file.writer
            .write_all(line.as_bytes())
            .and_then(|_| file.writer.write_all(b"\n"))
            .map_err(|source| LoaderError::FileAccess {
                path: file.path.clone(),
                source,
            })
    }

    fn flush(&mut self) -> Result<()> {
        for file in self.files.values_mut() {
            file.writer
                .flush()
                .map_err(|source| LoaderError::FileAccess {
                    path: file.path.clone(),
                    source,
                })?;
        }
        Ok(())
    }
}
