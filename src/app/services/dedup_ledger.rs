//! Record deduplication for output tables
//!
//! One set of seen primary keys per table, shared across every document of a
//! run. The table's [`DedupPolicy`] decides what a repeated key means:
//! strict tables abort the run, lenient tables keep the first occurrence.

use crate::app::models::{DedupPolicy, Table};
use crate::error::{LoaderError, Result};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Verdict for one completed record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// First sighting of this key; the row must be written
    Accepted,
    /// Key already written to a lenient table; the row is dropped
    Skipped,
}

#[derive(Debug, Default)]
pub struct DedupLedger {
    seen: HashMap<Table, HashSet<String>>,
}

impl DedupLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` for `table` and decide whether its row is written
    ///
    /// Fails with [`LoaderError::DuplicateKey`] when a strict table sees a key
    /// twice.
    pub fn admit(&mut self, table: Table, key: String) -> Result<Admission> {
        let seen = self.seen.entry(table).or_default();
        if !seen.contains(&key) {
            seen.insert(key);
            return Ok(Admission::Accepted);
        }

        match table.policy() {
            DedupPolicy::Strict => Err(LoaderError::DuplicateKey { table, key }),
            DedupPolicy::Lenient => {
                debug!("Skipping repeated {} key {:?}", table, key);
                Ok(Admission::Skipped)
            }
        }
    }

    pub fn contains(&self, table: Table, key: &str) -> bool {
        self.seen.get(&table).is_some_and(|keys| keys.contains(key))
    }

    /// Number of distinct keys admitted for `table`
    pub fn len(&self, table: Table) -> usize {
        self.seen.get(&table).map_or(0, HashSet::len)
    }

    pub fn is_empty(&self) -> bool {
        self.seen.values().all(HashSet::is_empty)
    }
}
