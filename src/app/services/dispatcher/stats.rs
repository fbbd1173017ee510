//! Run statistics for document loading
//!
//! Counts accumulate over every document of a run and are reported once at
//! the end, either as a human summary line or serialized to JSON.

use crate::app::models::Table;
use serde::Serialize;
use std::collections::BTreeMap;

/// Totals for one loader run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Documents consumed through to a clean end-of-document
    pub documents: usize,
    /// Rows written, per table
    pub rows_written: BTreeMap<Table, usize>,
    /// Rows dropped by a lenient table because their key was already written
    pub duplicates_skipped: BTreeMap<Table, usize>,
    /// Timestamp columns written unchanged because they did not parse
    pub timestamp_fallbacks: usize,
}

impl RunStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_document(&mut self) {
        self.documents += 1;
    }

    pub fn record_row(&mut self, table: Table, timestamp_fallbacks: usize) {
        *self.rows_written.entry(table).or_insert(0) += 1;
        self.timestamp_fallbacks += timestamp_fallbacks;
    }

    pub fn record_duplicate(&mut self, table: Table) {
        *self.duplicates_skipped.entry(table).or_insert(0) += 1;
    }

    pub fn rows(&self, table: Table) -> usize {
        self.rows_written.get(&table).copied().unwrap_or(0)
    }

    pub fn duplicates(&self, table: Table) -> usize {
        self.duplicates_skipped.get(&table).copied().unwrap_or(0)
    }

    pub fn total_rows(&self) -> usize {
        self.rows_written.values().sum()
    }

    pub fn total_duplicates(&self) -> usize {
        self.duplicates_skipped.values().sum()
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Load Summary: {} documents -> {} rows | {} listings, {} bids, {} bidders, {} sellers | \
             Duplicates skipped: {} | Timestamp fallbacks: {}",
            self.documents,
            self.total_rows(),
            self.rows(Table::Listing),
            self.rows(Table::Bid),
            self.rows(Table::Bidder),
            self.rows(Table::Seller),
            self.total_duplicates(),
            self.timestamp_fallbacks
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_accumulate_per_table() {
        let mut stats = RunStats::new();
        stats.record_row(Table::Listing, 0);
        stats.record_row(Table::Bid, 1);
        stats.record_row(Table::Bid, 0);
        stats.record_duplicate(Table::Bidder);
        stats.record_document();

        assert_eq!(stats.rows(Table::Bid), 2);
        assert_eq!(stats.rows(Table::Seller), 0);
        assert_eq!(stats.total_rows(), 3);
        assert_eq!(stats.duplicates(Table::Bidder), 1);
        assert_eq!(stats.timestamp_fallbacks, 1);
        assert!(stats.summary().contains("1 documents -> 3 rows"));
    }

    #[test]
    fn test_serializes_with_table_names() {
        let mut stats = RunStats::new();
        stats.record_row(Table::ListingCategory, 0);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json["rows_written"]["listing_category"], 1);
        assert_eq!(json["documents"], 0);
    }
}
