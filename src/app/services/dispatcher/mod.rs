//! Context stack and event dispatcher
//!
//! [`DocumentProcessor`] consumes element-open, text and element-close events
//! in document order. The stack of open element kinds decides what each event
//! means: the same `Location` element feeds a listing column under `Item` and
//! a bidder location record under `Bidder`.
//!
//! When a record-completing element closes, the record's primary key goes
//! through the [`DedupLedger`] and, if admitted, its row is written to the
//! sink. The ledger and statistics live for the whole run, so a processor is
//! reused across every input document.

mod slots;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use stats::RunStats;

use crate::app::models::{Attributes, ElementKind};
use crate::app::services::dedup_ledger::{Admission, DedupLedger};
use crate::app::services::record_builder::{
    Bid, Bidder, BidderCountry, BidderLocation, Listing, ListingBuyPrice, ListingCategory,
    ListingCoordinates, Record, RowFormat, Seller,
};
use crate::app::services::row_sink::RowSink;
use crate::constants::attributes::{ITEM_ID, LATITUDE, LONGITUDE, RATING, USER_ID};
use crate::error::{LoaderError, Result, describe_parent};
use slots::OpenRecords;
use tracing::{debug, warn};

/// Streaming consumer that turns element events into table rows
#[derive(Debug)]
pub struct DocumentProcessor<S: RowSink> {
    sink: S,
    format: RowFormat,
    ledger: DedupLedger,
    stats: RunStats,
    stack: Vec<ElementKind>,
    open: OpenRecords,
}

impl<S: RowSink> DocumentProcessor<S> {
    pub fn new(sink: S, format: RowFormat) -> Self {
        Self {
            sink,
            format,
            ledger: DedupLedger::new(),
            stats: RunStats::new(),
            stack: Vec::new(),
            open: OpenRecords::default(),
        }
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Handle an element-open event
    pub fn start_element(&mut self, name: &str, attributes: &Attributes) -> Result<()> {
        let parent = self.stack.last().copied();
        let kind = ElementKind::from_name(name).ok_or_else(|| LoaderError::UnknownElement {
            name: name.to_string(),
            parent: describe_parent(parent),
        })?;

        if !kind.accepts_parent(parent) {
            return Err(LoaderError::unexpected_nesting(kind.as_str(), parent));
        }

        self.begin_records(kind, parent, attributes)?;

        if let Some(field) = self.open.field_mut(kind, parent)? {
            if !field.open() {
                return Err(LoaderError::RepeatedField {
                    element: kind,
                    parent: describe_parent(parent),
                });
            }
        }

        self.stack.push(kind);
        Ok(())
    }

    /// Handle a character-data fragment
    ///
    /// Fragments are appended to the field of the innermost open element.
    /// Text directly inside container elements is inter-element whitespace.
    pub fn text(&mut self, fragment: &str) -> Result<()> {
        let Some(&kind) = self.stack.last() else {
            return Ok(());
        };
        if kind.is_container() {
            return Ok(());
        }

        let parent = self.parent_of_top();
        if let Some(field) = self.open.field_mut(kind, parent)? {
            field.append(fragment);
        }
        Ok(())
    }

    /// Handle an element-close event
    pub fn end_element(&mut self, name: &str) -> Result<()> {
        let Some(&kind) = self.stack.last() else {
            return Err(LoaderError::unexpected_nesting(format!("/{}", name), None));
        };

        if kind.as_str() != name {
            if !self.stack.iter().any(|open| open.as_str() == name) {
                return Err(LoaderError::unexpected_nesting(format!("/{}", name), Some(kind)));
            }
            let unclosed = self.open_chain();
            self.reset();
            return Err(LoaderError::TruncatedDocument { unclosed });
        }

        self.stack.pop();
        let parent = self.stack.last().copied();

        if let Some(field) = self.open.field_mut(kind, parent)? {
            field.seal();
        }

        self.complete_records(kind, parent)
    }

    /// Handle end-of-document; every element must have been closed
    pub fn finish_document(&mut self) -> Result<()> {
        if !self.stack.is_empty() {
            let unclosed = self.open_chain();
            self.reset();
            return Err(LoaderError::TruncatedDocument { unclosed });
        }

        self.stats.record_document();
        debug!("Document complete ({} so far)", self.stats.documents);
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn stats(&self) -> &RunStats {
        &self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn ledger(&self) -> &DedupLedger {
        &self.ledger
    }

    /// Number of currently open elements
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()
    }

    pub fn into_parts(self) -> (S, RunStats) {
        (self.sink, self.stats)
    }

    // =========================================================================
    // Record lifecycle
    // =========================================================================

    fn begin_records(
        &mut self,
        kind: ElementKind,
        parent: Option<ElementKind>,
        attributes: &Attributes,
    ) -> Result<()> {
        match (kind, parent) {
            (ElementKind::Item, _) => {
                self.open.listing = Some(Listing::begin(attributes.get(ITEM_ID)));
            }
            (ElementKind::Category, _) => {
                let category = ListingCategory::begin(&self.open.listing_mut(kind, parent)?.id);
                self.open.category = Some(category);
            }
            (ElementKind::BuyPrice, _) => {
                let buy_price = ListingBuyPrice::begin(&self.open.listing_mut(kind, parent)?.id);
                self.open.buy_price = Some(buy_price);
            }
            (ElementKind::Bid, _) => {
                let bid = Bid::begin(&self.open.listing_mut(kind, parent)?.id);
                self.open.bid = Some(bid);
            }
            (ElementKind::Bidder, _) => {
                let bidder = Bidder::begin(attributes.get(USER_ID), attributes.get(RATING));
                let bid = self.open.bid_mut(kind, parent)?;
                if !bid.bidder_id.assign(bidder.id.value()) {
                    return Err(repeated(kind, parent));
                }
                self.open.bidder = Some(bidder);
            }
            (ElementKind::Seller, _) => {
                let seller = Seller::begin(attributes.get(USER_ID), attributes.get(RATING));
                let listing = self.open.listing_mut(kind, parent)?;
                if !listing.seller_id.assign(seller.id.value()) {
                    return Err(repeated(kind, parent));
                }
                self.open.seller = Some(seller);
            }
            (ElementKind::Location, Some(ElementKind::Item)) => {
                let listing = self.open.listing_mut(kind, parent)?;
                if listing.location.is_sealed() {
                    return Err(repeated(kind, parent));
                }
                let coordinates = match (attributes.get(LATITUDE), attributes.get(LONGITUDE)) {
                    (Some(latitude), Some(longitude)) => {
                        Some(ListingCoordinates::begin(&listing.id, latitude, longitude))
                    }
                    (None, None) => None,
                    _ => {
                        warn!(
                            "Listing {} location has only one coordinate; no coordinates recorded",
                            listing.id.value().unwrap_or("<unknown>")
                        );
                        None
                    }
                };
                self.open.coordinates = coordinates;
            }
            (ElementKind::Location, _) => {
                let bidder = self.open.bidder(kind, parent)?;
                if attributes.get(LATITUDE).is_some() || attributes.get(LONGITUDE).is_some() {
                    return Err(LoaderError::UnexpectedCoordinates {
                        bidder: bidder.id.value().unwrap_or("<unknown>").to_string(),
                    });
                }
                let location = BidderLocation::begin(&bidder.id);
                self.open.bidder_location = Some(location);
            }
            (ElementKind::Country, Some(ElementKind::Bidder)) => {
                let country = BidderCountry::begin(&self.open.bidder(kind, parent)?.id);
                self.open.bidder_country = Some(country);
            }
            _ => {}
        }
        Ok(())
    }

    fn complete_records(&mut self, kind: ElementKind, parent: Option<ElementKind>) -> Result<()> {
        match (kind, parent) {
            (ElementKind::Item, _) => {
                let listing = self.open.listing.take();
                self.finalize(listing)?;
                let coordinates = self.open.coordinates.take();
                self.finalize(coordinates)
            }
            (ElementKind::Category, _) => {
                let category = self.open.category.take();
                self.finalize(category)
            }
            (ElementKind::BuyPrice, _) => {
                let buy_price = self.open.buy_price.take();
                self.finalize(buy_price)
            }
            (ElementKind::Bid, _) => {
                let bid = self.open.bid.take();
                self.finalize(bid)
            }
            (ElementKind::Bidder, _) => {
                let bidder = self.open.bidder.take();
                self.finalize(bidder)
            }
            (ElementKind::Seller, _) => {
                let seller = self.open.seller.take();
                self.finalize(seller)
            }
            (ElementKind::Location, Some(ElementKind::Bidder)) => {
                let location = self.open.bidder_location.take();
                self.finalize(location)
            }
            (ElementKind::Country, Some(ElementKind::Bidder)) => {
                let country = self.open.bidder_country.take();
                self.finalize(country)
            }
            _ => Ok(()),
        }
    }

    /// Key, deduplicate and write one completed record
    fn finalize<R: Record>(&mut self, record: Option<R>) -> Result<()> {
        let Some(record) = record else {
            return Ok(());
        };

        let key = record.primary_key()?;
        debug!("Completed {} record {:?}", R::TABLE, key);

        match self.ledger.admit(R::TABLE, key)? {
            Admission::Skipped => {
                self.stats.record_duplicate(R::TABLE);
            }
            Admission::Accepted => {
                let row = record.to_row(self.format)?;
                self.sink.write_row(row.table, &row.line)?;
                self.stats.record_row(row.table, row.timestamp_fallbacks);
            }
        }
        Ok(())
    }

    // =========================================================================
    // Stack helpers
    // =========================================================================

    fn parent_of_top(&self) -> Option<ElementKind> {
        self.stack.iter().rev().nth(1).copied()
    }

    /// Open elements from the root down, e.g. `Items > Item > Bids`
    fn open_chain(&self) -> String {
        self.stack
            .iter()
            .map(|kind| kind.as_str())
            .collect::<Vec<_>>()
            .join(" > ")
    }

    fn reset(&mut self) {
        self.stack.clear();
        self.open = OpenRecords::default();
    }
}

fn repeated(kind: ElementKind, parent: Option<ElementKind>) -> LoaderError {
    LoaderError::RepeatedField {
        element: kind,
        parent: describe_parent(parent),
    }
}

