//! Record builders for the nine output tables
//!
//! Each record is a typed accumulator that lives while its element is open.
//! The dispatcher allocates it with inherited foreign keys, feeds text into its
//! [`TextField`]s, and on close asks it for a primary key and a row.
//!
//! - [`field`] - append-only per-column text buffer
//! - [`row`] - delimited serialization with per-column normalization
//! - [`listing`] - listing, category, buy price and coordinate records
//! - [`participants`] - bid, bidder, bidder location/country and seller records

pub mod field;
pub mod listing;
pub mod participants;
pub mod row;

#[cfg(test)]
pub mod tests;

pub use field::TextField;
pub use listing::{Listing, ListingBuyPrice, ListingCategory, ListingCoordinates};
pub use participants::{Bid, Bidder, BidderCountry, BidderLocation, Seller};
pub use row::{Row, RowBuilder, RowFormat};

use crate::app::models::Table;
use crate::error::Result;

/// A completed-or-in-progress record for one output table
pub trait Record {
    const TABLE: Table;

    /// Deterministic key built from the designated key fields
    fn primary_key(&self) -> Result<String>;

    /// Append every column, in table order, to `row`
    fn write_columns(&self, row: &mut RowBuilder) -> Result<()>;

    /// Serialize to a canonical row; fails if any required field is unset
    fn to_row(&self, format: RowFormat) -> Result<Row> {
        let mut row = RowBuilder::new(Self::TABLE, format);
        self.write_columns(&mut row)?;
        Ok(row.finish())
    }
}
