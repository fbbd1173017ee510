//! Listing-scoped records: the listing itself and the rows keyed by it

use super::field::TextField;
use super::row::{RowBuilder, composite_key};
use super::Record;
use crate::app::models::Table;
use crate::error::Result;

/// A top-level auctioned item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Listing {
    pub id: TextField,
    pub name: TextField,
    pub current_price: TextField,
    pub first_bid_price: TextField,
    pub bid_count: TextField,
    pub location: TextField,
    pub start_time: TextField,
    pub end_time: TextField,
    pub seller_id: TextField,
    pub description: TextField,
    pub country: TextField,
}

impl Listing {
    /// Text columns start empty; id, seller and country must be supplied
    pub fn begin(id: Option<&str>) -> Self {
        Self {
            id: TextField::fixed(id),
            name: TextField::empty(),
            current_price: TextField::empty(),
            first_bid_price: TextField::empty(),
            bid_count: TextField::empty(),
            location: TextField::empty(),
            start_time: TextField::empty(),
            end_time: TextField::empty(),
            seller_id: TextField::unset(),
            description: TextField::empty(),
            country: TextField::unset(),
        }
    }
}

impl Record for Listing {
    const TABLE: Table = Table::Listing;

    fn primary_key(&self) -> Result<String> {
        composite_key(Self::TABLE, &[("id", &self.id)])
    }

    fn write_columns(&self, row: &mut RowBuilder) -> Result<()> {
        row.text("id", &self.id)?;
        row.text("name", &self.name)?;
        row.money("current_price", &self.current_price)?;
        row.money("first_bid_price", &self.first_bid_price)?;
        row.text("bid_count", &self.bid_count)?;
        row.text("location", &self.location)?;
        row.timestamp("start_time", &self.start_time)?;
        row.timestamp("end_time", &self.end_time)?;
        row.text("seller_id", &self.seller_id)?;
        row.truncated("description", &self.description)?;
        row.text("country", &self.country)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCategory {
    pub listing_id: TextField,
    pub category: TextField,
}

impl ListingCategory {
    pub fn begin(listing_id: &TextField) -> Self {
        Self {
            listing_id: TextField::inherit(listing_id),
            category: TextField::empty(),
        }
    }
}

impl Record for ListingCategory {
    const TABLE: Table = Table::ListingCategory;

    fn primary_key(&self) -> Result<String> {
        composite_key(
            Self::TABLE,
            &[("listing_id", &self.listing_id), ("category", &self.category)],
        )
    }

    fn write_columns(&self, row: &mut RowBuilder) -> Result<()> {
        row.text("listing_id", &self.listing_id)?;
        row.text("category", &self.category)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingBuyPrice {
    pub listing_id: TextField,
    pub buy_price: TextField,
}

impl ListingBuyPrice {
    pub fn begin(listing_id: &TextField) -> Self {
        Self {
            listing_id: TextField::inherit(listing_id),
            buy_price: TextField::empty(),
        }
    }
}

impl Record for ListingBuyPrice {
    const TABLE: Table = Table::ListingBuyPrice;

    fn primary_key(&self) -> Result<String> {
        composite_key(Self::TABLE, &[("listing_id", &self.listing_id)])
    }

    fn write_columns(&self, row: &mut RowBuilder) -> Result<()> {
        row.text("listing_id", &self.listing_id)?;
        row.money("buy_price", &self.buy_price)
    }
}

/// Geographic position of a listing, taken from its location attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingCoordinates {
    pub listing_id: TextField,
    pub latitude: TextField,
    pub longitude: TextField,
}

impl ListingCoordinates {
    pub fn begin(listing_id: &TextField, latitude: &str, longitude: &str) -> Self {
        Self {
            listing_id: TextField::inherit(listing_id),
            latitude: TextField::fixed(Some(latitude)),
            longitude: TextField::fixed(Some(longitude)),
        }
    }
}

impl Record for ListingCoordinates {
    const TABLE: Table = Table::ListingCoordinates;

    fn primary_key(&self) -> Result<String> {
        composite_key(Self::TABLE, &[("listing_id", &self.listing_id)])
    }

    fn write_columns(&self, row: &mut RowBuilder) -> Result<()> {
        row.text("listing_id", &self.listing_id)?;
        row.text("latitude", &self.latitude)?;
        row.text("longitude", &self.longitude)
    }
}
