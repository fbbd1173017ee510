//! Records describing the people around a listing: bids, bidders, sellers

use super::field::TextField;
use super::row::{RowBuilder, composite_key};
use super::Record;
use crate::app::models::Table;
use crate::error::Result;

/// One bid event; the bidder id is filled in when the nested bidder opens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bid {
    pub bidder_id: TextField,
    pub listing_id: TextField,
    pub time: TextField,
    pub amount: TextField,
}

impl Bid {
    pub fn begin(listing_id: &TextField) -> Self {
        Self {
            bidder_id: TextField::unset(),
            listing_id: TextField::inherit(listing_id),
            time: TextField::empty(),
            amount: TextField::empty(),
        }
    }
}

impl Record for Bid {
    const TABLE: Table = Table::Bid;

    fn primary_key(&self) -> Result<String> {
        composite_key(
            Self::TABLE,
            &[
                ("bidder_id", &self.bidder_id),
                ("listing_id", &self.listing_id),
                ("time", &self.time),
            ],
        )
    }

    fn write_columns(&self, row: &mut RowBuilder) -> Result<()> {
        row.text("bidder_id", &self.bidder_id)?;
        row.text("listing_id", &self.listing_id)?;
        row.timestamp("time", &self.time)?;
        row.money("amount", &self.amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bidder {
    pub id: TextField,
    pub rating: TextField,
}

impl Bidder {
    pub fn begin(id: Option<&str>, rating: Option<&str>) -> Self {
        Self {
            id: TextField::fixed(id),
            rating: TextField::fixed(rating),
        }
    }
}

impl Record for Bidder {
    const TABLE: Table = Table::Bidder;

    fn primary_key(&self) -> Result<String> {
        composite_key(Self::TABLE, &[("id", &self.id)])
    }

    fn write_columns(&self, row: &mut RowBuilder) -> Result<()> {
        row.text("id", &self.id)?;
        row.text("rating", &self.rating)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidderLocation {
    pub bidder_id: TextField,
    pub location: TextField,
}

impl BidderLocation {
    pub fn begin(bidder_id: &TextField) -> Self {
        Self {
            bidder_id: TextField::inherit(bidder_id),
            location: TextField::empty(),
        }
    }
}

impl Record for BidderLocation {
    const TABLE: Table = Table::BidderLocation;

    fn primary_key(&self) -> Result<String> {
        composite_key(Self::TABLE, &[("bidder_id", &self.bidder_id)])
    }

    fn write_columns(&self, row: &mut RowBuilder) -> Result<()> {
        row.text("bidder_id", &self.bidder_id)?;
        row.text("location", &self.location)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BidderCountry {
    pub bidder_id: TextField,
    pub country: TextField,
}

impl BidderCountry {
    pub fn begin(bidder_id: &TextField) -> Self {
        Self {
            bidder_id: TextField::inherit(bidder_id),
            country: TextField::empty(),
        }
    }
}

impl Record for BidderCountry {
    const TABLE: Table = Table::BidderCountry;

    fn primary_key(&self) -> Result<String> {
        composite_key(Self::TABLE, &[("bidder_id", &self.bidder_id)])
    }

    fn write_columns(&self, row: &mut RowBuilder) -> Result<()> {
        row.text("bidder_id", &self.bidder_id)?;
        row.text("country", &self.country)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seller {
    pub id: TextField,
    pub rating: TextField,
}

impl Seller {
    pub fn begin(id: Option<&str>, rating: Option<&str>) -> Self {
        Self {
            id: TextField::fixed(id),
            rating: TextField::fixed(rating),
        }
    }
}

impl Record for Seller {
    const TABLE: Table = Table::Seller;

    fn primary_key(&self) -> Result<String> {
        composite_key(Self::TABLE, &[("id", &self.id)])
    }

    fn write_columns(&self, row: &mut RowBuilder) -> Result<()> {
        row.text("id", &self.id)?;
        row.text("rating", &self.rating)
    }
}
