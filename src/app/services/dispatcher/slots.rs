//! In-progress records, one slot per output table
//!
//! A slot is filled when its element opens and emptied when the record is
//! finalized. Nesting rules guarantee at most one record per table is open
//! at any time.

use crate::app::models::ElementKind;
use crate::app::services::record_builder::{
    Bid, Bidder, BidderCountry, BidderLocation, Listing, ListingBuyPrice, ListingCategory,
    ListingCoordinates, Seller, TextField,
};
use crate::error::{LoaderError, Result};

#[derive(Debug, Default)]
pub(crate) struct OpenRecords {
    pub listing: Option<Listing>,
    pub category: Option<ListingCategory>,
    pub buy_price: Option<ListingBuyPrice>,
    pub coordinates: Option<ListingCoordinates>,
    pub bid: Option<Bid>,
    pub bidder: Option<Bidder>,
    pub bidder_location: Option<BidderLocation>,
    pub bidder_country: Option<BidderCountry>,
    pub seller: Option<Seller>,
}

impl OpenRecords {
    pub fn listing_mut(
        &mut self,
        kind: ElementKind,
        parent: Option<ElementKind>,
    ) -> Result<&mut Listing> {
        self.listing
            .as_mut()
            .ok_or_else(|| LoaderError::unexpected_nesting(kind.as_str(), parent))
    }

    pub fn bid_mut(&mut self, kind: ElementKind, parent: Option<ElementKind>) -> Result<&mut Bid> {
        self.bid
            .as_mut()
            .ok_or_else(|| LoaderError::unexpected_nesting(kind.as_str(), parent))
    }

    pub fn bidder(&self, kind: ElementKind, parent: Option<ElementKind>) -> Result<&Bidder> {
        self.bidder
            .as_ref()
            .ok_or_else(|| LoaderError::unexpected_nesting(kind.as_str(), parent))
    }

    /// Text field fed by the element `kind` under `parent`
    ///
    /// Container kinds have no field and yield `None`.
    pub fn field_mut(
        &mut self,
        kind: ElementKind,
        parent: Option<ElementKind>,
    ) -> Result<Option<&mut TextField>> {
        let missing = || LoaderError::unexpected_nesting(kind.as_str(), parent);
        let field = match (kind, parent) {
            (
                ElementKind::Items
                | ElementKind::Item
                | ElementKind::Bids
                | ElementKind::Bid
                | ElementKind::Bidder
                | ElementKind::Seller,
                _,
            ) => return Ok(None),
            (ElementKind::Name, _) => &mut self.listing_mut(kind, parent)?.name,
            (ElementKind::Currently, _) => &mut self.listing_mut(kind, parent)?.current_price,
            (ElementKind::FirstBid, _) => &mut self.listing_mut(kind, parent)?.first_bid_price,
            (ElementKind::NumberOfBids, _) => &mut self.listing_mut(kind, parent)?.bid_count,
            (ElementKind::Started, _) => &mut self.listing_mut(kind, parent)?.start_time,
            (ElementKind::Ends, _) => &mut self.listing_mut(kind, parent)?.end_time,
            (ElementKind::Description, _) => &mut self.listing_mut(kind, parent)?.description,
            (ElementKind::Location, Some(ElementKind::Item)) => {
                &mut self.listing_mut(kind, parent)?.location
            }
            (ElementKind::Country, Some(ElementKind::Item)) => {
                &mut self.listing_mut(kind, parent)?.country
            }
            (ElementKind::Category, _) => &mut self.category.as_mut().ok_or_else(missing)?.category,
            (ElementKind::BuyPrice, _) => {
                &mut self.buy_price.as_mut().ok_or_else(missing)?.buy_price
            }
            (ElementKind::Time, _) => &mut self.bid_mut(kind, parent)?.time,
            (ElementKind::Amount, _) => &mut self.bid_mut(kind, parent)?.amount,
            (ElementKind::Location, _) => {
                &mut self.bidder_location.as_mut().ok_or_else(missing)?.location
            }
            (ElementKind::Country, _) => {
                &mut self.bidder_country.as_mut().ok_or_else(missing)?.country
            }
        };
        Ok(Some(field))
    }
}
