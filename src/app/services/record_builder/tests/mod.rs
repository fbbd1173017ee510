//! Tests for record builders, fields and row serialization


use crate::app::services::record_builder::{Listing, TextField};

/// A listing with every required field filled in
pub fn complete_listing(id: &str) -> Listing {
    let mut listing = Listing::begin(Some(id));
    listing.name.append("Antique clock");
    listing.current_price.append("$1,025.00");
    listing.first_bid_price.append("$1.00");
    listing.bid_count.append("12");
    listing.location.append("Boston, MA");
    listing.start_time.append("Dec-01-01 08:00:00");
    listing.end_time.append("Dec-08-01 08:00:00");
    listing.seller_id.assign(Some("seller7"));
    listing.description.append("Works.");
    listing.country = TextField::fixed(Some("USA"));
    listing
}
