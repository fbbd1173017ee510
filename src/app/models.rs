//! Data models for auction document loading
//!
//! This module contains the source element vocabulary, the output table
//! catalogue with its deduplication policies, and the attribute set handed
//! to the dispatcher with every element-open event.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Source Element Vocabulary
// =============================================================================

/// Every element kind that may appear in a source document
///
/// The set is closed: any other element name is rejected with
/// `UnknownElement` before it reaches the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Items,
    Item,
    Name,
    Category,
    Currently,
    BuyPrice,
    FirstBid,
    NumberOfBids,
    Bids,
    Bid,
    Bidder,
    Time,
    Amount,
    Location,
    Country,
    Started,
    Ends,
    Seller,
    Description,
}

impl ElementKind {
    /// Resolve an element name as it appears in the source document
    pub fn from_name(name: &str) -> Option<Self> {
        let kind = match name {
            "Items" => ElementKind::Items,
            "Item" => ElementKind::Item,
            "Name" => ElementKind::Name,
            "Category" => ElementKind::Category,
            "Currently" => ElementKind::Currently,
            "Buy_Price" => ElementKind::BuyPrice,
            "First_Bid" => ElementKind::FirstBid,
            "Number_of_Bids" => ElementKind::NumberOfBids,
            "Bids" => ElementKind::Bids,
            "Bid" => ElementKind::Bid,
            "Bidder" => ElementKind::Bidder,
            "Time" => ElementKind::Time,
            "Amount" => ElementKind::Amount,
            "Location" => ElementKind::Location,
            "Country" => ElementKind::Country,
            "Started" => ElementKind::Started,
            "Ends" => ElementKind::Ends,
            "Seller" => ElementKind::Seller,
            "Description" => ElementKind::Description,
            _ => return None,
        };
        Some(kind)
    }

    /// Element name as written in the source document
    pub fn as_str(self) -> &'static str {
        match self {
            ElementKind::Items => "Items",
            ElementKind::Item => "Item",
            ElementKind::Name => "Name",
            ElementKind::Category => "Category",
            ElementKind::Currently => "Currently",
            ElementKind::BuyPrice => "Buy_Price",
            ElementKind::FirstBid => "First_Bid",
            ElementKind::NumberOfBids => "Number_of_Bids",
            ElementKind::Bids => "Bids",
            ElementKind::Bid => "Bid",
            ElementKind::Bidder => "Bidder",
            ElementKind::Time => "Time",
            ElementKind::Amount => "Amount",
            ElementKind::Location => "Location",
            ElementKind::Country => "Country",
            ElementKind::Started => "Started",
            ElementKind::Ends => "Ends",
            ElementKind::Seller => "Seller",
            ElementKind::Description => "Description",
        }
    }

    /// Whether this element has a defined meaning under `parent`
    ///
    /// `None` stands for the document root.
    pub fn accepts_parent(self, parent: Option<ElementKind>) -> bool {
        use ElementKind::*;

        match (self, parent) {
            (Items, None) => true,
            (Item, Some(Items)) => true,
            (
                Name | Category | Currently | BuyPrice | FirstBid | NumberOfBids | Bids | Started
                | Ends | Seller | Description,
                Some(Item),
            ) => true,
            (Bid, Some(Bids)) => true,
            (Bidder | Time | Amount, Some(Bid)) => true,
            (Location | Country, Some(Item | Bidder)) => true,
            _ => false,
        }
    }

    /// Container elements only group children; their own text is whitespace
    pub fn is_container(self) -> bool {
        matches!(
            self,
            ElementKind::Items
                | ElementKind::Item
                | ElementKind::Bids
                | ElementKind::Bid
                | ElementKind::Bidder
                | ElementKind::Seller
        )
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Output Tables
// =============================================================================

/// What happens when a completed record repeats an already written key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupPolicy {
    /// A repeated key is a fatal integrity violation
    Strict,
    /// A repeated key is expected; only the first occurrence is written
    Lenient,
}

/// The nine relation-shaped output tables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Table {
    Listing,
    ListingCategory,
    ListingBuyPrice,
    Bid,
    Bidder,
    BidderLocation,
    BidderCountry,
    Seller,
    ListingCoordinates,
}

impl Table {
    /// All tables in output order
    pub const ALL: [Table; 9] = [
        Table::Listing,
        Table::ListingCategory,
        Table::ListingBuyPrice,
        Table::Bid,
        Table::Bidder,
        Table::BidderLocation,
        Table::BidderCountry,
        Table::Seller,
        Table::ListingCoordinates,
    ];

    /// Table name, also used as the output file stem
    pub fn name(self) -> &'static str {
        match self {
            Table::Listing => "listing",
            Table::ListingCategory => "listing_category",
            Table::ListingBuyPrice => "listing_buy_price",
            Table::Bid => "bid",
            Table::Bidder => "bidder",
            Table::BidderLocation => "bidder_location",
            Table::BidderCountry => "bidder_country",
            Table::Seller => "seller",
            Table::ListingCoordinates => "listing_coordinates",
        }
    }

    /// Column names in serialization order
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Table::Listing => &[
                "id",
                "name",
                "current_price",
                "first_bid_price",
                "bid_count",
                "location",
                "start_time",
                "end_time",
                "seller_id",
                "description",
                "country",
            ],
            Table::ListingCategory => &["listing_id", "category"],
            Table::ListingBuyPrice => &["listing_id", "buy_price"],
            Table::Bid => &["bidder_id", "listing_id", "time", "amount"],
            Table::Bidder => &["id", "rating"],
            Table::BidderLocation => &["bidder_id", "location"],
            Table::BidderCountry => &["bidder_id", "country"],
            Table::Seller => &["id", "rating"],
            Table::ListingCoordinates => &["listing_id", "latitude", "longitude"],
        }
    }

    /// Deduplication policy for repeated primary keys
    pub fn policy(self) -> DedupPolicy {
        match self {
            Table::Listing | Table::Bid => DedupPolicy::Strict,
            Table::ListingCategory
            | Table::ListingBuyPrice
            | Table::Bidder
            | Table::BidderLocation
            | Table::BidderCountry
            | Table::Seller
            | Table::ListingCoordinates => DedupPolicy::Lenient,
        }
    }

    /// Output file name for this table with the given extension
    pub fn file_name(self, extension: &str) -> String {
        if extension.is_empty() {
            self.name().to_string()
        } else {
            format!("{}.{}", self.name(), extension)
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// Element Attributes
// =============================================================================

/// Unescaped attributes of one element-open event, in document order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pairs: Vec<(String, String)>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(name, value)` pairs
    pub fn from_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.pairs.push((name.into(), value.into()));
    }

    /// Value of the first attribute named `name`
    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn clear(&mut self) {
        self.pairs.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_names_round_trip_through_vocabulary() {
        for name in [
            "Items",
            "Item",
            "Buy_Price",
            "First_Bid",
            "Number_of_Bids",
            "Location",
            "Description",
        ] {
            let kind = ElementKind::from_name(name).unwrap();
            assert_eq!(kind.as_str(), name);
        }
        assert_eq!(ElementKind::from_name("BuyPrice"), None);
        assert_eq!(ElementKind::from_name("item"), None);
    }

    #[test]
    fn test_location_meaning_depends_on_parent() {
        assert!(ElementKind::Location.accepts_parent(Some(ElementKind::Item)));
        assert!(ElementKind::Location.accepts_parent(Some(ElementKind::Bidder)));
        assert!(!ElementKind::Location.accepts_parent(Some(ElementKind::Bid)));
        assert!(!ElementKind::Country.accepts_parent(None));
    }

    #[test]
    fn test_root_and_record_parents() {
        assert!(ElementKind::Items.accepts_parent(None));
        assert!(!ElementKind::Item.accepts_parent(None));
        assert!(ElementKind::Item.accepts_parent(Some(ElementKind::Items)));
        assert!(ElementKind::Bidder.accepts_parent(Some(ElementKind::Bid)));
        assert!(!ElementKind::Bidder.accepts_parent(Some(ElementKind::Item)));
    }

    #[test]
    fn test_table_policies() {
        assert_eq!(Table::Listing.policy(), DedupPolicy::Strict);
        assert_eq!(Table::Bid.policy(), DedupPolicy::Strict);
        let lenient = Table::ALL
            .iter()
            .filter(|t| t.policy() == DedupPolicy::Lenient)
            .count();
        assert_eq!(lenient, 7);
    }

    #[test]
    fn test_table_file_names() {
        assert_eq!(Table::ListingCoordinates.file_name("dat"), "listing_coordinates.dat");
        assert_eq!(Table::Bid.file_name(""), "bid");
        assert_eq!(Table::Listing.columns().len(), 11);
    }

    #[test]
    fn test_attributes_lookup() {
        let attrs = Attributes::from_pairs([("UserID", "b1"), ("Rating", "5")]);
        assert_eq!(attrs.get("Rating"), Some("5"));
        assert_eq!(attrs.get("Latitude"), None);
    }
}
