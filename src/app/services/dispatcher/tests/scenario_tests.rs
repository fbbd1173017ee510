//! End-to-end event scenarios through the dispatcher

use super::{Script, processor};
use crate::app::models::Table;
use crate::error::LoaderError;

#[test]
fn test_single_listing_produces_every_table() {
    let mut processor = processor();
    Script::new()
        .open("Items")
        .listing("123", &[("b1", "5")])
        .close("Items")
        .run(&mut processor)
        .unwrap();

    let sink = processor.sink();
    assert_eq!(
        sink.rows(Table::Listing),
        ["123\tAntique clock\t10.50\t1.00\t1\tBoston, MA\t2001-12-01 08:00:00\t\
          2001-12-15 08:00:00\tseller7\tWorks.\tUSA"]
    );
    assert_eq!(sink.rows(Table::ListingCategory), ["123\tBooks", "123\tRare"]);
    assert_eq!(
        sink.rows(Table::Bid),
        ["b1\t123\t2001-12-10 10:00:00\t10.50"]
    );
    assert_eq!(sink.rows(Table::Bidder), ["b1\t5"]);
    assert_eq!(sink.rows(Table::BidderLocation), ["b1\tAustin, TX"]);
    assert_eq!(sink.rows(Table::BidderCountry), ["b1\tUSA"]);
    assert_eq!(sink.rows(Table::Seller), ["seller7\t98"]);
    assert_eq!(sink.rows(Table::ListingCoordinates), ["123\t42.36\t-71.06"]);
    assert!(sink.rows(Table::ListingBuyPrice).is_empty());

    let stats = processor.stats();
    assert_eq!(stats.documents, 1);
    assert_eq!(stats.total_rows(), 9);
    assert_eq!(stats.total_duplicates(), 0);
    assert_eq!(processor.depth(), 0);
}

#[test]
fn test_repeated_bidder_written_once() {
    let mut processor = processor();
    Script::new()
        .open("Items")
        .listing("1", &[("b1", "5")])
        .listing("2", &[("b1", "5")])
        .close("Items")
        .run(&mut processor)
        .unwrap();

    let sink = processor.sink();
    assert_eq!(sink.rows(Table::Bidder), ["b1\t5"]);
    assert_eq!(sink.rows(Table::Bid).len(), 2);
    assert_eq!(sink.rows(Table::Seller).len(), 1);

    let stats = processor.stats();
    assert_eq!(stats.duplicates(Table::Bidder), 1);
    assert_eq!(stats.duplicates(Table::Seller), 1);
    assert_eq!(stats.duplicates(Table::BidderCountry), 1);
}

#[test]
fn test_listing_closed_inside_open_bid_is_truncated() {
    let mut processor = processor();
    let result = Script::new()
        .open("Items")
        .listing_head("123")
        .open("Bids")
        .open("Bid")
        .open_with("Bidder", &[("UserID", "b1"), ("Rating", "5")])
        .close("Bidder")
        .close("Item")
        .feed(&mut processor);

    match result {
        Err(LoaderError::TruncatedDocument { unclosed }) => {
            assert!(unclosed.ends_with("Bids > Bid"), "{}", unclosed);
        }
        other => panic!("Expected TruncatedDocument, got {:?}", other),
    }
    assert!(processor.sink().rows(Table::Listing).is_empty());
    assert!(processor.sink().rows(Table::Bid).is_empty());
    assert_eq!(processor.depth(), 0);
}

#[test]
fn test_ledger_spans_documents() {
    let mut processor = processor();
    let document = Script::new()
        .open("Items")
        .listing("7", &[])
        .close("Items");

    document.run(&mut processor).unwrap();
    match document.run(&mut processor) {
        Err(LoaderError::DuplicateKey { table, key }) => {
            assert_eq!(table, Table::Listing);
            assert_eq!(key, "7");
        }
        other => panic!("Expected DuplicateKey, got {:?}", other),
    }
    assert_eq!(processor.stats().documents, 1);
}

#[test]
fn test_same_bidder_twice_at_same_time_is_fatal() {
    let mut processor = processor();
    let result = Script::new()
        .open("Items")
        .listing("1", &[("b1", "5"), ("b1", "5")])
        .close("Items")
        .run(&mut processor);

    assert!(matches!(
        result,
        Err(LoaderError::DuplicateKey {
            table: Table::Bid,
            ..
        })
    ));
}

#[test]
fn test_fragmented_text_is_concatenated() {
    let mut processor = processor();
    Script::new()
        .open("Items")
        .listing_head("5")
        .open("Bids")
        .open("Bid")
        .open_with("Bidder", &[("UserID", "b9"), ("Rating", "1")])
        .close("Bidder")
        .leaf("Time", "Dec-10-01 10:00:00")
        .open("Amount")
        .text("$1,")
        .text("000")
        .text(".5")
        .close("Amount")
        .close("Bid")
        .close("Bids")
        .listing_tail("s1")
        .close("Items")
        .run(&mut processor)
        .unwrap();

    assert_eq!(
        processor.sink().rows(Table::Bid),
        ["b9\t5\t2001-12-10 10:00:00\t1000.50"]
    );
}

#[test]
fn test_whitespace_between_elements_is_ignored() {
    let mut processor = processor();
    Script::new()
        .open("Items")
        .text("\n  ")
        .open_with("Item", &[("ItemID", "3")])
        .text("\n    ")
        .open_with("Seller", &[("UserID", "s"), ("Rating", "1")])
        .text("\n")
        .close("Seller")
        .leaf("Country", "USA")
        .text("\n  ")
        .close("Item")
        .text("\n")
        .close("Items")
        .run(&mut processor)
        .unwrap();

    assert_eq!(
        processor.sink().rows(Table::Listing),
        ["3\t\t\t\t\t\t\t\ts\t\tUSA"]
    );
    assert_eq!(processor.stats().timestamp_fallbacks, 2);
}

#[test]
fn test_buy_price_row_is_normalized() {
    let mut processor = processor();
    Script::new()
        .open("Items")
        .listing_head("11")
        .leaf("Buy_Price", "$2,500.00")
        .listing_tail("s1")
        .close("Items")
        .run(&mut processor)
        .unwrap();

    assert_eq!(
        processor.sink().rows(Table::ListingBuyPrice),
        ["11\t2500.00"]
    );
}

#[test]
fn test_malformed_currency_aborts() {
    let mut processor = processor();
    let result = Script::new()
        .open("Items")
        .open_with("Item", &[("ItemID", "1")])
        .leaf("Currently", "ten bucks")
        .open_with("Seller", &[("UserID", "s"), ("Rating", "1")])
        .close("Seller")
        .leaf("Country", "USA")
        .close("Item")
        .feed(&mut processor);

    let err = result.unwrap_err();
    assert!(matches!(err, LoaderError::MalformedCurrency { .. }));
    assert_eq!(err.exit_code(), 20);
}

#[test]
fn test_unparseable_timestamp_passes_through() {
    let mut processor = processor();
    Script::new()
        .open("Items")
        .listing_head("4")
        .open("Bids")
        .bid("b2", "3", "sometime", "$1.00")
        .close("Bids")
        .listing_tail("s1")
        .close("Items")
        .run(&mut processor)
        .unwrap();

    assert_eq!(
        processor.sink().rows(Table::Bid),
        ["b2\t4\tsometime\t1.00"]
    );
    assert_eq!(processor.stats().timestamp_fallbacks, 1);
}

#[test]
fn test_listing_without_seller_is_incomplete() {
    let mut processor = processor();
    let result = Script::new()
        .open("Items")
        .open_with("Item", &[("ItemID", "1")])
        .leaf("Country", "USA")
        .close("Item")
        .feed(&mut processor);

    assert!(matches!(
        result,
        Err(LoaderError::MissingRequiredField {
            table: Table::Listing,
            field: "seller_id",
        })
    ));
}

#[test]
fn test_partial_coordinates_are_ignored() {
    let mut processor = processor();
    Script::new()
        .open("Items")
        .open_with("Item", &[("ItemID", "8")])
        .open_with("Location", &[("Latitude", "10.0")])
        .text("Nowhere")
        .close("Location")
        .leaf("Country", "USA")
        .open_with("Seller", &[("UserID", "s"), ("Rating", "1")])
        .close("Seller")
        .close("Item")
        .close("Items")
        .run(&mut processor)
        .unwrap();

    assert!(processor.sink().rows(Table::ListingCoordinates).is_empty());
    assert_eq!(processor.sink().rows(Table::Listing).len(), 1);
}
