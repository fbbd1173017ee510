//! Tests for the dispatcher
//!
//! Documents are described as event scripts so each test reads like the
//! element tree it feeds.

pub mod scenario_tests;

use crate::app::models::Attributes;
use crate::app::services::dispatcher::DocumentProcessor;
use crate::app::services::record_builder::RowFormat;
use crate::app::services::row_sink::MemorySink;
use crate::error::Result;

#[derive(Debug, Clone)]
pub enum Event {
    Open(String, Attributes),
    Text(String),
    Close(String),
}

/// Ordered element events for one test document
#[derive(Debug, Clone, Default)]
pub struct Script {
    events: Vec<Event>,
}

impl Script {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open(self, name: &str) -> Self {
        self.open_with(name, &[])
    }

    pub fn open_with(mut self, name: &str, attributes: &[(&str, &str)]) -> Self {
        let attributes = Attributes::from_pairs(attributes.iter().copied());
        self.events.push(Event::Open(name.to_string(), attributes));
        self
    }

    pub fn text(mut self, fragment: &str) -> Self {
        self.events.push(Event::Text(fragment.to_string()));
        self
    }

    pub fn close(mut self, name: &str) -> Self {
        self.events.push(Event::Close(name.to_string()));
        self
    }

    /// `<name>text</name>`
    pub fn leaf(self, name: &str, text: &str) -> Self {
        self.open(name).text(text).close(name)
    }

    /// A bid by `bidder` with the given rating, time and amount
    pub fn bid(self, bidder: &str, rating: &str, time: &str, amount: &str) -> Self {
        self.open("Bid")
            .open_with("Bidder", &[("UserID", bidder), ("Rating", rating)])
            .leaf("Location", "Austin, TX")
            .leaf("Country", "USA")
            .close("Bidder")
            .leaf("Time", time)
            .leaf("Amount", amount)
            .close("Bid")
    }

    /// Listing columns before the bids
    pub fn listing_head(self, id: &str) -> Self {
        self.open_with("Item", &[("ItemID", id)])
            .leaf("Name", "Antique clock")
            .leaf("Category", "Books")
            .leaf("Category", "Rare")
            .leaf("Currently", "$10.50")
            .leaf("First_Bid", "$1.00")
            .leaf("Number_of_Bids", "1")
    }

    /// Listing columns after the bids, through `</Item>`
    pub fn listing_tail(self, seller: &str) -> Self {
        self.open_with("Location", &[("Latitude", "42.36"), ("Longitude", "-71.06")])
            .text("Boston, MA")
            .close("Location")
            .leaf("Country", "USA")
            .leaf("Started", "Dec-01-01 08:00:00")
            .leaf("Ends", "Dec-15-01 08:00:00")
            .open_with("Seller", &[("UserID", seller), ("Rating", "98")])
            .close("Seller")
            .leaf("Description", "Works.")
            .close("Item")
    }

    /// A complete listing holding one bid per `(bidder, rating)`
    pub fn listing(self, id: &str, bidders: &[(&str, &str)]) -> Self {
        let mut script = self.listing_head(id).open("Bids");
        for (bidder, rating) in bidders {
            script = script.bid(bidder, rating, "Dec-10-01 10:00:00", "$10.50");
        }
        script.close("Bids").listing_tail("seller7")
    }

    /// Feed every event, stopping at the first error
    pub fn feed(&self, processor: &mut DocumentProcessor<MemorySink>) -> Result<()> {
        for event in &self.events {
            match event {
                Event::Open(name, attributes) => processor.start_element(name, attributes)?,
                Event::Text(fragment) => processor.text(fragment)?,
                Event::Close(name) => processor.end_element(name)?,
            }
        }
        Ok(())
    }

    /// Feed every event and finish the document
    pub fn run(&self, processor: &mut DocumentProcessor<MemorySink>) -> Result<()> {
        self.feed(processor)?;
        processor.finish_document()
    }
}

pub fn processor() -> DocumentProcessor<MemorySink> {
    DocumentProcessor::new(MemorySink::new(), RowFormat::default())
}
