//! Application constants for the auction loader
//!
//! Defaults, source-format details and exit codes shared across the crate.

// =============================================================================
// Output Defaults
// =============================================================================

/// Maximum number of characters of a listing description written to output
pub const DESCRIPTION_MAX_CHARS: usize = 4000;

/// Default column delimiter for output rows
pub const DEFAULT_DELIMITER: char = '\t';

/// Default file extension for table files
pub const DEFAULT_EXTENSION: &str = "dat";

/// Default output directory
pub const DEFAULT_OUTPUT_DIR: &str = ".";

/// Write buffer capacity per table file (64KB)
pub const DEFAULT_WRITE_BUFFER_BYTES: usize = 64 * 1024;

/// Read buffer capacity for input documents (64KB)
pub const DEFAULT_READ_BUFFER_BYTES: usize = 64 * 1024;

/// Separator placed between the parts of a composite primary key
pub const KEY_SEPARATOR: char = '\t';

// =============================================================================
// Source Format
// =============================================================================

/// Timestamp layout used by the source documents, e.g. `Dec-10-01 10:00:00`
pub const SOURCE_TIMESTAMP_FORMAT: &str = "%b-%d-%y %H:%M:%S";

/// Canonical timestamp layout written to output
pub const CANONICAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// File extension picked up when an input argument is a directory
pub const INPUT_EXTENSION: &str = "xml";

/// Attribute names read from source elements
pub mod attributes {
    pub const ITEM_ID: &str = "ItemID";
    pub const USER_ID: &str = "UserID";
    pub const RATING: &str = "Rating";
    pub const LATITUDE: &str = "Latitude";
    pub const LONGITUDE: &str = "Longitude";
}

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit code for every fatal error other than malformed currency
pub const EXIT_FAILURE: i32 = 1;

/// Exit code when a currency value cannot be parsed
pub const EXIT_MALFORMED_CURRENCY: i32 = 20;
