//! Text normalizers for money and date columns
//!
//! Both normalizers are pure functions over the accumulated field text:
//! - [`currency`] - locale-formatted prices to plain two-digit decimals (strict)
//! - [`timestamp`] - source timestamps to `YYYY-MM-DD HH:MM:SS` (lenient)
//!
//! The strictness differs on purpose. A price that does not parse means the
//! input is not what the loader was built for, so the run stops. A timestamp
//! that does not parse is logged and written through unchanged.

pub mod currency;
pub mod timestamp;

#[cfg(test)]
pub mod tests;

pub use currency::normalize_currency;
pub use timestamp::{Normalized, normalize_timestamp, parse_timestamp};
