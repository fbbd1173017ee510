//! Currency normalization
//!
//! Source prices look like `$3,453.23`. Output is a plain decimal with
//! exactly two fraction digits and no symbol or grouping: `3453.23`.

use crate::error::{LoaderError, Result};
use regex::{Captures, Regex};
use std::sync::OnceLock;

fn currency_re() -> &'static Regex {
    static CURRENCY_RE: OnceLock<Regex> = OnceLock::new();
    CURRENCY_RE.get_or_init(|| {
        Regex::new(
            r"^(?P<open>\()?(?P<lead>[-+])?\$?(?P<trail>[-+])?(?P<int>\d{1,3}(?:,\d{3})+|\d+)?(?:\.(?P<frac>\d+))?(?P<close>\))?$",
        )
        .expect("valid currency regex")
    })
}

/// Normalize a currency string to its canonical decimal form
///
/// The empty string is returned unchanged since it stands for "no value".
/// Any other input that is not well-formed currency is a fatal
/// [`LoaderError::MalformedCurrency`].
pub fn normalize_currency(raw: &str) -> Result<String> {
    if raw.is_empty() {
        return Ok(String::new());
    }

    let malformed = || LoaderError::MalformedCurrency {
        value: raw.to_string(),
    };

    let caps = currency_re().captures(raw.trim()).ok_or_else(malformed)?;
    let negative = sign_of(&caps).ok_or_else(malformed)?;

    let int_digits = caps.name("int").map(|m| m.as_str()).unwrap_or("");
    let frac_digits = caps.name("frac").map(|m| m.as_str()).unwrap_or("");
    if int_digits.is_empty() && frac_digits.is_empty() {
        return Err(malformed());
    }

    let cents = to_cents(int_digits, frac_digits).ok_or_else(malformed)?;
    let sign = if negative && cents > 0 { "-" } else { "" };

    Ok(format!("{}{}.{:02}", sign, cents / 100, cents % 100))
}

/// Resolve the sign from the optional marks around the symbol
///
/// Returns `None` when the marks contradict each other, e.g. an unbalanced
/// parenthesis or two explicit signs.
fn sign_of(caps: &Captures<'_>) -> Option<bool> {
    let parenthesized = match (caps.name("open"), caps.name("close")) {
        (Some(_), Some(_)) => true,
        (None, None) => false,
        _ => return None,
    };

    let explicit = match (caps.name("lead"), caps.name("trail")) {
        (Some(_), Some(_)) => return None,
        (Some(m), None) | (None, Some(m)) => Some(m.as_str() == "-"),
        (None, None) => None,
    };

    match (parenthesized, explicit) {
        (true, Some(_)) => None,
        (true, None) => Some(true),
        (false, sign) => Some(sign.unwrap_or(false)),
    }
}

/// Combine integer and fraction digits into whole cents
///
/// Fractions longer than two digits are rounded half-to-even.
fn to_cents(int_digits: &str, frac_digits: &str) -> Option<u128> {
    let units: u128 = if int_digits.is_empty() {
        0
    } else {
        int_digits.replace(',', "").parse().ok()?
    };

    let (kept, rest) = frac_digits.split_at(frac_digits.len().min(2));
    let mut cents_part: u128 = format!("{:0<2}", kept).parse().ok()?;

    let mut rest = rest.bytes();
    if let Some(first) = rest.next() {
        let tail_nonzero = rest.any(|b| b != b'0');
        let round_up = match first {
            b'6'..=b'9' => true,
            b'5' => tail_nonzero || cents_part % 2 == 1,
            _ => false,
        };
        if round_up {
            cents_part += 1;
        }
    }

    units.checked_mul(100)?.checked_add(cents_part)
}
