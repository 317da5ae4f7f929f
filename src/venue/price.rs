//! Price heuristics
//!
//! Prices are free text typed by the user ("£1,200", "800", "Unavailable",
//! "from 950 + VAT"). Sorting needs a number, so the first run of digits is
//! taken after thousands separators are stripped. Anything without digits
//! has no sort value and sorts after every priced venue.

use super::types::PRICE_UNAVAILABLE;
use regex::Regex;
use std::sync::OnceLock;

fn digit_run() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"\d+").expect("valid digit regex"))
}

/// Numeric sort value of a free-text price
///
/// Returns `None` for absent, empty, sentinel, digitless or overflowing input.
/// `"500 or 600"` yields 500.
pub fn sort_value(price: Option<&str>) -> Option<u64> {
    let price = price?.trim();
    if price.is_empty() || price == PRICE_UNAVAILABLE {
        return None;
    }

    let stripped = price.replace(',', "");
    let digits = digit_run().find(&stripped)?;
    digits.as_str().parse::<u64>().ok()
}

/// Text shown on a card for a price field
pub fn display(price: Option<&str>) -> String {
    match price.map(str::trim) {
        Some(p) if !p.is_empty() => p.to_string(),
        _ => "-".to_string(),
    }
}
