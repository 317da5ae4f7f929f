//! Venue ordering
//!
//! Sorting is a pure function of the loaded venues and a sort key. The view is
//! re-derived every time it is asked for so it always matches the last fetch.

use super::price;
use super::types::Venue;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// User-selectable sort order for the venue list
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// By name
    #[default]
    Alphabetic,
    /// By drive time, unknown last
    Distance,
    /// By Saturday price, unpriced last
    PriceSaturday,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortKey::Alphabetic => "alphabetic",
            SortKey::Distance => "distance",
            SortKey::PriceSaturday => "price_saturday",
        };
        f.write_str(name)
    }
}

/// Sort venues by the given key
///
/// The sort is stable, so ties keep fetch order.
pub fn sort_venues(venues: &[Venue], key: SortKey) -> Vec<&Venue> {
    let mut sorted: Vec<&Venue> = venues.iter().collect();
    match key {
        SortKey::Alphabetic => sorted.sort_by(|a, b| locale_compare(&a.name, &b.name)),
        SortKey::Distance => {
            sorted.sort_by(|a, b| missing_last(a.drive_time_minutes, b.drive_time_minutes))
        }
        SortKey::PriceSaturday => sorted.sort_by_key(|v| {
            // (false, n) < (true, 0) puts priced venues first
            let value = price::sort_value(v.price_saturday.as_deref());
            (value.is_none(), value.unwrap_or(0))
        }),
    }
    sorted
}

/// Compare names the way a locale collator does for Latin text:
/// letters first compare ignoring case and accents, then lowercase sorts
/// before uppercase.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let folded = fold(a).cmp(fold(b));

    folded.then_with(|| {
        a.chars()
            .zip(b.chars())
            .find(|(x, y)| x != y)
            .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
                (true, false) => Ordering::Less,
                (false, true) => Ordering::Greater,
                _ => x.cmp(&y),
            })
            .unwrap_or_else(|| a.len().cmp(&b.len()))
    })
}

/// Base letters only: decomposed, combining marks dropped, lowercased
fn fold(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn missing_last<T: Ord>(a: Option<T>, b: Option<T>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
