//! Free-text station search.
//!
//! A plain case-insensitive substring scan over name and address. The
//! result is small and bounded, so it is recomputed on every query.

use crate::domain::Station;

/// Maximum number of matches shown in the search dropdown.
pub const MAX_RESULTS: usize = 5;

/// Up to [`MAX_RESULTS`] stations whose name or address contains `query`.
///
/// A blank query means the search box is closed and yields nothing.
/// Matches are returned in snapshot order.
pub fn search<'a>(stations: &'a [Station], query: &str) -> Vec<&'a Station> {
    search_limited(stations, query, MAX_RESULTS)
}

/// Like [`search`], with an explicit result limit.
pub fn search_limited<'a>(stations: &'a [Station], query: &str, limit: usize) -> Vec<&'a Station> {
    if query.trim().is_empty() {
        return Vec::new();
    }

    let needle = query.to_lowercase();
    stations
        .iter()
        .filter(|s| matches(s, &needle))
        .take(limit)
        .collect()
}

/// `needle` must already be lowercase.
fn matches(station: &Station, needle: &str) -> bool {
    station.name.to_lowercase().contains(needle) || station.address.to_lowercase().contains(needle)
}
