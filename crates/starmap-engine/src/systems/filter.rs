use serde::Serialize;

use crate::assets::catalog::Star;

/// Stars whose name contains `term`, case-insensitively, in catalog order.
/// An empty term keeps everything.
pub fn filter_stars(stars: &[Star], term: &str) -> Vec<Star> {
    if term.is_empty() {
        return stars.to_vec();
    }
    let needle = term.to_lowercase();
    stars
        .iter()
        .filter(|s| s.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// One row of the search results list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    pub name: String,
    pub magnitude: f32,
}

pub fn search_results(stars: &[Star]) -> Vec<SearchResult> {
    stars
        .iter()
        .map(|s| SearchResult {
            name: s.name.clone(),
            magnitude: s.magnitude,
        })
        .collect()
}
