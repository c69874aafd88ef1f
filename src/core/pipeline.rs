//! Catalog query pipeline and facet extraction

use super::listing::Listing;
use super::predicate;
use super::query::{ALL_CATEGORIES, QueryState};
use super::sort::sort_listings;
use indexmap::IndexSet;
use serde::Serialize;

/// Filter then order the catalog for a query
///
/// The catalog is never modified; the result is a fresh list. An empty
/// result is a normal outcome, not an error.
pub fn apply(catalog: &[Listing], query: &QueryState) -> Vec<Listing> {
    let mut results: Vec<Listing> = catalog
        .iter()
        .filter(|listing| predicate::matches(listing, query))
        .cloned()
        .collect();
    sort_listings(&mut results, query.sort_key, &query.search_term);
    results
}

/// Lowest and highest price in a catalog
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceBounds {
    pub min: f64,
    pub max: f64,
}

/// The filter choices offered to the shopper
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogFacets {
    /// `All` followed by each category in first-appearance order
    pub categories: Vec<String>,
    pub model_types: Vec<String>,
    pub tags: Vec<String>,
    pub price_bounds: Option<PriceBounds>,
}

pub fn facets(catalog: &[Listing]) -> CatalogFacets {
    let mut categories: IndexSet<&str> = IndexSet::new();
    let mut model_types: IndexSet<&str> = IndexSet::new();
    let mut tags: IndexSet<&str> = IndexSet::new();
    let mut bounds: Option<PriceBounds> = None;

    for listing in catalog {
        categories.insert(&listing.category);
        model_types.insert(&listing.model_type);
        tags.extend(listing.tags.iter().map(String::as_str));
        bounds = Some(match bounds {
            None => PriceBounds {
                min: listing.price,
                max: listing.price,
            },
            Some(b) => PriceBounds {
                min: b.min.min(listing.price),
                max: b.max.max(listing.price),
            },
        });
    }

    CatalogFacets {
        categories: std::iter::once(ALL_CATEGORIES)
            .chain(categories)
            .map(str::to_string)
            .collect(),
        model_types: model_types.into_iter().map(str::to_string).collect(),
        tags: tags.into_iter().map(str::to_string).collect(),
        price_bounds: bounds,
    }
}
