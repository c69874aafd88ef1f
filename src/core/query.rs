//! Catalog query state and its URL query string form
//!
//! A [`QueryState`] captures everything the shopper has asked the catalog
//! for: search text, category, sort order and the advanced filters. It is
//! read from the page URL and written back after every change, so a result
//! list can be bookmarked or shared.
//!
//! # Format
//!
//! ```text
//! GET /api/agents?search=copy&category=Marketing&sort=price-asc
//! GET /api/agents?minPrice=0&maxPrice=50&minRating=4
//! GET /api/agents?model=GPT-4&model=Codex&tag=marketing
//! ```
//!
//! Parsing never fails. Unknown keys are ignored and malformed values fall
//! back to the field default.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use url::form_urlencoded;

/// Category sentinel that disables the category filter
pub const ALL_CATEGORIES: &str = "All";

pub const DEFAULT_PRICE_MIN: f64 = 0.0;
pub const DEFAULT_PRICE_MAX: f64 = 200.0;
pub const MAX_RATING: f64 = 5.0;

/// Result ordering selected by the shopper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Name matches before description matches, then catalog order
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    Rating,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Relevance => "relevance",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::Rating => "rating",
        }
    }

    /// Parse a URL value, falling back to relevance for anything unknown
    pub fn from_param(value: &str) -> Self {
        match value.trim() {
            "price-asc" => SortKey::PriceAsc,
            "price-desc" => SortKey::PriceDesc,
            "rating" => SortKey::Rating,
            _ => SortKey::Relevance,
        }
    }
}

/// Inclusive price bounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl Default for PriceRange {
    fn default() -> Self {
        Self {
            min: DEFAULT_PRICE_MIN,
            max: DEFAULT_PRICE_MAX,
        }
    }
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }.normalized()
    }

    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && price <= self.max
    }

    /// Clamp negative bounds to zero and put the bounds in order
    pub fn normalized(self) -> Self {
        let min = self.min.max(0.0);
        let max = self.max.max(0.0);
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }
}

/// Everything the shopper asked the catalog for
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryState {
    pub search_term: String,
    /// A category name or [`ALL_CATEGORIES`]
    pub category: String,
    pub sort_key: SortKey,
    pub price_range: PriceRange,
    /// Zero disables the rating filter
    pub min_rating: f64,
    /// Empty means every model type
    pub model_types: BTreeSet<String>,
    /// Empty means every tag
    pub tags: BTreeSet<String>,
}

impl Default for QueryState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: ALL_CATEGORIES.to_string(),
            sort_key: SortKey::default(),
            price_range: PriceRange::default(),
            min_rating: 0.0,
            model_types: BTreeSet::new(),
            tags: BTreeSet::new(),
        }
    }
}

impl QueryState {
    /// Parse a raw query string, with or without the leading `?`
    pub fn from_query_string(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self::from_pairs(form_urlencoded::parse(query.as_bytes()))
    }

    /// Build a query state from decoded key/value pairs
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut state = Self::default();
        let mut min_price = None;
        let mut max_price = None;

        for (key, value) in pairs {
            let value = value.as_ref();
            match key.as_ref() {
                "search" => state.search_term = value.to_string(),
                "category" => {
                    let value = value.trim();
                    state.category = if value.is_empty() {
                        ALL_CATEGORIES.to_string()
                    } else {
                        value.to_string()
                    };
                }
                "sort" => state.sort_key = SortKey::from_param(value),
                "minPrice" => min_price = parse_number(value),
                "maxPrice" => max_price = parse_number(value),
                "minRating" => {
                    state.min_rating = parse_number(value)
                        .map(|r| r.clamp(0.0, MAX_RATING))
                        .unwrap_or(0.0)
                }
                "model" => insert_label(&mut state.model_types, value),
                "tag" => insert_label(&mut state.tags, value),
                _ => {}
            }
        }

        state.price_range = PriceRange::new(
            min_price.unwrap_or(DEFAULT_PRICE_MIN),
            max_price.unwrap_or(DEFAULT_PRICE_MAX),
        );
        state
    }

    /// Canonical query string, listing only the fields that differ from
    /// their defaults
    pub fn to_query_string(&self) -> String {
        let defaults = PriceRange::default();
        let mut out = form_urlencoded::Serializer::new(String::new());

        if !self.search_term.is_empty() {
            out.append_pair("search", &self.search_term);
        }
        if !self.is_all_categories() {
            out.append_pair("category", &self.category);
        }
        if self.sort_key != SortKey::default() {
            out.append_pair("sort", self.sort_key.as_str());
        }
        if self.price_range.min != defaults.min {
            out.append_pair("minPrice", &self.price_range.min.to_string());
        }
        if self.price_range.max != defaults.max {
            out.append_pair("maxPrice", &self.price_range.max.to_string());
        }
        if self.min_rating > 0.0 {
            out.append_pair("minRating", &self.min_rating.to_string());
        }
        for model in &self.model_types {
            out.append_pair("model", model);
        }
        for tag in &self.tags {
            out.append_pair("tag", tag);
        }

        out.finish()
    }

    pub fn is_all_categories(&self) -> bool {
        self.category == ALL_CATEGORIES
    }

    /// Select the model type if unselected, unselect it otherwise
    pub fn toggle_model_type(&mut self, model_type: &str) {
        toggle(&mut self.model_types, model_type);
    }

    /// Select the tag if unselected, unselect it otherwise
    pub fn toggle_tag(&mut self, tag: &str) {
        toggle(&mut self.tags, tag);
    }

    /// Clear the advanced filters, keeping search, category and sort
    pub fn reset_filters(&mut self) {
        self.price_range = PriceRange::default();
        self.min_rating = 0.0;
        self.model_types.clear();
        self.tags.clear();
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = term.into();
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_sort(mut self, sort_key: SortKey) -> Self {
        self.sort_key = sort_key;
        self
    }

    pub fn with_price_range(mut self, min: f64, max: f64) -> Self {
        self.price_range = PriceRange::new(min, max);
        self
    }

    pub fn with_min_rating(mut self, rating: f64) -> Self {
        self.min_rating = rating.clamp(0.0, MAX_RATING);
        self
    }

    pub fn with_model_type(mut self, model_type: impl Into<String>) -> Self {
        self.model_types.insert(model_type.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }
}

fn parse_number(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn insert_label(set: &mut BTreeSet<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        set.insert(value.to_string());
    }
}

fn toggle(set: &mut BTreeSet<String>, value: &str) {
    if !set.remove(value) {
        set.insert(value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_query() {
        let state = QueryState::from_query_string("");
        assert_eq!(state, QueryState::default());
        assert!(state.is_all_categories());
        assert_eq!(state.price_range, PriceRange::new(0.0, 200.0));
        assert_eq!(state.to_query_string(), "");
    }

    #[test]
    fn test_parse_all_dimensions() {
        let state = QueryState::from_query_string(
            "?search=copy+genius&category=Content%20Creation&sort=price-desc\
             &minPrice=10&maxPrice=80.5&minRating=4&model=GPT-4&model=Codex&tag=marketing",
        );
        assert_eq!(state.search_term, "copy genius");
        assert_eq!(state.category, "Content Creation");
        assert_eq!(state.sort_key, SortKey::PriceDesc);
        assert_eq!(state.price_range, PriceRange { min: 10.0, max: 80.5 });
        assert_eq!(state.min_rating, 4.0);
        assert_eq!(state.model_types.len(), 2);
        assert!(state.tags.contains("marketing"));
    }

    #[test]
    fn test_malformed_values_fall_back_to_defaults() {
        let state = QueryState::from_query_string(
            "sort=cheapest&minPrice=abc&maxPrice=NaN&minRating=lots&category=&unknown=1",
        );
        assert_eq!(state.sort_key, SortKey::Relevance);
        assert_eq!(state.price_range, PriceRange::default());
        assert_eq!(state.min_rating, 0.0);
        assert!(state.is_all_categories());
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let state = QueryState::from_query_string("minPrice=-5&maxPrice=-1&minRating=9");
        assert_eq!(state.price_range, PriceRange { min: 0.0, max: 0.0 });
        assert_eq!(state.min_rating, 5.0);

        let swapped = QueryState::from_query_string("minPrice=90&maxPrice=30");
        assert_eq!(swapped.price_range, PriceRange { min: 30.0, max: 90.0 });
    }

    #[test]
    fn test_query_string_roundtrip() {
        let state = QueryState::default()
            .with_search("data & charts")
            .with_category("Data Analysis")
            .with_sort(SortKey::Rating)
            .with_price_range(5.0, 99.99)
            .with_min_rating(4.5)
            .with_model_type("Custom AI")
            .with_tag("UI/UX")
            .with_tag("analytics");

        let encoded = state.to_query_string();
        assert_eq!(QueryState::from_query_string(&encoded), state);
    }

    #[test]
    fn test_canonical_string_lists_only_changed_fields() {
        let state = QueryState::default().with_sort(SortKey::PriceAsc).with_tag("seo");
        assert_eq!(state.to_query_string(), "sort=price-asc&tag=seo");
    }

    #[test]
    fn test_toggle_and_reset() {
        let mut state = QueryState::default().with_search("voice");
        state.toggle_model_type("WaveNet");
        state.toggle_tag("audio");
        assert!(state.model_types.contains("WaveNet"));

        state.toggle_model_type("WaveNet");
        assert!(state.model_types.is_empty());

        state.min_rating = 3.0;
        state.reset_filters();
        assert!(state.tags.is_empty());
        assert_eq!(state.min_rating, 0.0);
        assert_eq!(state.search_term, "voice");
    }

    #[test]
    fn test_sort_key_serializes_kebab_case() {
        let json = serde_json::to_string(&SortKey::PriceDesc).unwrap();
        assert_eq!(json, "\"price-desc\"");
        assert_eq!(SortKey::from_param(SortKey::PriceDesc.as_str()), SortKey::PriceDesc);
    }
}
