//! Listing filters
//!
//! Each filter is a pure function of a listing and one dimension of the
//! query. A filter whose selection is empty (or `All`, or zero) lets every
//! listing through.

use super::listing::Listing;
use super::query::{ALL_CATEGORIES, PriceRange, QueryState};
use std::collections::BTreeSet;

/// Case-insensitive substring match on name or description
pub fn matches_search(listing: &Listing, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    listing.name.to_lowercase().contains(&needle)
        || listing.description.to_lowercase().contains(&needle)
}

pub fn matches_category(listing: &Listing, category: &str) -> bool {
    category == ALL_CATEGORIES || listing.category == category
}

pub fn matches_price(listing: &Listing, range: &PriceRange) -> bool {
    range.contains(listing.price)
}

pub fn matches_min_rating(listing: &Listing, min_rating: f64) -> bool {
    min_rating <= 0.0 || listing.rating >= min_rating
}

pub fn matches_model_type(listing: &Listing, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || selected.contains(&listing.model_type)
}

/// Any selected tag is enough
pub fn matches_tags(listing: &Listing, selected: &BTreeSet<String>) -> bool {
    selected.is_empty() || selected.iter().any(|tag| listing.has_tag(tag))
}

/// True when the listing passes every filter of the query
pub fn matches(listing: &Listing, query: &QueryState) -> bool {
    matches_search(listing, &query.search_term)
        && matches_category(listing, &query.category)
        && matches_price(listing, &query.price_range)
        && matches_min_rating(listing, query.min_rating)
        && matches_model_type(listing, &query.model_types)
        && matches_tags(listing, &query.tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn listing(name: &str, price: f64, rating: f64) -> Listing {
        Listing {
            id: name.to_lowercase(),
            name: name.to_string(),
            avatar: String::new(),
            creator: "Tester".to_string(),
            creator_id: "t1".to_string(),
            price,
            rating,
            review_count: 0,
            description: "Writes Marketing copy for busy teams".to_string(),
            short_description: "Copy".to_string(),
            category: "Content Creation".to_string(),
            tags: vec!["copywriting".to_string(), "marketing".to_string()],
            model_type: "GPT-4".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            featured: false,
        }
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_search_is_case_insensitive_over_name_and_description() {
        let l = listing("CopyGenius", 49.99, 4.8);
        assert!(matches_search(&l, ""));
        assert!(matches_search(&l, "copygenius"));
        assert!(matches_search(&l, "MARKETING COPY"));
        assert!(!matches_search(&l, "legal"));
    }

    #[test]
    fn test_search_ignores_short_description() {
        let mut l = listing("Agent", 1.0, 1.0);
        l.short_description = "unique-phrase".to_string();
        assert!(!matches_search(&l, "unique-phrase"));
    }

    #[test]
    fn test_category_all_is_bypass() {
        let l = listing("CopyGenius", 49.99, 4.8);
        assert!(matches_category(&l, "All"));
        assert!(matches_category(&l, "Content Creation"));
        assert!(!matches_category(&l, "content creation"));
    }

    #[test]
    fn test_price_range_is_inclusive() {
        let l = listing("CopyGenius", 50.0, 4.8);
        assert!(matches_price(&l, &PriceRange::new(50.0, 60.0)));
        assert!(matches_price(&l, &PriceRange::new(40.0, 50.0)));
        assert!(!matches_price(&l, &PriceRange::new(50.01, 60.0)));
    }

    #[test]
    fn test_min_rating() {
        let l = listing("CopyGenius", 49.99, 4.8);
        assert!(matches_min_rating(&l, 0.0));
        assert!(matches_min_rating(&l, 4.8));
        assert!(!matches_min_rating(&l, 4.9));
    }

    #[test]
    fn test_model_type_membership() {
        let l = listing("CopyGenius", 49.99, 4.8);
        assert!(matches_model_type(&l, &set(&[])));
        assert!(matches_model_type(&l, &set(&["Codex", "GPT-4"])));
        assert!(!matches_model_type(&l, &set(&["WaveNet"])));
    }

    #[test]
    fn test_tags_use_or_semantics() {
        let l = listing("CopyGenius", 49.99, 4.8);
        assert!(matches_tags(&l, &set(&[])));
        assert!(matches_tags(&l, &set(&["marketing", "legal"])));
        assert!(!matches_tags(&l, &set(&["legal", "voice"])));
    }

    #[test]
    fn test_matches_requires_every_filter() {
        let l = listing("CopyGenius", 49.99, 4.8);
        let query = QueryState::default()
            .with_search("copy")
            .with_model_type("GPT-4")
            .with_tag("marketing");
        assert!(matches(&l, &query));
        assert!(!matches(&l, &query.clone().with_category("Legal")));
        assert!(!matches(&l, &query.with_min_rating(5.0)));
    }
}
