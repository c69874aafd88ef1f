//! Result ordering
//!
//! Every ordering is a stable sort, so listings that compare equal keep
//! their catalog order.

use super::listing::Listing;
use super::query::SortKey;
use std::cmp::Ordering;

/// Relevance of a listing for a search term: 2 for a name match, 1 for a
/// description-only match, 0 otherwise
pub fn relevance_score(listing: &Listing, term: &str) -> u8 {
    if term.is_empty() {
        return 0;
    }
    let needle = term.to_lowercase();
    if listing.name.to_lowercase().contains(&needle) {
        2
    } else if listing.description.to_lowercase().contains(&needle) {
        1
    } else {
        0
    }
}

/// Order `listings` in place
pub fn sort_listings(listings: &mut [Listing], sort_key: SortKey, search_term: &str) {
    match sort_key {
        SortKey::PriceAsc => listings.sort_by(|a, b| cmp_f64(a.price, b.price)),
        SortKey::PriceDesc => listings.sort_by(|a, b| cmp_f64(b.price, a.price)),
        SortKey::Rating => listings.sort_by(|a, b| cmp_f64(b.rating, a.rating)),
        SortKey::Relevance => {
            if !search_term.is_empty() {
                listings.sort_by_cached_key(|l| std::cmp::Reverse(relevance_score(l, search_term)));
            }
        }
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn listing(id: &str, name: &str, description: &str, price: f64, rating: f64) -> Listing {
        Listing {
            id: id.to_string(),
            name: name.to_string(),
            avatar: String::new(),
            creator: "Tester".to_string(),
            creator_id: "t1".to_string(),
            price,
            rating,
            review_count: 0,
            description: description.to_string(),
            short_description: String::new(),
            category: "Design".to_string(),
            tags: Vec::new(),
            model_type: "Custom AI".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            featured: false,
        }
    }

    fn ids(listings: &[Listing]) -> Vec<&str> {
        listings.iter().map(|l| l.id.as_str()).collect()
    }

    fn sample() -> Vec<Listing> {
        vec![
            listing("a", "Alpha", "voice tools", 20.0, 4.5),
            listing("b", "Voice Beta", "audio", 10.0, 4.9),
            listing("c", "Gamma", "voice overs", 20.0, 4.9),
            listing("d", "Delta", "design", 5.0, 4.5),
        ]
    }

    #[test]
    fn test_price_asc_is_stable() {
        let mut l = sample();
        sort_listings(&mut l, SortKey::PriceAsc, "");
        assert_eq!(ids(&l), vec!["d", "b", "a", "c"]);
    }

    #[test]
    fn test_price_desc_is_stable() {
        let mut l = sample();
        sort_listings(&mut l, SortKey::PriceDesc, "");
        assert_eq!(ids(&l), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_rating_desc_is_stable() {
        let mut l = sample();
        sort_listings(&mut l, SortKey::Rating, "");
        assert_eq!(ids(&l), vec!["b", "c", "a", "d"]);
    }

    #[test]
    fn test_relevance_without_term_keeps_catalog_order() {
        let mut l = sample();
        sort_listings(&mut l, SortKey::Relevance, "");
        assert_eq!(ids(&l), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_relevance_ranks_name_matches_first() {
        let mut l = sample();
        sort_listings(&mut l, SortKey::Relevance, "VOICE");
        assert_eq!(ids(&l), vec!["b", "a", "c", "d"]);
    }
}
