//! Catalog seed data and its invariants

use super::error::CatalogError;
use super::listing::{Listing, Review, Testimonial};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

const SAMPLE_CATALOG: &str = include_str!("../../data/catalog.yaml");

/// Everything the read-only catalog is built from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSeed {
    pub listings: Vec<Listing>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub testimonials: Vec<Testimonial>,
}

impl CatalogSeed {
    /// The built-in sample catalog
    pub fn sample() -> Result<Self, CatalogError> {
        Self::from_yaml_str(SAMPLE_CATALOG)
    }

    /// Parse and validate a seed from YAML
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let seed: Self = serde_yaml::from_str(yaml).map_err(|e| CatalogError::ParseError {
            message: e.to_string(),
        })?;
        seed.validate()?;
        Ok(seed)
    }

    /// Load and validate a seed from a YAML file
    pub fn from_yaml_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(Self::from_yaml_str(&content)?)
    }

    /// Check listing and review invariants
    ///
    /// - listing ids are unique
    /// - `price >= 0` and `0 <= rating <= 5`
    /// - a listing carries no duplicate tag
    /// - reviews reference a known listing and rate 1 to 5 stars
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut ids = HashSet::new();
        for listing in &self.listings {
            if !ids.insert(listing.id.as_str()) {
                return Err(CatalogError::DuplicateId {
                    id: listing.id.clone(),
                });
            }
            validate_listing(listing)?;
        }

        for review in &self.reviews {
            if !ids.contains(review.agent_id.as_str()) {
                return Err(CatalogError::InvalidReview {
                    id: review.id.clone(),
                    message: format!("unknown listing '{}'", review.agent_id),
                });
            }
            if !(1..=5).contains(&review.rating) {
                return Err(CatalogError::InvalidReview {
                    id: review.id.clone(),
                    message: format!("rating {} is outside 1..=5", review.rating),
                });
            }
        }

        Ok(())
    }
}

fn validate_listing(listing: &Listing) -> Result<(), CatalogError> {
    let invalid = |message: String| CatalogError::InvalidListing {
        id: listing.id.clone(),
        message,
    };

    if !listing.price.is_finite() || listing.price < 0.0 {
        return Err(invalid(format!(
            "price must be non-negative (value: {})",
            listing.price
        )));
    }
    if !(0.0..=5.0).contains(&listing.rating) {
        return Err(invalid(format!(
            "rating must be within 0..=5 (value: {})",
            listing.rating
        )));
    }
    let mut seen = HashSet::new();
    if let Some(tag) = listing.tags.iter().find(|t| !seen.insert(t.as_str())) {
        return Err(invalid(format!("duplicate tag '{}'", tag)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_catalog_loads() {
        let seed = CatalogSeed::sample().unwrap();
        assert_eq!(seed.listings.len(), 8);
        assert_eq!(seed.reviews.len(), 7);
        assert_eq!(seed.testimonials.len(), 4);
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let mut seed = CatalogSeed::sample().unwrap();
        let copy = seed.listings[0].clone();
        seed.listings.push(copy);
        assert!(matches!(
            seed.validate(),
            Err(CatalogError::DuplicateId { id }) if id == "1"
        ));
    }

    #[test]
    fn test_negative_price_rejected() {
        let mut seed = CatalogSeed::sample().unwrap();
        seed.listings[2].price = -1.0;
        assert!(matches!(
            seed.validate(),
            Err(CatalogError::InvalidListing { id, .. }) if id == "3"
        ));
    }

    #[test]
    fn test_rating_above_five_rejected() {
        let mut seed = CatalogSeed::sample().unwrap();
        seed.listings[0].rating = 5.1;
        assert!(seed.validate().is_err());
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let mut seed = CatalogSeed::sample().unwrap();
        seed.listings[0].tags.push("marketing".to_string());
        let err = seed.validate().unwrap_err();
        assert!(err.to_string().contains("duplicate tag 'marketing'"));
    }

    #[test]
    fn test_orphan_review_rejected() {
        let mut seed = CatalogSeed::sample().unwrap();
        seed.reviews[0].agent_id = "404".to_string();
        assert!(matches!(
            seed.validate(),
            Err(CatalogError::InvalidReview { .. })
        ));
    }

    #[test]
    fn test_malformed_yaml_is_parse_error() {
        let err = CatalogSeed::from_yaml_str("listings: [ { id: 1 } ]").unwrap_err();
        assert!(matches!(err, CatalogError::ParseError { .. }));
    }
}
