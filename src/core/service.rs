//! Service traits behind the HTTP handlers
//!
//! Each trait is the async boundary where a real backend would plug in.
//! The in-memory implementations answer from static data, optionally after
//! a configured delay.

use crate::core::listing::{Listing, Review, Testimonial};
use crate::core::pipeline::CatalogFacets;
use crate::core::query::QueryState;
use anyhow::Result;
use async_trait::async_trait;

/// Read-only access to the listing catalog
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Every listing, in catalog order
    async fn list(&self) -> Result<Vec<Listing>>;

    /// Get a listing by id
    async fn get(&self, id: &str) -> Result<Option<Listing>>;

    /// Reviews of one listing, in seed order
    async fn reviews(&self, listing_id: &str) -> Result<Vec<Review>>;

    /// Run the query pipeline over the catalog
    async fn search(&self, query: &QueryState) -> Result<Vec<Listing>>;

    /// Filter choices for the catalog page
    async fn facets(&self) -> Result<CatalogFacets>;

    /// Listings highlighted on the home page
    async fn featured(&self) -> Result<Vec<Listing>> {
        Ok(self.list().await?.into_iter().filter(|l| l.featured).collect())
    }

    async fn testimonials(&self) -> Result<Vec<Testimonial>>;
}
