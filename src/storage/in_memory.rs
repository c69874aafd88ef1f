//! In-memory implementations of the service traits

use crate::core::contact::{ContactMessage, ContactReceipt, ContactService};
use crate::core::listing::{Listing, Review, Testimonial};
use crate::core::pipeline::{self, CatalogFacets};
use crate::core::query::QueryState;
use crate::core::service::CatalogService;
use crate::core::store::CatalogSeed;
use crate::core::validation::ContactForm;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Read-only catalog held in memory
///
/// The seed is shared behind an `Arc`; clones are cheap and never lock.
#[derive(Clone)]
pub struct InMemoryCatalogService {
    seed: Arc<CatalogSeed>,
    latency: Duration,
}

impl InMemoryCatalogService {
    /// Create a catalog service over an already validated seed
    pub fn new(seed: CatalogSeed) -> Self {
        Self {
            seed: Arc::new(seed),
            latency: Duration::ZERO,
        }
    }

    /// Catalog service over the built-in sample data
    pub fn sample() -> Result<Self> {
        Ok(Self::new(CatalogSeed::sample()?))
    }

    /// Delay applied before every catalog read
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    async fn wait(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl CatalogService for InMemoryCatalogService {
    async fn list(&self) -> Result<Vec<Listing>> {
        self.wait().await;
        Ok(self.seed.listings.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<Listing>> {
        Ok(self.seed.listings.iter().find(|l| l.id == id).cloned())
    }

    async fn reviews(&self, listing_id: &str) -> Result<Vec<Review>> {
        Ok(self
            .seed
            .reviews
            .iter()
            .filter(|r| r.agent_id == listing_id)
            .cloned()
            .collect())
    }

    async fn search(&self, query: &QueryState) -> Result<Vec<Listing>> {
        self.wait().await;
        let results = pipeline::apply(&self.seed.listings, query);
        tracing::debug!(
            query = %query.to_query_string(),
            matches = results.len(),
            "catalog search"
        );
        Ok(results)
    }

    async fn facets(&self) -> Result<CatalogFacets> {
        Ok(pipeline::facets(&self.seed.listings))
    }

    async fn testimonials(&self) -> Result<Vec<Testimonial>> {
        Ok(self.seed.testimonials.clone())
    }
}

/// Messages kept by [`InMemoryInbox::new`]
pub const DEFAULT_INBOX_CAPACITY: usize = 100;

/// Contact messages kept in memory, oldest first
///
/// Holds at most `capacity` messages; a new message evicts the oldest.
/// Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryInbox {
    messages: Arc<RwLock<VecDeque<ContactMessage>>>,
    capacity: usize,
    latency: Duration,
}

impl Default for InMemoryInbox {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_INBOX_CAPACITY)
    }
}

impl InMemoryInbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inbox keeping the latest `capacity` messages, at least one
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            messages: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity,
            latency: Duration::ZERO,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl ContactService for InMemoryInbox {
    async fn submit(&self, form: &ContactForm) -> Result<ContactReceipt> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let message = ContactMessage::from_form(form);
        let receipt = ContactReceipt::for_message(&message);
        {
            let mut messages = self
                .messages
                .write()
                .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;
            if messages.len() == self.capacity {
                if let Some(evicted) = messages.pop_front() {
                    tracing::debug!(message_id = %evicted.id, "inbox full, oldest message dropped");
                }
            }
            messages.push_back(message);
        }
        tracing::info!(message_id = %receipt.id, "contact message received");
        Ok(receipt)
    }

    async fn messages(&self) -> Result<Vec<ContactMessage>> {
        let messages = self
            .messages
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(messages.iter().cloned().collect())
    }
}
