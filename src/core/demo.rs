//! Simulated agent demo on the listing detail page

use crate::core::error::{NavoraError, ValidationError};
use crate::core::listing::Listing;
use async_trait::async_trait;
use std::time::Duration;

/// Produces a demo answer for a listing
#[async_trait]
pub trait DemoResponder: Send + Sync {
    async fn respond(&self, listing: &Listing, input: &str) -> Result<String, NavoraError>;
}

/// Canned answers phrased around the listing category
///
/// The answer is picked from the input so the same prompt always yields the
/// same text.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDemoResponder {
    latency: Duration,
}

impl ScriptedDemoResponder {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }

    fn templates(area: &str) -> [String; 3] {
        [
            format!(
                "Based on your input, I recommend focusing on improving your {area} strategy by implementing AI solutions that can automate repetitive tasks while maintaining quality."
            ),
            format!(
                "I've analyzed your request and created a tailored {area} approach that leverages cutting-edge AI technologies to maximize your results with minimal human intervention."
            ),
            format!(
                "Your input has been processed. Here's a custom {area} solution that utilizes advanced algorithms to optimize performance while reducing costs by up to 40%."
            ),
        ]
    }
}

#[async_trait]
impl DemoResponder for ScriptedDemoResponder {
    async fn respond(&self, listing: &Listing, input: &str) -> Result<String, NavoraError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(ValidationError::field("input", "Please enter a prompt for the demo").into());
        }

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let area = listing.category.to_lowercase();
        let pick = input.chars().count() % 3;
        let [first, second, third] = Self::templates(&area);
        let answer = match pick {
            0 => first,
            1 => second,
            _ => third,
        };

        tracing::debug!(listing_id = %listing.id, template = pick, "demo answered");
        Ok(answer)
    }
}
