//! Creator upload wizard
//!
//! The wizard walks a draft through four steps. Each step has its own
//! rules and the wizard never moves forward past a step that fails them.
//! Leaving the last step submits the draft.
//!
//! ```text
//! basic -> details -> pricing -> upload -> submitted
//! ```

use crate::core::error::{FieldValidationError, NavoraError, ValidationError};
use crate::core::listing::{CATEGORIES, MODEL_TYPES};
use crate::core::validation::REQUIRED_MESSAGE;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use uuid::Uuid;

pub const MAX_TAGS: usize = 10;

const EMPTY_TAG: &str = "Tag cannot be empty.";
const DUPLICATE_TAG: &str = "This tag has already been added.";
const TOO_MANY_TAGS: &str = "You can add a maximum of 10 tags.";

/// Share of the price kept by the marketplace
pub const COMMISSION_RATE: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStep {
    Basic,
    Details,
    Pricing,
    Upload,
}

impl UploadStep {
    pub const ALL: [UploadStep; 4] = [
        UploadStep::Basic,
        UploadStep::Details,
        UploadStep::Pricing,
        UploadStep::Upload,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            UploadStep::Basic => "basic",
            UploadStep::Details => "details",
            UploadStep::Pricing => "pricing",
            UploadStep::Upload => "upload",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|step| step.as_str() == value)
    }

    /// Following step, `None` after the last one
    pub fn next(&self) -> Option<Self> {
        match self {
            UploadStep::Basic => Some(UploadStep::Details),
            UploadStep::Details => Some(UploadStep::Pricing),
            UploadStep::Pricing => Some(UploadStep::Upload),
            UploadStep::Upload => None,
        }
    }

    /// Preceding step, `None` before the first one
    pub fn previous(&self) -> Option<Self> {
        match self {
            UploadStep::Basic => None,
            UploadStep::Details => Some(UploadStep::Basic),
            UploadStep::Pricing => Some(UploadStep::Details),
            UploadStep::Upload => Some(UploadStep::Pricing),
        }
    }
}

/// What the creator has entered so far
///
/// Files are represented by their names; nothing is stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UploadDraft {
    pub name: String,
    pub short_description: String,
    pub description: String,
    pub category: String,
    pub model_type: String,
    /// Raw price input, parsed during the pricing step
    pub price: String,
    pub tags: Vec<String>,
    pub image_file: Option<String>,
    pub agent_file: Option<String>,
    pub featured: bool,
    pub private_agent: bool,
    pub subscription_pricing: bool,
}

impl UploadDraft {
    /// Check the rules of one step
    pub fn validate_step(&self, step: UploadStep) -> Result<(), ValidationError> {
        let mut errors = Vec::new();
        match step {
            UploadStep::Basic => {
                for (field, value) in [
                    ("name", &self.name),
                    ("shortDescription", &self.short_description),
                    ("description", &self.description),
                ] {
                    if value.trim().is_empty() {
                        errors.push(FieldValidationError::new(field, REQUIRED_MESSAGE));
                    }
                }
            }
            UploadStep::Details => {
                let message = "Please provide category, model type, and at least one tag.";
                let category = self.category.trim();
                if category.is_empty() {
                    errors.push(FieldValidationError::new("category", message));
                } else if !CATEGORIES.contains(&category) {
                    errors.push(FieldValidationError::new(
                        "category",
                        format!("Unknown category '{}'", category),
                    ));
                }
                let model_type = self.model_type.trim();
                if model_type.is_empty() {
                    errors.push(FieldValidationError::new("modelType", message));
                } else if !MODEL_TYPES.contains(&model_type) {
                    errors.push(FieldValidationError::new(
                        "modelType",
                        format!("Unknown model type '{}'", model_type),
                    ));
                }
                if self.tags.is_empty() {
                    errors.push(FieldValidationError::new("tags", message));
                } else if let Some(problem) = tag_problem(&self.tags) {
                    errors.push(FieldValidationError::new("tags", problem));
                }
            }
            UploadStep::Pricing => {
                if self.parsed_price().is_none() {
                    errors.push(FieldValidationError::new(
                        "price",
                        "Please enter a valid price greater than 0.",
                    ));
                }
            }
            UploadStep::Upload => {
                // Image first: only one file problem is reported at a time
                if self.image_file.is_none() {
                    errors.push(FieldValidationError::new(
                        "imageFile",
                        "Please upload an image for your agent.",
                    ));
                } else if self.agent_file.is_none() {
                    errors.push(FieldValidationError::new(
                        "agentFile",
                        "Please upload your agent file.",
                    ));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::FieldErrors(errors))
        }
    }

    /// Check every step in order, stopping at the first failing one
    pub fn validate_all(&self) -> Result<(), ValidationError> {
        UploadStep::ALL
            .into_iter()
            .try_for_each(|step| self.validate_step(step))
    }

    /// Price as a positive number, if the input is one
    pub fn parsed_price(&self) -> Option<f64> {
        self.price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite() && *p > 0.0)
    }

    /// Add a trimmed, unique tag, up to [`MAX_TAGS`]
    pub fn add_tag(&mut self, tag: &str) -> Result<(), ValidationError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(ValidationError::field("tags", EMPTY_TAG));
        }
        if self.tags.iter().any(|t| t.trim() == tag) {
            return Err(ValidationError::field("tags", DUPLICATE_TAG));
        }
        if self.tags.len() >= MAX_TAGS {
            return Err(ValidationError::field("tags", TOO_MANY_TAGS));
        }
        self.tags.push(tag.to_string());
        Ok(())
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }
}

/// Result of moving the wizard forward
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// Now on this step
    Step(UploadStep),
    /// The last step passed; the draft is ready to submit
    ReadyToSubmit,
}

/// Step-by-step state of one upload
#[derive(Debug, Clone, PartialEq)]
pub struct UploadWizard {
    step: UploadStep,
    pub draft: UploadDraft,
}

impl Default for UploadWizard {
    fn default() -> Self {
        Self::new(UploadDraft::default())
    }
}

impl UploadWizard {
    pub fn new(draft: UploadDraft) -> Self {
        Self {
            step: UploadStep::Basic,
            draft,
        }
    }

    pub fn step(&self) -> UploadStep {
        self.step
    }

    /// Validate the current step and move on if it passes
    pub fn advance(&mut self) -> Result<Advance, ValidationError> {
        self.draft.validate_step(self.step)?;
        match self.step.next() {
            Some(next) => {
                self.step = next;
                Ok(Advance::Step(next))
            }
            None => Ok(Advance::ReadyToSubmit),
        }
    }

    /// Go back one step; going back never validates
    pub fn back(&mut self) -> UploadStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }
}

/// Acknowledgement of a submitted upload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadReceipt {
    pub id: Uuid,
    pub name: String,
    /// Always `pending_review`: uploads are reviewed before listing
    pub status: &'static str,
    pub price: f64,
    pub commission: f64,
    pub creator_payout: f64,
    pub submitted_at: DateTime<Utc>,
    /// Page to navigate to next
    pub redirect_to: String,
}

/// Accepts complete drafts
#[async_trait]
pub trait UploadService: Send + Sync {
    async fn submit(&self, draft: &UploadDraft) -> Result<UploadReceipt, NavoraError>;
}

/// Validates and acknowledges drafts without storing anything
#[derive(Debug, Clone, Default)]
pub struct SimulatedUploadService {
    latency: Duration,
}

impl SimulatedUploadService {
    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

#[async_trait]
impl UploadService for SimulatedUploadService {
    async fn submit(&self, draft: &UploadDraft) -> Result<UploadReceipt, NavoraError> {
        draft.validate_all()?;
        let price = draft
            .parsed_price()
            .ok_or_else(|| NavoraError::Internal("validated price did not parse".to_string()))?;

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let commission = round_cents(price * COMMISSION_RATE);
        let receipt = UploadReceipt {
            id: Uuid::new_v4(),
            name: draft.name.trim().to_string(),
            status: "pending_review",
            price,
            commission,
            creator_payout: round_cents(price - commission),
            submitted_at: Utc::now(),
            redirect_to: "/dashboard/agents".to_string(),
        };
        tracing::info!(upload_id = %receipt.id, name = %receipt.name, "upload submitted for review");
        Ok(receipt)
    }
}

/// First rule a submitted tag list breaks, if any
///
/// Drafts arriving over HTTP never went through [`UploadDraft::add_tag`],
/// so the same rules are checked on the whole list.
fn tag_problem(tags: &[String]) -> Option<&'static str> {
    let mut seen = HashSet::new();
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() {
            return Some(EMPTY_TAG);
        }
        if !seen.insert(tag) {
            return Some(DUPLICATE_TAG);
        }
    }
    (tags.len() > MAX_TAGS).then_some(TOO_MANY_TAGS)
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
