//! Contact form submissions

use crate::core::validation::ContactForm;
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// A contact message as it was accepted
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
    pub received_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn from_form(form: &ContactForm) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            subject: form.subject.trim().to_string(),
            message: form.message.trim().to_string(),
            received_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceipt {
    pub id: Uuid,
    pub message: String,
}

impl ContactReceipt {
    pub fn for_message(message: &ContactMessage) -> Self {
        Self {
            id: message.id,
            message: "Your message has been sent. We'll get back to you soon.".to_string(),
        }
    }
}

/// Where contact messages go
#[async_trait]
pub trait ContactService: Send + Sync {
    /// Accept an already validated form
    async fn submit(&self, form: &ContactForm) -> Result<ContactReceipt>;

    /// Messages received so far, oldest first
    async fn messages(&self) -> Result<Vec<ContactMessage>>;
}
