//! Catalog records: listings, reviews and testimonials

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Categories a creator can file an agent under
pub const CATEGORIES: &[&str] = &[
    "Content Creation",
    "Data Analysis",
    "Development",
    "Audio & Voice",
    "Design",
    "Marketing",
    "Sales",
    "Legal",
    "Customer Service",
    "Education",
    "Finance",
    "Healthcare",
];

/// Model families a creator can declare
pub const MODEL_TYPES: &[&str] = &["GPT-4", "Codex", "WaveNet", "DALL-E", "Custom AI"];

/// An AI agent offered on the marketplace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    pub creator: String,
    pub creator_id: String,
    /// Price in USD
    pub price: f64,
    /// Average rating in [0, 5]
    pub rating: f64,
    #[serde(default)]
    pub review_count: u32,
    pub description: String,
    pub short_description: String,
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub model_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub featured: bool,
}

impl Listing {
    pub fn formatted_price(&self) -> String {
        format_price(self.price)
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// A customer review of a listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub agent_id: String,
    pub user_id: String,
    pub user_name: String,
    /// Whole stars, 1 to 5
    pub rating: u8,
    pub comment: String,
    pub date: DateTime<Utc>,
}

impl Review {
    /// Date as shown next to the review, e.g. "Sep 15, 2023"
    pub fn display_date(&self) -> String {
        format_date(&self.date)
    }
}

/// A customer quote shown on the home page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub avatar: String,
    pub role: String,
    pub company: String,
    pub comment: String,
}

/// Format a USD amount with thousands separators, e.g. `$3,745.89`
pub fn format_price(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}

/// Format a timestamp as a short US date, e.g. `Sep 15, 2023`
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %-d, %Y").to_string()
}
