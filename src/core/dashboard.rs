//! Creator dashboard analytics
//!
//! The dashboard is a fixed sample snapshot. Derived figures (totals,
//! best period, sales share) are computed from it on request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const SAMPLE_DASHBOARD: &str = include_str!("../../data/dashboard.yaml");

/// Headline numbers with their change against the previous period
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub monthly_revenue: f64,
    /// Percent
    pub monthly_change: f64,
    pub total_sales: u32,
    /// Percent
    pub sales_change: f64,
    pub active_agents: u32,
    /// Absolute
    pub agents_change: i32,
    pub average_rating: f64,
    /// Absolute
    pub rating_change: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: u32,
    pub agent: String,
    pub customer: String,
    pub amount: f64,
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub label: String,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentSales {
    pub name: String,
    pub sales: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Sale,
    Review,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: u32,
    pub kind: NotificationKind,
    pub message: String,
    /// Relative, already formatted ("10 minutes ago")
    pub time: String,
}

/// Everything the dashboard overview shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub recent_sales: Vec<Sale>,
    pub daily_revenue: Vec<RevenuePoint>,
    pub monthly_revenue: Vec<RevenuePoint>,
    pub sales_by_agent: Vec<AgentSales>,
    pub notifications: Vec<Notification>,
}

/// Share of total sales for one agent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesShare {
    pub name: String,
    pub sales: u32,
    /// Rounded to the nearest whole percent
    pub percentage: u32,
}

/// Figures derived from a snapshot
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub weekly_revenue: f64,
    pub yearly_revenue: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_month: Option<RevenuePoint>,
    pub recent_sales_total: f64,
    pub sales_share: Vec<SalesShare>,
}

impl DashboardSnapshot {
    /// The built-in sample snapshot
    pub fn sample() -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(SAMPLE_DASHBOARD)
    }

    pub fn summary(&self) -> DashboardSummary {
        DashboardSummary {
            weekly_revenue: total(&self.daily_revenue),
            yearly_revenue: total(&self.monthly_revenue),
            best_month: self
                .monthly_revenue
                .iter()
                .max_by(|a, b| a.revenue.total_cmp(&b.revenue))
                .cloned(),
            recent_sales_total: round_cents(self.recent_sales.iter().map(|s| s.amount).sum()),
            sales_share: self.sales_share(),
        }
    }

    fn sales_share(&self) -> Vec<SalesShare> {
        let total: u32 = self.sales_by_agent.iter().map(|a| a.sales).sum();
        self.sales_by_agent
            .iter()
            .map(|agent| SalesShare {
                name: agent.name.clone(),
                sales: agent.sales,
                percentage: if total == 0 {
                    0
                } else {
                    (f64::from(agent.sales) * 100.0 / f64::from(total)).round() as u32
                },
            })
            .collect()
    }
}

fn total(points: &[RevenuePoint]) -> f64 {
    round_cents(points.iter().map(|p| p.revenue).sum())
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}
