//! HTTP handlers for the marketplace API
//!
//! Handlers are thin: they extract the request, call one service and map
//! the result to JSON. Failures are returned as [`NavoraError`] and
//! rendered by its `IntoResponse` impl.

use axum::{
    Json,
    extract::{Path, RawQuery, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::auth::{AuthProvider, PasswordStrength, Session, password_strength};
use crate::core::contact::{ContactReceipt, ContactService};
use crate::core::dashboard::{DashboardSnapshot, DashboardSummary};
use crate::core::demo::DemoResponder;
use crate::core::error::{CatalogError, NavoraError, ValidationError};
use crate::core::listing::{Listing, Review, Testimonial};
use crate::core::pipeline::CatalogFacets;
use crate::core::query::QueryState;
use crate::core::reviews::RatingSummary;
use crate::core::service::CatalogService;
use crate::core::upload::{UploadDraft, UploadReceipt, UploadService, UploadStep};
use crate::core::validation::{ApiJson, ContactForm, SignInForm, SignUpForm, Validated};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogService>,
    pub demo: Arc<dyn DemoResponder>,
    pub auth: Arc<dyn AuthProvider>,
    pub contact: Arc<dyn ContactService>,
    pub uploads: Arc<dyn UploadService>,
    pub dashboard: Arc<DashboardSnapshot>,
}

impl AppState {
    async fn listing(&self, id: &str) -> Result<Listing, NavoraError> {
        self.catalog
            .get(id)
            .await?
            .ok_or_else(|| CatalogError::NotFound { id: id.to_string() }.into())
    }
}

#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub featured: Vec<Listing>,
    pub testimonials: Vec<Testimonial>,
}

/// Response for the catalog search endpoint
#[derive(Debug, Serialize)]
pub struct ListAgentsResponse {
    pub data: Vec<Listing>,
    pub count: usize,
    /// Canonical query string; equal queries always produce the same string
    pub query: String,
    /// The query as it was understood after normalization
    pub state: QueryState,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentDetailResponse {
    pub listing: Listing,
    pub reviews: Vec<ReviewView>,
    pub rating_summary: RatingSummary,
}

/// A review with its date ready for display
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewView {
    #[serde(flatten)]
    pub review: Review,
    pub display_date: String,
}

impl From<Review> for ReviewView {
    fn from(review: Review) -> Self {
        Self {
            display_date: review.display_date(),
            review,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DemoRequest {
    #[serde(default)]
    pub input: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoResponse {
    pub agent_id: String,
    pub output: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResponse {
    #[serde(flatten)]
    pub session: Session,
    pub password_strength: PasswordStrength,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub snapshot: DashboardSnapshot,
    pub summary: DashboardSummary,
}

/// Outcome of checking one wizard step
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadStepResponse {
    pub step: UploadStep,
    /// Step to show next, `None` once the draft can be submitted
    pub next: Option<UploadStep>,
    pub ready_to_submit: bool,
}

pub async fn home(State(state): State<AppState>) -> Result<Json<HomeResponse>, NavoraError> {
    let featured = state.catalog.featured().await?;
    let testimonials = state.catalog.testimonials().await?;
    Ok(Json(HomeResponse {
        featured,
        testimonials,
    }))
}

/// List listings matching the URL query
///
/// Never rejects a query: malformed parameters fall back to defaults.
pub async fn list_agents(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Json<ListAgentsResponse>, NavoraError> {
    let query = QueryState::from_query_string(raw.as_deref().unwrap_or_default());
    let data = state.catalog.search(&query).await?;
    Ok(Json(ListAgentsResponse {
        count: data.len(),
        data,
        query: query.to_query_string(),
        state: query,
    }))
}

pub async fn agent_facets(
    State(state): State<AppState>,
) -> Result<Json<CatalogFacets>, NavoraError> {
    Ok(Json(state.catalog.facets().await?))
}

pub async fn get_agent(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AgentDetailResponse>, NavoraError> {
    let listing = state.listing(&id).await?;
    let reviews = state.catalog.reviews(&id).await?;
    Ok(Json(AgentDetailResponse {
        rating_summary: RatingSummary::from_reviews(&reviews),
        listing,
        reviews: reviews.into_iter().map(ReviewView::from).collect(),
    }))
}

pub async fn run_demo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<DemoRequest>,
) -> Result<Json<DemoResponse>, NavoraError> {
    let listing = state.listing(&id).await?;
    let output = state.demo.respond(&listing, &request.input).await?;
    Ok(Json(DemoResponse {
        agent_id: listing.id,
        output,
    }))
}

pub async fn sign_in(
    State(state): State<AppState>,
    Validated(form): Validated<SignInForm>,
) -> Result<Json<Session>, NavoraError> {
    Ok(Json(state.auth.sign_in(&form).await?))
}

pub async fn sign_up(
    State(state): State<AppState>,
    Validated(form): Validated<SignUpForm>,
) -> Result<(StatusCode, Json<SignUpResponse>), NavoraError> {
    let session = state.auth.sign_up(&form).await?;
    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            session,
            password_strength: password_strength(&form.password),
        }),
    ))
}

pub async fn submit_contact(
    State(state): State<AppState>,
    Validated(form): Validated<ContactForm>,
) -> Result<(StatusCode, Json<ContactReceipt>), NavoraError> {
    let receipt = state.contact.submit(&form).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}

pub async fn dashboard(State(state): State<AppState>) -> Json<DashboardResponse> {
    let snapshot = state.dashboard.as_ref().clone();
    Json(DashboardResponse {
        summary: snapshot.summary(),
        snapshot,
    })
}

pub async fn check_upload_step(
    Path(step): Path<String>,
    ApiJson(draft): ApiJson<UploadDraft>,
) -> Result<Json<UploadStepResponse>, NavoraError> {
    let step = UploadStep::parse(&step).ok_or_else(|| {
        ValidationError::field("step", format!("Unknown upload step '{}'", step))
    })?;
    draft.validate_step(step)?;

    let next = step.next();
    Ok(Json(UploadStepResponse {
        step,
        next,
        ready_to_submit: next.is_none(),
    }))
}

pub async fn submit_upload(
    State(state): State<AppState>,
    ApiJson(draft): ApiJson<UploadDraft>,
) -> Result<(StatusCode, Json<UploadReceipt>), NavoraError> {
    let receipt = state.uploads.submit(&draft).await?;
    Ok((StatusCode::CREATED, Json(receipt)))
}
