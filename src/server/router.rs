//! Route table for the marketplace API

use super::handlers::{
    AppState, agent_facets, check_upload_step, dashboard, get_agent, home, list_agents, run_demo,
    sign_in, sign_up, submit_contact, submit_upload,
};
use axum::{
    Json, Router,
    routing::{get, post},
};
use serde_json::{Value, json};

/// Build the API routes
///
/// - GET /api/home - Featured listings and testimonials
/// - GET /api/agents - Catalog search driven by the URL query
/// - GET /api/agents/facets - Filter choices
/// - GET /api/agents/{id} - Listing detail with reviews
/// - POST /api/agents/{id}/demo - Simulated demo answer
/// - POST /api/auth/sign-in, /api/auth/sign-up - Mock authentication
/// - POST /api/contact - Contact form
/// - GET /api/dashboard - Creator analytics
/// - POST /api/dashboard/uploads/{step} - Check one upload wizard step
/// - POST /api/dashboard/uploads - Submit an upload
pub fn build_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/home", get(home))
        .route("/api/agents", get(list_agents))
        .route("/api/agents/facets", get(agent_facets))
        .route("/api/agents/{id}", get(get_agent))
        .route("/api/agents/{id}/demo", post(run_demo))
        .route("/api/auth/sign-in", post(sign_in))
        .route("/api/auth/sign-up", post(sign_up))
        .route("/api/contact", post(submit_contact))
        .route("/api/dashboard", get(dashboard))
        .route("/api/dashboard/uploads", post(submit_upload))
        .route("/api/dashboard/uploads/{step}", post(check_upload_step))
        .with_state(state)
}

/// Build health check routes
pub fn health_routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/healthz", get(health_check))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "navora"
    }))
}
