//! Typed error handling for the Navora service
//!
//! Library code returns [`NavoraError`] so callers can match on the failure
//! instead of inspecting an `anyhow::Error`. Every variant knows its HTTP
//! status and a stable machine-readable code.
//!
//! # Error Categories
//!
//! - [`CatalogError`]: listing lookup and seed data problems
//! - [`ValidationError`]: form and wizard input problems
//! - [`AuthError`]: mock sign-in failures
//! - [`ConfigError`]: configuration loading problems
//!
//! # Example
//!
//! ```rust,ignore
//! use navora::prelude::*;
//!
//! match catalog.get("42").await? {
//!     Some(listing) => println!("{}", listing.name),
//!     None => return Err(CatalogError::NotFound { id: "42".into() }.into()),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The main error type for the service
#[derive(Debug, Error)]
pub enum NavoraError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Should not happen in normal operation
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl NavoraError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            NavoraError::Catalog(e) => e.status_code(),
            NavoraError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            NavoraError::Auth(_) => StatusCode::UNAUTHORIZED,
            NavoraError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            NavoraError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            NavoraError::Catalog(e) => e.error_code(),
            NavoraError::Validation(_) => "VALIDATION_ERROR",
            NavoraError::Auth(e) => e.error_code(),
            NavoraError::Config(_) => "CONFIG_ERROR",
            NavoraError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            NavoraError::Catalog(CatalogError::NotFound { id }) => {
                Some(serde_json::json!({ "id": id }))
            }
            NavoraError::Validation(e) => Some(serde_json::json!({ "fields": e.fields() })),
            _ => None,
        }
    }
}

impl IntoResponse for NavoraError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), error = %self, "request failed");
        }
        (status, Json(self.to_response())).into_response()
    }
}

// =============================================================================
// Catalog Errors
// =============================================================================

/// Errors related to the listing catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Listing with id '{id}' not found")]
    NotFound { id: String },

    /// Two listings share an id
    #[error("Duplicate listing id '{id}'")]
    DuplicateId { id: String },

    /// A listing breaks a catalog invariant (price, rating, tags)
    #[error("Invalid listing '{id}': {message}")]
    InvalidListing { id: String, message: String },

    /// A review breaks an invariant or points at an unknown listing
    #[error("Invalid review '{id}': {message}")]
    InvalidReview { id: String, message: String },

    #[error("Failed to parse catalog seed: {message}")]
    ParseError { message: String },
}

impl CatalogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            CatalogError::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CatalogError::NotFound { .. } => "LISTING_NOT_FOUND",
            CatalogError::DuplicateId { .. } => "DUPLICATE_LISTING_ID",
            CatalogError::InvalidListing { .. } => "INVALID_LISTING",
            CatalogError::InvalidReview { .. } => "INVALID_REVIEW",
            CatalogError::ParseError { .. } => "CATALOG_PARSE_ERROR",
        }
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field validation error
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl FieldValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Errors related to user input validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Validation failed for field '{field}': {message}")]
    FieldError { field: String, message: String },

    #[error("Validation failed: {}", format_fields(.0))]
    FieldErrors(Vec<FieldValidationError>),
}

impl ValidationError {
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::FieldError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Flatten into a list of field errors
    pub fn fields(&self) -> Vec<FieldValidationError> {
        match self {
            ValidationError::FieldError { field, message } => {
                vec![FieldValidationError::new(field.clone(), message.clone())]
            }
            ValidationError::FieldErrors(errors) => errors.clone(),
        }
    }
}

fn format_fields(errors: &[FieldValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| {
                    let message = err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| err.code.to_string());
                    FieldValidationError::new(field.to_string(), message)
                })
            })
            .collect();
        // field_errors() is a HashMap; keep the output stable
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

impl From<validator::ValidationErrors> for NavoraError {
    fn from(errors: validator::ValidationErrors) -> Self {
        NavoraError::Validation(errors.into())
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid email or password. Try {hint}")]
    InvalidCredentials { hint: String },
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError {
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for NavoraError {
    fn from(err: anyhow::Error) -> Self {
        match err.downcast::<NavoraError>() {
            Ok(navora) => navora,
            Err(err) => NavoraError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_maps_to_404() {
        let err: NavoraError = CatalogError::NotFound {
            id: "99".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.error_code(), "LISTING_NOT_FOUND");
        assert!(err.to_string().contains("99"));
    }

    #[test]
    fn test_invalid_listing_is_server_error() {
        let err = CatalogError::InvalidListing {
            id: "1".to_string(),
            message: "price must be non-negative".to_string(),
        };
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("price"));
    }

    #[test]
    fn test_validation_error_lists_every_field() {
        let err = ValidationError::FieldErrors(vec![
            FieldValidationError::new("name", "required"),
            FieldValidationError::new("email", "invalid format"),
        ]);
        let display = err.to_string();
        assert!(display.contains("name: required"));
        assert!(display.contains("email: invalid format"));
        assert_eq!(err.fields().len(), 2);
    }

    #[test]
    fn test_error_response_carries_field_details() {
        let err = NavoraError::Validation(ValidationError::field("price", "must be positive"));
        let response = err.to_response();
        assert_eq!(response.code, "VALIDATION_ERROR");
        let details = response.details.expect("details");
        assert_eq!(details["fields"][0]["field"], "price");
    }

    #[test]
    fn test_auth_error_is_unauthorized() {
        let err: NavoraError = AuthError::InvalidCredentials {
            hint: "demo@navora.ai / password".to_string(),
        }
        .into();
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.error_code(), "INVALID_CREDENTIALS");
    }

    #[test]
    fn test_anyhow_roundtrip_keeps_typed_error() {
        let original: NavoraError = CatalogError::NotFound {
            id: "7".to_string(),
        }
        .into();
        let wrapped = anyhow::Error::new(original);
        let back: NavoraError = wrapped.into();
        assert_eq!(back.status_code(), StatusCode::NOT_FOUND);
    }
}
