//! Axum extractor for validated form payloads
//!
//! `Validated<T>` deserializes a JSON body into `T` and runs its
//! [`FormRules`] before the handler sees it. `ApiJson<T>` only
//! deserializes, for payloads whose rules depend on the route.

use super::forms::FormRules;
use crate::core::error::{NavoraError, ValidationError};
use axum::{
    Json,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;

/// A payload that passed its form rules
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn contact(
///     Validated(form): Validated<ContactForm>,
/// ) -> Result<Json<ContactReceipt>, NavoraError> {
///     // form is already checked
/// }
/// ```
pub struct Validated<T>(pub T);

impl<T> Validated<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: Send + Sync,
    T: DeserializeOwned + FormRules + Send,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let ApiJson(payload) = ApiJson::<T>::from_request(req, state).await?;

        payload
            .check()
            .map_err(|e| NavoraError::Validation(e).into_response())?;

        Ok(Validated(payload))
    }
}

/// A JSON body whose rejection uses the API error format
///
/// Malformed or mistyped bodies answer 422 with a `body` field error
/// instead of axum's plain-text 400.
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Send,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload): Json<T> = Json::from_request(req, state).await.map_err(|e| {
            NavoraError::Validation(ValidationError::field("body", e.body_text())).into_response()
        })?;
        Ok(ApiJson(payload))
    }
}
