//! Mock authentication
//!
//! There are no real accounts. Sign-in accepts a single demo credential
//! pair and sign-up accepts any valid form; both answer with where the
//! shopper should be sent next.

use crate::core::error::{AuthError, NavoraError};
use crate::core::validation::forms::{SignInForm, SignUpForm};
use async_trait::async_trait;
use serde::Serialize;
use std::time::Duration;

pub const DEMO_EMAIL: &str = "demo@navora.ai";
pub const DEMO_PASSWORD: &str = "password";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Creator,
}

/// Outcome of a successful sign-in or sign-up
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub role: UserRole,
    /// Page to navigate to next
    pub redirect_to: String,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn sign_in(&self, form: &SignInForm) -> Result<Session, NavoraError>;

    async fn sign_up(&self, form: &SignUpForm) -> Result<Session, NavoraError>;
}

/// Accepts the demo credentials only
#[derive(Debug, Clone)]
pub struct DemoAuthProvider {
    email: String,
    password: String,
    latency: Duration,
}

impl Default for DemoAuthProvider {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl DemoAuthProvider {
    pub fn new(latency: Duration) -> Self {
        Self {
            email: DEMO_EMAIL.to_string(),
            password: DEMO_PASSWORD.to_string(),
            latency,
        }
    }

    async fn wait(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl AuthProvider for DemoAuthProvider {
    async fn sign_in(&self, form: &SignInForm) -> Result<Session, NavoraError> {
        self.wait().await;

        if form.email != self.email || form.password != self.password {
            tracing::info!(email = %form.email, "sign-in rejected");
            return Err(AuthError::InvalidCredentials {
                hint: format!("{} / {}", self.email, self.password),
            }
            .into());
        }

        Ok(Session {
            email: form.email.clone(),
            name: None,
            role: UserRole::Creator,
            redirect_to: "/dashboard".to_string(),
        })
    }

    async fn sign_up(&self, form: &SignUpForm) -> Result<Session, NavoraError> {
        self.wait().await;

        let (role, redirect_to) = if form.is_creator {
            (UserRole::Creator, "/dashboard/upload")
        } else {
            (UserRole::User, "/dashboard")
        };
        tracing::info!(email = %form.email, ?role, "account created");

        Ok(Session {
            email: form.email.clone(),
            name: Some(form.name.clone()),
            role,
            redirect_to: redirect_to.to_string(),
        })
    }
}

/// Password strength meter shown on the sign-up form
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    /// 0 to 4
    pub score: u8,
    pub label: &'static str,
}

/// One point each for length >= 8, an uppercase letter, a digit and a
/// symbol
pub fn password_strength(password: &str) -> PasswordStrength {
    if password.is_empty() {
        return PasswordStrength {
            score: 0,
            label: "No password",
        };
    }

    let checks = [
        password.chars().count() >= 8,
        password.chars().any(|c| c.is_ascii_uppercase()),
        password.chars().any(|c| c.is_ascii_digit()),
        password.chars().any(|c| !c.is_ascii_alphanumeric()),
    ];
    let score = checks.iter().filter(|&&passed| passed).count() as u8;
    let label = match score {
        2 => "Fair",
        3 => "Good",
        4 => "Strong",
        _ => "Weak",
    };
    PasswordStrength { score, label }
}
