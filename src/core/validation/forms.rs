//! Form payloads and their rules
//!
//! Field rules expressible as attributes use the `validator` derive; the
//! rest live in [`FormRules::extra_rules`].

use crate::core::error::{FieldValidationError, ValidationError};
use serde::Deserialize;
use validator::Validate;

/// Message for a blank required field
pub const REQUIRED_MESSAGE: &str = "Please fill in all required fields.";

/// Validation entry point used by the `Validated` extractor
pub trait FormRules: Validate {
    /// Rules the derive cannot express
    fn extra_rules(&self) -> Vec<FieldValidationError> {
        Vec::new()
    }

    /// Run derive rules then extra rules, reporting every failure
    fn check(&self) -> Result<(), ValidationError> {
        let mut fields = match self.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => ValidationError::from(errors).fields(),
        };
        fields.extend(self.extra_rules());

        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::FieldErrors(fields))
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignInForm {
    #[validate(length(min = 1, message = "Please fill in all required fields."))]
    pub email: String,
    #[validate(length(min = 1, message = "Please fill in all required fields."))]
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

impl FormRules for SignInForm {}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignUpForm {
    #[validate(length(min = 1, message = "Please fill in all required fields."))]
    pub name: String,
    #[validate(length(min = 1, message = "Please fill in all required fields."))]
    pub email: String,
    #[validate(length(min = 1, message = "Please fill in all required fields."))]
    pub password: String,
    #[serde(default)]
    pub terms_accepted: bool,
    #[serde(default)]
    pub is_creator: bool,
}

impl FormRules for SignUpForm {
    fn extra_rules(&self) -> Vec<FieldValidationError> {
        if self.terms_accepted {
            Vec::new()
        } else {
            vec![FieldValidationError::new(
                "termsAccepted",
                "You must accept the terms and conditions to create an account.",
            )]
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ContactForm {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,
    #[validate(length(min = 5, message = "Subject must be at least 5 characters"))]
    pub subject: String,
    #[validate(length(min = 10, message = "Message must be at least 10 characters"))]
    pub message: String,
}

impl FormRules for ContactForm {}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str, email: &str, subject: &str, message: &str) -> ContactForm {
        ContactForm {
            name: name.to_string(),
            email: email.to_string(),
            subject: subject.to_string(),
            message: message.to_string(),
        }
    }

    #[test]
    fn test_sign_in_requires_both_fields() {
        let form = SignInForm {
            email: String::new(),
            password: "x".to_string(),
            remember_me: false,
        };
        let err = form.check().unwrap_err();
        let fields = err.fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "email");
        assert_eq!(fields[0].message, REQUIRED_MESSAGE);
    }

    #[test]
    fn test_sign_up_requires_terms() {
        let form = SignUpForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "pw".to_string(),
            terms_accepted: false,
            is_creator: false,
        };
        let fields = form.check().unwrap_err().fields();
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "termsAccepted");
    }

    #[test]
    fn test_contact_form_rules() {
        assert!(contact("Al", "al@example.com", "Hello", "Ten chars!").check().is_ok());

        let err = contact("A", "not-an-email", "Hi", "short").check().unwrap_err();
        let fields: Vec<String> = err.fields().into_iter().map(|f| f.field).collect();
        assert_eq!(fields, vec!["email", "message", "name", "subject"]);
    }

    #[test]
    fn test_sign_in_deserializes_camel_case() {
        let form: SignInForm = serde_json::from_value(serde_json::json!({
            "email": "demo@navora.ai",
            "password": "password",
            "rememberMe": true
        }))
        .unwrap();
        assert!(form.remember_me);
    }
}
