//! Input validation
//!
//! Form payloads declare their rules with the `validator` derive and are
//! checked by the [`Validated`] extractor before reaching a handler.

pub mod extractor;
pub mod forms;

pub use extractor::{ApiJson, Validated};
pub use forms::{ContactForm, FormRules, REQUIRED_MESSAGE, SignInForm, SignUpForm};
