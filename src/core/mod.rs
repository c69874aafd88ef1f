//! Core module containing the marketplace domain: listings, the query
//! pipeline, forms and the service traits behind the HTTP layer

pub mod auth;
pub mod contact;
pub mod dashboard;
pub mod demo;
pub mod error;
pub mod listing;
pub mod pipeline;
pub mod predicate;
pub mod query;
pub mod reviews;
pub mod service;
pub mod sort;
pub mod store;
pub mod upload;
pub mod validation;

pub use auth::{AuthProvider, DemoAuthProvider, PasswordStrength, Session, UserRole};
pub use contact::{ContactMessage, ContactReceipt, ContactService};
pub use dashboard::{DashboardSnapshot, DashboardSummary};
pub use demo::{DemoResponder, ScriptedDemoResponder};
pub use error::{
    AuthError, CatalogError, ConfigError, ErrorResponse, FieldValidationError, NavoraError,
    ValidationError,
};
pub use listing::{Listing, Review, Testimonial};
pub use pipeline::{CatalogFacets, PriceBounds};
pub use query::{PriceRange, QueryState, SortKey};
pub use reviews::{RatingBucket, RatingSummary};
pub use service::CatalogService;
pub use store::CatalogSeed;
pub use upload::{SimulatedUploadService, UploadDraft, UploadReceipt, UploadService, UploadStep, UploadWizard};
