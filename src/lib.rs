//! # Navora
//!
//! Backend for an AI agent marketplace: a read-only catalog with faceted
//! search, listing details with reviews, mock authentication, a contact
//! form and a creator dashboard with a multi-step upload wizard.
//!
//! ## Features
//!
//! - **Query Pipeline**: pure filter-then-sort over the catalog, driven by a
//!   [`QueryState`](core::query::QueryState) that round-trips through the URL
//! - **Typed Errors**: every failure maps to an HTTP status and a stable code
//! - **Validated Forms**: `validator` rules checked by an axum extractor
//! - **Configuration-Based**: server, catalog source and simulated latency
//!   from YAML
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use navora::prelude::*;
//!
//! let catalog = CatalogSeed::sample()?.listings;
//! let query = QueryState::from_query_string("category=Development&sort=price-asc");
//! for listing in apply(&catalog, &query) {
//!     println!("{} {}", listing.name, listing.formatted_price());
//! }
//!
//! ServerBuilder::new().with_config(NavoraConfig::default()).serve().await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Domain ===
    pub use crate::core::{
        listing::{Listing, Review, Testimonial},
        pipeline::{CatalogFacets, apply, facets},
        query::{PriceRange, QueryState, SortKey},
        reviews::RatingSummary,
        store::CatalogSeed,
    };

    // === Services ===
    pub use crate::core::{
        auth::{AuthProvider, DemoAuthProvider},
        contact::ContactService,
        demo::{DemoResponder, ScriptedDemoResponder},
        service::CatalogService,
        upload::{SimulatedUploadService, UploadDraft, UploadService, UploadStep, UploadWizard},
    };

    // === Errors ===
    pub use crate::core::error::{
        AuthError, CatalogError, ConfigError, NavoraError, ValidationError,
    };

    // === Storage ===
    pub use crate::storage::{InMemoryCatalogService, InMemoryInbox};

    // === Config ===
    pub use crate::config::NavoraConfig;

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
