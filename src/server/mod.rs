//! HTTP server: handler state, routes and the builder that wires them

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::AppState;
