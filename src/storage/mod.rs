//! Storage implementations for the service traits

pub mod in_memory;

pub use in_memory::{DEFAULT_INBOX_CAPACITY, InMemoryCatalogService, InMemoryInbox};
