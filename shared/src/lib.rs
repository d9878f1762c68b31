//! Shared types for the baby-care reporting service
//!
//! Holds the domain models, the table identifiers used to build queries,
//! the filter sets behind the list endpoints, and the report/chart builders.
//! Nothing in this crate performs IO; the backend runs the statements built
//! here against Postgres.

pub mod charts;
pub mod filters;
pub mod models;
pub mod reports;
pub mod schema;
pub mod types;

pub use models::*;
pub use types::*;
