//! Business logic services

pub mod events;
pub mod reports;

pub use events::EventService;
pub use reports::{chart_context, ReportService};
