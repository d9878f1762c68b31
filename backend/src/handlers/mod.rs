//! HTTP request handlers

pub mod events;
pub mod health;
pub mod reports;

pub use events::{list_children, list_events, list_tags};
pub use health::health_check;
pub use reports::{get_report, list_reports, report_list_page, report_page};
