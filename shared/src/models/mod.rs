//! Domain models for the baby-care tracker
//!
//! Every event record belongs to exactly one child. The backend reads these
//! straight out of Postgres (the `sqlx` feature adds the row mappings).

mod child;
mod diaper;
mod feeding;
mod growth;
mod note;
mod session;
mod sleep;
mod tag;

pub use child::*;
pub use diaper::*;
pub use feeding::*;
pub use growth::*;
pub use note::*;
pub use session::*;
pub use sleep::*;
pub use tag::*;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

/// A query-string or column value that names no known choice
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Select a valid choice. {0} is not one of the available choices.")]
pub struct ParseChoiceError(pub String);

/// A record that spans a period of time
pub trait Interval {
    fn start(&self) -> DateTime<Utc>;
    fn end(&self) -> DateTime<Utc>;

    /// Length of the interval; a record that ends before it starts counts as zero.
    fn duration(&self) -> Duration {
        let duration = self.end() - self.start();
        if duration < Duration::zero() {
            Duration::zero()
        } else {
            duration
        }
    }
}
