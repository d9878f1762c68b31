//! Child model

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The tracked subject of all events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Child {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    /// URL identifier, unique per child
    pub slug: String,
    pub birth_date: NaiveDate,
    /// Daily feeding goal drawn on the feeding trend report
    pub feeding_target: Option<Decimal>,
}

impl Child {
    /// Full display name
    pub fn name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
