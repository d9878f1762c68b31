//! Tummy time and pumping sessions

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Interval;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct TummyTime {
    pub id: Uuid,
    pub child_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub milestone: Option<String>,
}

impl Interval for TummyTime {
    fn start(&self) -> DateTime<Utc> {
        self.start
    }

    fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// Breast milk collected in one pumping session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Pumping {
    pub id: Uuid,
    pub child_id: Uuid,
    pub amount: Decimal,
    pub time: DateTime<Utc>,
    pub notes: Option<String>,
}
