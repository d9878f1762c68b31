//! Diaper change records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::ParseChoiceError;

/// Stool colour recorded with a solid change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(
    feature = "sqlx",
    derive(sqlx::Type),
    sqlx(type_name = "VARCHAR", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum DiaperColor {
    Black,
    Brown,
    Green,
    Yellow,
}

impl DiaperColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiaperColor::Black => "black",
            DiaperColor::Brown => "brown",
            DiaperColor::Green => "green",
            DiaperColor::Yellow => "yellow",
        }
    }
}

impl std::str::FromStr for DiaperColor {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "black" => Ok(DiaperColor::Black),
            "brown" => Ok(DiaperColor::Brown),
            "green" => Ok(DiaperColor::Green),
            "yellow" => Ok(DiaperColor::Yellow),
            other => Err(ParseChoiceError(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct DiaperChange {
    pub id: Uuid,
    pub child_id: Uuid,
    pub time: DateTime<Utc>,
    pub wet: bool,
    pub solid: bool,
    pub color: Option<DiaperColor>,
    /// Measured urine output, when the diaper was weighed
    pub amount: Option<Decimal>,
    pub notes: Option<String>,
}
