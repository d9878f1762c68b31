//! Growth and vital-sign measurements

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single measured value plotted against the moment it was taken
pub trait Measurement {
    /// Axis title for the measured value
    const LABEL: &'static str;

    fn taken_at(&self) -> TakenAt;

    fn value(&self) -> Decimal;
}

/// When a measurement was taken
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TakenAt {
    /// Recorded per calendar day
    Day(NaiveDate),
    Moment(DateTime<Utc>),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Weight {
    pub id: Uuid,
    pub child_id: Uuid,
    pub weight: Decimal,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Height {
    pub id: Uuid,
    pub child_id: Uuid,
    pub height: Decimal,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct HeadCircumference {
    pub id: Uuid,
    pub child_id: Uuid,
    pub head_circumference: Decimal,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Bmi {
    pub id: Uuid,
    pub child_id: Uuid,
    pub bmi: Decimal,
    pub date: NaiveDate,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Temperature {
    pub id: Uuid,
    pub child_id: Uuid,
    pub temperature: Decimal,
    pub time: DateTime<Utc>,
    pub notes: Option<String>,
}

impl Measurement for Weight {
    const LABEL: &'static str = "Weight";

    fn taken_at(&self) -> TakenAt {
        TakenAt::Day(self.date)
    }

    fn value(&self) -> Decimal {
        self.weight
    }
}

impl Measurement for Height {
    const LABEL: &'static str = "Height";

    fn taken_at(&self) -> TakenAt {
        TakenAt::Day(self.date)
    }

    fn value(&self) -> Decimal {
        self.height
    }
}

impl Measurement for HeadCircumference {
    const LABEL: &'static str = "Head Circumference";

    fn taken_at(&self) -> TakenAt {
        TakenAt::Day(self.date)
    }

    fn value(&self) -> Decimal {
        self.head_circumference
    }
}

impl Measurement for Bmi {
    const LABEL: &'static str = "BMI";

    fn taken_at(&self) -> TakenAt {
        TakenAt::Day(self.date)
    }

    fn value(&self) -> Decimal {
        self.bmi
    }
}

impl Measurement for Temperature {
    const LABEL: &'static str = "Temperature";

    fn taken_at(&self) -> TakenAt {
        TakenAt::Moment(self.time)
    }

    fn value(&self) -> Decimal {
        self.temperature
    }
}
