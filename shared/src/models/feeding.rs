//! Feeding records

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Interval, ParseChoiceError};

/// What was fed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(
    feature = "sqlx",
    derive(sqlx::Type),
    sqlx(type_name = "VARCHAR", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum FeedingType {
    BreastMilk,
    Formula,
    FortifiedBreastMilk,
    SolidFood,
}

impl FeedingType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedingType::BreastMilk => "breast_milk",
            FeedingType::Formula => "formula",
            FeedingType::FortifiedBreastMilk => "fortified_breast_milk",
            FeedingType::SolidFood => "solid_food",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeedingType::BreastMilk => "Breast milk",
            FeedingType::Formula => "Formula",
            FeedingType::FortifiedBreastMilk => "Fortified breast milk",
            FeedingType::SolidFood => "Solid food",
        }
    }
}

impl std::str::FromStr for FeedingType {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "breast_milk" => Ok(FeedingType::BreastMilk),
            "formula" => Ok(FeedingType::Formula),
            "fortified_breast_milk" => Ok(FeedingType::FortifiedBreastMilk),
            "solid_food" => Ok(FeedingType::SolidFood),
            other => Err(ParseChoiceError(other.to_string())),
        }
    }
}

/// How it was fed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(
    feature = "sqlx",
    derive(sqlx::Type),
    sqlx(type_name = "VARCHAR", rename_all = "snake_case")
)]
#[serde(rename_all = "snake_case")]
pub enum FeedingMethod {
    Bottle,
    LeftBreast,
    RightBreast,
    BothBreasts,
    ParentFed,
    SelfFed,
}

impl FeedingMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedingMethod::Bottle => "bottle",
            FeedingMethod::LeftBreast => "left_breast",
            FeedingMethod::RightBreast => "right_breast",
            FeedingMethod::BothBreasts => "both_breasts",
            FeedingMethod::ParentFed => "parent_fed",
            FeedingMethod::SelfFed => "self_fed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            FeedingMethod::Bottle => "Bottle",
            FeedingMethod::LeftBreast => "Left breast",
            FeedingMethod::RightBreast => "Right breast",
            FeedingMethod::BothBreasts => "Both breasts",
            FeedingMethod::ParentFed => "Parent fed",
            FeedingMethod::SelfFed => "Self fed",
        }
    }
}

impl std::str::FromStr for FeedingMethod {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bottle" => Ok(FeedingMethod::Bottle),
            "left_breast" => Ok(FeedingMethod::LeftBreast),
            "right_breast" => Ok(FeedingMethod::RightBreast),
            "both_breasts" => Ok(FeedingMethod::BothBreasts),
            "parent_fed" => Ok(FeedingMethod::ParentFed),
            "self_fed" => Ok(FeedingMethod::SelfFed),
            other => Err(ParseChoiceError(other.to_string())),
        }
    }
}

/// A single feeding
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Feeding {
    pub id: Uuid,
    pub child_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "type")]
    #[cfg_attr(feature = "sqlx", sqlx(rename = "type"))]
    pub feeding_type: FeedingType,
    pub method: FeedingMethod,
    pub amount: Option<Decimal>,
    pub notes: Option<String>,
}

impl Interval for Feeding {
    fn start(&self) -> DateTime<Utc> {
        self.start
    }

    fn end(&self) -> DateTime<Utc> {
        self.end
    }
}

/// A feeding annotated with the running total of amounts served so far that day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FeedingTotal {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub feeding: Feeding,
    pub served_amount: Option<Decimal>,
}
