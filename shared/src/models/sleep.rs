//! Sleep records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Interval;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sleep {
    pub id: Uuid,
    pub child_id: Uuid,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub nap: bool,
    pub notes: Option<String>,
}

impl Interval for Sleep {
    fn start(&self) -> DateTime<Utc> {
        self.start
    }

    fn end(&self) -> DateTime<Utc> {
        self.end
    }
}
