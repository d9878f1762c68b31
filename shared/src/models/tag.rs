//! Free-form labels attachable to event records

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    /// Hex colour used when rendering the tag
    pub color: String,
}
