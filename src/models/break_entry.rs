use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BreakEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
    /// Minutes
    pub duration: i32,
    #[serde(rename = "type")]
    pub kind: BreakKind,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "break_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum BreakKind {
    #[default]
    Short,
    Long,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBreakRequest {
    #[validate(range(min = 1, max = 1440, message = "Duration must be at least 1 minute"))]
    pub duration: i32,

    #[serde(rename = "type")]
    pub kind: Option<BreakKind>,

    pub date: Option<DateTime<Utc>>,
}
