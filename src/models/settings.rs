use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub id: Uuid,
    pub user_id: Uuid,
    pub animations_enabled: bool,
    pub notifications_enabled: bool,
    pub dark_mode: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial update; omitted fields keep their stored (or default) value.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub animations_enabled: Option<bool>,
    pub notifications_enabled: Option<bool>,
    pub dark_mode: Option<bool>,
}
