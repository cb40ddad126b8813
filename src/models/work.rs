use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WorkEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
    pub hours: f64,
    pub tasks_completed: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkRequest {
    #[validate(range(min = 0.0, max = 24.0, message = "Hours must be between 0 and 24"))]
    pub hours: f64,

    #[validate(range(min = 0, message = "Tasks completed cannot be negative"))]
    pub tasks_completed: Option<i32>,

    pub date: Option<DateTime<Utc>>,
}
