use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: DateTime<Utc>,
    pub mood: MoodKind,
    pub stress: Option<i16>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "mood_kind", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MoodKind {
    Happy,
    Sad,
    Neutral,
    Angry,
    Anxious,
}

impl MoodKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Happy => "happy",
            Self::Sad => "sad",
            Self::Neutral => "neutral",
            Self::Angry => "angry",
            Self::Anxious => "anxious",
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateMoodRequest {
    pub mood: MoodKind,

    /// Stress level, 1 (very low) to 5 (very high)
    #[validate(range(min = 1, max = 5, message = "Stress must be between 1 and 5"))]
    pub stress: Option<i16>,

    #[validate(length(max = 5000, message = "Notes must be under 5000 characters"))]
    pub notes: Option<String>,

    pub date: Option<DateTime<Utc>>,
}
