use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::validate_not_blank;

use crate::models::challenge::ChallengeCategory;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Achievement {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub icon: AchievementIcon,
    pub date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "achievement_icon")]
pub enum AchievementIcon {
    BriefcaseIcon,
    ClockIcon,
    HomeIcon,
    HeartIcon,
    AcademicCapIcon,
    UserGroupIcon,
}

impl From<ChallengeCategory> for AchievementIcon {
    fn from(category: ChallengeCategory) -> Self {
        match category {
            ChallengeCategory::Work => Self::BriefcaseIcon,
            ChallengeCategory::Family => Self::HomeIcon,
            ChallengeCategory::Personal => Self::HeartIcon,
            ChallengeCategory::Learning => Self::AcademicCapIcon,
            ChallengeCategory::Social => Self::UserGroupIcon,
            ChallengeCategory::Rest => Self::ClockIcon,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateAchievementRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    #[validate(custom = "validate_not_blank")]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "Description must be 1-2000 characters"))]
    #[validate(custom = "validate_not_blank")]
    pub description: String,

    pub icon: AchievementIcon,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_achievement_title_rejected() {
        let body: CreateAchievementRequest = serde_json::from_str(
            r#"{"title":"  ","description":"First week done","icon":"HeartIcon"}"#,
        )
        .unwrap();
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));
        assert!(!errors.field_errors().contains_key("description"));
    }
}
