use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::models::validate_not_blank;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Challenge {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    pub category: ChallengeCategory,
    pub total: i32,
    pub progress: i32,
    pub completed: bool,
    pub reward: Option<String>,
    pub start_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Challenge {
    /// True when `progress` reaches the target of a challenge that was not
    /// already finished.
    pub fn completes_with(&self, progress: i32) -> bool {
        !self.completed && progress >= self.total
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "challenge_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ChallengeCategory {
    Work,
    Family,
    Personal,
    Learning,
    Social,
    Rest,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateChallengeRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    #[validate(custom = "validate_not_blank")]
    pub title: String,

    #[validate(length(min = 1, max = 2000, message = "Description must be 1-2000 characters"))]
    #[validate(custom = "validate_not_blank")]
    pub description: String,

    pub category: ChallengeCategory,

    #[validate(range(min = 1, message = "Total must be at least 1"))]
    pub total: i32,

    #[validate(length(max = 200))]
    pub reward: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProgressRequest {
    #[validate(range(min = 0, message = "Progress cannot be negative"))]
    pub progress: i32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::achievement::AchievementIcon;

    fn challenge(total: i32, completed: bool) -> Challenge {
        let now = Utc::now();
        Challenge {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            title: "Walk daily".into(),
            description: "Take a walk every day".into(),
            category: ChallengeCategory::Rest,
            total,
            progress: 0,
            completed,
            reward: None,
            start_date: now,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_completes_when_progress_reaches_total() {
        let c = challenge(5, false);
        assert!(!c.completes_with(4));
        assert!(c.completes_with(5));
        assert!(c.completes_with(9));
    }

    #[test]
    fn test_already_completed_does_not_complete_again() {
        let c = challenge(5, true);
        assert!(!c.completes_with(5));
    }

    #[test]
    fn test_blank_title_or_description_rejected() {
        let body: CreateChallengeRequest = serde_json::from_str(
            r#"{"title":"   ","description":"Walk","category":"rest","total":3}"#,
        )
        .unwrap();
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));

        let body: CreateChallengeRequest = serde_json::from_str(
            r#"{"title":"Walk","description":" \t ","category":"rest","total":3}"#,
        )
        .unwrap();
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));

        let body: CreateChallengeRequest = serde_json::from_str(
            r#"{"title":" Walk ","description":"Daily walk","category":"rest","total":3}"#,
        )
        .unwrap();
        assert!(body.validate().is_ok());
    }

    #[test]
    fn test_achievement_icon_follows_category() {
        assert_eq!(
            AchievementIcon::from(ChallengeCategory::Work),
            AchievementIcon::BriefcaseIcon
        );
        assert_eq!(
            AchievementIcon::from(ChallengeCategory::Rest),
            AchievementIcon::ClockIcon
        );
    }
}
