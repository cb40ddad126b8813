use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEvent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub category: EventCategory,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq, Default)]
#[sqlx(type_name = "event_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventCategory {
    Work,
    #[default]
    Personal,
    Wellness,
    Health,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[validate(length(max = 200, message = "Title must be under 200 characters"))]
    pub title: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub category: Option<EventCategory>,
    #[validate(length(max = 2000, message = "Description must be under 2000 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[validate(length(max = 200, message = "Title must be under 200 characters"))]
    pub title: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub category: Option<EventCategory>,
    #[validate(length(max = 2000, message = "Description must be under 2000 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRangeQuery {
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Trimmed title, or `None` when blank.
pub fn clean_title(raw: Option<&str>) -> Option<String> {
    raw.map(str::trim).filter(|t| !t.is_empty()).map(str::to_string)
}

/// Resolve the dates an update would leave the event with, rejecting a range
/// that ends before it starts.
pub fn resolve_range(
    current: (DateTime<Utc>, DateTime<Utc>),
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<(DateTime<Utc>, DateTime<Utc>), &'static str> {
    let start = start.unwrap_or(current.0);
    let end = end.unwrap_or(current.1);
    if end < start {
        return Err("End date cannot be before start date");
    }
    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_clean_title() {
        assert_eq!(clean_title(Some("  Yoga  ")).as_deref(), Some("Yoga"));
        assert_eq!(clean_title(Some("   ")), None);
        assert_eq!(clean_title(None), None);
    }

    #[test]
    fn test_resolve_range_keeps_current_dates() {
        let start = Utc::now();
        let end = start + Duration::hours(1);
        assert_eq!(resolve_range((start, end), None, None), Ok((start, end)));
    }

    #[test]
    fn test_resolve_range_rejects_end_before_start() {
        let start = Utc::now();
        let end = start + Duration::hours(1);

        // moving only the start past the stored end
        let err = resolve_range((start, end), Some(end + Duration::minutes(1)), None);
        assert_eq!(err, Err("End date cannot be before start date"));

        // moving only the end before the stored start
        let err = resolve_range((start, end), None, Some(start - Duration::minutes(1)));
        assert!(err.is_err());

        let ok = resolve_range((start, end), Some(start), Some(start));
        assert_eq!(ok, Ok((start, start)));
    }
}
