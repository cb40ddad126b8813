use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgHasArrayType, PgTypeInfo};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    /// Zero-padded 24h `HH:MM`
    pub time: String,
    pub enabled: bool,
    pub days: Vec<Weekday>,
    pub message: String,
    pub sound: ReminderSound,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "reminder_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum ReminderKind {
    Water,
    Meal,
    EyeRest,
    Stretch,
    Posture,
    Meditation,
}

impl ReminderKind {
    /// Message shown when the user left the reminder text empty.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::Water => "Time to hydrate!",
            Self::Meal => "Time for a healthy meal",
            Self::EyeRest => "Take a break and rest your eyes",
            Self::Stretch => "Time for a quick stretch",
            Self::Posture => "Check your posture",
            Self::Meditation => "Take a moment to meditate",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "reminder_sound", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ReminderSound {
    Chime,
    Bell,
    Drop,
    Ping,
    Soft,
    Calm,
}

impl Default for ReminderSound {
    fn default() -> Self {
        Self::Chime
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, sqlx::Type, PartialEq, Eq)]
#[sqlx(type_name = "weekday", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

// Needed for `days weekday[]`; the derive only covers the scalar type.
impl PgHasArrayType for Weekday {
    fn array_type_info() -> PgTypeInfo {
        PgTypeInfo::with_name("_weekday")
    }
}

impl Weekday {
    pub fn workdays() -> Vec<Weekday> {
        vec![Self::Mon, Self::Tue, Self::Wed, Self::Thu, Self::Fri]
    }
}

/// Parse `H:MM` or `HH:MM` (24h) into the zero-padded `HH:MM` form stored in
/// the database, so that text ordering matches clock ordering.
pub fn normalize_time(raw: &str) -> Option<String> {
    let (h, m) = raw.split_once(':')?;
    if h.is_empty() || h.len() > 2 || m.len() != 2 {
        return None;
    }
    if !h.bytes().chain(m.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u8 = h.parse().ok()?;
    let minute: u8 = m.parse().ok()?;
    if hour > 23 || minute > 59 {
        return None;
    }
    Some(format!("{:02}:{:02}", hour, minute))
}

fn validate_time(time: &str) -> Result<(), ValidationError> {
    if normalize_time(time).is_some() {
        return Ok(());
    }
    let mut err = ValidationError::new("time_format");
    err.message = Some("Time must be in HH:MM format".into());
    Err(err)
}

/// Body for both create and update; update replaces the validated fields.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReminderRequest {
    #[serde(rename = "type")]
    pub kind: ReminderKind,

    #[validate(custom = "validate_time")]
    pub time: String,

    pub enabled: Option<bool>,

    #[validate(length(max = 7, message = "Days must be valid weekdays"))]
    pub days: Option<Vec<Weekday>>,

    #[validate(length(max = 500, message = "Message must be under 500 characters"))]
    pub message: Option<String>,

    pub sound: Option<ReminderSound>,
}

impl ReminderRequest {
    /// Validated time in storage form. Falls back to the raw value only if
    /// called without validating first.
    pub fn normalized_time(&self) -> String {
        normalize_time(&self.time).unwrap_or_else(|| self.time.clone())
    }
}

#[derive(Debug, Deserialize)]
pub struct ReminderQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl ReminderQuery {
    /// Returns `(limit, offset)`; page defaults to 1, limit to 20 (max 100).
    pub fn limit_offset(&self) -> (i64, i64) {
        let page = self.page.filter(|p| *p >= 1).unwrap_or(1);
        let limit = self.limit.filter(|l| *l >= 1).unwrap_or(20).min(100);
        (limit, (page - 1).saturating_mul(limit))
    }
}

/// Reminder as shown on the dashboard.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingReminder {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ReminderKind,
    pub time: String,
    pub message: String,
}

impl From<Reminder> for UpcomingReminder {
    fn from(r: Reminder) -> Self {
        let message = if r.message.is_empty() {
            r.kind.default_message().to_string()
        } else {
            r.message
        };
        Self {
            id: r.id,
            kind: r.kind,
            time: r.time,
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_time_pads_single_digit_hour() {
        assert_eq!(normalize_time("9:05").as_deref(), Some("09:05"));
        assert_eq!(normalize_time("23:59").as_deref(), Some("23:59"));
        assert_eq!(normalize_time("00:00").as_deref(), Some("00:00"));
    }

    #[test]
    fn test_normalize_time_rejects_bad_input() {
        for raw in ["24:00", "12:60", "1230", "12:5", "ab:cd", "123:00", ":30", " 9:30"] {
            assert!(normalize_time(raw).is_none(), "{} should be rejected", raw);
        }
    }

    #[test]
    fn test_reminder_request_validation() {
        let body: ReminderRequest =
            serde_json::from_str(r#"{"type":"water","time":"25:00"}"#).unwrap();
        let errors = body.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("time"));

        let body: ReminderRequest = serde_json::from_str(
            r#"{"type":"eye_rest","time":"7:30","days":["mon","sun"],"sound":"bell"}"#,
        )
        .unwrap();
        assert!(body.validate().is_ok());
        assert_eq!(body.kind, ReminderKind::EyeRest);
        assert_eq!(body.normalized_time(), "07:30");
    }

    #[test]
    fn test_unknown_reminder_type_rejected() {
        let parsed = serde_json::from_str::<ReminderRequest>(r#"{"type":"nap","time":"10:00"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_pagination_defaults_and_clamps() {
        let q = ReminderQuery { page: None, limit: None };
        assert_eq!(q.limit_offset(), (20, 0));

        let q = ReminderQuery { page: Some(3), limit: Some(10) };
        assert_eq!(q.limit_offset(), (10, 20));

        let q = ReminderQuery { page: Some(0), limit: Some(1000) };
        assert_eq!(q.limit_offset(), (100, 0));
    }

    #[test]
    fn test_pagination_huge_page_saturates() {
        let q = ReminderQuery { page: Some(i64::MAX), limit: Some(100) };
        let (limit, offset) = q.limit_offset();
        assert_eq!(limit, 100);
        assert_eq!(offset, i64::MAX);
    }

    fn assert_pg_type<T: sqlx::Type<sqlx::Postgres>>() {}
    fn assert_pg_row<T: for<'r> FromRow<'r, sqlx::postgres::PgRow>>() {}

    #[test]
    fn test_weekday_array_maps_to_postgres() {
        use sqlx::TypeInfo;

        assert_pg_type::<Vec<Weekday>>();
        assert_pg_type::<Option<Vec<Weekday>>>();
        assert_pg_row::<Reminder>();
        assert_eq!(Weekday::array_type_info().name(), "_weekday");
    }

    #[test]
    fn test_upcoming_reminder_uses_default_message_when_empty() {
        let now = Utc::now();
        let reminder = Reminder {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            kind: ReminderKind::Posture,
            time: "10:00".into(),
            enabled: true,
            days: Weekday::workdays(),
            message: String::new(),
            sound: ReminderSound::default(),
            created_at: now,
            updated_at: now,
        };
        let upcoming = UpcomingReminder::from(reminder.clone());
        assert_eq!(upcoming.message, "Check your posture");

        let custom = UpcomingReminder::from(Reminder {
            message: "Sit up straight".into(),
            ..reminder
        });
        assert_eq!(custom.message, "Sit up straight");
    }
}
