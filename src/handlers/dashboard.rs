use axum::{extract::State, Extension, Json};
use chrono::{Duration, Utc};
use serde::Serialize;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::models::break_entry::BreakEntry;
use crate::models::hydration::HydrationEntry;
use crate::models::mood::MoodEntry;
use crate::models::reminder::{Reminder, UpcomingReminder};
use crate::models::sleep::SleepEntry;
use crate::models::work::WorkEntry;
use crate::services::wellness_score::calculate_wellness_score;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardUser {
    pub full_name: String,
    pub email: String,
}

#[derive(Debug, Serialize)]
pub struct WellnessSummary {
    pub mood: Vec<MoodEntry>,
    pub sleep: Vec<SleepEntry>,
    pub hydration: Vec<HydrationEntry>,
    pub work: Vec<WorkEntry>,
    pub breaks: Vec<BreakEntry>,
    pub score: u8,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub user: DashboardUser,
    pub wellness: WellnessSummary,
    pub reminders: Vec<UpcomingReminder>,
}

const ENTRIES_SINCE: &str = "WHERE user_id = $1 AND date >= $2 ORDER BY date ASC";

pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<DashboardResponse>> {
    let (full_name, email) = sqlx::query_as::<_, (String, String)>(
        "SELECT full_name, email FROM users WHERE id = $1",
    )
    .bind(auth_user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("User not found".into()))?;

    let since = Utc::now() - Duration::days(state.config.dashboard_window_days);

    let mood_sql = format!("SELECT * FROM mood_entries {}", ENTRIES_SINCE);
    let sleep_sql = format!("SELECT * FROM sleep_entries {}", ENTRIES_SINCE);
    let hydration_sql = format!("SELECT * FROM hydration_entries {}", ENTRIES_SINCE);
    let work_sql = format!("SELECT * FROM work_entries {}", ENTRIES_SINCE);
    let breaks_sql = format!("SELECT * FROM break_entries {}", ENTRIES_SINCE);

    let (mood, sleep, hydration, work, breaks, reminders) = tokio::try_join!(
        sqlx::query_as::<_, MoodEntry>(&mood_sql)
            .bind(auth_user.id)
            .bind(since)
            .fetch_all(&state.db),
        sqlx::query_as::<_, SleepEntry>(&sleep_sql)
            .bind(auth_user.id)
            .bind(since)
            .fetch_all(&state.db),
        sqlx::query_as::<_, HydrationEntry>(&hydration_sql)
            .bind(auth_user.id)
            .bind(since)
            .fetch_all(&state.db),
        sqlx::query_as::<_, WorkEntry>(&work_sql)
            .bind(auth_user.id)
            .bind(since)
            .fetch_all(&state.db),
        sqlx::query_as::<_, BreakEntry>(&breaks_sql)
            .bind(auth_user.id)
            .bind(since)
            .fetch_all(&state.db),
        sqlx::query_as::<_, Reminder>(
            r#"
            SELECT * FROM reminders
            WHERE user_id = $1 AND enabled = true
            ORDER BY time ASC
            LIMIT 3
            "#,
        )
        .bind(auth_user.id)
        .fetch_all(&state.db),
    )?;

    let score = calculate_wellness_score(&mood, &sleep, &hydration, &work);

    Ok(Json(DashboardResponse {
        user: DashboardUser { full_name, email },
        wellness: WellnessSummary {
            mood,
            sleep,
            hydration,
            work,
            breaks,
            score,
        },
        reminders: reminders.into_iter().map(UpcomingReminder::from).collect(),
    }))
}
