use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::models::mood::{CreateMoodRequest, MoodEntry};
use crate::AppState;

const RECENT_LIMIT: i64 = 7;

pub async fn create_mood(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<CreateMoodRequest>,
) -> AppResult<(StatusCode, Json<MoodEntry>)> {
    let entry = sqlx::query_as::<_, MoodEntry>(
        r#"
        INSERT INTO mood_entries (id, user_id, date, mood, stress, notes)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(body.date.unwrap_or_else(Utc::now))
    .bind(body.mood)
    .bind(body.stress)
    .bind(&body.notes)
    .fetch_one(&state.db)
    .await?;

    tracing::debug!(user_id = %auth_user.id, mood = entry.mood.as_str(), "Mood logged");

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_moods(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<MoodEntry>>> {
    let entries = sqlx::query_as::<_, MoodEntry>(
        "SELECT * FROM mood_entries WHERE user_id = $1 ORDER BY date DESC LIMIT $2",
    )
    .bind(auth_user.id)
    .bind(RECENT_LIMIT)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(entries))
}
