use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::models::sleep::{CreateSleepRequest, SleepEntry};
use crate::AppState;

pub async fn create_sleep(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<CreateSleepRequest>,
) -> AppResult<(StatusCode, Json<SleepEntry>)> {
    let entry = sqlx::query_as::<_, SleepEntry>(
        r#"
        INSERT INTO sleep_entries (id, user_id, date, hours, quality)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(body.date.unwrap_or_else(Utc::now))
    .bind(body.hours)
    .bind(body.quality)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

/// Last two weeks of nights.
pub async fn list_sleep(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<SleepEntry>>> {
    let entries = sqlx::query_as::<_, SleepEntry>(
        "SELECT * FROM sleep_entries WHERE user_id = $1 ORDER BY date DESC LIMIT 14",
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(entries))
}
