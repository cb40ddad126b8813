use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::models::work::{CreateWorkRequest, WorkEntry};
use crate::AppState;

pub async fn create_work(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<CreateWorkRequest>,
) -> AppResult<(StatusCode, Json<WorkEntry>)> {
    let entry = sqlx::query_as::<_, WorkEntry>(
        r#"
        INSERT INTO work_entries (id, user_id, date, hours, tasks_completed)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(body.date.unwrap_or_else(Utc::now))
    .bind(body.hours)
    .bind(body.tasks_completed.unwrap_or(0))
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_work(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<WorkEntry>>> {
    let entries = sqlx::query_as::<_, WorkEntry>(
        "SELECT * FROM work_entries WHERE user_id = $1 ORDER BY date DESC LIMIT 30",
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(entries))
}
