use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::models::break_entry::{BreakEntry, CreateBreakRequest};
use crate::AppState;

pub async fn create_break(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<CreateBreakRequest>,
) -> AppResult<(StatusCode, Json<BreakEntry>)> {
    let entry = sqlx::query_as::<_, BreakEntry>(
        r#"
        INSERT INTO break_entries (id, user_id, date, duration, kind)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(body.date.unwrap_or_else(Utc::now))
    .bind(body.duration)
    .bind(body.kind.unwrap_or_default())
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_breaks(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<BreakEntry>>> {
    let entries = sqlx::query_as::<_, BreakEntry>(
        "SELECT * FROM break_entries WHERE user_id = $1 ORDER BY date DESC LIMIT 30",
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(entries))
}
