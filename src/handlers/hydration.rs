use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::models::hydration::{CreateHydrationRequest, HydrationEntry};
use crate::AppState;

pub async fn create_hydration(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<CreateHydrationRequest>,
) -> AppResult<(StatusCode, Json<HydrationEntry>)> {
    let entry = sqlx::query_as::<_, HydrationEntry>(
        r#"
        INSERT INTO hydration_entries (id, user_id, date, glasses)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(body.date.unwrap_or_else(Utc::now))
    .bind(body.glasses)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(entry)))
}

pub async fn list_hydration(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<HydrationEntry>>> {
    let entries = sqlx::query_as::<_, HydrationEntry>(
        "SELECT * FROM hydration_entries WHERE user_id = $1 ORDER BY date DESC LIMIT 7",
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(entries))
}
