use axum::{extract::State, http::StatusCode, Extension, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::extract::{Path, Query, ValidatedJson};
use crate::models::reminder::{Reminder, ReminderQuery, ReminderRequest, Weekday};
use crate::AppState;

pub async fn create_reminder(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<ReminderRequest>,
) -> AppResult<(StatusCode, Json<Reminder>)> {
    let reminder = sqlx::query_as::<_, Reminder>(
        r#"
        INSERT INTO reminders (id, user_id, kind, time, enabled, days, message, sound)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(body.kind)
    .bind(body.normalized_time())
    .bind(body.enabled.unwrap_or(true))
    .bind(body.days.clone().unwrap_or_else(Weekday::workdays))
    .bind(body.message.clone().unwrap_or_default())
    .bind(body.sound.unwrap_or_default())
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(reminder)))
}

/// Reminders ordered by time of day. Times are stored zero-padded, so the
/// text ordering is chronological.
pub async fn list_reminders(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<ReminderQuery>,
) -> AppResult<Json<Vec<Reminder>>> {
    let (limit, offset) = query.limit_offset();

    let reminders = sqlx::query_as::<_, Reminder>(
        r#"
        SELECT * FROM reminders
        WHERE user_id = $1
        ORDER BY time ASC, created_at ASC
        LIMIT $2 OFFSET $3
        "#,
    )
    .bind(auth_user.id)
    .bind(limit)
    .bind(offset)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(reminders))
}

pub async fn update_reminder(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(reminder_id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<ReminderRequest>,
) -> AppResult<Json<Reminder>> {
    let reminder = sqlx::query_as::<_, Reminder>(
        r#"
        UPDATE reminders SET
            kind = $3,
            time = $4,
            enabled = COALESCE($5, enabled),
            days = COALESCE($6, days),
            message = COALESCE($7, message),
            sound = COALESCE($8, sound),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(reminder_id)
    .bind(auth_user.id)
    .bind(body.kind)
    .bind(body.normalized_time())
    .bind(body.enabled)
    .bind(&body.days)
    .bind(&body.message)
    .bind(body.sound)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Reminder not found".into()))?;

    Ok(Json(reminder))
}

pub async fn delete_reminder(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(reminder_id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    let result = sqlx::query("DELETE FROM reminders WHERE id = $1 AND user_id = $2")
        .bind(reminder_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Reminder not found".into()));
    }

    Ok(Json(json!({ "message": "Reminder deleted" })))
}
