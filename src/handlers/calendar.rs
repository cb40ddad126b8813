use axum::{extract::State, http::StatusCode, Extension, Json};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::extract::{Path, Query, ValidatedJson};
use crate::models::calendar_event::{
    clean_title, resolve_range, CalendarEvent, CreateEventRequest, EventRangeQuery,
    UpdateEventRequest,
};
use crate::AppState;

/// Events overlapping `[startDate, endDate]`, earliest first.
pub async fn list_events(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Query(query): Query<EventRangeQuery>,
) -> AppResult<Json<Vec<CalendarEvent>>> {
    let (Some(start), Some(end)) = (query.start_date, query.end_date) else {
        return Err(AppError::Validation(
            "Start date and end date are required".into(),
        ));
    };

    let events = sqlx::query_as::<_, CalendarEvent>(
        r#"
        SELECT * FROM calendar_events
        WHERE user_id = $1
          AND start_date <= $3
          AND end_date >= $2
        ORDER BY start_date ASC
        "#,
    )
    .bind(auth_user.id)
    .bind(start)
    .bind(end)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(events))
}

pub async fn create_event(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<CalendarEvent>)> {
    let title = clean_title(body.title.as_deref());
    let (Some(title), Some(start), Some(end)) = (title, body.start_date, body.end_date) else {
        return Err(AppError::Validation(
            "Title, start date and end date are required".into(),
        ));
    };
    let (start, end) =
        resolve_range((start, end), None, None).map_err(|m| AppError::Validation(m.into()))?;

    let event = sqlx::query_as::<_, CalendarEvent>(
        r#"
        INSERT INTO calendar_events (id, user_id, title, start_date, end_date, category, description)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(&title)
    .bind(start)
    .bind(end)
    .bind(body.category.unwrap_or_default())
    .bind(&body.description)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(event)))
}

pub async fn update_event(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(event_id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateEventRequest>,
) -> AppResult<Json<CalendarEvent>> {
    let current = sqlx::query_as::<_, CalendarEvent>(
        "SELECT * FROM calendar_events WHERE id = $1 AND user_id = $2",
    )
    .bind(event_id)
    .bind(auth_user.id)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Event not found".into()))?;

    if body.title.is_some() && clean_title(body.title.as_deref()).is_none() {
        return Err(AppError::Validation("Title cannot be empty".into()));
    }
    let (start, end) = resolve_range(
        (current.start_date, current.end_date),
        body.start_date,
        body.end_date,
    )
    .map_err(|m| AppError::Validation(m.into()))?;

    let event = sqlx::query_as::<_, CalendarEvent>(
        r#"
        UPDATE calendar_events SET
            title = COALESCE($3, title),
            start_date = $4,
            end_date = $5,
            category = COALESCE($6, category),
            description = COALESCE($7, description),
            updated_at = NOW()
        WHERE id = $1 AND user_id = $2
        RETURNING *
        "#,
    )
    .bind(event_id)
    .bind(auth_user.id)
    .bind(clean_title(body.title.as_deref()))
    .bind(start)
    .bind(end)
    .bind(body.category)
    .bind(&body.description)
    .fetch_optional(&state.db)
    .await?
    .ok_or(AppError::NotFound("Event not found".into()))?;

    Ok(Json(event))
}

pub async fn delete_event(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(event_id): Path<Uuid>,
) -> AppResult<Json<Value>> {
    let result = sqlx::query("DELETE FROM calendar_events WHERE id = $1 AND user_id = $2")
        .bind(event_id)
        .bind(auth_user.id)
        .execute(&state.db)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Event not found".into()));
    }

    Ok(Json(json!({ "message": "Event deleted successfully" })))
}
