use axum::{extract::State, Extension, Json};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::models::settings::{UpdateSettingsRequest, UserSettings};
use crate::AppState;

/// Returns the caller's settings, creating the default row on first access.
pub async fn get_settings(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<UserSettings>> {
    // The no-op update makes RETURNING yield the existing row on conflict.
    let settings = sqlx::query_as::<_, UserSettings>(
        r#"
        INSERT INTO user_settings (id, user_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id) DO UPDATE SET user_id = EXCLUDED.user_id
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .fetch_one(&state.db)
    .await?;

    Ok(Json(settings))
}

pub async fn update_settings(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<UpdateSettingsRequest>,
) -> AppResult<Json<UserSettings>> {
    let settings = sqlx::query_as::<_, UserSettings>(
        r#"
        INSERT INTO user_settings (id, user_id, animations_enabled, notifications_enabled, dark_mode)
        VALUES ($1, $2, COALESCE($3, true), COALESCE($4, true), COALESCE($5, false))
        ON CONFLICT (user_id) DO UPDATE SET
            animations_enabled = COALESCE($3, user_settings.animations_enabled),
            notifications_enabled = COALESCE($4, user_settings.notifications_enabled),
            dark_mode = COALESCE($5, user_settings.dark_mode),
            updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(body.animations_enabled)
    .bind(body.notifications_enabled)
    .bind(body.dark_mode)
    .fetch_one(&state.db)
    .await?;

    tracing::debug!(user_id = %auth_user.id, "Settings updated");

    Ok(Json(settings))
}
