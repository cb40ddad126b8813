use axum::{extract::State, http::StatusCode, Extension, Json};
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::AppResult;
use crate::extract::ValidatedJson;
use crate::models::achievement::{Achievement, CreateAchievementRequest};
use crate::AppState;

pub async fn list_achievements(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<Achievement>>> {
    let achievements = sqlx::query_as::<_, Achievement>(
        "SELECT * FROM achievements WHERE user_id = $1 ORDER BY date DESC",
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(achievements))
}

pub async fn create_achievement(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<CreateAchievementRequest>,
) -> AppResult<(StatusCode, Json<Achievement>)> {
    let achievement = sqlx::query_as::<_, Achievement>(
        r#"
        INSERT INTO achievements (id, user_id, title, description, icon, date)
        VALUES ($1, $2, $3, $4, $5, NOW())
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(body.title.trim())
    .bind(body.description.trim())
    .bind(body.icon)
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(achievement)))
}
