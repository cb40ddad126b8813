use axum::{extract::State, http::StatusCode, Extension, Json};
use chrono::Utc;
use uuid::Uuid;

use crate::auth::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::extract::{Path, ValidatedJson};
use crate::models::achievement::AchievementIcon;
use crate::models::challenge::{Challenge, CreateChallengeRequest, UpdateProgressRequest};
use crate::AppState;

pub async fn list_challenges(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> AppResult<Json<Vec<Challenge>>> {
    let challenges = sqlx::query_as::<_, Challenge>(
        r#"
        SELECT * FROM challenges
        WHERE user_id = $1 AND completed = false
        ORDER BY start_date DESC
        "#,
    )
    .bind(auth_user.id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(challenges))
}

pub async fn create_challenge(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    ValidatedJson(body): ValidatedJson<CreateChallengeRequest>,
) -> AppResult<(StatusCode, Json<Challenge>)> {
    let challenge = sqlx::query_as::<_, Challenge>(
        r#"
        INSERT INTO challenges (id, user_id, title, description, category, total, reward, start_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(auth_user.id)
    .bind(body.title.trim())
    .bind(body.description.trim())
    .bind(body.category)
    .bind(body.total)
    .bind(&body.reward)
    .bind(Utc::now())
    .fetch_one(&state.db)
    .await?;

    Ok((StatusCode::CREATED, Json(challenge)))
}

/// Sets progress. Crossing `total` completes the challenge and awards an
/// achievement in the same transaction.
pub async fn update_progress(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    Path(challenge_id): Path<Uuid>,
    ValidatedJson(body): ValidatedJson<UpdateProgressRequest>,
) -> AppResult<Json<Challenge>> {
    let mut tx = state.db.begin().await?;

    let current = sqlx::query_as::<_, Challenge>(
        "SELECT * FROM challenges WHERE id = $1 AND user_id = $2 FOR UPDATE",
    )
    .bind(challenge_id)
    .bind(auth_user.id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(AppError::NotFound("Challenge not found".into()))?;

    let completes = current.completes_with(body.progress);

    let challenge = sqlx::query_as::<_, Challenge>(
        r#"
        UPDATE challenges SET
            progress = $2,
            completed = completed OR $3,
            updated_at = NOW()
        WHERE id = $1
        RETURNING *
        "#,
    )
    .bind(challenge_id)
    .bind(body.progress)
    .bind(completes)
    .fetch_one(&mut *tx)
    .await?;

    if completes {
        sqlx::query(
            r#"
            INSERT INTO achievements (id, user_id, title, description, icon, date)
            VALUES ($1, $2, $3, $4, $5, NOW())
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(auth_user.id)
        .bind(format!("Completed: {}", challenge.title))
        .bind(&challenge.description)
        .bind(AchievementIcon::from(challenge.category))
        .execute(&mut *tx)
        .await?;

        tracing::info!(
            user_id = %auth_user.id,
            challenge_id = %challenge.id,
            "Challenge completed"
        );
    }

    tx.commit().await?;

    Ok(Json(challenge))
}
