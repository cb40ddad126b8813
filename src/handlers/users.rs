use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use uuid::Uuid;

use crate::auth::{
    jwt::create_access_token,
    password::{hash_password, verify_password},
};
use crate::config::Config;
use crate::error::{is_unique_violation, AppError, AppResult};
use crate::extract::ValidatedJson;
use crate::models::user::{normalize_email, LoginRequest, SignupRequest, User, UserSummary};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserSummary,
}

pub fn auth_response(user: User, config: &Config) -> AppResult<AuthResponse> {
    let token = create_access_token(user.id, &user.email, config)?;
    Ok(AuthResponse {
        token,
        user: user.into(),
    })
}

pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<SignupRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let email = normalize_email(&body.email);

    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&state.db)
        .await?;

    if existing > 0 {
        return Err(AppError::Conflict("User already exists".into()));
    }

    let pwd_hash = hash_password(&body.password)?;

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, full_name, email, password_hash)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(body.full_name.trim())
    .bind(&email)
    .bind(&pwd_hash)
    .fetch_one(&state.db)
    .await
    .map_err(|e| {
        // A concurrent signup can win the race past the check above.
        if is_unique_violation(&e) {
            AppError::Conflict("User already exists".into())
        } else {
            e.into()
        }
    })?;

    tracing::info!(user_id = %user.id, "User signed up");

    let response = auth_response(user, &state.config)?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
        .bind(normalize_email(&body.email))
        .fetch_optional(&state.db)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // Google-only accounts have no password to check against.
    let password_hash = user.password_hash.as_deref().ok_or(AppError::Unauthorized)?;
    if !verify_password(&body.password, password_hash)? {
        return Err(AppError::Unauthorized);
    }

    Ok(Json(auth_response(user, &state.config)?))
}
