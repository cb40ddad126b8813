use axum::{extract::State, response::Redirect};
use chrono::Utc;
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::google::{self, GoogleProfile};
use crate::config::{Config, GoogleConfig};
use crate::error::{AppError, AppResult};
use crate::extract::Query;
use crate::handlers::users::{auth_response, AuthResponse};
use crate::models::user::{normalize_email, User};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct GoogleCallbackQuery {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

fn google_config(config: &Config) -> AppResult<&GoogleConfig> {
    config
        .google
        .as_ref()
        .ok_or_else(|| AppError::NotFound("Google sign-in is not configured".into()))
}

/// `{FRONTEND_URL}{path}?params`
fn frontend_url(config: &Config, path: &str, params: &[(&str, &str)]) -> String {
    let base = format!("{}{}", config.frontend_url.trim_end_matches('/'), path);
    match reqwest::Url::parse_with_params(&base, params) {
        Ok(url) => url.to_string(),
        Err(_) => base,
    }
}

pub async fn google_login(State(state): State<AppState>) -> AppResult<Redirect> {
    let google = google_config(&state.config)?;
    let oauth_state = google::sign_state(&state.config.jwt_secret, Utc::now().timestamp())?;
    let url = google::authorize_url(google, &oauth_state)?;
    Ok(Redirect::to(url.as_str()))
}

/// Always redirects back to the frontend: with a token on success, to the
/// login page otherwise.
pub async fn google_callback(
    State(state): State<AppState>,
    Query(query): Query<GoogleCallbackQuery>,
) -> AppResult<Redirect> {
    let google = google_config(&state.config)?;

    match complete_sign_in(&state, google, query).await {
        Ok(response) => Ok(Redirect::to(&frontend_url(
            &state.config,
            "/auth/callback",
            &[("token", response.token.as_str())],
        ))),
        Err(e) => {
            tracing::warn!(error = %e, "Google sign-in failed");
            Ok(Redirect::to(&frontend_url(
                &state.config,
                "/login",
                &[("error", "oauth_failed")],
            )))
        }
    }
}

async fn complete_sign_in(
    state: &AppState,
    google: &GoogleConfig,
    query: GoogleCallbackQuery,
) -> AppResult<AuthResponse> {
    if let Some(error) = query.error {
        return Err(AppError::Validation(format!("Google returned an error: {}", error)));
    }
    let (Some(code), Some(oauth_state)) = (query.code, query.state) else {
        return Err(AppError::Validation("Missing code or state".into()));
    };
    if !google::verify_state(&state.config.jwt_secret, &oauth_state, Utc::now().timestamp()) {
        return Err(AppError::Unauthorized);
    }

    let profile = google::fetch_profile(&state.http, google, &code).await?;
    let user = find_or_create_google_user(&state.db, &profile).await?;
    auth_response(user, &state.config)
}

/// Match by Google id first, then link an existing account with the same
/// verified email, else create a new password-less account.
async fn find_or_create_google_user(db: &PgPool, profile: &GoogleProfile) -> AppResult<User> {
    let existing = sqlx::query_as::<_, User>("SELECT * FROM users WHERE google_id = $1")
        .bind(&profile.sub)
        .fetch_optional(db)
        .await?;
    if let Some(user) = existing {
        return Ok(user);
    }

    let email = profile
        .email
        .as_deref()
        .filter(|_| profile.email_verified)
        .map(normalize_email)
        .ok_or_else(|| AppError::Validation("Google account has no verified email".into()))?;

    let linked = sqlx::query_as::<_, User>(
        r#"
        UPDATE users SET google_id = $2, updated_at = NOW()
        WHERE email = $1
        RETURNING *
        "#,
    )
    .bind(&email)
    .bind(&profile.sub)
    .fetch_optional(db)
    .await?;
    if let Some(user) = linked {
        tracing::info!(user_id = %user.id, "Linked Google account to existing user");
        return Ok(user);
    }

    let user = sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (id, full_name, email, google_id)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(profile.display_name())
    .bind(&email)
    .bind(&profile.sub)
    .fetch_one(db)
    .await?;

    tracing::info!(user_id = %user.id, "User signed up with Google");
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontend_url_encodes_params() {
        let mut config = Config::for_tests();
        config.frontend_url = "http://localhost:3000/".into();

        let url = frontend_url(&config, "/auth/callback", &[("token", "a.b c")]);
        assert_eq!(url, "http://localhost:3000/auth/callback?token=a.b+c");
    }

    #[test]
    fn test_google_config_missing_is_not_found() {
        let mut config = Config::for_tests();
        config.google = None;
        assert!(matches!(google_config(&config), Err(AppError::NotFound(_))));
    }
}
