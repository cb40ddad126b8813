use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post, put},
    Router,
};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::auth;
use crate::config::Config;
use crate::handlers;
use crate::AppState;

fn cors(config: &Config) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = std::iter::once(&config.frontend_url)
        .chain(config.cors_extra_origins.iter())
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(hv) => Some(hv),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}

pub fn router(state: AppState) -> Router {
    // Signup/login get their own tighter limit
    let auth_routes = Router::new()
        .route("/api/users/signup", post(handlers::users::signup))
        .route("/api/users/login", post(handlers::users::login))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_auth,
        ));

    let public_api = Router::new()
        .route("/api/auth/google", get(handlers::oauth::google_login))
        .route(
            "/api/auth/google/callback",
            get(handlers::oauth::google_callback),
        )
        .route("/api/stats", get(handlers::stats::get_stats))
        .merge(auth_routes);

    let protected_api = Router::new()
        .route("/api/dashboard/me", get(handlers::dashboard::get_dashboard))
        // Trackers
        .route(
            "/api/mood",
            get(handlers::mood::list_moods).post(handlers::mood::create_mood),
        )
        .route(
            "/api/sleep",
            get(handlers::sleep::list_sleep).post(handlers::sleep::create_sleep),
        )
        .route(
            "/api/hydration",
            get(handlers::hydration::list_hydration).post(handlers::hydration::create_hydration),
        )
        .route(
            "/api/work",
            get(handlers::work::list_work).post(handlers::work::create_work),
        )
        .route(
            "/api/break",
            get(handlers::breaks::list_breaks).post(handlers::breaks::create_break),
        )
        // Reminders
        .route(
            "/api/reminder",
            get(handlers::reminders::list_reminders).post(handlers::reminders::create_reminder),
        )
        .route(
            "/api/reminder/:id",
            put(handlers::reminders::update_reminder).delete(handlers::reminders::delete_reminder),
        )
        // Settings
        .route(
            "/api/settings",
            get(handlers::settings::get_settings).put(handlers::settings::update_settings),
        )
        // Challenges & achievements
        .route(
            "/api/challenge",
            get(handlers::challenges::list_challenges).post(handlers::challenges::create_challenge),
        )
        .route(
            "/api/challenge/:id/progress",
            put(handlers::challenges::update_progress),
        )
        .route(
            "/api/achievement",
            get(handlers::achievements::list_achievements)
                .post(handlers::achievements::create_achievement),
        )
        // Calendar
        .route(
            "/api/calendar",
            get(handlers::calendar::list_events).post(handlers::calendar::create_event),
        )
        .route(
            "/api/calendar/:id",
            put(handlers::calendar::update_event).delete(handlers::calendar::delete_event),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::middleware::require_auth,
        ));

    let api = public_api
        .merge(protected_api)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::rate_limit::rate_limit_api,
        ));

    let health = Router::new()
        .route("/", get(handlers::health::health_check))
        .route("/health", get(handlers::health::health_check))
        .route("/readyz", get(handlers::health::readyz));

    Router::new()
        .merge(health)
        .merge(api)
        .layer(cors(&state.config))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
