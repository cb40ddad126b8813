use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub cors_extra_origins: Vec<String>,

    pub jwt_secret: String,
    pub jwt_ttl_secs: i64,

    pub google: Option<GoogleConfig>,

    pub rate_limit_max: u32,
    pub rate_limit_window_secs: u64,

    pub dashboard_window_days: i64,
}

#[derive(Debug, Clone)]
pub struct GoogleConfig {
    pub client_id: String,
    pub client_secret: String,
    pub callback_url: String,
}

impl Config {
    /// Load the dotenv file for the current `APP_ENV`, then read the process
    /// environment.
    pub fn load() -> Self {
        let env_file = match env::var("APP_ENV").as_deref() {
            Ok("production") => ".env.production",
            _ => ".env.development",
        };
        if dotenvy::from_filename(env_file).is_err() {
            dotenvy::dotenv().ok();
        }
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "5000".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            cors_extra_origins: env::var("CORS_EXTRA_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or_default(),

            jwt_secret: env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            jwt_ttl_secs: env::var("JWT_TTL_SECS")
                .unwrap_or_else(|_| "86400".into())
                .parse()
                .expect("JWT_TTL_SECS must be a number"),

            google: GoogleConfig::from_env(),

            rate_limit_max: env::var("RATE_LIMIT_MAX")
                .unwrap_or_else(|_| "100".into())
                .parse()
                .unwrap_or(100),
            rate_limit_window_secs: env::var("RATE_LIMIT_WINDOW_SECS")
                .unwrap_or_else(|_| "900".into()) // 15 minutes
                .parse()
                .unwrap_or(900),

            dashboard_window_days: dashboard_window_days(
                env::var("DASHBOARD_WINDOW_DAYS").ok().as_deref(),
            ),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Days of history behind the dashboard score, 7 unless set. Kept within a
/// year so `chrono::Duration::days` cannot overflow.
fn dashboard_window_days(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(7)
        .clamp(1, 365)
}

impl GoogleConfig {
    /// All three variables must be present and non-empty, otherwise Google
    /// sign-in stays disabled.
    fn from_env() -> Option<Self> {
        let read = |key: &str| env::var(key).ok().filter(|v| !v.is_empty());
        Some(Self {
            client_id: read("GOOGLE_CLIENT_ID")?,
            client_secret: read("GOOGLE_CLIENT_SECRET")?,
            callback_url: read("GOOGLE_CALLBACK_URL")?,
        })
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            database_url: "postgres://localhost/wellness_buddy_test".into(),
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            cors_extra_origins: Vec::new(),
            jwt_secret: "test-secret".into(),
            jwt_ttl_secs: 3600,
            google: Some(GoogleConfig {
                client_id: "client-id".into(),
                client_secret: "client-secret".into(),
                callback_url: "http://localhost:5000/api/auth/google/callback".into(),
            }),
            rate_limit_max: 100,
            rate_limit_window_secs: 900,
            dashboard_window_days: 7,
        }
    }
}
