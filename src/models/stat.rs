use serde::Serialize;
use sqlx::FromRow;

/// Public landing-page counters.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct SiteStats {
    pub users: i64,
    pub programs: i64,
    pub reminders: i64,
}
