use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::models::stat::SiteStats;
use crate::AppState;

/// Public landing-page counters. The singleton row is seeded on first read.
pub async fn get_stats(State(state): State<AppState>) -> AppResult<Json<SiteStats>> {
    sqlx::query(
        r#"
        INSERT INTO site_stats (id, users, programs, reminders)
        VALUES (1, 1000, 50, 5000)
        ON CONFLICT (id) DO NOTHING
        "#,
    )
    .execute(&state.db)
    .await?;

    let stats = sqlx::query_as::<_, SiteStats>(
        "SELECT users, programs, reminders FROM site_stats WHERE id = 1",
    )
    .fetch_one(&state.db)
    .await?;

    Ok(Json(stats))
}
