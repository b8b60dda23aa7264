use anyhow::Result;
use moka::future::Cache;
use sea_orm::Database;
use std::time::Duration;

use crate::schemas::AppState;

/// Initialize application state for a specific database URL.
pub async fn initialize_app_state_with_url(database_url: &str) -> Result<AppState> {
    // Connect to database
    tracing::info!("Connecting to database: {}", database_url);
    let db = Database::connect(database_url).await?;

    // Initialize cache for the analytics summary
    let cache = Cache::builder()
        .max_capacity(100)
        .time_to_live(Duration::from_secs(60)) // 1 minute
        .build();

    Ok(AppState { db, cache })
}
