use anyhow::Result;

use crate::config::Config;

pub async fn migrate(config: &Config) -> Result<()> {
    tracing::info!(url = %config.database.url, "Migrating database");

    let pool = crate::db::create_pool(&config.database.url, 1).await?;
    crate::db::migrate(&pool).await?;
    pool.close().await;

    Ok(())
}
