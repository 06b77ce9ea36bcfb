use crate::config::database::PostgresSettings;
use anyhow::Context;
use secrecy::ExposeSecret;
use sqlx::{migrate, PgPool};
use tracing::info;

pub async fn get_postgres_pool(config: &PostgresSettings) -> anyhow::Result<PgPool> {
    let pool = PgPool::connect(config.database_url.expose_secret())
        .await
        .context("Cannot establish postgres connection")?;
    if config.is_migrating {
        info!("Running migrations");
        migrate!("./migrations")
            .run(&pool)
            .await
            .context("Auto migration failed")?;
    }
    Ok(pool)
}
