use std::str::FromStr;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use super::DatabaseHandle;

/// Postgres-backed handle. "Collections" are the tables of the current schema.
pub struct PostgresHandle {
    pool: PgPool,
    name: Option<String>,
}

impl PostgresHandle {
    /// Builds a pool without connecting; the first probe opens the connection.
    pub fn connect_lazy(url: &str, name: Option<String>) -> Result<Self> {
        let options = PgConnectOptions::from_str(url).context("invalid DATABASE_URL")?;
        let name = name.or_else(|| options.get_database().map(str::to_string));

        info!("Configuring lazy Postgres pool for database {:?}", name);

        let pool = PgPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(std::time::Duration::from_secs(5))
            .connect_lazy_with(options);

        Ok(Self { pool, name })
    }
}

#[async_trait]
impl DatabaseHandle for PostgresHandle {
    fn name(&self) -> Option<String> {
        self.name.clone()
    }

    async fn list_collection_names(&self) -> Result<Vec<String>> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT table_name::text
            FROM information_schema.tables
            WHERE table_schema = current_schema()
            ORDER BY table_name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }
}
