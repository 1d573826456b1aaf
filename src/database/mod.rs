use std::env;
use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use log::{info, warn};

use crate::config::ServerConfig;
use crate::web::models::Diagnostics;

#[cfg(feature = "postgres")]
pub mod postgres;

// Upper bound on collection names reported by the probe.
pub const MAX_LISTED_COLLECTIONS: usize = 10;

// Error strings are cut to this many characters in diagnostics.
pub const MAX_ERROR_CHARS: usize = 50;

/// A connected database as seen by the diagnostics endpoint.
#[async_trait]
pub trait DatabaseHandle: Send + Sync {
    /// Display name of the database, if the handle knows it.
    fn name(&self) -> Option<String>;

    async fn list_collection_names(&self) -> Result<Vec<String>>;
}

/// The optional database collaborator, decided once at startup.
#[cfg_attr(not(feature = "postgres"), allow(dead_code))]
#[derive(Clone)]
pub enum Database {
    /// No database driver is compiled in.
    Unavailable,
    /// A driver is present but building the handle failed.
    Failed(String),
    /// A driver is present but nothing is configured.
    Uninitialized,
    Ready(Arc<dyn DatabaseHandle>),
}

impl Database {
    #[cfg_attr(not(feature = "postgres"), allow(dead_code))]
    pub fn ready(handle: impl DatabaseHandle + 'static) -> Self {
        Database::Ready(Arc::new(handle))
    }

    #[cfg(feature = "postgres")]
    pub fn from_config(config: &ServerConfig) -> Self {
        match &config.database_url {
            None => Database::Uninitialized,
            Some(url) => match postgres::PostgresHandle::connect_lazy(
                url,
                config.database_name.clone(),
            ) {
                Ok(handle) => Database::ready(handle),
                Err(e) => Database::Failed(e.to_string()),
            },
        }
    }

    #[cfg(not(feature = "postgres"))]
    pub fn from_config(_config: &ServerConfig) -> Self {
        Database::Unavailable
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Database::Unavailable => "unavailable",
            Database::Failed(_) => "failed",
            Database::Uninitialized => "uninitialized",
            Database::Ready(_) => "ready",
        }
    }
}

/// Which of the database variables are currently set (non-empty).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnvPresence {
    pub database_url: bool,
    pub database_name: bool,
}

impl EnvPresence {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let set = |key: &str| lookup(key).is_some_and(|v| !v.trim().is_empty());
        Self {
            database_url: set("DATABASE_URL"),
            database_name: set("DATABASE_NAME"),
        }
    }
}

fn set_or_not(present: bool) -> String {
    let label = if present { "✅ Set" } else { "❌ Not Set" };
    label.to_string()
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect()
}

/// Builds the `/test` report. Never fails: every problem ends up as text.
pub async fn probe(database: &Database, env: EnvPresence) -> Diagnostics {
    let mut report = Diagnostics {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: set_or_not(env.database_url),
        database_name: set_or_not(env.database_name),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    match database {
        Database::Unavailable => {
            report.database =
                "❌ Database module not found (run enable-database first)".to_string();
        }
        Database::Failed(e) => {
            report.database = format!("❌ Error: {}", truncate_chars(e, MAX_ERROR_CHARS));
        }
        Database::Uninitialized => {
            report.database = "⚠️  Available but not initialized".to_string();
        }
        Database::Ready(handle) => {
            report.connection_status = "Connected".to_string();
            match handle.list_collection_names().await {
                Ok(mut names) => {
                    names.truncate(MAX_LISTED_COLLECTIONS);
                    info!(
                        "Database {} reachable, {} collections listed",
                        handle.name().unwrap_or_default(),
                        names.len()
                    );
                    report.collections = names;
                    report.database = "✅ Connected & Working".to_string();
                }
                Err(e) => {
                    warn!("Listing collections failed: {:#}", e);
                    report.database = format!(
                        "⚠️  Connected but Error: {}",
                        truncate_chars(&e.to_string(), MAX_ERROR_CHARS)
                    );
                }
            }
        }
    }

    report
}
