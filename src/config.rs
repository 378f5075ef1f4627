//! Seeder configuration loaded from environment variables.
//!
//! `main` loads a `.env` file first (via `dotenvy`), so every variable can
//! also be set there.
//!
//! # Environment Variables
//!
//! ## Required Variables
//! - `DATABASE_URL`: PostgreSQL connection string (only when `SEED_STORE=postgres`)
//! - `REDIS_URL`: Redis connection URL (only when `SEED_STORE=redis`)
//!
//! ## Optional Variables
//! - `RUST_LOG`: Logging level (default: "info,city_guide_seeder=debug")
//! - `SEED_FILE`: Seed file to load (default: "seed/sample_data.json"); the
//!   first command-line argument overrides it
//! - `SEED_STORE`: Target store, one of `memory`, `postgres`, `redis` (default: memory)
//! - `DATABASE_MAX_CONNECTIONS`: DB pool size (default: 5)
//! - `REDIS_KEY_PREFIX`: Namespace for Redis keys (default: "seed")
//! - `SEED_WRITE_CONCURRENCY`: Store writes in flight, at least 1 (default: 8)
//! - `SEED_DRY_RUN`: Validate only, write nothing (default: false)
//! - `SEED_STRICT`: Exit non-zero when any record is rejected (default: false)
//! - `IGNORE_MISSING_MIGRATIONS`: Skip missing migrations (default: true)

use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Which document store the seeder writes to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub enum StoreBackend {
    /// Process-local store; useful for validating a seed file.
    Memory,
    Postgres {
        database_url: String,
        max_connections: u32,
        ignore_missing_migrations: bool,
    },
    Redis {
        redis_url: String,
        key_prefix: String,
    },
}

impl StoreBackend {
    pub fn name(&self) -> &'static str {
        match self {
            StoreBackend::Memory => "memory",
            StoreBackend::Postgres { .. } => "postgres",
            StoreBackend::Redis { .. } => "redis",
        }
    }
}

/// Complete seeder configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path of the JSON seed file
    pub seed_file: String,

    /// Store the accepted records are written to
    pub store: StoreBackend,

    /// Maximum concurrent store writes
    pub write_concurrency: usize,

    /// Validate and resolve references without writing
    pub dry_run: bool,

    /// Treat any rejected record as a failed run
    pub strict: bool,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable required by the selected store is
    /// missing, or if any variable is set but cannot be parsed.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_source<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let store = match env
            .or("SEED_STORE", "memory".to_string())?
            .to_lowercase()
            .as_str()
        {
            "memory" => StoreBackend::Memory,
            "postgres" => StoreBackend::Postgres {
                database_url: env.required("DATABASE_URL")?,
                max_connections: env.or("DATABASE_MAX_CONNECTIONS", 5)?,
                ignore_missing_migrations: env.or("IGNORE_MISSING_MIGRATIONS", true)?,
            },
            "redis" => StoreBackend::Redis {
                redis_url: env.required("REDIS_URL")?,
                key_prefix: env.or("REDIS_KEY_PREFIX", "seed".to_string())?,
            },
            other => anyhow::bail!(
                "Invalid SEED_STORE `{}`: expected memory, postgres or redis",
                other
            ),
        };

        let write_concurrency: usize = env.or("SEED_WRITE_CONCURRENCY", 8)?;
        if write_concurrency == 0 {
            anyhow::bail!("SEED_WRITE_CONCURRENCY must be at least 1");
        }

        Ok(Self {
            seed_file: env.or("SEED_FILE", "seed/sample_data.json".to_string())?,
            store,
            write_concurrency,
            dry_run: env.or("SEED_DRY_RUN", false)?,
            strict: env.or("SEED_STRICT", false)?,
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Load a required variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is not set.
    fn required(&self, key: &str) -> anyhow::Result<String> {
        (self.0)(key)
            .ok_or_else(|| anyhow::anyhow!("Missing required environment variable: {}", key))
    }

    /// Load a variable with a default value.
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is set but cannot be parsed.
    fn or<T>(&self, key: &str, default: T) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match (self.0)(key) {
            Some(val) => val
                .parse::<T>()
                .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", key, e)),
            None => Ok(default),
        }
    }
}
