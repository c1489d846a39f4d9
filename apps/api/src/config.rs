use anyhow::{Context, Result};
use std::path::PathBuf;
use std::str::FromStr;

/// Application configuration loaded from environment variables.
/// Every field has a default; without `DATABASE_URL` the service runs on fallbacks only.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub static_dir: PathBuf,
    pub profile_path: Option<PathBuf>,
    pub realtime_channel: String,
    /// Wait between attempts to (re)attach the change feed, and between reloads
    /// of sections that failed to load.
    pub realtime_retry_ms: u64,
    pub fetch_max_retries: u32,
    pub fetch_retry_delay_ms: u64,
    pub run_migrations: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            port: parse_env("PORT", defaults.port).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or(defaults.rust_log),
            static_dir: optional_env("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
            profile_path: optional_env("PROFILE_PATH").map(PathBuf::from),
            realtime_channel: optional_env("REALTIME_CHANNEL").unwrap_or(defaults.realtime_channel),
            realtime_retry_ms: parse_env("REALTIME_RETRY_MS", defaults.realtime_retry_ms)
                .context("REALTIME_RETRY_MS must be a non-negative integer")?,
            fetch_max_retries: parse_env("FETCH_MAX_RETRIES", defaults.fetch_max_retries)
                .context("FETCH_MAX_RETRIES must be a non-negative integer")?,
            fetch_retry_delay_ms: parse_env("FETCH_RETRY_DELAY_MS", defaults.fetch_retry_delay_ms)
                .context("FETCH_RETRY_DELAY_MS must be a non-negative integer")?,
            run_migrations: parse_env("RUN_MIGRATIONS", defaults.run_migrations)
                .context("RUN_MIGRATIONS must be true or false")?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: None,
            port: 8080,
            rust_log: "info".to_string(),
            static_dir: PathBuf::from("public"),
            profile_path: None,
            realtime_channel: "portfolio_changes".to_string(),
            realtime_retry_ms: 5000,
            fetch_max_retries: 2,
            fetch_retry_delay_ms: 1000,
            run_migrations: false,
        }
    }
}

/// Empty values count as unset, matching placeholder `.env` files.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .parse::<T>()
            .with_context(|| format!("Invalid value '{raw}' for '{key}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_and_blank_values_use_defaults() {
        std::env::set_var("FOLIO_TEST_BLANK", "   ");
        assert_eq!(optional_env("FOLIO_TEST_BLANK"), None);
        assert_eq!(optional_env("FOLIO_TEST_NEVER_SET"), None);
        assert_eq!(parse_env("FOLIO_TEST_NEVER_SET", Config::default().port).unwrap(), 8080);
    }

    #[test]
    fn test_parse_env_reads_and_rejects_values() {
        std::env::set_var("FOLIO_TEST_RETRY_MS", " 250 ");
        assert_eq!(parse_env("FOLIO_TEST_RETRY_MS", 5000u64).unwrap(), 250);

        std::env::set_var("FOLIO_TEST_FLAG", "maybe");
        assert!(parse_env("FOLIO_TEST_FLAG", false).is_err());
    }
}
