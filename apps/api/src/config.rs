use std::time::Duration;

use anyhow::{Context, Result};

/// Weekly, Sunday 00:00 UTC (seconds-first cron syntax).
pub const DEFAULT_INSIGHT_REFRESH_CRON: &str = "0 0 0 * * Sun";

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub anthropic_api_key: String,
    /// Job search is disabled (503) when unset.
    pub jooble_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub llm_timeout: Duration,
    pub insights: InsightRefreshConfig,
}

/// Settings for the scheduled industry insight refresh.
#[derive(Debug, Clone)]
pub struct InsightRefreshConfig {
    pub enabled: bool,
    pub cron: String,
    pub concurrency: usize,
    pub generation_timeout: Duration,
}

impl Default for InsightRefreshConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cron: DEFAULT_INSIGHT_REFRESH_CRON.to_string(),
            concurrency: 1,
            generation_timeout: Duration::from_secs(60),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = InsightRefreshConfig::default();
        let insights = InsightRefreshConfig {
            enabled: match std::env::var("INSIGHT_REFRESH_ENABLED") {
                Ok(raw) => parse_bool(&raw)
                    .with_context(|| format!("INSIGHT_REFRESH_ENABLED has an invalid value: {raw}"))?,
                Err(_) => defaults.enabled,
            },
            cron: std::env::var("INSIGHT_REFRESH_CRON").unwrap_or(defaults.cron),
            concurrency: parse_env_or("INSIGHT_REFRESH_CONCURRENCY", defaults.concurrency)?,
            generation_timeout: Duration::from_secs(parse_env_or(
                "INSIGHT_GENERATION_TIMEOUT_SECS",
                defaults.generation_timeout.as_secs(),
            )?),
        };

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            anthropic_api_key: require_env("ANTHROPIC_API_KEY")?,
            jooble_api_key: std::env::var("JOOBLE_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            port: parse_env_or("PORT", 8080u16).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            llm_timeout: Duration::from_secs(parse_env_or("LLM_TIMEOUT_SECS", 120u64)?),
            insights,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("expected true/false, got '{other}'"),
    }
}
