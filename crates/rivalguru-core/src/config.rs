use crate::app_config::AppConfig;
use crate::ConfigError;

/// Longest accepted analysis deadline (one hour).
const MAX_ANALYSIS_TIMEOUT_SECS: u64 = 3_600;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so tests can feed a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.is_empty()) };

    let bind_addr: SocketAddr = parse_as(
        "RIVALGURU_BIND_ADDR",
        &or_default("RIVALGURU_BIND_ADDR", "0.0.0.0:8000"),
    )?;
    let log_level = or_default("RIVALGURU_LOG_LEVEL", "info");

    let analysis_timeout_secs: u64 = parse_as(
        "RIVALGURU_ANALYSIS_TIMEOUT_SECS",
        &or_default("RIVALGURU_ANALYSIS_TIMEOUT_SECS", "300"),
    )?;
    if !(1..=MAX_ANALYSIS_TIMEOUT_SECS).contains(&analysis_timeout_secs) {
        return Err(ConfigError::InvalidEnvVar {
            var: "RIVALGURU_ANALYSIS_TIMEOUT_SECS".to_string(),
            reason: format!("must be between 1 and {MAX_ANALYSIS_TIMEOUT_SECS}"),
        });
    }

    let max_concurrent_fetches: usize = parse_as(
        "RIVALGURU_MAX_CONCURRENT_FETCHES",
        &or_default("RIVALGURU_MAX_CONCURRENT_FETCHES", "8"),
    )?;

    let research_base_url = require("RIVALGURU_RESEARCH_BASE_URL")?;
    let research_api_token = optional("RIVALGURU_RESEARCH_API_TOKEN");
    let research_zone = optional("RIVALGURU_RESEARCH_ZONE");

    let fetch_request_timeout_secs: u64 = parse_as(
        "RIVALGURU_FETCH_REQUEST_TIMEOUT_SECS",
        &or_default("RIVALGURU_FETCH_REQUEST_TIMEOUT_SECS", "240"),
    )?;
    let fetch_max_retries: u32 = parse_as(
        "RIVALGURU_FETCH_MAX_RETRIES",
        &or_default("RIVALGURU_FETCH_MAX_RETRIES", "1"),
    )?;
    let fetch_retry_backoff_base_secs: u64 = parse_as(
        "RIVALGURU_FETCH_RETRY_BACKOFF_BASE_SECS",
        &or_default("RIVALGURU_FETCH_RETRY_BACKOFF_BASE_SECS", "2"),
    )?;
    let rate_limit_per_minute: usize = parse_as(
        "RIVALGURU_RATE_LIMIT_PER_MINUTE",
        &or_default("RIVALGURU_RATE_LIMIT_PER_MINUTE", "30"),
    )?;
    if rate_limit_per_minute == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "RIVALGURU_RATE_LIMIT_PER_MINUTE".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    Ok(AppConfig {
        bind_addr,
        log_level,
        analysis_timeout_secs,
        max_concurrent_fetches: max_concurrent_fetches.max(1),
        research_base_url,
        research_api_token,
        research_zone,
        fetch_request_timeout_secs,
        fetch_max_retries,
        fetch_retry_backoff_base_secs,
        rate_limit_per_minute,
    })
}

fn parse_as<T>(var: &str, raw: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.parse::<T>().map_err(|e| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
