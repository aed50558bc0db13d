use std::path::PathBuf;

use crate::app_config::{AppConfig, Endpoints};
use crate::failure::FailureKind;
use crate::ConfigError;

const DEFAULT_USER_AGENT: &str = "Chrome/51.0.2704.103 Safari/537.36";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but cannot be parsed.
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
/// Returns `ConfigError` if a value is present but cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every setting has a default, so an empty environment yields a working
/// config pointed at the production marketplace.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let defaults = Endpoints::default();
    let endpoints = Endpoints {
        catalogue_url: or_default("WBSCRAPE_CATALOGUE_URL", defaults.catalogue_url.as_str()),
        catalog_api_base: or_default("WBSCRAPE_CATALOG_API_BASE", defaults.catalog_api_base.as_str()),
        search_api_base: or_default("WBSCRAPE_SEARCH_API_BASE", defaults.search_api_base.as_str()),
        sales_api_base: or_default("WBSCRAPE_SALES_API_BASE", defaults.sales_api_base.as_str()),
        storefront_base: or_default("WBSCRAPE_STOREFRONT_BASE", defaults.storefront_base.as_str()),
        dest: or_default("WBSCRAPE_DEST", defaults.dest.as_str()),
    };

    let parse_timeout = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let secs = parse_u64(var, default)?;
        if secs == 0 {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(secs)
    };

    Ok(AppConfig {
        log_level: or_default("WBSCRAPE_LOG_LEVEL", "info"),
        user_agent: or_default("WBSCRAPE_USER_AGENT", DEFAULT_USER_AGENT),
        request_timeout_secs: parse_timeout("WBSCRAPE_REQUEST_TIMEOUT_SECS", "30")?,
        connect_timeout_secs: parse_timeout("WBSCRAPE_CONNECT_TIMEOUT_SECS", "10")?,
        inter_request_delay_ms: parse_u64("WBSCRAPE_INTER_REQUEST_DELAY_MS", "0")?,
        max_retries: parse_u32("WBSCRAPE_MAX_RETRIES", "0")?,
        retry_backoff_base_ms: parse_u64("WBSCRAPE_RETRY_BACKOFF_BASE_MS", "1000")?,
        sales_recoverable: parse_failure_kinds(&or_default(
            "WBSCRAPE_SALES_RECOVERABLE",
            "timeout",
        ))?,
        catalogue_cache_path: PathBuf::from(or_default(
            "WBSCRAPE_CATALOGUE_CACHE_PATH",
            "./wb_catalogue.json",
        )),
        output_dir: PathBuf::from(or_default("WBSCRAPE_OUTPUT_DIR", ".")),
        endpoints,
    })
}

/// Parse a comma-separated list of failure kinds. Blank entries are ignored,
/// so an empty string disables local recovery entirely.
fn parse_failure_kinds(raw: &str) -> Result<Vec<FailureKind>, ConfigError> {
    let mut kinds = Vec::new();
    for part in raw.split(',').filter(|p| !p.trim().is_empty()) {
        let kind = part
            .parse::<FailureKind>()
            .map_err(|reason| ConfigError::InvalidEnvVar {
                var: "WBSCRAPE_SALES_RECOVERABLE".to_string(),
                reason,
            })?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
