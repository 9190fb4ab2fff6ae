//! Scraper configuration loaded from environment variables.

use thiserror::Error;

/// Default inventory search page.
pub const DEFAULT_SEARCH_URL: &str = "https://www.toyota.com/search-inventory/";

/// Origin used to resolve relative listing links into absolute URLs.
pub const DEFAULT_SITE_ORIGIN: &str = "https://www.toyota.com";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

/// Recognized options for one campaign run.
///
/// `headless`, `page_load_timeout_secs`, and `implicit_wait_secs` are passed
/// through to whatever rendering backend implements the page session; the
/// pipeline itself never reads them. `max_retries` and `max_pages_to_scrape`
/// are accepted and carried but not yet consumed by the pipeline.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    pub headless: bool,
    pub page_load_timeout_secs: u64,
    pub implicit_wait_secs: u64,
    pub max_retries: u32,
    pub inter_request_delay_secs: u64,
    pub max_pages_to_scrape: usize,
    pub search_url: String,
    pub site_origin: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            headless: true,
            page_load_timeout_secs: 30,
            implicit_wait_secs: 10,
            max_retries: 3,
            inter_request_delay_secs: 2,
            max_pages_to_scrape: 5,
            search_url: DEFAULT_SEARCH_URL.to_owned(),
            site_origin: DEFAULT_SITE_ORIGIN.to_owned(),
        }
    }
}

/// Load scraper configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable fails to parse.
pub fn load_config() -> Result<ScraperConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_config_from_env()
}

/// Load scraper configuration from environment variables already in the
/// process.
///
/// Unlike [`load_config`], this does NOT load `.env` files — useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a set variable fails to parse.
pub fn load_config_from_env() -> Result<ScraperConfig, ConfigError> {
    build_config(|key| std::env::var(key))
}

/// Build configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup — no
/// `set_var`/`remove_var` needed.
fn build_config<F>(lookup: F) -> Result<ScraperConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default =
        |var: &str, default: &str| -> String { lookup(var).unwrap_or_else(|_| default.to_string()) };

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

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default).to_lowercase();
        match raw.as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: format!("expected true/false, got \"{other}\""),
            }),
        }
    };

    let headless = parse_bool("LOTDB_HEADLESS", "true")?;
    let page_load_timeout_secs = parse_u64("LOTDB_PAGE_LOAD_TIMEOUT_SECS", "30")?;
    let implicit_wait_secs = parse_u64("LOTDB_IMPLICIT_WAIT_SECS", "10")?;
    let max_retries = parse_u32("LOTDB_MAX_RETRIES", "3")?;
    let inter_request_delay_secs = parse_u64("LOTDB_INTER_REQUEST_DELAY_SECS", "2")?;
    let max_pages_to_scrape = parse_usize("LOTDB_MAX_PAGES_TO_SCRAPE", "5")?;
    let search_url = or_default("LOTDB_SEARCH_URL", DEFAULT_SEARCH_URL);
    let site_origin = or_default("LOTDB_SITE_ORIGIN", DEFAULT_SITE_ORIGIN);

    Ok(ScraperConfig {
        headless,
        page_load_timeout_secs,
        implicit_wait_secs,
        max_retries,
        inter_request_delay_secs,
        max_pages_to_scrape,
        search_url,
        site_origin,
    })
}
