use std::net::IpAddr;

use ipnet::IpNet;

use crate::text;

pub const DEFAULT_RELAY_URL: &str = "https://api.web3forms.com/submit";

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub relay: RelayConfig,
    pub min_submit_interval_ms: i64,
    pub max_body_size: usize,
    pub rate_limit: u32,
    pub rate_limit_window_secs: u64,
    pub trusted_proxies: Vec<IpNet>,
    pub cors_origins: Vec<String>,
    pub redirect_url: Option<String>,
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub url: String,
    pub access_key: String,
    pub timeout_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build the config from any key lookup; `from_env` uses the process env.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let env_required = |key: &str| {
            var(key).ok_or_else(|| format!("Missing required environment variable: {key}"))
        };
        let env_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        let access_key = env_required("CONTACT_RELAY_ACCESS_KEY")?;
        let url = checked_url("CONTACT_RELAY_URL", env_or("CONTACT_RELAY_URL", DEFAULT_RELAY_URL))?;

        let timeout_secs: u64 = env_or("CONTACT_RELAY_TIMEOUT_SECS", "15")
            .parse()
            .map_err(|e| format!("Invalid CONTACT_RELAY_TIMEOUT_SECS: {e}"))?;

        let host: IpAddr = env_or("CONTACT_RELAY_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid CONTACT_RELAY_HOST: {e}"))?;

        let port: u16 = env_or("CONTACT_RELAY_PORT", "3000")
            .parse()
            .map_err(|e| format!("Invalid CONTACT_RELAY_PORT: {e}"))?;

        let min_submit_interval_ms: i64 = env_or("CONTACT_RELAY_MIN_SUBMIT_MS", "3000")
            .parse()
            .map_err(|e| format!("Invalid CONTACT_RELAY_MIN_SUBMIT_MS: {e}"))?;

        let max_body_size: usize = env_or("CONTACT_RELAY_MAX_BODY_SIZE", "65536")
            .parse()
            .map_err(|e| format!("Invalid CONTACT_RELAY_MAX_BODY_SIZE: {e}"))?;

        let rate_limit: u32 = env_or("CONTACT_RELAY_RATE_LIMIT", "5")
            .parse()
            .map_err(|e| format!("Invalid CONTACT_RELAY_RATE_LIMIT: {e}"))?;

        let rate_limit_window_secs: u64 = env_or("CONTACT_RELAY_RATE_LIMIT_WINDOW_SECS", "600")
            .parse()
            .map_err(|e| format!("Invalid CONTACT_RELAY_RATE_LIMIT_WINDOW_SECS: {e}"))?;

        let trusted_proxies: Vec<IpNet> = split_list(&env_or("CONTACT_RELAY_TRUSTED_PROXIES", ""))
            .map(|s| {
                s.parse()
                    .map_err(|e| format!("Invalid CONTACT_RELAY_TRUSTED_PROXIES entry '{s}': {e}"))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let cors_origins: Vec<String> = split_list(&env_or("CONTACT_RELAY_CORS_ORIGINS", ""))
            .map(|s| s.to_string())
            .collect();
        let cors_origins = text::unique(&cors_origins);

        let redirect_url = var("CONTACT_RELAY_REDIRECT_URL")
            .filter(|s| !s.trim().is_empty())
            .map(|s| checked_url("CONTACT_RELAY_REDIRECT_URL", s))
            .transpose()?;

        let log_level = env_or("CONTACT_RELAY_LOG_LEVEL", "info");

        Ok(Config {
            host,
            port,
            relay: RelayConfig {
                url,
                access_key,
                timeout_secs,
            },
            min_submit_interval_ms,
            max_body_size,
            rate_limit,
            rate_limit_window_secs,
            trusted_proxies,
            cors_origins,
            redirect_url,
            log_level,
        })
    }
}

fn split_list(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(',').map(|s| s.trim()).filter(|s| !s.is_empty())
}

fn checked_url(key: &str, value: String) -> Result<String, String> {
    if text::is_valid_url(&value) {
        Ok(value)
    } else {
        Err(format!("Invalid {key}: '{value}' is not an absolute URL"))
    }
}
