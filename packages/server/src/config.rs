use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use linkcheck::{CheckConfig, DEFAULT_MAX_URLS, DEFAULT_MIN_CHARS, DEFAULT_USER_AGENT};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub port: u16,
    pub min_chars: usize,
    pub max_urls: usize,
    pub fetch_timeout: Duration,
    pub user_agent: String,
    pub batch_deadline: Option<Duration>,
    pub allowed_origins: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
            min_chars: DEFAULT_MIN_CHARS,
            max_urls: DEFAULT_MAX_URLS,
            fetch_timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            batch_deadline: None,
            allowed_origins: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = Self::default();

        Ok(Self {
            bind_address: env::var("BIND_ADDRESS").unwrap_or(defaults.bind_address),
            port: parse_var("PORT", defaults.port)?,
            min_chars: parse_var("LINKCHECK_MIN_CHARS", defaults.min_chars)?,
            max_urls: parse_max_urls(parse_var("LINKCHECK_MAX_URLS", defaults.max_urls)?)?,
            fetch_timeout: Duration::from_secs(parse_var(
                "LINKCHECK_FETCH_TIMEOUT_SECS",
                defaults.fetch_timeout.as_secs(),
            )?),
            user_agent: env::var("LINKCHECK_USER_AGENT").unwrap_or(defaults.user_agent),
            batch_deadline: env::var("LINKCHECK_BATCH_DEADLINE_SECS")
                .ok()
                .map(|v| {
                    v.parse::<u64>()
                        .context("LINKCHECK_BATCH_DEADLINE_SECS must be a valid number")
                })
                .transpose()?
                .map(Duration::from_secs),
            allowed_origins: env::var("ALLOWED_ORIGINS")
                .map(|v| parse_origins(&v))
                .unwrap_or_default(),
        })
    }

    /// Settings for the link checking library
    pub fn check_config(&self) -> CheckConfig {
        CheckConfig::new()
            .with_min_chars(self.min_chars)
            .with_max_urls(self.max_urls)
            .with_timeout(self.fetch_timeout)
            .with_user_agent(self.user_agent.clone())
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}

fn parse_max_urls(max_urls: usize) -> Result<usize> {
    if max_urls == 0 {
        bail!("LINKCHECK_MAX_URLS must be at least 1");
    }
    Ok(max_urls)
}

fn parse_origins(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}
