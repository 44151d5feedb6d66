use anyhow::{Context, Result};
use reqwest::Url;

pub const DEFAULT_EXTRACT_URL: &str = "http://127.0.0.1:5001";
pub const DEFAULT_SEARCH_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_CAREERJET_URL: &str = "http://127.0.0.1:3001";
pub const DEFAULT_REVIEWS_URL: &str = "http://127.0.0.1:5002";
pub const DEFAULT_ALERTS_URL: &str = "http://127.0.0.1:5004";

/// Base URLs of the upstream services, without trailing slashes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub extract: String,
    pub search: String,
    pub careerjet: String,
    pub reviews: String,
    pub alerts: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            extract: DEFAULT_EXTRACT_URL.to_string(),
            search: DEFAULT_SEARCH_URL.to_string(),
            careerjet: DEFAULT_CAREERJET_URL.to_string(),
            reviews: DEFAULT_REVIEWS_URL.to_string(),
            alerts: DEFAULT_ALERTS_URL.to_string(),
        }
    }
}

impl Endpoints {
    /// Reads `JOBCIPHER_*_URL` variables, falling back to local defaults.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            extract: env_url("JOBCIPHER_EXTRACT_URL", DEFAULT_EXTRACT_URL)?,
            search: env_url("JOBCIPHER_SEARCH_URL", DEFAULT_SEARCH_URL)?,
            careerjet: env_url("JOBCIPHER_CAREERJET_URL", DEFAULT_CAREERJET_URL)?,
            reviews: env_url("JOBCIPHER_REVIEWS_URL", DEFAULT_REVIEWS_URL)?,
            alerts: env_url("JOBCIPHER_ALERTS_URL", DEFAULT_ALERTS_URL)?,
        })
    }

    /// Every service behind one host, as with a local gateway or test stub.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/').to_string();
        Self {
            extract: base.clone(),
            search: base.clone(),
            careerjet: base.clone(),
            reviews: base.clone(),
            alerts: base,
        }
    }

    pub fn extract_url(&self) -> String {
        format!("{}/extract", self.extract)
    }

    pub fn search_url(&self) -> String {
        format!("{}/job-search", self.search)
    }

    pub fn careerjet_url(&self) -> String {
        format!("{}/api/careerjet", self.careerjet)
    }

    pub fn reviews_url(&self) -> String {
        format!("{}/get_reviews", self.reviews)
    }

    pub fn alerts_url(&self) -> String {
        format!("{}/subscribe-alert", self.alerts)
    }
}

/// Client-side configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub endpoints: Endpoints,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            endpoints: Endpoints::from_env()?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn env_url(key: &str, default: &str) -> Result<String> {
    let value = std::env::var(key).unwrap_or_else(|_| default.to_string());
    Url::parse(&value).with_context(|| format!("{key} must be a valid URL, got '{value}'"))?;
    Ok(value.trim_end_matches('/').to_string())
}
