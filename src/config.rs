use std::env;
use std::fmt;
use std::time::Duration;

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

const OPENAI_BASE_URL: &str = "https://api.openai.com";
const OPENAI_MODEL: &str = "gpt-3.5-turbo";
const GOOGLE_PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
const UNSPLASH_BASE_URL: &str = "https://api.unsplash.com";
const ENRICHMENT_CONCURRENCY: usize = 1;

#[derive(Debug)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str, String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "{} must be set", key),
            ConfigError::Invalid(key, value) => write!(f, "{} has an invalid value: {}", key, value),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Everything the service needs to reach its upstreams.
///
/// Keys are required; base URLs default to the public endpoints and are only
/// overridden to point at a stand-in server.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub openai_model: String,
    pub api_url: String,
    pub google_api_key: String,
    pub google_places_base_url: String,
    pub unsplash_access_key: String,
    pub unsplash_base_url: String,
    pub enrichment_concurrency: usize,
    pub http_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("PORT") {
            Ok(value) => value
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", value))?,
            Err(_) => PORT,
        };

        let enrichment_concurrency = match env::var("ENRICHMENT_CONCURRENCY") {
            Ok(value) => match value.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(ConfigError::Invalid("ENRICHMENT_CONCURRENCY", value)),
            },
            Err(_) => ENRICHMENT_CONCURRENCY,
        };

        let http_timeout = match env::var("HTTP_TIMEOUT_SECS") {
            Ok(value) => Some(Duration::from_secs(
                value
                    .parse()
                    .map_err(|_| ConfigError::Invalid("HTTP_TIMEOUT_SECS", value))?,
            )),
            Err(_) => None,
        };

        Ok(Self {
            host: env::var("HOST").unwrap_or_else(|_| HOST.to_string()),
            port,
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_base_url: env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| OPENAI_BASE_URL.to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| OPENAI_MODEL.to_string()),
            api_url: required("TOUR_API_URL")?,
            google_api_key: required("GOOGLE_MAPS_API_KEY")?,
            google_places_base_url: env::var("GOOGLE_PLACES_BASE_URL")
                .unwrap_or_else(|_| GOOGLE_PLACES_BASE_URL.to_string()),
            unsplash_access_key: required("UNSPLASH_ACCESS_KEY")?,
            unsplash_base_url: env::var("UNSPLASH_BASE_URL")
                .unwrap_or_else(|_| UNSPLASH_BASE_URL.to_string()),
            enrichment_concurrency,
            http_timeout,
        })
    }

    /// Config with every upstream rooted at `base_url`, as served by a local stand-in.
    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 0,
            openai_api_key: "test-openai-key".to_string(),
            openai_base_url: base_url.to_string(),
            openai_model: OPENAI_MODEL.to_string(),
            api_url: base_url.to_string(),
            google_api_key: "test-google-key".to_string(),
            google_places_base_url: format!("{}/maps/api/place", base_url),
            unsplash_access_key: "test-unsplash-key".to_string(),
            unsplash_base_url: base_url.to_string(),
            enrichment_concurrency: ENRICHMENT_CONCURRENCY,
            http_timeout: None,
        }
    }

    pub fn http_client(&self) -> Result<reqwest::Client, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.http_timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}
