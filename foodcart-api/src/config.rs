use std::env;

const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_STATIC_URL: &str = "/static/";
const DEFAULT_MEDIA_URL: &str = "/media/";
const DEFAULT_POOL_SIZE: u32 = 10;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is invalid: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Settings read from the environment (and `.env`, loaded by `main`).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_url: Option<String>,
    pub listen_addr: String,
    pub static_url: String,
    pub media_url: String,
    pub pool_size: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let pool_size = match lookup("DATABASE_POOL_SIZE") {
            Some(value) => value
                .parse::<u32>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid {
                    name: "DATABASE_POOL_SIZE",
                    value,
                })?,
            None => DEFAULT_POOL_SIZE,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            listen_addr: lookup("LISTEN_ADDR").unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string()),
            static_url: url_prefix(lookup("STATIC_URL"), DEFAULT_STATIC_URL),
            media_url: url_prefix(lookup("MEDIA_URL"), DEFAULT_MEDIA_URL),
            pool_size,
        })
    }

    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::Missing("DATABASE_URL"))
    }

    pub fn static_asset(&self, path: &str) -> String {
        format!("{}{}", self.static_url, path)
    }

    pub fn media_asset(&self, path: &str) -> String {
        format!("{}{}", self.media_url, path)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: None,
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            static_url: DEFAULT_STATIC_URL.to_string(),
            media_url: DEFAULT_MEDIA_URL.to_string(),
            pool_size: DEFAULT_POOL_SIZE,
        }
    }
}

fn url_prefix(value: Option<String>, default: &str) -> String {
    match value {
        Some(url) if !url.is_empty() => {
            if url.ends_with('/') {
                url
            } else {
                format!("{url}/")
            }
        }
        _ => default.to_string(),
    }
}
