use std::time::Duration;

use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// SQLite database connection URL
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Upper bound on pooled database connections
    #[serde(default = "default_database_max_connections")]
    pub database_max_connections: u32,

    /// fanart.tv API key
    pub fanart_api_key: String,

    /// fanart.tv API base URL
    #[serde(default = "default_fanart_api_url")]
    pub fanart_api_url: String,

    /// Per-request timeout for artwork lookups, in seconds
    #[serde(default = "default_artwork_timeout_secs")]
    pub artwork_timeout_secs: u64,

    /// Number of artwork documents kept in memory
    #[serde(default = "default_artwork_cache_capacity")]
    pub artwork_cache_capacity: usize,
}

fn default_database_url() -> String {
    "sqlite://data/movies.db?mode=rwc".to_string()
}

fn default_database_max_connections() -> u32 {
    5
}

fn default_fanart_api_url() -> String {
    "https://webservice.fanart.tv/v3".to_string()
}

fn default_artwork_timeout_secs() -> u64 {
    5
}

fn default_artwork_cache_capacity() -> usize {
    100
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_iter(std::env::vars())
    }

    /// Load configuration from an explicit set of key/value pairs
    pub fn from_iter<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter::<_, Config>(vars).map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    pub fn artwork_timeout(&self) -> Duration {
        Duration::from_secs(self.artwork_timeout_secs)
    }
}
