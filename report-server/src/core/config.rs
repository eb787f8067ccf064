//! Server configuration
//!
//! # Environment variables
//!
//! Every setting can be overridden through the environment:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | HTTP_PORT | 3000 | HTTP service port |
//! | BACKEND_URL | http://localhost:54321 | Hosted backend base URL |
//! | BACKEND_API_KEY | (empty) | Backend API key / bearer token |
//! | CURRENCY_SYMBOL | ₹ | Symbol used when rendering hints |
//! | SNAPSHOT_CACHE_TTL_SECS | 30 | Per-period snapshot cache TTL |
//! | REQUEST_TIMEOUT_MS | 30000 | Backend request timeout (ms) |
//! | ENVIRONMENT | development | development \| staging \| production |
//! | LOG_DIR | (unset) | Daily-rolling log file directory |
//!
//! # Example
//!
//! ```ignore
//! BACKEND_URL=https://db.example.com HTTP_PORT=8080 cargo run
//! ```
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API service port
    pub http_port: u16,
    /// Hosted backend base URL
    pub backend_url: String,
    /// Backend API key, sent as `apikey` and bearer token
    pub backend_api_key: String,
    /// Currency symbol for rendered hints (calculators stay symbol-free)
    pub currency_symbol: String,
    /// Per-period snapshot cache TTL in seconds (0 disables reuse)
    pub snapshot_cache_ttl_secs: u64,
    /// Backend request timeout in milliseconds
    pub request_timeout_ms: u64,
    /// Runtime environment: development | staging | production
    pub environment: String,
    /// Optional directory for daily-rolling log files
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables, with defaults for
    /// anything unset
    pub fn from_env() -> Self {
        Self {
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            backend_url: std::env::var("BACKEND_URL")
                .unwrap_or_else(|_| "http://localhost:54321".into()),
            backend_api_key: std::env::var("BACKEND_API_KEY").unwrap_or_default(),
            currency_symbol: std::env::var("CURRENCY_SYMBOL").unwrap_or_else(|_| "₹".into()),
            snapshot_cache_ttl_secs: std::env::var("SNAPSHOT_CACHE_TTL_SECS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30),
            request_timeout_ms: std::env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            log_dir: std::env::var("LOG_DIR").ok(),
        }
    }

    /// Override the backend URL and port on top of the env config
    ///
    /// Mostly used in tests
    pub fn with_overrides(backend_url: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.backend_url = backend_url.into();
        config.http_port = http_port;
        config
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
