//! Order service configuration

use std::time::Duration;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

const DEFAULT_ARTWORK_URL: &str = "http://artwork:8000";
const DEFAULT_DATABASE_URL: &str = "sqlite://orders.db?mode=rwc";

/// Largest page the artwork service honours on `GET /artworks`
pub const MAX_PAGE_SIZE: usize = 100;

/// Order service configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite connection URL for the local order store
    pub database_url: String,
    /// HTTP port
    pub http_port: u16,
    /// Environment: development | staging | production
    pub environment: String,
    /// Shared HS256 secret used by the identity service to sign credentials
    pub jwt_secret: String,
    /// Clock skew tolerated when checking credential expiry, in seconds
    pub jwt_leeway_secs: u64,
    /// Artwork (catalog) service client settings
    pub catalog: CatalogConfig,
}

/// Settings for the outbound artwork service client
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Upper bound on each remote call
    pub timeout: Duration,
    /// Page size used when walking `GET /artworks`
    pub page_size: usize,
}

impl CatalogConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(5),
            page_size: MAX_PAGE_SIZE,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.clamp(1, MAX_PAGE_SIZE);
        self
    }
}

impl Config {
    /// Require a secret env var: must be set and non-empty in non-development environments.
    fn require_secret(name: &str, environment: &str) -> Result<String, BoxError> {
        let val = match std::env::var(name) {
            Ok(v) => v,
            Err(_) => {
                if environment != "development" {
                    return Err(format!("{name} must be set in {environment} environment").into());
                }
                tracing::warn!("{name} not set, using development fallback");
                format!("dev-{name}-not-for-production")
            }
        };
        if val.is_empty() && environment != "development" {
            return Err(format!("{name} must not be empty in {environment} environment").into());
        }
        Ok(val)
    }

    fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> T {
        std::env::var(name)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(default)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, BoxError> {
        let environment = std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into());

        let base_url =
            std::env::var("ARTWORK_SERVICE_URL").unwrap_or_else(|_| DEFAULT_ARTWORK_URL.into());
        let catalog = CatalogConfig::new(&base_url)
            .with_timeout(Duration::from_secs(Self::parse_env(
                "ARTWORK_TIMEOUT_SECS",
                5u64,
            )))
            .with_page_size(Self::parse_env("ARTWORK_PAGE_SIZE", MAX_PAGE_SIZE));

        Ok(Self {
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.into()),
            http_port: Self::parse_env("HTTP_PORT", 8003),
            jwt_secret: Self::require_secret("JWT_SECRET", &environment)?,
            jwt_leeway_secs: Self::parse_env("JWT_LEEWAY_SECS", 0),
            environment,
            catalog,
        })
    }
}
