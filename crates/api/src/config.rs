//! Application configuration loaded from environment variables.

use std::time::Duration;

use common::DEFAULT_PAGE_SIZE;

/// Output format of the `fmt` tracing layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

/// Server configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `HOST` / `PORT`: bind address (default: `0.0.0.0:8080`)
/// - `RUST_LOG`: tracing filter directive (default: `"info"`)
/// - `LOG_FORMAT`: `text` or `json` (default: `text`)
/// - `REGISTRY_URL`: service registry base URL
/// - `SERVICE_NAME` / `SERVICE_ADDRESS`: identity announced to the registry
/// - `SSO_SERVICE`, `SEO_SERVICE`, `BANNER_SERVICE`: logical names resolved
///   through the registry
/// - `DEFAULT_PAGE_SIZE`: page size of list endpoints (default: `40`)
/// - `REQUEST_TIMEOUT_SECS`: per-request deadline (default: `15`)
/// - `READ_TIMEOUT_SECS`: time a client has to send request headers (default: `15`)
/// - `IDLE_TIMEOUT_SECS`: keep-alive connections idle this long are closed (default: `60`)
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
    pub registry_url: String,
    pub service_name: String,
    pub service_address: String,
    pub sso_service: String,
    pub seo_service: String,
    pub banner_service: String,
    pub default_page_size: u32,
    pub request_timeout: Duration,
    pub read_timeout: Duration,
    pub idle_timeout: Duration,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let string = |key: &str, default: String| lookup(key).unwrap_or(default);

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);
        let default_page_size = lookup("DEFAULT_PAGE_SIZE")
            .and_then(|s| s.parse::<u32>().ok())
            .filter(|size| *size >= 1)
            .unwrap_or(defaults.default_page_size);
        let seconds = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        Self {
            host: string("HOST", defaults.host),
            port,
            log_level: string("RUST_LOG", defaults.log_level),
            log_format: lookup("LOG_FORMAT")
                .map(|f| LogFormat::parse(&f))
                .unwrap_or_default(),
            registry_url: string("REGISTRY_URL", defaults.registry_url),
            service_name: string("SERVICE_NAME", defaults.service_name),
            service_address: string("SERVICE_ADDRESS", format!("127.0.0.1:{port}")),
            sso_service: string("SSO_SERVICE", defaults.sso_service),
            seo_service: string("SEO_SERVICE", defaults.seo_service),
            banner_service: string("BANNER_SERVICE", defaults.banner_service),
            default_page_size,
            request_timeout: seconds("REQUEST_TIMEOUT_SECS", defaults.request_timeout),
            read_timeout: seconds("READ_TIMEOUT_SECS", defaults.read_timeout),
            idle_timeout: seconds("IDLE_TIMEOUT_SECS", defaults.idle_timeout),
        }
    }

    /// Returns the `"host:port"` bind address string.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
            registry_url: "http://127.0.0.1:8500".to_string(),
            service_name: "catalog".to_string(),
            service_address: "127.0.0.1:8080".to_string(),
            sso_service: "sso".to_string(),
            seo_service: "seo".to_string(),
            banner_service: "banner".to_string(),
            default_page_size: DEFAULT_PAGE_SIZE,
            request_timeout: Duration::from_secs(15),
            read_timeout: Duration::from_secs(15),
            idle_timeout: Duration::from_secs(60),
        }
    }
}
