use faircms_core::notification::DEFAULT_REVIEWERS_EMAIL;

use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// Every field except the JWT secret has a default suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long background tasks get to finish after shutdown (default: `30`).
    pub shutdown_timeout_secs: u64,
    pub jwt: JwtConfig,
    /// Accept `X-Mock-User-Email` / `X-Mock-User-Role` headers instead of a
    /// bearer token. Development only.
    pub allow_mock_auth: bool,
    /// Recipient of review-queue notifications.
    pub reviewers_email: String,
    /// External cache purge endpoint. Unset means in-process cache only.
    pub cache_purge_url: Option<String>,
    /// TTL of the in-process public response cache (default: `300`).
    pub public_cache_ttl_secs: u64,
    /// Search indexer webhook for content events. Unset disables forwarding.
    pub search_index_webhook_url: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                        |
    /// |----------------------------|--------------------------------|
    /// | `HOST`                     | `0.0.0.0`                      |
    /// | `PORT`                     | `3000`                         |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`        |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                           |
    /// | `SHUTDOWN_TIMEOUT_SECS`    | `30`                           |
    /// | `ALLOW_MOCK_AUTH`          | `false`                        |
    /// | `REVIEWERS_EMAIL`          | `reviewers@fair.example.com`   |
    /// | `CACHE_PURGE_URL`          | unset                          |
    /// | `PUBLIC_CACHE_TTL_SECS`    | `300`                          |
    /// | `SEARCH_INDEX_WEBHOOK_URL` | unset                          |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let shutdown_timeout_secs: u64 = std::env::var("SHUTDOWN_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("SHUTDOWN_TIMEOUT_SECS must be a valid u64");

        let allow_mock_auth = std::env::var("ALLOW_MOCK_AUTH")
            .map(|v| matches!(v.trim().to_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let reviewers_email =
            std::env::var("REVIEWERS_EMAIL").unwrap_or_else(|_| DEFAULT_REVIEWERS_EMAIL.into());

        let public_cache_ttl_secs: u64 = std::env::var("PUBLIC_CACHE_TTL_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("PUBLIC_CACHE_TTL_SECS must be a valid u64");

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            jwt,
            allow_mock_auth,
            reviewers_email,
            cache_purge_url: optional_var("CACHE_PURGE_URL"),
            public_cache_ttl_secs,
            search_index_webhook_url: optional_var("SEARCH_INDEX_WEBHOOK_URL"),
        }
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
