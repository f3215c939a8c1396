//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

pub const DEFAULT_GRAPHQL_URL: &str = "https://leetcode.com/graphql";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 10;

/// Which user store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreKind {
    Firestore,
    /// Process-local store, for development without GCP.
    Memory,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// GCP project ID
    pub gcp_project_id: String,
    pub store: StoreKind,
    /// LeetCode GraphQL endpoint
    pub graphql_url: String,
    /// Upper bound on a single stat provider call
    pub provider_timeout: Duration,
    /// Allowed CORS origin; any origin when unset
    pub frontend_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let provider_timeout_secs = match env::var("PROVIDER_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or(ConfigError::Invalid("PROVIDER_TIMEOUT_SECS", raw))?,
            Err(_) => DEFAULT_PROVIDER_TIMEOUT_SECS,
        };

        let store = match env::var("STORE").as_deref() {
            Ok("memory") => StoreKind::Memory,
            Ok("firestore") | Err(_) => StoreKind::Firestore,
            Ok(other) => return Err(ConfigError::Invalid("STORE", other.to_string())),
        };

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::Invalid("PORT", raw))?,
            Err(_) => 8080,
        };

        // Only the in-memory store may run without a real project
        let gcp_project_id = match (env::var("GCP_PROJECT_ID"), store) {
            (Ok(id), _) if !id.trim().is_empty() => id.trim().to_string(),
            (_, StoreKind::Memory) => "local-dev".to_string(),
            (_, StoreKind::Firestore) => return Err(ConfigError::Missing("GCP_PROJECT_ID")),
        };

        Ok(Self {
            port,
            gcp_project_id,
            store,
            graphql_url: env::var("LEETCODE_GRAPHQL_URL")
                .unwrap_or_else(|_| DEFAULT_GRAPHQL_URL.to_string()),
            provider_timeout: Duration::from_secs(provider_timeout_secs),
            frontend_url: env::var("FRONTEND_URL")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }

    /// Config for tests: in-memory store, short provider timeout.
    pub fn test_default() -> Self {
        Self {
            port: 8080,
            gcp_project_id: "test-project".to_string(),
            store: StoreKind::Memory,
            graphql_url: DEFAULT_GRAPHQL_URL.to_string(),
            provider_timeout: Duration::from_secs(2),
            frontend_url: None,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for environment variable {0}: {1:?}")]
    Invalid(&'static str, String),
}
