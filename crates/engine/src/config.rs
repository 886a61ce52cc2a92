//! Engine configuration from environment variables.

use std::net::SocketAddr;

use crate::infrastructure::nominatim::DEFAULT_NOMINATIM_URL;
use crate::infrastructure::ollama::{DEFAULT_OLLAMA_BASE_URL, DEFAULT_OLLAMA_MODEL};

/// `ECHOES_DB` value that selects the in-memory store.
pub const IN_MEMORY_DB: &str = ":memory:";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub server_host: String,
    pub server_port: u16,
    pub database_path: String,
    pub ollama_base_url: String,
    pub ollama_model: String,
    pub nominatim_url: String,
    pub default_language: String,
    /// Comma-separated origins, or `*`. Unset disables CORS.
    pub cors_allowed_origins: Option<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let server_port = get("SERVER_PORT")
            .or_else(|| get("PORT"))
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);

        Self {
            server_host: get("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".into()),
            server_port,
            database_path: get("ECHOES_DB").unwrap_or_else(|| "echoes.db".into()),
            ollama_base_url: get("OLLAMA_BASE_URL")
                .unwrap_or_else(|| DEFAULT_OLLAMA_BASE_URL.into()),
            ollama_model: get("OLLAMA_MODEL").unwrap_or_else(|| DEFAULT_OLLAMA_MODEL.into()),
            nominatim_url: get("NOMINATIM_URL").unwrap_or_else(|| DEFAULT_NOMINATIM_URL.into()),
            default_language: get("DEFAULT_LANGUAGE").unwrap_or_else(|| "en".into()),
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS"),
        }
    }

    pub fn uses_in_memory_store(&self) -> bool {
        self.database_path == IN_MEMORY_DB
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server_host, self.server_port).parse()
    }
}
