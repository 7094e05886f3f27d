//! Store configuration from environment variables.

use std::env;
use std::sync::Arc;

use thiserror::Error;

use super::{MemoryStore, RecipeStore, RestStore, TableStore};
use crate::error::StoreError;

/// Default data service base URL.
pub const DEFAULT_API_URL: &str = "http://localhost:3001";

/// Default contact inbox URL.
pub const DEFAULT_CONTACT_URL: &str = "http://localhost:3000/messages";

/// Default table name for the table-store backend.
pub const DEFAULT_TABLE: &str = "recipes";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unknown backend {0:?} (expected rest, table, or memory)")]
    UnknownBackend(String),
}

/// Which data-service flavor to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Backend {
    #[default]
    Rest,
    Table,
    Memory,
}

impl Backend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Backend::Rest => "rest",
            Backend::Table => "table",
            Backend::Memory => "memory",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "rest" => Some(Backend::Rest),
            "table" => Some(Backend::Table),
            "memory" => Some(Backend::Memory),
            _ => None,
        }
    }
}

/// Connection settings for the data service and the contact inbox.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Data service flavor.
    pub backend: Backend,
    /// Base URL of the data service.
    pub api_url: String,
    /// Table name, table backend only.
    pub table: String,
    /// Key sent as `X-API-Key`, table backend only.
    pub api_key: Option<String>,
    /// URL of the contact inbox.
    pub contact_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            api_url: DEFAULT_API_URL.to_string(),
            table: DEFAULT_TABLE.to_string(),
            api_key: None,
            contact_url: DEFAULT_CONTACT_URL.to_string(),
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional:
    /// - `SKILLET_BACKEND`: `rest`, `table`, or `memory` (default: `rest`)
    /// - `SKILLET_API_URL`: data service base URL (default: "http://localhost:3001")
    /// - `SKILLET_TABLE`: table name for the table backend (default: "recipes")
    /// - `SKILLET_API_KEY`: key sent as `X-API-Key` by the table backend
    /// - `SKILLET_CONTACT_URL`: contact inbox (default: "http://localhost:3000/messages")
    pub fn from_env() -> Result<Self, ConfigError> {
        let backend = match env::var("SKILLET_BACKEND") {
            Ok(raw) => Backend::from_str(&raw).ok_or(ConfigError::UnknownBackend(raw))?,
            Err(_) => Backend::default(),
        };

        let api_url = env::var("SKILLET_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let table = env::var("SKILLET_TABLE").unwrap_or_else(|_| DEFAULT_TABLE.to_string());

        let api_key = env::var("SKILLET_API_KEY").ok();

        let contact_url =
            env::var("SKILLET_CONTACT_URL").unwrap_or_else(|_| DEFAULT_CONTACT_URL.to_string());

        Ok(Self {
            backend,
            api_url,
            table,
            api_key,
            contact_url,
        })
    }

    /// Build the configured store flavor.
    pub fn build_store(&self) -> Result<Arc<dyn RecipeStore>, StoreError> {
        Ok(match self.backend {
            Backend::Rest => Arc::new(RestStore::new(&self.api_url)?),
            Backend::Table => Arc::new(TableStore::new(
                &self.api_url,
                &self.table,
                self.api_key.clone(),
            )?),
            Backend::Memory => Arc::new(MemoryStore::new()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str_ignores_case() {
        assert_eq!(Backend::from_str("REST"), Some(Backend::Rest));
        assert_eq!(Backend::from_str("table"), Some(Backend::Table));
        assert_eq!(Backend::from_str("Memory"), Some(Backend::Memory));
        assert_eq!(Backend::from_str("sqlite"), None);
    }

    #[test]
    fn test_default_config_points_at_local_services() {
        let config = StoreConfig::default();
        assert_eq!(config.backend, Backend::Rest);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.contact_url, DEFAULT_CONTACT_URL);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_build_store_succeeds_for_every_backend() {
        for backend in [Backend::Rest, Backend::Table, Backend::Memory] {
            let config = StoreConfig {
                backend,
                ..StoreConfig::default()
            };
            assert!(config.build_store().is_ok());
        }
    }
}
