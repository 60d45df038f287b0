// --- File: crates/cheer_config/src/models.rs ---

use serde::{Deserialize, Serialize};
use std::fmt;

// --- General Server Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

// --- Database Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub url: String, // e.g. sqlite:data/cheer.db, overridden via CHEER__DATABASE__URL
    #[serde(default)]
    pub max_connections: Option<u32>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:data/cheer.db".to_string(),
            max_connections: None,
        }
    }
}

// --- Firebase Config ---
// key_path usually carries the "secret_from_env" marker and is read from FIREBASE_KEY_PATH.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct FirebaseConfig {
    pub project_id: Option<String>,
    pub key_path: Option<String>,
    /// Overrides https://fcm.googleapis.com, used against local mocks.
    #[serde(default)]
    pub api_base_url: Option<String>,
}

/// Logical namespace every stored record belongs to.
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Development,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Production => "production",
            Environment::Development => "development",
        }
    }

    /// Text appended to every cheer message sent in this environment.
    pub fn message_suffix(&self) -> &'static str {
        match self {
            Environment::Production => "",
            Environment::Development => " _dev",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Cheer Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CheerConfig {
    #[serde(default)]
    pub environment: Environment,
    /// Installations whose cheers are silently dropped.
    #[serde(default)]
    pub banned_installation_ids: Vec<String>,
    /// App identifiers indexed for random selection. Empty accepts every installation.
    #[serde(default)]
    pub app_identifiers: Vec<String>,
}

impl CheerConfig {
    pub fn is_banned(&self, installation_id: &str) -> bool {
        self.banned_installation_ids
            .iter()
            .any(|banned| banned == installation_id)
    }

    pub fn accepts_app(&self, app_identifier: Option<&str>) -> bool {
        if self.app_identifiers.is_empty() {
            return true;
        }
        match app_identifier {
            Some(id) => self.app_identifiers.iter().any(|known| known == id),
            None => false,
        }
    }
}

// --- Logging Config ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    /// When set, logs are also written to a daily rolling file in this directory.
    #[serde(default)]
    pub directory: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            directory: None,
        }
    }
}

// --- Unified App Configuration ---
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    // --- Runtime Flags (optional in config file, default to false) ---
    #[serde(default)]
    pub use_firebase: bool,

    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub firebase: Option<FirebaseConfig>,
    #[serde(default)]
    pub cheer: CheerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}
