//! Runtime configuration for Wardroom.
//!
//! Configuration is read from a JSON file and then patched with a handful of
//! environment variables. Every field has a default, so a missing file is not an
//! error: the application starts with `wardroom.db` in the working directory and a
//! seeded `admin` account.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV: &str = "WARDROOM_CONFIG";
/// Configuration file looked up in the working directory when `CONFIG_ENV` is unset.
pub const DEFAULT_CONFIG_FILE: &str = "wardroom.json";

const DB_ENV: &str = "WARDROOM_DB";
const ADMIN_USER_ENV: &str = "WARDROOM_ADMIN_USER";
const ADMIN_PASSWORD_ENV: &str = "WARDROOM_ADMIN_PASSWORD";

/// Credentials of the administrator account created on first start.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "admin123".to_string(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path of the SQLite database holding every record category.
    pub database_path: PathBuf,
    /// File receiving log output. The terminal itself is owned by the UI.
    pub log_path: PathBuf,
    /// Default `tracing` filter directive, overridden by `RUST_LOG`.
    pub log_level: String,
    /// Administrator seeded into the `users` table.
    pub admin: AdminConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("wardroom.db"),
            log_path: PathBuf::from("wardroom.log"),
            log_level: "info".to_string(),
            admin: AdminConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the configuration the application starts with.
    ///
    /// The file named by `WARDROOM_CONFIG` must exist if the variable is set. Without
    /// it, `wardroom.json` is used when present and the defaults otherwise.
    /// Environment overrides are applied last.
    pub fn load() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Reads a configuration file. Missing keys take their default value.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Applies environment overrides, looking each variable up through `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup(DB_ENV).filter(|v| !v.is_empty()) {
            self.database_path = PathBuf::from(path);
        }
        if let Some(user) = lookup(ADMIN_USER_ENV).filter(|v| !v.is_empty()) {
            self.admin.username = user;
        }
        if let Some(password) = lookup(ADMIN_PASSWORD_ENV).filter(|v| !v.is_empty()) {
            self.admin.password = password;
        }
    }
}
