//! Runtime configuration.
//!
//! Resolution order, later wins: defaults, `assetos.toml`, `ASSETOS_*`
//! environment variables, command-line flags.

use crate::core::error::AssetOsError;
use crate::core::schemas;
use crate::core::store::{OpenOptions, Store};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "assetos.toml";
pub const ENV_DB: &str = "ASSETOS_DB";
pub const ENV_IN_MEMORY: &str = "ASSETOS_IN_MEMORY";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub database: PathBuf,
    pub in_memory: bool,
    pub audit_log: bool,
    pub seed: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from(schemas::DEFAULT_DB_NAME),
            in_memory: false,
            audit_log: true,
            seed: true,
        }
    }
}

impl AppConfig {
    /// Load `path` if given (must exist), else `assetos.toml` in `dir` if present.
    pub fn load(explicit: Option<&Path>, dir: &Path) -> Result<Self, AssetOsError> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => {
                let candidate = dir.join(CONFIG_FILE_NAME);
                if !candidate.exists() {
                    return Ok(Self::default());
                }
                candidate
            }
        };
        let content = fs::read_to_string(&path).map_err(|e| {
            AssetOsError::ConfigError(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
            .map_err(|e| AssetOsError::ConfigError(format!("{}: {}", path.display(), e)))
    }

    pub fn from_toml(content: &str) -> Result<Self, AssetOsError> {
        toml::from_str(content).map_err(|e| AssetOsError::ConfigError(e.to_string()))
    }

    /// Overlay environment values supplied by `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), AssetOsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(db) = lookup(ENV_DB).filter(|v| !v.trim().is_empty()) {
            self.database = PathBuf::from(db.trim());
        }
        if let Some(flag) = lookup(ENV_IN_MEMORY) {
            self.in_memory = parse_bool(&flag).ok_or_else(|| {
                AssetOsError::ConfigError(format!("{} must be true/false, got '{}'", ENV_IN_MEMORY, flag))
            })?;
        }
        Ok(())
    }

    pub fn store(&self) -> Store {
        if self.in_memory {
            Store::in_memory()
        } else {
            Store::file(self.database.clone())
        }
    }

    pub fn open_options(&self) -> OpenOptions {
        OpenOptions {
            seed: self.seed,
            audit_log: self.audit_log,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
