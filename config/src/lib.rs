//! Configuration loading for Taskdeck.
//!
//! Connection parameters for the remote store come from
//! `~/.taskdeck/config.toml` with environment variables taking precedence.
//! A missing config file is fine; a malformed one is logged and ignored.

use serde::Deserialize;
use std::{
    env, fs,
    path::{Path, PathBuf},
};
use thiserror::Error;

const DEFAULT_COLLECTION: &str = "tasks";
const FIRESTORE_BASE_URL: &str = "https://firestore.googleapis.com";

#[derive(Debug, Default, Deserialize)]
pub struct TaskdeckConfig {
    pub store: Option<StoreConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct StoreConfig {
    pub project_id: Option<String>,
    pub collection: Option<String>,
    pub api_key: Option<String>,
}

impl TaskdeckConfig {
    pub fn load() -> Option<Self> {
        let path = config_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return None;
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                None
            }
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".taskdeck").join("config.toml"))
}

/// Expand `${VAR}` references from the environment. Unknown variables
/// expand to the empty string.
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut i = 0;

    while i < value.len() {
        if value[i..].starts_with("${") {
            let start = i + 2;
            if let Some(end_rel) = value[start..].find('}') {
                let end = start + end_rel;
                let var = &value[start..end];
                if !var.is_empty() {
                    let replacement = env::var(var).unwrap_or_default();
                    out.push_str(&replacement);
                }
                i = end + 1;
                continue;
            }
        }

        let ch = value[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }

    out
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "no project id configured; set TASKDECK_PROJECT_ID or [store].project_id in {}",
        config_path().map_or_else(|| "~/.taskdeck/config.toml".to_string(), |p| p.display().to_string())
    )]
    MissingProjectId,
}

/// Fully resolved store connection parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreSettings {
    pub project_id: String,
    pub collection: String,
    pub api_key: Option<String>,
    pub base_url: String,
}

/// Environment overrides read at resolution time. Split out from
/// [`StoreSettings::resolve`] so precedence is testable without touching
/// process-global state.
#[derive(Debug, Default)]
pub struct EnvOverrides {
    pub project_id: Option<String>,
    pub collection: Option<String>,
    pub api_key: Option<String>,
    pub emulator_host: Option<String>,
}

impl EnvOverrides {
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            project_id: non_empty_env("TASKDECK_PROJECT_ID"),
            collection: non_empty_env("TASKDECK_COLLECTION"),
            api_key: non_empty_env("TASKDECK_API_KEY"),
            emulator_host: non_empty_env("FIRESTORE_EMULATOR_HOST"),
        }
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

impl StoreSettings {
    pub fn resolve(config: Option<&TaskdeckConfig>) -> Result<Self, ConfigError> {
        Self::resolve_with(config, EnvOverrides::from_env())
    }

    pub fn resolve_with(
        config: Option<&TaskdeckConfig>,
        overrides: EnvOverrides,
    ) -> Result<Self, ConfigError> {
        let store = config.and_then(|cfg| cfg.store.as_ref());

        let project_id = overrides
            .project_id
            .or_else(|| store.and_then(|s| s.project_id.clone()))
            .ok_or(ConfigError::MissingProjectId)?;

        let collection = overrides
            .collection
            .or_else(|| store.and_then(|s| s.collection.clone()))
            .unwrap_or_else(|| DEFAULT_COLLECTION.to_string());

        let api_key = overrides
            .api_key
            .or_else(|| store.and_then(|s| s.api_key.as_deref().map(expand_env_vars)))
            .filter(|key| !key.trim().is_empty());

        // The Firestore emulator convention: a bare host:port, plain http.
        let base_url = overrides
            .emulator_host
            .map(|host| format!("http://{}", host.trim_end_matches('/')))
            .unwrap_or_else(|| FIRESTORE_BASE_URL.to_string());

        Ok(Self {
            project_id,
            collection,
            api_key,
            base_url,
        })
    }
}
