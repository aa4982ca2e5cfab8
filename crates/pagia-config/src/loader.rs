use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, warn};

use crate::schema::PagiaConfig;

/// Loads the PAGIA configuration and hands out snapshots.
pub struct ConfigLoader {
    config: Arc<RwLock<PagiaConfig>>,
    config_path: PathBuf,
}

impl ConfigLoader {
    /// Resolve the config path: explicit path > PAGIA_CONFIG env > ~/.pagia/pagia.toml
    pub fn resolve_path(explicit: Option<&Path>) -> PathBuf {
        if let Some(p) = explicit {
            return p.to_path_buf();
        }
        if let Ok(p) = std::env::var("PAGIA_CONFIG") {
            return PathBuf::from(p);
        }
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".pagia")
            .join("pagia.toml")
    }

    /// Load the config from disk, falling back to defaults.
    pub fn load(path: Option<&Path>) -> pagia_core::Result<Self> {
        let config_path = Self::resolve_path(path);
        let config = if config_path.exists() {
            info!(?config_path, "loading configuration");
            let raw = std::fs::read_to_string(&config_path)?;
            toml::from_str::<PagiaConfig>(&raw).map_err(|e| {
                pagia_core::PagiaError::Config(format!(
                    "failed to parse {}: {}",
                    config_path.display(),
                    e
                ))
            })?
        } else {
            warn!(?config_path, "config file not found, using defaults");
            PagiaConfig::default()
        };

        let config = Self::apply_env_overrides(config);

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_path,
        })
    }

    /// Get a read snapshot of the current config.
    pub fn get(&self) -> PagiaConfig {
        self.config.read().clone()
    }

    /// Path the config was loaded from (or would be loaded from).
    pub fn path(&self) -> &Path {
        &self.config_path
    }

    /// Apply env var overrides (PAGIA_MODEL, PAGIA_PORT, etc.)
    pub(crate) fn apply_env_overrides(mut config: PagiaConfig) -> PagiaConfig {
        if let Ok(v) = std::env::var("PAGIA_MODEL") {
            config.provider.model = v;
        }
        if let Ok(v) = std::env::var("PAGIA_LOG_LEVEL") {
            config.logging.level = v;
        }
        if let Ok(v) = std::env::var("PAGIA_PORT") {
            match v.parse::<u16>() {
                Ok(port) => config.server.port = port,
                Err(_) => warn!(value = %v, "PAGIA_PORT is not a valid port, ignoring"),
            }
        }
        // API key: env var fills in when the config file doesn't have the
        // key set. The config file takes priority, env is the fallback.
        if config.provider.api_key.is_none() {
            if let Ok(v) = std::env::var("GEMINI_API_KEY") {
                config.provider.api_key = Some(v);
            }
        }
        config
    }

    /// Reload the config from disk.
    pub fn reload(&self) -> pagia_core::Result<()> {
        if !self.config_path.exists() {
            return Err(pagia_core::PagiaError::Config(format!(
                "config file not found: {}",
                self.config_path.display()
            )));
        }
        let raw = std::fs::read_to_string(&self.config_path)?;
        let new_config = toml::from_str::<PagiaConfig>(&raw).map_err(|e| {
            pagia_core::PagiaError::Config(format!(
                "failed to parse {}: {}",
                self.config_path.display(),
                e
            ))
        })?;
        *self.config.write() = Self::apply_env_overrides(new_config);
        info!("configuration reloaded");
        Ok(())
    }
}
