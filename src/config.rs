use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{NotasError, Result};
use crate::format::Locale;
use crate::pwa::PwaConfig;

const APP_DIR: &str = "notas";
const LOCAL_CONFIG: &str = "notas.yaml";

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory that holds the storage slot (default: $XDG_DATA_HOME/notas)
    pub data_dir: Option<PathBuf>,
    /// Language for rendered dates
    #[serde(default)]
    pub locale: Locale,
    #[serde(default)]
    pub pwa: PwaConfig,
}

impl Config {
    /// Load configuration from file.
    ///
    /// Search order:
    /// 1. Explicit path if provided (must exist)
    /// 2. ./notas.yaml (current directory)
    /// 3. $XDG_CONFIG_HOME/notas/config.yaml
    ///
    /// No file at all means defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let path = match explicit_path {
            Some(p) if p.exists() => Some(p.to_path_buf()),
            Some(p) => {
                return Err(NotasError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )))
            }
            None => Self::find_config_file(),
        };

        match path {
            Some(p) => Self::load_from_path(&p),
            None => {
                tracing::debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    fn find_config_file() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG);
        if local.exists() {
            return Some(local);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg_path = config_dir.join(APP_DIR).join("config.yaml");
            if xdg_path.exists() {
                return Some(xdg_path);
            }
        }

        None
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&contents).map_err(|e| {
            NotasError::Config(format!(
                "Failed to parse config file {}: {}",
                path.display(),
                e
            ))
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_yaml(contents: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty map.
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Where notes are stored: explicit override, config, then the
    /// platform data directory.
    pub fn resolve_data_dir(&self, override_dir: Option<&Path>) -> Result<PathBuf> {
        if let Some(dir) = override_dir {
            return Ok(dir.to_path_buf());
        }
        if let Some(dir) = &self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|d| d.join(APP_DIR))
            .ok_or_else(|| {
                NotasError::Config(
                    "Could not determine a data directory; pass --data-dir".to_string(),
                )
            })
    }
}
