//! Progressive web app configuration.
//!
//! Declarative data only: the manifest and Workbox options are exported as
//! JSON for the service-worker generator, which implements the strategies.

mod manifest;
mod workbox;

pub use manifest::{DisplayMode, ManifestIcon, WebManifest};
pub use workbox::{CacheOptions, CacheStrategy, Expiration, RuntimeCaching, WorkboxConfig};

use serde::{Deserialize, Serialize};

use crate::error::{NotasError, Result};

/// How the generated service worker picks up new versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum RegisterType {
    #[default]
    AutoUpdate,
    Prompt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum InjectRegister {
    #[default]
    Script,
    Inline,
    Auto,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum SwStrategy {
    #[default]
    GenerateSW,
    InjectManifest,
}

/// Service worker settings for the dev server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevOptions {
    pub enabled: bool,
    #[serde(rename = "type")]
    pub module_type: String,
    pub navigate_fallback: Option<String>,
}

impl Default for DevOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            module_type: "module".to_string(),
            navigate_fallback: Some("/".to_string()),
        }
    }
}

/// The whole PWA block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PwaConfig {
    #[serde(default)]
    pub register_type: RegisterType,
    #[serde(default)]
    pub inject_register: InjectRegister,
    #[serde(default)]
    pub strategies: SwStrategy,
    #[serde(default)]
    pub manifest: WebManifest,
    #[serde(default)]
    pub workbox: WorkboxConfig,
    #[serde(default)]
    pub dev_options: DevOptions,
}

impl PwaConfig {
    /// Check manifest and cache rules, reporting every problem at once
    pub fn validate(&self) -> Result<()> {
        let mut problems = self.manifest.problems();
        problems.extend(self.workbox.problems());

        if problems.is_empty() {
            Ok(())
        } else {
            Err(NotasError::InvalidPwaConfig(problems))
        }
    }

    /// `manifest.webmanifest` contents
    pub fn manifest_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.manifest)?)
    }

    /// Options object for the Workbox `generateSW` step
    pub fn workbox_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.workbox)?)
    }
}
