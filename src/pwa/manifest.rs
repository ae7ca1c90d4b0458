use serde::{Deserialize, Serialize};

/// Fields of `manifest.webmanifest`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebManifest {
    pub name: String,
    pub short_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub theme_color: String,
    pub background_color: String,
    #[serde(default)]
    pub display: DisplayMode,
    pub start_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    pub scope: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default)]
    pub icons: Vec<ManifestIcon>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DisplayMode {
    Fullscreen,
    #[default]
    Standalone,
    MinimalUi,
    Browser,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestIcon {
    pub src: String,
    pub sizes: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<String>,
}

impl ManifestIcon {
    fn new(src: &str, sizes: &str, mime_type: &str, purpose: &str) -> Self {
        Self {
            src: src.to_string(),
            sizes: sizes.to_string(),
            mime_type: mime_type.to_string(),
            purpose: Some(purpose.to_string()),
        }
    }
}

impl Default for WebManifest {
    fn default() -> Self {
        Self {
            name: "Notas Rápidas - Aplicación de Notas".to_string(),
            short_name: "Notas Rápidas".to_string(),
            description: Some(
                "Aplicación de notas rápida y simple. Funciona offline y se puede instalar como aplicación nativa."
                    .to_string(),
            ),
            theme_color: "#FFD700".to_string(),
            background_color: "#FFFFCC".to_string(),
            display: DisplayMode::Standalone,
            start_url: "/".to_string(),
            orientation: Some("portrait".to_string()),
            scope: "/".to_string(),
            lang: Some("es".to_string()),
            categories: vec!["productivity".to_string(), "utilities".to_string()],
            icons: vec![
                ManifestIcon::new("/favicon.ico", "64x64", "image/x-icon", "any"),
                ManifestIcon::new("/icon-192x192.svg", "192x192", "image/svg+xml", "any maskable"),
                ManifestIcon::new("/icon-512x512.svg", "512x512", "image/svg+xml", "any maskable"),
            ],
        }
    }
}

impl WebManifest {
    /// Collect problems that would make the app uninstallable
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.name.trim().is_empty() {
            problems.push("manifest name is empty".to_string());
        }
        if self.short_name.trim().is_empty() {
            problems.push("manifest short_name is empty".to_string());
        }
        if self.icons.is_empty() {
            problems.push("manifest declares no icons".to_string());
        }
        for icon in &self.icons {
            if icon.src.is_empty() {
                problems.push(format!("icon with sizes {} has no src", icon.sizes));
            }
        }
        if !self.start_url.starts_with(&self.scope) {
            problems.push(format!(
                "start_url {} is outside scope {}",
                self.start_url, self.scope
            ));
        }

        problems
    }
}
