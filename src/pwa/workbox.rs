use std::collections::HashSet;

use serde::{Deserialize, Serialize};

const YEAR_SECS: u64 = 60 * 60 * 24 * 365;
const MONTH_SECS: u64 = 30 * 24 * 60 * 60;

/// Options handed to the service-worker generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkboxConfig {
    pub glob_patterns: Vec<String>,
    /// Serialized as `null` when unset; the generator treats that as "no fallback".
    #[serde(default)]
    pub navigate_fallback: Option<String>,
    #[serde(default)]
    pub runtime_caching: Vec<RuntimeCaching>,
}

/// Caching strategy the service worker applies to matching requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CacheStrategy {
    CacheFirst,
    NetworkFirst,
    StaleWhileRevalidate,
}

impl std::fmt::Display for CacheStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheStrategy::CacheFirst => write!(f, "CacheFirst"),
            CacheStrategy::NetworkFirst => write!(f, "NetworkFirst"),
            CacheStrategy::StaleWhileRevalidate => write!(f, "StaleWhileRevalidate"),
        }
    }
}

/// One runtime caching rule, applied to requests whose URL matches `url_pattern`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeCaching {
    /// Regular expression source, matched by the generated service worker.
    pub url_pattern: String,
    pub handler: CacheStrategy,
    pub options: CacheOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheOptions {
    pub cache_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<Expiration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_timeout_seconds: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expiration {
    pub max_entries: u32,
    pub max_age_seconds: u64,
}

impl Default for WorkboxConfig {
    fn default() -> Self {
        Self {
            glob_patterns: vec!["**/*.{js,css,html,png,svg,ico}".to_string()],
            navigate_fallback: None,
            runtime_caching: vec![
                RuntimeCaching {
                    url_pattern: r"^https://fonts\.googleapis\.com/.*".to_string(),
                    handler: CacheStrategy::CacheFirst,
                    options: CacheOptions {
                        cache_name: "google-fonts-cache".to_string(),
                        expiration: Some(Expiration {
                            max_entries: 10,
                            max_age_seconds: YEAR_SECS,
                        }),
                        network_timeout_seconds: None,
                    },
                },
                RuntimeCaching {
                    url_pattern: "/.*".to_string(),
                    handler: CacheStrategy::NetworkFirst,
                    options: CacheOptions {
                        cache_name: "notas-cache".to_string(),
                        expiration: Some(Expiration {
                            max_entries: 50,
                            max_age_seconds: MONTH_SECS,
                        }),
                        network_timeout_seconds: Some(10),
                    },
                },
            ],
        }
    }
}

impl WorkboxConfig {
    /// Collect rule problems the generator would reject or silently misapply
    pub fn problems(&self) -> Vec<String> {
        let mut problems = Vec::new();
        let mut seen = HashSet::new();

        if self.glob_patterns.is_empty() {
            problems.push("workbox has no precache glob patterns".to_string());
        }

        for (i, rule) in self.runtime_caching.iter().enumerate() {
            let name = &rule.options.cache_name;
            if rule.url_pattern.is_empty() {
                problems.push(format!("runtime rule {} has an empty url pattern", i));
            }
            if name.trim().is_empty() {
                problems.push(format!("runtime rule {} has an empty cache name", i));
            } else if !seen.insert(name.as_str()) {
                problems.push(format!("cache name {} is used by more than one rule", name));
            }
            if let Some(exp) = rule.options.expiration {
                if exp.max_entries == 0 {
                    problems.push(format!("cache {} has maxEntries of 0", name));
                }
                if exp.max_age_seconds == 0 {
                    problems.push(format!("cache {} has maxAgeSeconds of 0", name));
                }
            }
            if rule.options.network_timeout_seconds.is_some()
                && rule.handler != CacheStrategy::NetworkFirst
            {
                problems.push(format!(
                    "cache {} sets networkTimeoutSeconds but uses {}",
                    name, rule.handler
                ));
            }
        }

        problems
    }
}
