// Enrichment (generative-text) configuration, read from the environment.
//
// Variables:
//   GEMINI_API_KEY   absent → `no-key`; the .env placeholder → `invalid-key`
//   GEMINI_MODEL     defaults to `DEFAULT_MODEL`
//   GEMINI_ENDPOINT  API base URL, defaults to `DEFAULT_ENDPOINT`
//
// Only `Ready` configs ever produce a live enricher; the other two statuses
// put the guide in fallback mode and are reported by `/api/status`.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-04-17";
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Value shipped in the sample env file; never a real key.
pub const PLACEHOLDER_KEY: &str = "your_gemini_api_key_here";

/// Whether live enrichment can be attempted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EnrichmentStatus {
    NoKey,
    InvalidKey,
    Ready,
}

impl EnrichmentStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EnrichmentStatus::NoKey => "no-key",
            EnrichmentStatus::InvalidKey => "invalid-key",
            EnrichmentStatus::Ready => "ready",
        }
    }
}

impl fmt::Display for EnrichmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnrichmentConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub timeout: Duration,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            endpoint: DEFAULT_ENDPOINT.into(),
            timeout: Duration::from_secs(20),
        }
    }
}

impl EnrichmentConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();
        Self {
            api_key: get("GEMINI_API_KEY"),
            model: get("GEMINI_MODEL").unwrap_or(defaults.model),
            endpoint: get("GEMINI_ENDPOINT").unwrap_or(defaults.endpoint),
            timeout: defaults.timeout,
        }
    }

    pub fn status(&self) -> EnrichmentStatus {
        match self.api_key.as_deref() {
            None => EnrichmentStatus::NoKey,
            Some(PLACEHOLDER_KEY) => EnrichmentStatus::InvalidKey,
            Some(_) => EnrichmentStatus::Ready,
        }
    }

    pub fn is_configured(&self) -> bool {
        self.status() == EnrichmentStatus::Ready
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> EnrichmentConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        EnrichmentConfig::from_lookup(|name| map.get(name).cloned())
    }

    #[test]
    fn status_without_key() {
        let config = config_from(&[]);
        assert_eq!(config.status(), EnrichmentStatus::NoKey);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(!config.is_configured());
    }

    #[test]
    fn placeholder_key_is_invalid() {
        let config = config_from(&[("GEMINI_API_KEY", PLACEHOLDER_KEY)]);
        assert_eq!(config.status(), EnrichmentStatus::InvalidKey);
        assert_eq!(config.status().to_string(), "invalid-key");
    }

    #[test]
    fn real_key_is_ready() {
        let config = config_from(&[
            ("GEMINI_API_KEY", "abc123"),
            ("GEMINI_MODEL", "gemini-test"),
            ("GEMINI_ENDPOINT", "http://127.0.0.1:9"),
        ]);
        assert_eq!(config.status(), EnrichmentStatus::Ready);
        assert_eq!(config.model, "gemini-test");
        assert_eq!(config.endpoint, "http://127.0.0.1:9");
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let config = config_from(&[("GEMINI_API_KEY", "  ")]);
        assert_eq!(config.status(), EnrichmentStatus::NoKey);
    }
}
