// Server settings.
//
// `ServerConfig::default()` is a loopback server on port 3000 with an
// in-memory store; `from_env()` additionally honors `KIDCATCH_APP_URL` (the
// public base for share links) and the enrichment variables read by
// `kidcatch_guide`. The CLI overlays its flags on top.

use std::path::PathBuf;

use kidcatch_guide::EnrichmentConfig;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_WORKERS: usize = 4;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// 0 lets the OS pick.
    pub port: u16,
    /// Base of `shareUrl`; `/play/{id}` is appended.
    pub app_url: String,
    /// JSON store file; `None` keeps games in memory.
    pub data_path: Option<PathBuf>,
    pub workers: usize,
    pub enrichment: EnrichmentConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".into(),
            port: DEFAULT_PORT,
            app_url: format!("http://localhost:{DEFAULT_PORT}"),
            data_path: None,
            workers: DEFAULT_WORKERS,
            enrichment: EnrichmentConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let app_url = lookup("KIDCATCH_APP_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.app_url);
        Self {
            app_url,
            enrichment: EnrichmentConfig::from_lookup(&lookup),
            ..defaults
        }
    }

    /// `{app_url}/play/{id}`, tolerating a trailing slash on the base.
    pub fn share_url(&self, game_id: &str) -> String {
        share_url(&self.app_url, game_id)
    }
}

pub(crate) fn share_url(app_url: &str, game_id: &str) -> String {
    format!("{}/play/{game_id}", app_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use kidcatch_guide::EnrichmentStatus;

    use super::*;

    #[test]
    fn defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.port, 3000);
        assert_eq!(config.app_url, "http://localhost:3000");
        assert!(config.data_path.is_none());
    }

    #[test]
    fn environment_overrides() {
        let vars: HashMap<&str, &str> = [
            ("KIDCATCH_APP_URL", "https://kids.example/"),
            ("GEMINI_API_KEY", "abc"),
        ]
        .into_iter()
        .collect();
        let config = ServerConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string()));
        assert_eq!(config.app_url, "https://kids.example/");
        assert_eq!(config.enrichment.status(), EnrichmentStatus::Ready);
        assert_eq!(config.share_url("g1"), "https://kids.example/play/g1");
    }

    #[test]
    fn blank_app_url_is_ignored() {
        let config = ServerConfig::from_lookup(|k| (k == "KIDCATCH_APP_URL").then(|| " ".into()));
        assert_eq!(config.app_url, "http://localhost:3000");
    }
}
