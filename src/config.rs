use anyhow::{Context, Result};
use serde::Deserialize;

use crate::session::BaseUrl;

/// Environment variables that override file/default settings.
const ENV_OVERRIDES: &[(&str, &str)] = &[
    ("LIVEKIT_API_KEY", "livekit.api_key"),
    ("LIVEKIT_API_SECRET", "livekit.api_secret"),
    ("LIVEKIT_WS_URL", "livekit.ws_url"),
    ("LIVEKIT_API_URL", "livekit.api_url"),
    ("APP_HEADLESS", "service.headless"),
    ("APP_PUBLIC_BASE_URL", "service.public_base_url"),
    ("APP_BIND", "service.http.bind"),
    ("APP_PORT", "service.http.port"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub livekit: LiveKitConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
    /// Publicly hosted deployment: share links use `https://{Host}`
    #[serde(default)]
    pub headless: bool,
    /// Fixed base URL for share links (local deployments)
    #[serde(default)]
    pub public_base_url: Option<String>,
    /// Sessions unused for this long are dropped
    #[serde(default = "default_session_idle_secs")]
    pub session_idle_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Media platform settings. Credentials are optional here and checked
/// when a token is minted or an egress call is made.
#[derive(Debug, Clone, Deserialize)]
pub struct LiveKitConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
    /// Websocket URL handed to the browser client
    #[serde(default)]
    pub ws_url: Option<String>,
    /// HTTP base URL of the server API (derived from `ws_url` when unset)
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: u64,
}

fn default_session_idle_secs() -> u64 {
    2 * 60 * 60
}

fn default_token_ttl_secs() -> u64 {
    3600
}

impl Default for LiveKitConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            api_secret: None,
            ws_url: None,
            api_url: None,
            token_ttl_secs: default_token_ttl_secs(),
        }
    }
}

impl Config {
    /// Load defaults, then the optional config file at `path`, then the
    /// process environment.
    pub fn load(path: &str) -> Result<Self> {
        Self::load_with_env(path, |key| std::env::var(key).ok())
    }

    pub fn load_with_env<F>(path: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = config::Config::builder()
            .set_default("service.name", "livekit-rooms")?
            .set_default("service.http.bind", "127.0.0.1")?
            .set_default("service.http.port", 8501_i64)?
            .set_default("service.headless", false)?
            .set_default("service.session_idle_secs", 7200_i64)?
            .set_default("livekit.token_ttl_secs", 3600_i64)?
            .add_source(config::File::with_name(path).required(false));

        for (var, key) in ENV_OVERRIDES {
            if let Some(value) = env(var).filter(|v| !v.is_empty()) {
                builder = builder.set_override(*key, value)?;
            }
        }

        let settings = builder
            .build()
            .with_context(|| format!("Failed to build configuration from {}", path))?;

        settings
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Base URL used to derive shareable links
    pub fn base_url(&self) -> BaseUrl {
        if self.service.headless {
            BaseUrl::FromRequestHost
        } else {
            let fixed = self
                .service
                .public_base_url
                .clone()
                .unwrap_or_else(|| format!("http://localhost:{}", self.service.http.port));
            BaseUrl::Fixed(fixed.trim_end_matches('/').to_string())
        }
    }
}

impl LiveKitConfig {
    /// HTTP endpoint for server API calls.
    ///
    /// Falls back to the websocket URL with its scheme swapped
    /// (`wss` → `https`, `ws` → `http`).
    pub fn api_url(&self) -> Option<String> {
        if let Some(url) = self.api_url.as_deref().filter(|u| !u.is_empty()) {
            return Some(url.trim_end_matches('/').to_string());
        }

        let ws_url = self.ws_url.as_deref().filter(|u| !u.is_empty())?;
        let http = if let Some(rest) = ws_url.strip_prefix("wss://") {
            format!("https://{}", rest)
        } else if let Some(rest) = ws_url.strip_prefix("ws://") {
            format!("http://{}", rest)
        } else {
            ws_url.to_string()
        };

        Some(http.trim_end_matches('/').to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn livekit(ws_url: Option<&str>, api_url: Option<&str>) -> LiveKitConfig {
        LiveKitConfig {
            ws_url: ws_url.map(str::to_string),
            api_url: api_url.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn api_url_derived_from_secure_websocket() {
        let cfg = livekit(Some("wss://demo.livekit.cloud"), None);
        assert_eq!(cfg.api_url().as_deref(), Some("https://demo.livekit.cloud"));
    }

    #[test]
    fn api_url_derived_from_plain_websocket() {
        let cfg = livekit(Some("ws://localhost:7880/"), None);
        assert_eq!(cfg.api_url().as_deref(), Some("http://localhost:7880"));
    }

    #[test]
    fn explicit_api_url_wins() {
        let cfg = livekit(Some("wss://a.example"), Some("https://b.example/"));
        assert_eq!(cfg.api_url().as_deref(), Some("https://b.example"));
    }

    #[test]
    fn no_urls_means_no_api_url() {
        assert_eq!(livekit(None, None).api_url(), None);
    }
}
