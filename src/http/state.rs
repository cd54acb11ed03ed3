use crate::config::{Config, LiveKitConfig};
use crate::livekit::{EgressApi, EgressClient};
use crate::session::{BaseUrl, SessionStore};
use std::sync::Arc;
use std::time::Duration;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Per-browser sessions (session id → room / recording state)
    pub sessions: SessionStore,

    /// Platform settings used for token minting
    pub livekit: Arc<LiveKitConfig>,

    /// Egress service used by the recording controls
    pub egress: Arc<dyn EgressApi>,

    /// Base for shareable links
    pub base_url: BaseUrl,
}

impl AppState {
    pub fn new(config: &Config) -> Self {
        let egress = Arc::new(EgressClient::new(config.livekit.clone()));
        Self::with_egress(config, egress)
    }

    /// Build state around a specific egress implementation
    pub fn with_egress(config: &Config, egress: Arc<dyn EgressApi>) -> Self {
        Self {
            sessions: SessionStore::new(Duration::from_secs(config.service.session_idle_secs)),
            livekit: Arc::new(config.livekit.clone()),
            egress,
            base_url: config.base_url(),
        }
    }
}
