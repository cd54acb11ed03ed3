//! Egress (recording) control.
//!
//! The platform exposes its server API as Twirp JSON endpoints:
//! `POST {api_url}/twirp/livekit.Egress/{Method}` with a bearer token that
//! carries the `roomRecord` grant.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use super::error::LiveKitError;
use super::grants::VideoGrant;
use super::token::{AccessToken, Credentials};
use crate::config::LiveKitConfig;

const EGRESS_SERVICE: &str = "livekit.Egress";

/// Lifetime of the bearer token attached to each API call
const API_TOKEN_TTL: Duration = Duration::from_secs(10 * 60);

/// Egress job as reported by the server API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EgressInfo {
    #[serde(default, alias = "egressId")]
    pub egress_id: String,

    #[serde(default, alias = "roomName")]
    pub room_name: String,
}

/// Remote egress operations
#[async_trait]
pub trait EgressApi: Send + Sync {
    /// Start a composite recording of `room`
    async fn start_room_composite(&self, room: &str) -> Result<EgressInfo, LiveKitError>;

    /// Stop the egress job `egress_id`
    async fn stop_egress(&self, egress_id: &str) -> Result<EgressInfo, LiveKitError>;
}

#[derive(Debug, Serialize)]
struct RoomCompositeEgressRequest<'a> {
    room_name: &'a str,
}

#[derive(Debug, Serialize)]
struct StopEgressRequest<'a> {
    egress_id: &'a str,
}

/// Twirp error body
#[derive(Debug, Deserialize)]
struct TwirpError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    msg: String,
}

/// HTTP client for the egress service
#[derive(Debug, Clone)]
pub struct EgressClient {
    http: reqwest::Client,
    config: LiveKitConfig,
}

impl EgressClient {
    pub fn new(config: LiveKitConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    async fn call<Req>(&self, method: &str, request: &Req) -> Result<EgressInfo, LiveKitError>
    where
        Req: Serialize + Sync,
    {
        let credentials = Credentials::from_config(&self.config)?;
        let api_url = self.config.api_url().ok_or(LiveKitError::MissingApiUrl)?;

        let token = AccessToken::new(credentials)
            .with_grant(VideoGrant::record())
            .with_ttl(API_TOKEN_TTL)
            .to_jwt()?;

        let url = format!("{}/twirp/{}/{}", api_url, EGRESS_SERVICE, method);

        let resp = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let (code, message) = match serde_json::from_str::<TwirpError>(&body) {
                Ok(err) => (err.code, err.msg),
                Err(_) => ("unknown".to_string(), body),
            };
            error!("{} failed with HTTP {}: {} {}", method, status, code, message);
            return Err(LiveKitError::Api {
                status,
                code,
                message,
            });
        }

        Ok(resp.json::<EgressInfo>().await?)
    }
}

#[async_trait]
impl EgressApi for EgressClient {
    async fn start_room_composite(&self, room: &str) -> Result<EgressInfo, LiveKitError> {
        info!("Starting room composite egress for room {}", room);

        let info = self
            .call(
                "StartRoomCompositeEgress",
                &RoomCompositeEgressRequest { room_name: room },
            )
            .await?;

        info!("Egress {} started for room {}", info.egress_id, room);
        Ok(info)
    }

    async fn stop_egress(&self, egress_id: &str) -> Result<EgressInfo, LiveKitError> {
        info!("Stopping egress {}", egress_id);

        let info = self
            .call("StopEgress", &StopEgressRequest { egress_id })
            .await?;

        info!("Egress {} stopped", egress_id);
        Ok(info)
    }
}
