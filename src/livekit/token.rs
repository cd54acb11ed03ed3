//! Access token signing.
//!
//! Tokens are HS256 JWTs signed with the API secret. Signing is a local
//! operation; nothing here touches the network.

use std::fmt;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::error::LiveKitError;
use super::grants::{Claims, VideoGrant};
use crate::config::LiveKitConfig;

/// Default validity window for join tokens
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// API key and secret pair
#[derive(Clone)]
pub struct Credentials {
    pub api_key: String,
    pub api_secret: String,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    /// Both values must be present and non-empty.
    pub fn from_config(cfg: &LiveKitConfig) -> Result<Self, LiveKitError> {
        let key = cfg.api_key.as_deref().filter(|k| !k.is_empty());
        let secret = cfg.api_secret.as_deref().filter(|s| !s.is_empty());

        match (key, secret) {
            (Some(key), Some(secret)) => Ok(Self::new(key, secret)),
            _ => Err(LiveKitError::MissingCredentials),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Builder for a signed access token
#[derive(Debug, Clone)]
pub struct AccessToken {
    credentials: Credentials,
    identity: String,
    grant: VideoGrant,
    ttl: Duration,
}

impl AccessToken {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            identity: String::new(),
            grant: VideoGrant::default(),
            ttl: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = identity.into();
        self
    }

    pub fn with_grant(mut self, grant: VideoGrant) -> Self {
        self.grant = grant;
        self
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sign the token, valid from now until now + ttl
    pub fn to_jwt(&self) -> Result<String, LiveKitError> {
        let now = Utc::now().timestamp();
        let exp = i64::try_from(self.ttl.as_secs())
            .ok()
            .and_then(|ttl| now.checked_add(ttl))
            .ok_or(LiveKitError::InvalidTtl(self.ttl))?;

        let claims = Claims {
            iss: self.credentials.api_key.clone(),
            sub: self.identity.clone(),
            jti: self.identity.clone(),
            nbf: now,
            exp,
            video: self.grant.clone(),
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.credentials.api_secret.as_bytes()),
        )?;

        Ok(token)
    }
}

/// Everything a browser client needs to connect to a room
#[derive(Debug, Clone, Serialize)]
pub struct JoinCredentials {
    pub identity: String,
    pub token: String,
    pub ws_url: Option<String>,
}

/// Mint a join token for `room` with a fresh random identity.
///
/// Fails with [`LiveKitError::MissingCredentials`] before any signing when
/// the key or secret is not configured.
pub fn mint_join_token(cfg: &LiveKitConfig, room: &str) -> Result<JoinCredentials, LiveKitError> {
    let credentials = Credentials::from_config(cfg)?;
    let identity = Uuid::new_v4().to_string();

    let token = AccessToken::new(credentials)
        .with_identity(identity.clone())
        .with_grant(VideoGrant::join(room))
        .with_ttl(Duration::from_secs(cfg.token_ttl_secs))
        .to_jwt()?;

    debug!("Minted join token for room {} (identity={})", room, identity);

    Ok(JoinCredentials {
        identity,
        token,
        ws_url: cfg.ws_url.clone(),
    })
}
