use reqwest::StatusCode;
use thiserror::Error;

/// Errors from token signing and platform API calls
#[derive(Debug, Error)]
pub enum LiveKitError {
    #[error("LIVEKIT_API_KEY and LIVEKIT_API_SECRET must be set in environment variables")]
    MissingCredentials,

    #[error("LIVEKIT_API_URL or LIVEKIT_WS_URL must be set to reach the server API")]
    MissingApiUrl,

    #[error("token lifetime of {0:?} is out of range")]
    InvalidTtl(std::time::Duration),

    #[error("failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("server API returned {status}: {code}: {message}")]
    Api {
        status: StatusCode,
        code: String,
        message: String,
    },
}
