//! Media platform integration
//!
//! - Access token signing (local, no network)
//! - Egress (recording) control over the platform's HTTP API

pub mod egress;
pub mod error;
pub mod grants;
pub mod token;

pub use egress::{EgressApi, EgressClient, EgressInfo};
pub use error::LiveKitError;
pub use grants::{Claims, VideoGrant};
pub use token::{mint_join_token, AccessToken, Credentials, JoinCredentials};
