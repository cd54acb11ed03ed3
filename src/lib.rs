pub mod config;
pub mod http;
pub mod livekit;
pub mod session;

pub use config::{Config, LiveKitConfig};
pub use http::{create_router, AppState};
pub use livekit::{
    mint_join_token, AccessToken, Credentials, EgressApi, EgressClient, EgressInfo,
    JoinCredentials, LiveKitError, VideoGrant,
};
pub use session::{Notice, NoticeLevel, SessionStore, UiSession};
