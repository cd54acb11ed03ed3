//! Per-user session bookkeeping
//!
//! This module tracks, for each browser session:
//! - The active room (created here or taken from a shared link)
//! - Whether the room came from a link (suppresses room creation)
//! - The id of the recording this session started, if any

mod link;
mod notice;
mod recording;
mod session;
mod store;

pub use link::{room_from_query, share_link, BaseUrl};
pub use notice::{Notice, NoticeLevel};
pub use recording::{start_recording, stop_recording};
pub use session::UiSession;
pub use store::{SessionId, SessionStore};
