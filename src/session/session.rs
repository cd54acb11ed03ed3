use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use super::notice::Notice;

/// State for one browser session
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiSession {
    /// Active room id; once set it is never cleared
    pub room: Option<String>,

    /// Room came from a shared link, so creating a new one is not offered
    pub room_from_link: bool,

    /// Egress id of the recording this session started
    pub egress_id: Option<String>,

    /// A start request is in flight; no second start may begin
    #[serde(default)]
    pub recording_pending: bool,
}

impl UiSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt the room from an incoming `?room=` link.
    ///
    /// Replaces any room the session had before.
    pub fn apply_link(&mut self, room: impl Into<String>) {
        let room = room.into();
        info!("Joining room {} from shared link", room);
        self.room = Some(room);
        self.room_from_link = true;
    }

    /// Whether the "Create Room" action is offered
    pub fn can_create_room(&self) -> bool {
        !self.room_from_link
    }

    /// Generate a fresh random room and make it active.
    ///
    /// Returns `None` without touching the session when the room came from
    /// a link.
    pub fn create_room(&mut self) -> Option<String> {
        if !self.can_create_room() {
            return None;
        }

        let room = Uuid::new_v4().to_string();
        info!("Created room {}", room);
        self.room = Some(room.clone());
        Some(room)
    }

    pub fn is_recording(&self) -> bool {
        self.egress_id.is_some() || self.recording_pending
    }

    /// Claim the recording slot for a start request.
    ///
    /// Returns the room to record, or the warning to show when a recording
    /// is already tracked or in flight, or no room is set.
    pub fn reserve_recording(&mut self) -> Result<String, Notice> {
        if self.is_recording() {
            return Err(Notice::warning("Recording already in progress"));
        }

        let room = self
            .room
            .clone()
            .ok_or_else(|| Notice::warning("Create or join a room before recording"))?;

        self.recording_pending = true;
        Ok(room)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_empty() {
        let session = UiSession::new();
        assert!(session.room.is_none());
        assert!(session.can_create_room());
        assert!(!session.is_recording());
    }

    #[test]
    fn create_room_sets_random_room() {
        let mut session = UiSession::new();
        let first = session.create_room().expect("room should be created");
        assert_eq!(session.room.as_deref(), Some(first.as_str()));
        assert!(Uuid::parse_str(&first).is_ok());

        let second = session.create_room().expect("room should be created");
        assert_ne!(first, second);
        assert_eq!(session.room.as_deref(), Some(second.as_str()));
    }

    #[test]
    fn reservation_blocks_second_start() {
        let mut session = UiSession::new();
        session.apply_link("all-hands");

        assert_eq!(session.reserve_recording(), Ok("all-hands".to_string()));
        assert!(session.is_recording());
        assert_eq!(
            session.reserve_recording(),
            Err(Notice::warning("Recording already in progress"))
        );
    }

    #[test]
    fn reservation_needs_a_room() {
        let mut session = UiSession::new();
        assert!(session.reserve_recording().is_err());
        assert!(!session.recording_pending);
    }

    #[test]
    fn link_overrides_created_room_and_suppresses_creation() {
        let mut session = UiSession::new();
        session.create_room();
        session.apply_link("team-sync");

        assert_eq!(session.room.as_deref(), Some("team-sync"));
        assert!(!session.can_create_room());
        assert_eq!(session.create_room(), None);
        assert_eq!(session.room.as_deref(), Some("team-sync"));
    }
}
