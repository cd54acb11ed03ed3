//! Start/stop of the session's recording.
//!
//! A session tracks at most one egress id. The slot is claimed under the
//! store's write lock before the start call goes out, and only the
//! recording fields are written back afterwards. Stopping forgets the id
//! whether or not the remote stop succeeded.

use tracing::{error, info, warn};

use super::notice::Notice;
use super::session::UiSession;
use super::store::{SessionId, SessionStore};
use crate::livekit::EgressApi;

/// Start a composite recording of the session's room
///
/// Returns the notice to show and the session as it stands afterwards.
pub async fn start_recording(
    store: &SessionStore,
    id: &SessionId,
    api: &dyn EgressApi,
) -> (Notice, UiSession) {
    let room = match store.update(id, |s| s.reserve_recording()).await {
        Ok(room) => room,
        Err(notice) => {
            warn!("Not starting recording for session {}: {}", id, notice.text);
            return (notice, store.get(id).await);
        }
    };

    let result = api.start_room_composite(&room).await;

    store
        .update(id, |s| {
            s.recording_pending = false;
            let notice = match result {
                Ok(egress) => {
                    info!("Recording {} started for room {}", egress.egress_id, room);
                    s.egress_id = Some(egress.egress_id);
                    Notice::success("Recording started successfully")
                }
                Err(e) => {
                    error!("Failed to start recording for room {}: {}", room, e);
                    Notice::error(format!("Failed to start recording: {}", e))
                }
            };
            (notice, s.clone())
        })
        .await
}

/// Stop the tracked recording
pub async fn stop_recording(
    store: &SessionStore,
    id: &SessionId,
    api: &dyn EgressApi,
) -> (Notice, UiSession) {
    let Some(egress_id) = store.update(id, |s| s.egress_id.take()).await else {
        return (
            Notice::warning("No recording in progress"),
            store.get(id).await,
        );
    };

    let notice = match api.stop_egress(&egress_id).await {
        Ok(_) => {
            info!("Recording {} stopped", egress_id);
            Notice::success("Recording stopped successfully")
        }
        Err(e) => {
            error!("Failed to stop recording {}: {}", egress_id, e);
            Notice::error(format!("Failed to stop recording: {}", e))
        }
    };

    (notice, store.get(id).await)
}
