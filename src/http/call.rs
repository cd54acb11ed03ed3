//! Browser-side call embed.
//!
//! The script is static apart from two values: the join token and the
//! websocket URL. Once it is in the page the server has no further say in
//! what the browser does with it.

use crate::livekit::JoinCredentials;

/// Client library loaded by the embedded script
pub const CLIENT_LIBRARY_URL: &str =
    "https://cdn.jsdelivr.net/npm/livekit-client@2/dist/livekit-client.umd.js";

const TOKEN_MARKER: &str = "__LK_TOKEN__";
const WS_URL_MARKER: &str = "__LK_WS_URL__";

const CALL_MARKUP: &str = r#"<div id="video-container" style="display: flex; flex-wrap: wrap;"></div>
<button id="toggle-camera">Toggle Camera</button>
<button id="toggle-mic">Toggle Mic</button>
"#;

const CALL_SCRIPT: &str = r#"
const token = __LK_TOKEN__;
const wsUrl = __LK_WS_URL__;
const room = new LivekitClient.Room();
let cameraEnabled = true;
let micEnabled = true;

function attachVideo(track, id, muted) {
    const video = document.createElement('video');
    video.id = id;
    video.autoplay = true;
    video.muted = muted;
    document.getElementById('video-container').appendChild(video);
    track.attach(video);
}

function addParticipantVideo(participant) {
    participant.on(LivekitClient.ParticipantEvent.TrackSubscribed, (track) => {
        if (track.source === LivekitClient.Track.Source.Camera) {
            attachVideo(track, `video-${participant.identity}`, false);
        }
    });
}

async function connect() {
    try {
        await room.connect(wsUrl, token);
    } catch (error) {
        alert('Failed to connect to room: ' + error.message);
        console.error('Failed to connect:', error);
        return;
    }

    room.localParticipant.on(LivekitClient.ParticipantEvent.LocalTrackPublished, (publication) => {
        if (publication.source === LivekitClient.Track.Source.Camera && publication.track) {
            attachVideo(publication.track, 'local-video', true);
        }
    });
    room.on(LivekitClient.RoomEvent.ParticipantConnected, addParticipantVideo);
    room.remoteParticipants.forEach(addParticipantVideo);

    try {
        await room.localParticipant.setCameraEnabled(cameraEnabled);
    } catch (error) {
        alert('Failed to enable camera: ' + error.message);
        console.error('Camera enable error:', error);
    }
    try {
        await room.localParticipant.setMicrophoneEnabled(micEnabled);
    } catch (error) {
        alert('Failed to enable microphone: ' + error.message);
        console.error('Microphone enable error:', error);
    }
}

document.getElementById('toggle-camera').addEventListener('click', async () => {
    cameraEnabled = !cameraEnabled;
    try {
        await room.localParticipant.setCameraEnabled(cameraEnabled);
    } catch (error) {
        alert('Failed to toggle camera: ' + error.message);
        console.error('Toggle camera error:', error);
        cameraEnabled = !cameraEnabled;
    }
});

document.getElementById('toggle-mic').addEventListener('click', async () => {
    micEnabled = !micEnabled;
    try {
        await room.localParticipant.setMicrophoneEnabled(micEnabled);
    } catch (error) {
        alert('Failed to toggle microphone: ' + error.message);
        console.error('Toggle microphone error:', error);
        micEnabled = !micEnabled;
    }
});

connect();
"#;

/// The two values handed to the browser
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallEmbed {
    pub token: String,
    pub ws_url: Option<String>,
}

impl From<JoinCredentials> for CallEmbed {
    fn from(creds: JoinCredentials) -> Self {
        Self {
            token: creds.token,
            ws_url: creds.ws_url,
        }
    }
}

impl CallEmbed {
    /// Markup, library include and inline script
    pub fn render(&self) -> String {
        let script = CALL_SCRIPT
            .replace(TOKEN_MARKER, &js_literal(Some(self.token.as_str())))
            .replace(WS_URL_MARKER, &js_literal(self.ws_url.as_deref()));

        format!(
            "{}<script src=\"{}\"></script>\n<script>{}</script>\n",
            CALL_MARKUP, CLIENT_LIBRARY_URL, script
        )
    }
}

/// JSON-encode a value for use inside an inline `<script>`
fn js_literal(value: Option<&str>) -> String {
    serde_json::to_string(&value)
        .unwrap_or_else(|_| "null".to_string())
        .replace("</", "<\\/")
}
