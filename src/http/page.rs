//! Server-rendered single page

use super::call::CallEmbed;
use crate::session::{share_link, Notice, UiSession};

const TITLE: &str = "LiveKit Video Call App";

const STYLE: &str = r#"
body { font-family: sans-serif; max-width: 960px; margin: 2rem auto; padding: 0 1rem; }
.notice { padding: 0.5rem 1rem; margin: 0.5rem 0; border-radius: 4px; }
.notice.success { background: #e6f4ea; }
.notice.warning { background: #fef7e0; }
.notice.error { background: #fce8e6; }
form { display: inline-block; margin: 0.25rem 0.25rem 0.25rem 0; }
video { width: 320px; margin: 0.25rem; background: #000; }
"#;

const RECORDING_INFO: &str = r#"<h3>Recording Storage and Access</h3>
<p>Recordings created via LiveKit Egress are stored in <strong>LiveKit Cloud</strong>.</p>
<ul>
<li><strong>Storage Location</strong>: recordings are uploaded to the cloud storage configured for your LiveKit project (e.g. AWS S3, Google Cloud Storage or Azure Blob Storage).</li>
<li><strong>Dashboard</strong>: log in to <a href="https://cloud.livekit.io">cloud.livekit.io</a> to view and download recordings.</li>
<li><strong>API</strong>: list and retrieve egress information, including download URLs for completed recordings.</li>
<li><strong>Webhooks</strong>: receive notifications with metadata and access links when recordings complete.</li>
</ul>
<p>Note: your LiveKit project needs egress enabled and storage configured in the dashboard.</p>
"#;

/// Everything one render of the page depends on
pub struct PageView<'a> {
    pub base_url: &'a str,
    pub session: &'a UiSession,
    pub notices: &'a [Notice],
    pub call: Option<&'a CallEmbed>,
}

pub fn render(view: &PageView<'_>) -> String {
    let mut body = String::new();

    body.push_str(&format!("<h1>{}</h1>\n", TITLE));

    for notice in view.notices {
        body.push_str(&format!(
            "<div class=\"notice {}\">{}</div>\n",
            notice.level.as_str(),
            escape_html(&notice.text)
        ));
    }

    if view.session.can_create_room() {
        body.push_str(&action_button("/room", "Create Room"));
    }

    if let Some(room) = view.session.room.as_deref() {
        let link = share_link(view.base_url, room);
        let link_literal = serde_json::to_string(&link).unwrap_or_else(|_| "\"\"".to_string());

        body.push_str(&format!("<p>Room Name: {}</p>\n", escape_html(room)));
        body.push_str(&format!(
            "<p>Shareable Link: <a href=\"{0}\">{0}</a></p>\n",
            escape_html(&link)
        ));
        body.push_str(&format!(
            "<button type=\"button\" onclick=\"navigator.clipboard.writeText({})\">Copy Link</button>\n",
            escape_html(&link_literal)
        ));

        body.push_str("<div>\n");
        body.push_str(&action_button("/join", "Join Call"));
        body.push_str(&action_button("/recording/start", "Start Recording"));
        body.push_str(&action_button("/recording/stop", "Stop Recording"));
        body.push_str("</div>\n");

        if view.session.is_recording() {
            body.push_str("<p><em>Recording in progress</em></p>\n");
        }

        if let Some(call) = view.call {
            body.push_str(&call.render());
        }
    }

    body.push_str(RECORDING_INFO);

    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        TITLE, STYLE, body
    )
}

fn action_button(action: &str, label: &str) -> String {
    format!(
        "<form method=\"post\" action=\"{}\"><button type=\"submit\">{}</button></form>\n",
        action, label
    )
}

/// Escape text for HTML element content and quoted attributes
fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
