use super::call::CallEmbed;
use super::cookie::{session_cookie, session_from_headers};
use super::page::{self, PageView};
use super::state::AppState;
use crate::livekit::{mint_join_token, LiveKitError};
use crate::session::{room_from_query, Notice, SessionId, UiSession};
use axum::{
    extract::{RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use tracing::{error, info, warn};

// ============================================================================
// Helpers
// ============================================================================

/// Session id from the cookie, or a fresh one (second value: newly issued)
fn resolve_session(headers: &HeaderMap) -> (SessionId, bool) {
    match session_from_headers(headers) {
        Some(id) => (id, false),
        None => {
            let id = SessionId::generate();
            info!("Issuing new session {}", id);
            (id, true)
        }
    }
}

/// Render the page for `session`, attaching the session cookie when new
fn render_page(
    state: &AppState,
    headers: &HeaderMap,
    session_id: &SessionId,
    is_new: bool,
    session: &UiSession,
    notices: &[Notice],
    call: Option<&CallEmbed>,
) -> Response {
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok());
    let base_url = state.base_url.resolve(host);

    let html = page::render(&PageView {
        base_url: &base_url,
        session,
        notices,
        call,
    });

    let mut response = (StatusCode::OK, Html(html)).into_response();
    if is_new {
        if let Some(cookie) = session_cookie(session_id) {
            response.headers_mut().insert(header::SET_COOKIE, cookie);
        }
    }
    response
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /
/// Render the page; a `room` query parameter joins that room
pub async fn index(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> impl IntoResponse {
    let (session_id, is_new) = resolve_session(&headers);

    let session = match room_from_query(query.as_deref()) {
        Some(room) => {
            state
                .sessions
                .update(&session_id, |s| {
                    s.apply_link(room);
                    s.clone()
                })
                .await
        }
        None => state.sessions.get(&session_id).await,
    };

    render_page(&state, &headers, &session_id, is_new, &session, &[], None)
}

/// POST /room
/// Create a fresh room for this session
pub async fn create_room(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let (session_id, is_new) = resolve_session(&headers);

    let (created, session) = state
        .sessions
        .update(&session_id, |s| (s.create_room(), s.clone()))
        .await;

    let notices = match created {
        Some(_) => Vec::new(),
        None => {
            warn!("Session {} tried to create a room after joining via link", session_id);
            vec![Notice::warning(
                "This session joined a shared room; creating a new room is disabled",
            )]
        }
    };

    render_page(&state, &headers, &session_id, is_new, &session, &notices, None)
}

/// POST /join
/// Mint a join token and hand the call script to the browser
pub async fn join_call(State(state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let (session_id, is_new) = resolve_session(&headers);
    let session = state.sessions.get(&session_id).await;

    let Some(room) = session.room.as_deref() else {
        let notices = [Notice::warning("Create a room first")];
        return render_page(&state, &headers, &session_id, is_new, &session, &notices, None);
    };

    match mint_join_token(&state.livekit, room) {
        Ok(creds) => {
            info!("Participant {} joining room {}", creds.identity, room);
            let call = CallEmbed::from(creds);
            let notices = [Notice::success(
                "Token generated successfully. Joining the call...",
            )];
            render_page(
                &state,
                &headers,
                &session_id,
                is_new,
                &session,
                &notices,
                Some(&call),
            )
        }
        Err(e) => {
            error!("Failed to generate token for room {}: {}", room, e);
            let text = match &e {
                LiveKitError::MissingCredentials => e.to_string(),
                _ => format!("Failed to generate token: {}", e),
            };
            let notices = [Notice::error(text)];
            render_page(&state, &headers, &session_id, is_new, &session, &notices, None)
        }
    }
}

/// POST /recording/start
/// Start recording the session's room
pub async fn start_recording(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let (session_id, is_new) = resolve_session(&headers);

    let (notice, session) =
        crate::session::start_recording(&state.sessions, &session_id, state.egress.as_ref())
            .await;

    render_page(&state, &headers, &session_id, is_new, &session, &[notice], None)
}

/// POST /recording/stop
/// Stop the session's recording
pub async fn stop_recording(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let (session_id, is_new) = resolve_session(&headers);

    let (notice, session) =
        crate::session::stop_recording(&state.sessions, &session_id, state.egress.as_ref())
            .await;

    render_page(&state, &headers, &session_id, is_new, &session, &[notice], None)
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
