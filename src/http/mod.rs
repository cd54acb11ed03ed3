//! HTTP front end
//!
//! Serves the single page and its actions:
//! - GET / - Render the page (`?room=` joins a shared room)
//! - POST /room - Create a room
//! - POST /join - Mint a token and embed the call
//! - POST /recording/start - Start recording the room
//! - POST /recording/stop - Stop the recording
//! - GET /health - Health check

mod call;
mod cookie;
mod handlers;
mod page;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
