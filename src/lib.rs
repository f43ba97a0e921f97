//! Session relay for a collaborative code editor.
//!
//! Clients open a WebSocket on `/ws`, join a session under a display name,
//! and from then on every content or language change they send is forwarded
//! to the other members of that session. The server keeps no document: a
//! newcomer is brought up to date by the existing members, who answer the
//! `joined` event with a targeted `sync-content` / `sync-language`.
//!
//! - [`ws`] holds the connection registry, session subscriptions and fan-out
//! - [`websocket`] is the socket transport and frame dispatch
//! - [`routes`] and [`handlers`] are the HTTP side: health, invite links and
//!   diagnostics

pub mod config;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod websocket;
pub mod ws;

pub use config::Config;
pub use routes::create_app;
pub use state::AppState;
