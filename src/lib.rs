//! Shared Countdown - A countdown whose deadline every client agrees on
//! 
//! This library provides the HTTP service that keeps the countdown's end time
//! in a GitHub gist, and the client state machine that displays it live.

pub mod config;
pub mod error;
pub mod state;
pub mod api;
pub mod services;
pub mod client;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::{ClientConfig, Config};
pub use state::{AppState, CountdownState, CountdownStatus, StartOutcome};
pub use api::create_router;
pub use services::{CountdownService, RemoteStateStore};
pub use utils::signals::shutdown_signal;
