//! Countdown client
//! 
//! This module contains the client state machine and the pieces it drives:
//! the local end-time cache, the server notifier and the screen.

pub mod cache;
pub mod controller;
pub mod notifier;
pub mod screen;

// Re-export main types
pub use cache::EndTimeCache;
pub use controller::{Controller, Effect, Phase, Status};
pub use notifier::ServerNotifier;
pub use screen::{Screen, TerminalScreen};
