//! Countdown persistence and domain rules
//! 
//! This module contains the state backends (GitHub gist, in-memory), the
//! best-effort `RemoteStateStore` wrapper and the countdown service built on it.

pub mod countdown;
pub mod gist;
pub mod store;

// Re-export main types
pub use countdown::CountdownService;
pub use gist::GistBackend;
pub use store::{MemoryBackend, RemoteStateStore, StateBackend};
