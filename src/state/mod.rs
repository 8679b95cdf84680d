//! State management module
//! 
//! This module contains the countdown record, the shapes derived from it,
//! and the shared server state.

pub mod app_state;
pub mod countdown_state;
pub mod remaining;

// Re-export main types
pub use app_state::AppState;
pub use countdown_state::{CountdownState, CountdownStatus, StartOutcome};
pub use remaining::RemainingTime;
