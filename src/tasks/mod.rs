//! Background tasks module
//! 
//! This module contains the client display loop.

pub mod display_loop;

// Re-export main types
pub use display_loop::{CountdownRunner, TICK_INTERVAL};
