//! Input normalization and multi-key shortcut detection for canvas applications.
//!
//! Exposes the input state machine alongside the configuration and replay
//! modules so hosts and tools can share the same key parsing and event
//! handling code.

pub mod config;
pub mod input;
pub mod replay;

pub use config::Config;
pub use input::InputState;
