//! Application layer
//!
//! Use-case orchestration over the domain: one controller per connected
//! presentation client, all sharing a single directory.

pub mod session;

pub use session::{AccessDecision, DenyReason, SessionController};
