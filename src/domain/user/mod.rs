//! User aggregate
//!
//! Contains the user record, its value types, and the directory interface.

pub mod model;
pub mod repository;

// Re-export model types
pub use model::{Presence, PrivilegeLevel, UserId, UserRecord, UserStats};

// Re-export the directory trait and its query types
pub use repository::{DirectoryInterface, RosterSummary};
