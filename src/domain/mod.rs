pub mod error;
pub mod user;
pub mod view;

// Re-export commonly used types
pub use error::{DomainError, DomainResult};
pub use user::{
    DirectoryInterface, Presence, PrivilegeLevel, RosterSummary, UserId, UserRecord, UserStats,
};
pub use view::{reachable_views, ViewId};
