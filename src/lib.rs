//! # Roster Core
//!
//! Session/role authorization and presence engine for a game-server
//! community activity dashboard.
//!
//! ## Architecture
//!
//! The crate follows Clean Architecture principles:
//!
//! - **domain**: Core entities, value types, errors and the directory
//!   contract
//! - **application**: The session & access controller and the credential
//!   verification seam
//! - **infrastructure**: The in-memory directory implementation
//!
//! The presentation layer is an external collaborator: it forwards user
//! intents (login, status change, view request) into a
//! [`SessionController`] and renders the observable state the controller
//! exposes. Each connected client owns a controller; all controllers share
//! one directory.

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{default_config_path, AppConfig};

// Re-export the core surface for easy access
pub use application::session::{
    AccessDecision, ControllerSnapshot, CredentialVerifier, DenyReason, SeedCredentialVerifier,
    Session, SessionController,
};
pub use domain::{
    reachable_views, DirectoryInterface, DomainError, DomainResult, Presence, PrivilegeLevel,
    RosterSummary, UserId, UserRecord, UserStats, ViewId,
};
pub use infrastructure::InMemoryDirectory;
