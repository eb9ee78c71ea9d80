//! Session module — authentication & access control
//!
//! Contains the `SessionController` which orchestrates the login/logout
//! state machine, presence changes, and view authorization, plus the
//! credential-verification seam.

pub mod controller;
pub mod verifier;

pub use controller::{
    AccessDecision, ControllerSnapshot, DenyReason, Session, SessionController,
};
pub use verifier::{CredentialVerifier, SeedCredentialVerifier};
