use super::model::{Presence, UserId, UserRecord};
use crate::domain::DomainResult;

use serde::Serialize;

/// Aggregate roster numbers for the dashboard's main panel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RosterSummary {
    pub total_players: usize,
    pub online: usize,
    pub away: usize,
    pub offline: usize,
    pub average_level: f64,
}

/// Directory contract: the single source of truth for user records and
/// presence.
///
/// The directory is a dumb, always-writable store; access policy lives in
/// the controller one layer up. Implementations must serialize mutations so
/// the read-increment-write on `session_count` is atomic and concurrent
/// readers never observe a half-written record. Records are never deleted
/// mid-process.
pub trait DirectoryInterface: Send + Sync {
    /// Allocate a new record, `Offline` with zeroed stats.
    ///
    /// Fails with `DuplicateUsername` on a case-folded collision and with
    /// `InvalidLevel` when `level` is outside `[1, 10]`.
    fn create(&self, username: &str, level: u8) -> DomainResult<UserRecord>;

    fn get(&self, id: UserId) -> Option<UserRecord>;

    /// Case-insensitive exact match; the login resolution path.
    fn find_by_username(&self, username: &str) -> Option<UserRecord>;

    /// All records in stable insertion order.
    fn list_all(&self) -> Vec<UserRecord>;

    /// Atomically set presence and stamp `last_seen`.
    ///
    /// `session_count` increments by exactly 1 only on a transition *into*
    /// `Online` from a non-online state; repeating the current presence
    /// still stamps `last_seen` but never double-counts.
    fn update_presence(&self, id: UserId, presence: Presence) -> DomainResult<UserRecord>;

    /// Process-wide toggle gating the non-privileged creation path.
    fn set_registration_enabled(&self, enabled: bool);
    fn registration_enabled(&self) -> bool;

    fn summary(&self) -> RosterSummary;

    /// Records sorted by total online minutes, most active first.
    fn leaderboard(&self) -> Vec<UserRecord>;
}
