//! User record domain entity

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{DomainError, DomainResult};

/// Opaque unique user identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Live presence state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Presence {
    Online,
    /// Away from keyboard; still counts as an open session
    #[serde(alias = "afk")]
    Away,
    Offline,
}

impl Default for Presence {
    fn default() -> Self {
        Self::Offline
    }
}

impl fmt::Display for Presence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Online => write!(f, "online"),
            Self::Away => write!(f, "away"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

impl From<&str> for Presence {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "online" => Self::Online,
            "away" | "afk" => Self::Away,
            _ => Self::Offline,
        }
    }
}

/// Privilege rank, 1–10 inclusive, validated at construction
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PrivilegeLevel(u8);

impl PrivilegeLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 10;

    /// The top rank; the only rank that reaches the admin panel
    pub const ADMIN: PrivilegeLevel = PrivilegeLevel(Self::MAX);

    pub fn new(level: u8) -> DomainResult<Self> {
        if (Self::MIN..=Self::MAX).contains(&level) {
            Ok(Self(level))
        } else {
            Err(DomainError::InvalidLevel(level))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for PrivilegeLevel {
    type Error = DomainError;

    fn try_from(level: u8) -> DomainResult<Self> {
        Self::new(level)
    }
}

impl From<PrivilegeLevel> for u8 {
    fn from(level: PrivilegeLevel) -> Self {
        level.0
    }
}

impl fmt::Display for PrivilegeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-user session statistics
///
/// `total_online_minutes` and `session_count` never decrease over a record's
/// lifetime; `last_seen` is stamped on every presence transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    pub total_online_minutes: u64,
    pub session_count: u64,
    pub last_seen: DateTime<Utc>,
}

impl UserStats {
    pub fn zeroed(now: DateTime<Utc>) -> Self {
        Self {
            total_online_minutes: 0,
            session_count: 0,
            last_seen: now,
        }
    }
}

/// User record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    /// Case-insensitive unique handle; the sole login lookup key
    pub username: String,
    pub level: PrivilegeLevel,
    pub presence: Presence,
    pub stats: UserStats,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_boundaries() {
        assert!(PrivilegeLevel::new(0).is_err());
        assert!(PrivilegeLevel::new(11).is_err());
        assert_eq!(PrivilegeLevel::new(1).unwrap().get(), 1);
        assert_eq!(PrivilegeLevel::new(10).unwrap(), PrivilegeLevel::ADMIN);
    }

    #[test]
    fn level_out_of_range_error_carries_value() {
        assert_eq!(
            PrivilegeLevel::new(11).unwrap_err(),
            DomainError::InvalidLevel(11)
        );
    }

    #[test]
    fn presence_from_str_accepts_afk_alias() {
        assert_eq!(Presence::from("AFK"), Presence::Away);
        assert_eq!(Presence::from("online"), Presence::Online);
        assert_eq!(Presence::from("anything-else"), Presence::Offline);
    }
}
