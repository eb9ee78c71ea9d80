//! Dashboard views and the reachability rule
//!
//! The `ViewId` enum is the closed set of dashboard panels; `reachable_views`
//! is the single place the authorization rule lives.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::user::PrivilegeLevel;

/// A distinct dashboard panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewId {
    Main,
    Profile,
    Statistics,
    Players,
    Settings,
    Admin,
}

impl fmt::Display for ViewId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Main => write!(f, "main"),
            Self::Profile => write!(f, "profile"),
            Self::Statistics => write!(f, "statistics"),
            Self::Players => write!(f, "players"),
            Self::Settings => write!(f, "settings"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

/// Minimum rank for the statistics and player-browser panels
const ELEVATED_MIN_LEVEL: u8 = 5;

/// Views reachable at `level`.
///
/// Computed fresh on every call, never cached. The admin panel requires the
/// top rank exactly; an equality check, not a threshold.
pub fn reachable_views(level: PrivilegeLevel) -> BTreeSet<ViewId> {
    let mut views = BTreeSet::from([ViewId::Main, ViewId::Profile, ViewId::Settings]);
    if level.get() >= ELEVATED_MIN_LEVEL {
        views.insert(ViewId::Statistics);
        views.insert(ViewId::Players);
    }
    if level == PrivilegeLevel::ADMIN {
        views.insert(ViewId::Admin);
    }
    views
}
