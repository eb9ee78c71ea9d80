//! In-memory directory implementation

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Utc;
use parking_lot::RwLock;
use tracing::info;

use crate::domain::{
    DirectoryInterface, DomainError, DomainResult, Presence, PrivilegeLevel, RosterSummary,
    UserId, UserRecord, UserStats,
};

fn fold(username: &str) -> String {
    username.to_lowercase()
}

#[derive(Default)]
struct Inner {
    /// Records in insertion order
    records: Vec<UserRecord>,
    /// Case-folded username -> position in `records`
    by_username: HashMap<String, usize>,
    /// Id -> position in `records`
    by_id: HashMap<UserId, usize>,
}

impl Inner {
    fn push(&mut self, record: UserRecord) {
        let idx = self.records.len();
        self.by_username.insert(fold(&record.username), idx);
        self.by_id.insert(record.id, idx);
        self.records.push(record);
    }
}

/// Authoritative in-memory registry of user records and presence.
///
/// Shared by every controller in the process. All mutations take the write
/// lock over the whole inner state, so the read-increment-write on
/// `session_count` is atomic and readers never see a half-written record.
pub struct InMemoryDirectory {
    inner: RwLock<Inner>,
    registration_enabled: AtomicBool,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            registration_enabled: AtomicBool::new(true),
        }
    }

    /// Insert a fully-specified record; the process-start seed path.
    ///
    /// Same uniqueness and level rules as `create`, but presence and stats
    /// come from the seed source instead of starting zeroed.
    pub fn restore(
        &self,
        username: &str,
        level: u8,
        presence: Presence,
        stats: UserStats,
    ) -> DomainResult<UserRecord> {
        let level = PrivilegeLevel::new(level)?;
        let mut inner = self.inner.write();
        if inner.by_username.contains_key(&fold(username)) {
            return Err(DomainError::DuplicateUsername(username.to_string()));
        }
        let record = UserRecord {
            id: UserId::new(),
            username: username.to_string(),
            level,
            presence,
            stats,
            created_at: Utc::now(),
        };
        inner.push(record.clone());
        Ok(record)
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectoryInterface for InMemoryDirectory {
    fn create(&self, username: &str, level: u8) -> DomainResult<UserRecord> {
        let level = PrivilegeLevel::new(level)?;
        let mut inner = self.inner.write();
        if inner.by_username.contains_key(&fold(username)) {
            return Err(DomainError::DuplicateUsername(username.to_string()));
        }
        let now = Utc::now();
        let record = UserRecord {
            id: UserId::new(),
            username: username.to_string(),
            level,
            presence: Presence::Offline,
            stats: UserStats::zeroed(now),
            created_at: now,
        };
        inner.push(record.clone());
        info!(username = %record.username, level = %record.level, "User created");
        Ok(record)
    }

    fn get(&self, id: UserId) -> Option<UserRecord> {
        let inner = self.inner.read();
        inner.by_id.get(&id).map(|&idx| inner.records[idx].clone())
    }

    fn find_by_username(&self, username: &str) -> Option<UserRecord> {
        let inner = self.inner.read();
        inner
            .by_username
            .get(&fold(username))
            .map(|&idx| inner.records[idx].clone())
    }

    fn list_all(&self) -> Vec<UserRecord> {
        self.inner.read().records.clone()
    }

    fn update_presence(&self, id: UserId, presence: Presence) -> DomainResult<UserRecord> {
        let mut inner = self.inner.write();
        let idx = *inner.by_id.get(&id).ok_or_else(|| DomainError::NotFound {
            entity: "user",
            field: "id",
            value: id.to_string(),
        })?;
        let record = &mut inner.records[idx];
        let now = Utc::now();
        let previous = record.presence;

        // Any interval spent `Online` banks before `last_seen` restamps.
        // Pings included, otherwise an `Online -> Online` call would reset
        // the clock and drop the elapsed time.
        if previous == Presence::Online {
            let elapsed = now.signed_duration_since(record.stats.last_seen);
            record.stats.total_online_minutes += elapsed.num_minutes().max(0) as u64;
        }
        // A session is counted once per online period, not per status ping.
        if presence == Presence::Online && previous != Presence::Online {
            record.stats.session_count += 1;
        }
        record.presence = presence;
        record.stats.last_seen = now;
        Ok(record.clone())
    }

    fn set_registration_enabled(&self, enabled: bool) {
        self.registration_enabled.store(enabled, Ordering::SeqCst);
    }

    fn registration_enabled(&self) -> bool {
        self.registration_enabled.load(Ordering::SeqCst)
    }

    fn summary(&self) -> RosterSummary {
        let inner = self.inner.read();
        let total_players = inner.records.len();
        let mut online = 0;
        let mut away = 0;
        let mut offline = 0;
        let mut level_sum: u64 = 0;
        for record in &inner.records {
            match record.presence {
                Presence::Online => online += 1,
                Presence::Away => away += 1,
                Presence::Offline => offline += 1,
            }
            level_sum += u64::from(record.level.get());
        }
        let average_level = if total_players == 0 {
            0.0
        } else {
            level_sum as f64 / total_players as f64
        };
        RosterSummary {
            total_players,
            online,
            away,
            offline,
            average_level,
        }
    }

    fn leaderboard(&self) -> Vec<UserRecord> {
        let mut records = self.inner.read().records.clone();
        // Stable sort: ties keep insertion order
        records.sort_by(|a, b| {
            b.stats
                .total_online_minutes
                .cmp(&a.stats.total_online_minutes)
        });
        records
    }
}
