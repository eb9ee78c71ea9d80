//! Session & access controller — application-layer orchestration
//!
//! Wraps one authenticated identity at a time, evaluates view reachability
//! against that identity's privilege level, and mediates every
//! state-changing intent against the shared directory. In a multi-user
//! deployment each connection owns its own controller; all controllers
//! share one directory.

use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::domain::{
    reachable_views, DirectoryInterface, DomainError, DomainResult, Presence, PrivilegeLevel,
    RosterSummary, UserId, UserRecord, ViewId,
};

use super::verifier::CredentialVerifier;

/// Binding of this controller to an authenticated identity
#[derive(Debug, Clone, Serialize)]
pub struct Session {
    pub user_id: UserId,
    pub username: String,
    pub authenticated_at: DateTime<Utc>,
}

/// Why a view request was denied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DenyReason {
    Unauthenticated,
    InsufficientLevel,
}

/// Outcome of a pure view-authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessDecision {
    Granted,
    Denied(DenyReason),
}

impl AccessDecision {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// Observable state handed to the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct ControllerSnapshot {
    /// `None` while anonymous
    pub session: Option<Session>,
    pub identity: Option<UserRecord>,
    pub reachable_views: BTreeSet<ViewId>,
    pub roster: Vec<UserRecord>,
    pub summary: RosterSummary,
}

/// Session & access controller.
///
/// Generic over `D: DirectoryInterface` so it stays decoupled from the
/// concrete store. Holds at most one active session; `Anonymous` is the
/// initial state and the state after `logout`.
pub struct SessionController<D: DirectoryInterface> {
    directory: Arc<D>,
    verifier: Arc<dyn CredentialVerifier>,
    session: Option<Session>,
}

impl<D: DirectoryInterface> SessionController<D> {
    pub fn new(directory: Arc<D>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            directory,
            verifier,
            session: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    /// Current identity, re-read from the directory on every call so level
    /// and presence changes are always visible.
    pub fn identity(&self) -> Option<UserRecord> {
        self.session
            .as_ref()
            .and_then(|session| self.directory.get(session.user_id))
    }

    // ── Authentication state machine ────────────────────────────

    /// `Anonymous -> Authenticated`.
    ///
    /// Resolves the username through the directory, then hands the candidate
    /// and the submitted proof to the injected verifier; both an unknown
    /// username and a rejected proof surface as `InvalidCredentials` with no
    /// state change. On success the identity's presence goes `Online`.
    pub fn login(&mut self, username: &str, proof: &str) -> DomainResult<UserRecord> {
        let Some(candidate) = self.directory.find_by_username(username) else {
            return Err(DomainError::InvalidCredentials);
        };
        if !self.verifier.verify(&candidate, proof) {
            return Err(DomainError::InvalidCredentials);
        }

        let record = self.directory.update_presence(candidate.id, Presence::Online)?;
        self.session = Some(Session {
            user_id: record.id,
            username: record.username.clone(),
            authenticated_at: Utc::now(),
        });
        info!(username = %record.username, level = %record.level, "Login");
        Ok(record)
    }

    /// `Authenticated -> Anonymous`; idempotent, a no-op while anonymous.
    pub fn logout(&mut self) -> DomainResult<()> {
        if let Some(session) = self.session.take() {
            self.directory
                .update_presence(session.user_id, Presence::Offline)?;
            info!(username = %session.username, "Logout");
        }
        Ok(())
    }

    /// Self-transition on the authenticated state; repeated identical calls
    /// are idempotent (the inactivity-timer collaborator relies on this).
    pub fn set_status(&self, presence: Presence) -> DomainResult<UserRecord> {
        let session = self.session.as_ref().ok_or(DomainError::Unauthenticated)?;
        self.directory.update_presence(session.user_id, presence)
    }

    // ── Access evaluation ───────────────────────────────────────

    /// Views reachable for the current identity; empty while anonymous.
    pub fn reachable_views(&self) -> BTreeSet<ViewId> {
        self.identity()
            .map(|record| reachable_views(record.level))
            .unwrap_or_default()
    }

    /// Pure authorization check; grants nothing and mutates nothing.
    pub fn request_view(&self, view: ViewId) -> AccessDecision {
        let Some(record) = self.identity() else {
            return AccessDecision::Denied(DenyReason::Unauthenticated);
        };
        if reachable_views(record.level).contains(&view) {
            AccessDecision::Granted
        } else {
            AccessDecision::Denied(DenyReason::InsufficientLevel)
        }
    }

    /// `request_view` in error form, for callers that precheck an intent
    /// (e.g. a tab switch) and want the taxonomy error back.
    pub fn require_view(&self, view: ViewId) -> DomainResult<()> {
        match self.request_view(view) {
            AccessDecision::Granted => Ok(()),
            AccessDecision::Denied(DenyReason::Unauthenticated) => {
                Err(DomainError::Unauthenticated)
            }
            AccessDecision::Denied(DenyReason::InsufficientLevel) => {
                Err(DomainError::InsufficientLevel(view))
            }
        }
    }

    fn require_admin(&self) -> DomainResult<()> {
        if self.request_view(ViewId::Admin).is_granted() {
            Ok(())
        } else {
            Err(DomainError::Forbidden("admin access required"))
        }
    }

    // ── Administration ──────────────────────────────────────────

    /// Admin-gated: flip the process-wide registration toggle.
    pub fn toggle_registration(&self, enabled: bool) -> DomainResult<()> {
        self.require_admin()?;
        self.directory.set_registration_enabled(enabled);
        info!(enabled, "Registration toggled");
        Ok(())
    }

    /// Admin-gated user creation.
    ///
    /// The grant check runs before the directory is touched, so a denied
    /// call never perturbs directory state. `DuplicateUsername` and
    /// `InvalidLevel` propagate unchanged.
    pub fn create_user(&self, username: &str, level: u8) -> DomainResult<UserRecord> {
        self.require_admin()?;
        self.directory.create(username, level)
    }

    // ── Registration ────────────────────────────────────────────

    /// Self-service registration, the non-privileged creation path the
    /// registration toggle gates. New accounts start at the lowest rank.
    pub fn register(&self, username: &str) -> DomainResult<UserRecord> {
        if !self.directory.registration_enabled() {
            return Err(DomainError::RegistrationDisabled);
        }
        let record = self.directory.create(username, PrivilegeLevel::MIN)?;
        info!(username = %record.username, "Self-registered");
        Ok(record)
    }

    // ── Outbound state ──────────────────────────────────────────

    /// Everything the presentation layer renders, in one read-only snapshot.
    pub fn snapshot(&self) -> ControllerSnapshot {
        ControllerSnapshot {
            session: self.session.clone(),
            identity: self.identity(),
            reachable_views: self.reachable_views(),
            roster: self.directory.list_all(),
            summary: self.directory.summary(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::session::SeedCredentialVerifier;
    use crate::infrastructure::InMemoryDirectory;

    fn fixture(users: &[(&str, u8)]) -> (Arc<InMemoryDirectory>, SessionController<InMemoryDirectory>) {
        let directory = Arc::new(InMemoryDirectory::new());
        for (username, level) in users {
            directory.create(username, *level).unwrap();
        }
        let verifier = Arc::new(SeedCredentialVerifier::new(
            users
                .iter()
                .map(|(username, _)| (username.to_string(), "secret".to_string())),
        ));
        let controller = SessionController::new(directory.clone(), verifier);
        (directory, controller)
    }

    #[test]
    fn login_unknown_username_fails_and_stays_anonymous() {
        let (_, mut controller) = fixture(&[("Alice", 10)]);
        let err = controller.login("nobody", "secret").unwrap_err();
        assert_eq!(err, DomainError::InvalidCredentials);
        assert!(!controller.is_authenticated());
    }

    #[test]
    fn login_rejected_proof_fails_without_presence_change() {
        let (directory, mut controller) = fixture(&[("Alice", 10)]);
        let err = controller.login("Alice", "wrong").unwrap_err();
        assert_eq!(err, DomainError::InvalidCredentials);

        let alice = directory.find_by_username("Alice").unwrap();
        assert_eq!(alice.presence, Presence::Offline);
        assert_eq!(alice.stats.session_count, 0);
    }

    #[test]
    fn login_success_goes_online_and_counts_a_session() {
        let (directory, mut controller) = fixture(&[("Alice", 10)]);
        let record = controller.login("alice", "secret").unwrap();

        assert!(controller.is_authenticated());
        assert_eq!(record.presence, Presence::Online);
        assert_eq!(record.stats.session_count, 1);
        assert_eq!(
            directory.find_by_username("Alice").unwrap().presence,
            Presence::Online
        );
    }

    #[test]
    fn logout_while_anonymous_is_a_noop() {
        let (_, mut controller) = fixture(&[("Alice", 10)]);
        assert!(controller.logout().is_ok());
        assert!(!controller.is_authenticated());
    }

    #[test]
    fn logout_clears_session_and_goes_offline() {
        let (directory, mut controller) = fixture(&[("Alice", 10)]);
        controller.login("Alice", "secret").unwrap();
        controller.logout().unwrap();

        assert!(!controller.is_authenticated());
        assert_eq!(
            directory.find_by_username("Alice").unwrap().presence,
            Presence::Offline
        );
    }

    #[test]
    fn set_status_requires_authentication() {
        let (_, controller) = fixture(&[("Alice", 10)]);
        let err = controller.set_status(Presence::Away).unwrap_err();
        assert_eq!(err, DomainError::Unauthenticated);
    }

    #[test]
    fn repeated_online_pings_count_one_session() {
        let (_, mut controller) = fixture(&[("Alice", 10)]);
        controller.login("Alice", "secret").unwrap();
        controller.set_status(Presence::Online).unwrap();
        controller.set_status(Presence::Online).unwrap();
        let record = controller.set_status(Presence::Online).unwrap();
        assert_eq!(record.stats.session_count, 1);
    }

    #[test]
    fn view_matrix_by_level() {
        for (level, statistics, admin) in [(4u8, false, false), (5, true, false), (9, true, false), (10, true, true)]
        {
            let (_, mut controller) = fixture(&[("User", level)]);
            controller.login("User", "secret").unwrap();

            assert!(controller.request_view(ViewId::Main).is_granted());
            assert!(controller.request_view(ViewId::Profile).is_granted());
            assert!(controller.request_view(ViewId::Settings).is_granted());
            assert_eq!(controller.request_view(ViewId::Statistics).is_granted(), statistics);
            assert_eq!(controller.request_view(ViewId::Players).is_granted(), statistics);
            assert_eq!(controller.request_view(ViewId::Admin).is_granted(), admin);
        }
    }

    #[test]
    fn request_view_denied_while_anonymous() {
        let (_, controller) = fixture(&[("Alice", 10)]);
        assert_eq!(
            controller.request_view(ViewId::Main),
            AccessDecision::Denied(DenyReason::Unauthenticated)
        );
        assert_eq!(
            controller.require_view(ViewId::Main).unwrap_err(),
            DomainError::Unauthenticated
        );
    }

    #[test]
    fn require_view_maps_insufficient_level() {
        let (_, mut controller) = fixture(&[("Novice", 4)]);
        controller.login("Novice", "secret").unwrap();
        assert_eq!(
            controller.require_view(ViewId::Players).unwrap_err(),
            DomainError::InsufficientLevel(ViewId::Players)
        );
    }

    #[test]
    fn create_user_forbidden_below_top_rank() {
        let (directory, mut controller) = fixture(&[("Operator", 7)]);
        controller.login("Operator", "secret").unwrap();
        let before = directory.list_all().len();

        let err = controller.create_user("Bob", 3).unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));
        assert_eq!(directory.list_all().len(), before);
    }

    #[test]
    fn create_user_propagates_directory_errors() {
        let (_, mut controller) = fixture(&[("Root", 10)]);
        controller.login("Root", "secret").unwrap();

        assert_eq!(
            controller.create_user("Root", 3).unwrap_err(),
            DomainError::DuplicateUsername("Root".to_string())
        );
        assert_eq!(
            controller.create_user("Bob", 0).unwrap_err(),
            DomainError::InvalidLevel(0)
        );
    }

    #[test]
    fn toggle_registration_is_admin_gated() {
        let (directory, mut controller) = fixture(&[("Operator", 7), ("Root", 10)]);

        controller.login("Operator", "secret").unwrap();
        assert!(matches!(
            controller.toggle_registration(false).unwrap_err(),
            DomainError::Forbidden(_)
        ));
        assert!(directory.registration_enabled());

        controller.logout().unwrap();
        controller.login("Root", "secret").unwrap();
        controller.toggle_registration(false).unwrap();
        assert!(!directory.registration_enabled());
    }

    #[test]
    fn register_respects_the_toggle() {
        let (directory, controller) = fixture(&[]);
        let record = controller.register("Newbie").unwrap();
        assert_eq!(record.level.get(), PrivilegeLevel::MIN);

        directory.set_registration_enabled(false);
        assert_eq!(
            controller.register("Another").unwrap_err(),
            DomainError::RegistrationDisabled
        );
    }

    #[test]
    fn snapshot_reflects_session_and_roster() {
        let (_, mut controller) = fixture(&[("Alice", 10), ("Bob", 3)]);
        controller.login("Alice", "secret").unwrap();

        let snapshot = controller.snapshot();
        assert_eq!(snapshot.session.as_ref().unwrap().username, "Alice");
        assert_eq!(snapshot.roster.len(), 2);
        assert_eq!(snapshot.summary.online, 1);
        assert!(snapshot.reachable_views.contains(&ViewId::Admin));

        // Snapshot is presentation-ready: serializes cleanly
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["identity"]["username"], "Alice");
        assert_eq!(json["identity"]["presence"], "online");
    }
}
