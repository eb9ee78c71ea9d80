//! Credential verification seam

use std::collections::HashMap;

use crate::domain::UserRecord;

/// Decides whether a submitted proof authenticates a candidate record.
///
/// The controller consults the verifier on every login; a username lookup
/// alone never authenticates. Real credential handling (password hashes,
/// tokens) plugs in behind this trait without touching the state machine.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, candidate: &UserRecord, proof: &str) -> bool;
}

/// Plaintext stand-in verifier backed by the seed config.
///
/// Proofs are compared as plaintext against the seeded passwords, keyed by
/// case-folded username. A stand-in only; anything real belongs behind the
/// `CredentialVerifier` trait with proper hashing.
pub struct SeedCredentialVerifier {
    passwords: HashMap<String, String>,
}

impl SeedCredentialVerifier {
    pub fn new(entries: impl IntoIterator<Item = (String, String)>) -> Self {
        Self {
            passwords: entries
                .into_iter()
                .map(|(username, password)| (username.to_lowercase(), password))
                .collect(),
        }
    }
}

impl CredentialVerifier for SeedCredentialVerifier {
    fn verify(&self, candidate: &UserRecord, proof: &str) -> bool {
        self.passwords
            .get(&candidate.username.to_lowercase())
            .map(|expected| expected == proof)
            .unwrap_or(false)
    }
}
