//! Roster service entry point
//!
//! Seeds the shared directory from a TOML file
//! (~/.config/roster-service/config.toml) and hands out the session
//! controller a presentation host drives.

use std::sync::Arc;

use chrono::Utc;
use tracing::{error, info, warn};

use roster_core::application::session::SeedCredentialVerifier;
use roster_core::config::{default_config_path, AppConfig};
use roster_core::domain::{DirectoryInterface, UserStats};
use roster_core::infrastructure::InMemoryDirectory;
use roster_core::SessionController;

fn main() {
    // ── Load configuration ─────────────────────────────────────
    let config_path = std::env::var("ROSTER_CONFIG")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| default_config_path());
    let cfg = match AppConfig::load(&config_path) {
        Ok(cfg) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    tracing_subscriber::EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logging.level)),
                )
                .init();
            info!("Configuration loaded from {}", config_path.display());
            cfg
        }
        Err(e) => {
            tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::new("info"))
                .init();
            error!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        }
    };

    // ── Seed the directory ─────────────────────────────────────
    let directory = Arc::new(InMemoryDirectory::new());
    directory.set_registration_enabled(cfg.registration.enabled);
    for seed in &cfg.seed.users {
        let stats = UserStats {
            total_online_minutes: seed.total_online_minutes,
            session_count: seed.session_count,
            last_seen: Utc::now(),
        };
        if let Err(e) = directory.restore(&seed.username, seed.level, seed.presence, stats) {
            warn!("Skipping seed user {}: {}", seed.username, e);
        }
    }

    let summary = directory.summary();
    info!(
        total = summary.total_players,
        online = summary.online,
        away = summary.away,
        average_level = summary.average_level,
        "Roster seeded"
    );

    // ── Controller for the presentation host ───────────────────
    let verifier = Arc::new(SeedCredentialVerifier::new(
        cfg.seed
            .users
            .iter()
            .map(|user| (user.username.clone(), user.password.clone())),
    ));
    let controller = SessionController::new(directory, verifier);
    info!(
        authenticated = controller.is_authenticated(),
        "Session controller ready; awaiting presentation-layer intents"
    );
}
