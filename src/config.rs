//! Engine configuration.
//!
//! Environment variables must be set by the runtime environment; every key
//! has a code default and parse failures fall back to it with a warning.

use std::time::Duration;

use tracing::warn;

/// Phase windows are expressed in scheduler ticks; at the default
/// one-second tick interval a tick equals a second, which is what the
/// countdown notifications report.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Interval between scheduler ticks.
    pub tick_interval: Duration,
    /// Fixed role-reveal window.
    pub show_roles_ticks: u32,
    /// Night-action window per priority turn.
    pub turn_window_ticks: u32,
    /// Day-report window.
    pub day_ticks: u32,
    /// Vote-resolution window.
    pub handle_votes_ticks: u32,
    /// Default discussion window for new sessions.
    pub discussion_secs: u32,
    /// Default voting window for new sessions.
    pub vote_secs: u32,
    /// Backoff window re-armed after a failed persist at a transition.
    pub persist_retry_ticks: u32,
    /// Consecutive persist failures tolerated before the session aborts.
    pub max_persist_stalls: u32,
    /// TTL for session documents and keyed transient records.
    pub record_ttl: Duration,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_secs(1),
            show_roles_ticks: 10,
            turn_window_ticks: 30,
            day_ticks: 5,
            handle_votes_ticks: 5,
            discussion_secs: 60,
            vote_secs: 30,
            persist_retry_ticks: 2,
            max_persist_stalls: 5,
            record_ttl: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl EngineConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            tick_interval: Duration::from_millis(env_u64(
                "NOCTURNE_TICK_INTERVAL_MS",
                defaults.tick_interval.as_millis() as u64,
            )),
            discussion_secs: env_u32("NOCTURNE_DISCUSSION_SECS", defaults.discussion_secs),
            vote_secs: env_u32("NOCTURNE_VOTE_SECS", defaults.vote_secs),
            max_persist_stalls: env_u32(
                "NOCTURNE_MAX_PERSIST_STALLS",
                defaults.max_persist_stalls,
            ),
            record_ttl: Duration::from_secs(env_u64(
                "NOCTURNE_RECORD_TTL_SECS",
                defaults.record_ttl.as_secs(),
            )),
            ..defaults
        }
    }
}

fn env_u32(key: &str, default: u32) -> u32 {
    env_u64(key, default as u64) as u32
}

fn env_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key, raw, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}
