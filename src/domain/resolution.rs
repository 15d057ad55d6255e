//! Overnight resolution applied when the session transitions into `Day`.

use crate::domain::player::{Effect, PlayerId};
use crate::domain::session::GameSession;

/// What the day report announces to the session.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DayReport {
    /// Names of players who did not survive the night.
    pub deaths: Vec<String>,
    /// Names of players still suffering from poison.
    pub poison_notices: Vec<String>,
}

/// Resolve overnight effects in place.
///
/// - Poison counters tick down once per day resolution; a player whose
///   counter reaches zero dies in that same resolution.
/// - Night-scoped effects (blocked/protected/watched) expire.
/// - Deaths are everyone who was alive at nightfall and is not anymore,
///   including kills applied by the resolver during the night.
///
/// Runs only on the guarded scheduler path, so the whole-document write that
/// follows it cannot race another writer.
pub fn resolve_overnight(session: &mut GameSession, alive_at_nightfall: &[PlayerId]) -> DayReport {
    let mut report = DayReport::default();

    for player in session.players.iter_mut() {
        if player.is_alive && player.has_effect(Effect::Poisoned) {
            player.poison_days_remaining = player.poison_days_remaining.saturating_sub(1);
            if player.poison_days_remaining == 0 {
                player.is_alive = false;
                player.remove_effect(Effect::Poisoned);
            } else {
                report.poison_notices.push(player.name.clone());
            }
        }

        for effect in Effect::NIGHT_SCOPED {
            player.remove_effect(effect);
        }
    }

    for id in alive_at_nightfall {
        if let Some(player) = session.player(*id) {
            if !player.is_alive {
                report.deaths.push(player.name.clone());
            }
        }
    }

    report
}
