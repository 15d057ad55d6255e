//! Night-action names, per-player transient records, and effect application.

use serde::{Deserialize, Serialize};

use crate::domain::player::{Effect, Player, PlayerId, PlayerUpdate};

/// Action names a role can submit during the night phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionName {
    Block,
    Protect,
    Save,
    Kill,
    Stalk,
    Poison,
    Paralyze,
    Detox,
    Cure,
}

impl ActionName {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionName::Block => "block",
            ActionName::Protect => "protect",
            ActionName::Save => "save",
            ActionName::Kill => "kill",
            ActionName::Stalk => "stalk",
            ActionName::Poison => "poison",
            ActionName::Paralyze => "paralyze",
            ActionName::Detox => "detox",
            ActionName::Cure => "cure",
        }
    }
}

/// Outcome state of a per-player night action record.
///
/// `Pending` means a target was selected but no action has landed yet; it is
/// not terminal, so the window closing on a pending record is a no-op rather
/// than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Pending,
    Successful,
    Failed,
}

impl ActionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ActionStatus::Successful | ActionStatus::Failed)
    }
}

/// Transient per-player-per-night bookkeeping of the attempted action.
///
/// Keyed by (session, performer) in the transient store with a bounded TTL;
/// at most one terminal record exists per performer per night.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    pub status: ActionStatus,
    pub action: Option<ActionName>,
    pub performer: PlayerId,
    pub targets: Vec<PlayerId>,
}

impl ActionRecord {
    pub fn pending(performer: PlayerId, targets: Vec<PlayerId>) -> Self {
        Self {
            status: ActionStatus::Pending,
            action: None,
            performer,
            targets,
        }
    }
}

/// Scoped updates a successfully validated action applies to its target.
///
/// Returns an empty list when the action lands but has no effect (a kill
/// against a protected target); the caller records such attempts as failed.
pub fn updates_for(action: ActionName, target: &Player) -> Vec<PlayerUpdate> {
    match action {
        ActionName::Block => vec![PlayerUpdate::AddEffect(Effect::Blocked)],
        ActionName::Protect => vec![PlayerUpdate::AddEffect(Effect::Protected)],
        ActionName::Save => vec![PlayerUpdate::SetAlive(true)],
        ActionName::Kill => {
            if target.has_effect(Effect::Protected) {
                Vec::new()
            } else {
                vec![PlayerUpdate::SetAlive(false)]
            }
        }
        ActionName::Stalk => vec![PlayerUpdate::AddEffect(Effect::Watched)],
        ActionName::Poison => vec![
            PlayerUpdate::AddEffect(Effect::Poisoned),
            PlayerUpdate::SetPoisonDays(2),
        ],
        ActionName::Paralyze => vec![PlayerUpdate::AddEffect(Effect::Paralyzed)],
        ActionName::Detox => vec![
            PlayerUpdate::RemoveEffect(Effect::Poisoned),
            PlayerUpdate::RemoveEffect(Effect::Paralyzed),
            PlayerUpdate::SetPoisonDays(0),
        ],
        ActionName::Cure => vec![
            PlayerUpdate::RemoveEffect(Effect::Poisoned),
            PlayerUpdate::SetPoisonDays(0),
        ],
    }
}
