//! Player state and the scoped updates that mutate it.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::roles::{Alignment, Role, UsageBudget};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for PlayerId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Active status effects; a player holds a set of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    Blocked,
    Protected,
    Watched,
    Poisoned,
    Paralyzed,
}

impl Effect {
    /// Effects that expire when the night resolves into day.
    pub const NIGHT_SCOPED: [Effect; 3] = [Effect::Blocked, Effect::Protected, Effect::Watched];
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub role: Role,
    pub alignment: Alignment,
    pub remaining_uses: UsageBudget,
    pub priority: u8,
    pub is_alive: bool,
    pub effects: Vec<Effect>,
    pub poison_days_remaining: u8,
}

impl Player {
    pub fn has_effect(&self, effect: Effect) -> bool {
        self.effects.contains(&effect)
    }

    pub fn add_effect(&mut self, effect: Effect) {
        if !self.effects.contains(&effect) {
            self.effects.push(effect);
        }
    }

    pub fn remove_effect(&mut self, effect: Effect) {
        self.effects.retain(|e| *e != effect);
    }

    /// Apply a single scoped update to this player.
    ///
    /// These are the only mutations the resolver and tally are allowed to
    /// make; whole-player rewrites are reserved for the guarded scheduler
    /// path.
    pub fn apply(&mut self, update: &PlayerUpdate) {
        match update {
            PlayerUpdate::SetAlive(alive) => self.is_alive = *alive,
            PlayerUpdate::AddEffect(effect) => self.add_effect(*effect),
            PlayerUpdate::RemoveEffect(effect) => self.remove_effect(*effect),
            PlayerUpdate::SetPoisonDays(days) => self.poison_days_remaining = *days,
            PlayerUpdate::DecrementUses => self.remaining_uses.decrement(),
            PlayerUpdate::ClearNightEffects => {
                for effect in Effect::NIGHT_SCOPED {
                    self.remove_effect(effect);
                }
            }
        }
    }
}

/// A targeted, idempotent mutation of a single player field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerUpdate {
    SetAlive(bool),
    AddEffect(Effect),
    RemoveEffect(Effect),
    SetPoisonDays(u8),
    /// Race-safe read-modify-write of the usage budget; applied atomically
    /// by the store under its entry lock.
    DecrementUses,
    /// Drop blocked/protected/watched at day resolution.
    ClearNightEffects,
}
