//! Session document: the single source of truth for one active game.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::player::{Player, PlayerId};
use crate::domain::roles::Alignment;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for SessionId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Session progression phases, in fixed cyclic order.
///
/// `ShowRoles → PerformAction → Day → Discussion → Vote → HandleVotes →
/// PerformAction …`, with `End` terminal and reachable only through the win
/// evaluator (from `Day` or `HandleVotes`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    ShowRoles,
    PerformAction,
    Day,
    Discussion,
    Vote,
    HandleVotes,
    End,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::End)
    }
}

/// Day/night flag independent of phase, used for effect gating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Day,
    Night,
}

/// One active game session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    pub id: SessionId,
    pub phase: Phase,
    pub period: Period,
    /// Increments once per day/night cycle.
    pub day: u32,
    /// Priority cursor for night actions.
    pub current_turn: u8,
    pub discussion_secs: u32,
    pub vote_secs: u32,
    pub players: Vec<Player>,
    pub created_at: OffsetDateTime,
}

impl GameSession {
    pub fn new(discussion_secs: u32, vote_secs: u32, players: Vec<Player>) -> Self {
        Self {
            id: SessionId::new(),
            phase: Phase::ShowRoles,
            period: Period::Day,
            day: 0,
            current_turn: 1,
            discussion_secs,
            vote_secs,
            players,
            created_at: OffsetDateTime::now_utc(),
        }
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn living(&self) -> impl Iterator<Item = &Player> {
        self.players.iter().filter(|p| p.is_alive)
    }

    pub fn alive_count(&self) -> usize {
        self.living().count()
    }

    pub fn living_alignments(&self) -> Vec<Alignment> {
        self.living().map(|p| p.alignment).collect()
    }

    /// Highest action priority among living players, `None` if nobody lives.
    pub fn max_living_priority(&self) -> Option<u8> {
        self.living().map(|p| p.priority).max()
    }

    /// Next turn value `>= from` that has at least one living player, capped
    /// at the max living priority.
    pub fn next_occupied_turn(&self, from: u8) -> Option<u8> {
        let max = self.max_living_priority()?;
        (from..=max).find(|turn| self.living().any(|p| p.priority == *turn))
    }

    pub fn apply_phase_update(&mut self, update: &PhaseUpdate) {
        self.phase = update.phase;
        self.period = update.period;
        self.day = update.day;
        self.current_turn = update.current_turn;
    }
}

/// Scoped update of the scheduler-owned phase cursor fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseUpdate {
    pub phase: Phase,
    pub period: Period,
    pub day: u32,
    pub current_turn: u8,
}

impl PhaseUpdate {
    pub fn from_session(session: &GameSession) -> Self {
        Self {
            phase: session.phase,
            period: session.period,
            day: session.day,
            current_turn: session.current_turn,
        }
    }
}
