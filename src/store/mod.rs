//! Collaborator-store interfaces.
//!
//! Persistence technology is an external concern; the engine consumes it
//! through these two narrow traits. The session document is the single
//! source of truth, while per-night action records and the vote board live
//! in a keyed transient store with a bounded TTL so orphaned records
//! self-expire even when a session is abandoned.

mod memory;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::action::ActionRecord;
use crate::domain::player::{PlayerId, PlayerUpdate};
use crate::domain::session::{GameSession, PhaseUpdate, SessionId};
use crate::domain::votes::{VoteEntry, VoteOp};

pub use memory::{InMemorySessionStore, InMemoryTransientStore};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session not found")]
    SessionNotFound,
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Persisted session documents.
///
/// `update_phase` and `update_player` are scoped mutations applied atomically
/// per entry; `save` rewrites the whole document and is reserved for callers
/// holding the scheduler's tick guard.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn insert(&self, session: GameSession) -> Result<(), StoreError>;

    async fn load(&self, id: SessionId) -> Result<GameSession, StoreError>;

    async fn save(&self, session: GameSession) -> Result<(), StoreError>;

    async fn update_phase(&self, id: SessionId, update: &PhaseUpdate) -> Result<(), StoreError>;

    async fn update_player(
        &self,
        id: SessionId,
        player: PlayerId,
        update: &PlayerUpdate,
    ) -> Result<(), StoreError>;

    /// Remove a player from the roster; returns the remaining roster size.
    async fn remove_player(&self, id: SessionId, player: PlayerId) -> Result<usize, StoreError>;

    async fn delete(&self, id: SessionId) -> Result<(), StoreError>;
}

/// Keyed transient records: `action:<session>:<player>` and
/// `votes:<session>`, both with a bounded TTL.
#[async_trait]
pub trait TransientStore: Send + Sync {
    async fn load_action(
        &self,
        session: SessionId,
        player: PlayerId,
    ) -> Result<Option<ActionRecord>, StoreError>;

    async fn put_action(
        &self,
        session: SessionId,
        player: PlayerId,
        record: ActionRecord,
    ) -> Result<(), StoreError>;

    async fn actions_for_session(
        &self,
        session: SessionId,
    ) -> Result<Vec<ActionRecord>, StoreError>;

    async fn clear_actions(&self, session: SessionId) -> Result<(), StoreError>;

    /// Apply one vote op atomically and return the resulting tally.
    async fn apply_vote(
        &self,
        session: SessionId,
        op: &VoteOp,
    ) -> Result<Vec<VoteEntry>, StoreError>;

    async fn load_votes(&self, session: SessionId) -> Result<Vec<VoteEntry>, StoreError>;

    async fn clear_votes(&self, session: SessionId) -> Result<(), StoreError>;
}
