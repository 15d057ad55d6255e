//! In-memory store implementations backed by TTL caches.
//!
//! These stand in for the external persistence collaborator. Session
//! documents and transient records auto-expire after the configured TTL as
//! the safety net against orphaned sessions.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use moka::future::Cache;
use parking_lot::RwLock;

use crate::domain::action::ActionRecord;
use crate::domain::player::{PlayerId, PlayerUpdate};
use crate::domain::session::{GameSession, PhaseUpdate, SessionId};
use crate::domain::votes::{apply_vote_op, VoteEntry, VoteOp};
use crate::store::{SessionStore, StoreError, TransientStore};

fn action_key(session: SessionId, player: PlayerId) -> String {
    format!("action:{session}:{player}")
}

fn action_prefix(session: SessionId) -> String {
    format!("action:{session}:")
}

fn votes_key(session: SessionId) -> String {
    format!("votes:{session}")
}

pub struct InMemorySessionStore {
    sessions: Cache<SessionId, Arc<RwLock<GameSession>>>,
}

impl InMemorySessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Cache::builder().time_to_live(ttl).build(),
        }
    }

    async fn entry(&self, id: SessionId) -> Result<Arc<RwLock<GameSession>>, StoreError> {
        self.sessions
            .get(&id)
            .await
            .ok_or(StoreError::SessionNotFound)
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: GameSession) -> Result<(), StoreError> {
        self.sessions
            .insert(session.id, Arc::new(RwLock::new(session)))
            .await;
        Ok(())
    }

    async fn load(&self, id: SessionId) -> Result<GameSession, StoreError> {
        let entry = self.entry(id).await?;
        let session = entry.read().clone();
        Ok(session)
    }

    async fn save(&self, session: GameSession) -> Result<(), StoreError> {
        let entry = self.entry(session.id).await?;
        *entry.write() = session;
        Ok(())
    }

    async fn update_phase(&self, id: SessionId, update: &PhaseUpdate) -> Result<(), StoreError> {
        let entry = self.entry(id).await?;
        entry.write().apply_phase_update(update);
        Ok(())
    }

    async fn update_player(
        &self,
        id: SessionId,
        player: PlayerId,
        update: &PlayerUpdate,
    ) -> Result<(), StoreError> {
        let entry = self.entry(id).await?;
        let mut session = entry.write();
        match session.player_mut(player) {
            Some(p) => {
                p.apply(update);
                Ok(())
            }
            // Scoped update against a departed player is a no-op; the
            // roster is the authority on membership.
            None => Ok(()),
        }
    }

    async fn remove_player(&self, id: SessionId, player: PlayerId) -> Result<usize, StoreError> {
        let entry = self.entry(id).await?;
        let mut session = entry.write();
        session.players.retain(|p| p.id != player);
        Ok(session.players.len())
    }

    async fn delete(&self, id: SessionId) -> Result<(), StoreError> {
        self.sessions.invalidate(&id).await;
        Ok(())
    }
}

pub struct InMemoryTransientStore {
    actions: Cache<String, ActionRecord>,
    votes: Cache<String, Arc<RwLock<Vec<VoteEntry>>>>,
}

impl InMemoryTransientStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            actions: Cache::builder().time_to_live(ttl).build(),
            votes: Cache::builder().time_to_live(ttl).build(),
        }
    }

    async fn vote_board(&self, session: SessionId) -> Arc<RwLock<Vec<VoteEntry>>> {
        self.votes
            .get_with(votes_key(session), async {
                Arc::new(RwLock::new(Vec::new()))
            })
            .await
    }
}

#[async_trait]
impl TransientStore for InMemoryTransientStore {
    async fn load_action(
        &self,
        session: SessionId,
        player: PlayerId,
    ) -> Result<Option<ActionRecord>, StoreError> {
        Ok(self.actions.get(&action_key(session, player)).await)
    }

    async fn put_action(
        &self,
        session: SessionId,
        player: PlayerId,
        record: ActionRecord,
    ) -> Result<(), StoreError> {
        self.actions.insert(action_key(session, player), record).await;
        Ok(())
    }

    async fn actions_for_session(
        &self,
        session: SessionId,
    ) -> Result<Vec<ActionRecord>, StoreError> {
        let prefix = action_prefix(session);
        Ok(self
            .actions
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(_, record)| record)
            .collect())
    }

    async fn clear_actions(&self, session: SessionId) -> Result<(), StoreError> {
        let prefix = action_prefix(session);
        let keys: Vec<Arc<String>> = self
            .actions
            .iter()
            .filter(|(key, _)| key.starts_with(&prefix))
            .map(|(key, _)| key)
            .collect();
        for key in keys {
            self.actions.invalidate(key.as_ref()).await;
        }
        Ok(())
    }

    async fn apply_vote(
        &self,
        session: SessionId,
        op: &VoteOp,
    ) -> Result<Vec<VoteEntry>, StoreError> {
        let board = self.vote_board(session).await;
        let mut entries = board.write();
        apply_vote_op(&mut entries, op);
        Ok(entries.clone())
    }

    async fn load_votes(&self, session: SessionId) -> Result<Vec<VoteEntry>, StoreError> {
        match self.votes.get(&votes_key(session)).await {
            Some(board) => {
                let entries = board.read().clone();
                Ok(entries)
            }
            None => Ok(Vec::new()),
        }
    }

    async fn clear_votes(&self, session: SessionId) -> Result<(), StoreError> {
        self.votes.invalidate(&votes_key(session)).await;
        Ok(())
    }
}
