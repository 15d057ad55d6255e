//! Engine facade: owns the stores and the per-session runtimes.
//!
//! The engine is an explicit value owned by the caller, not a process-wide
//! singleton; everything below it receives per-session context.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::EngineConfig;
use crate::domain::player::PlayerId;
use crate::domain::session::{GameSession, SessionId};
use crate::error::EngineError;
use crate::protocol::{ErrorCode, Intent, Notification};
use crate::services::game_flow::{GameFlowService, SessionContext, SessionRuntime};
use crate::store::{InMemorySessionStore, InMemoryTransientStore, SessionStore, TransientStore};

const NOTIFY_BUFFER: usize = 256;

pub struct Engine {
    config: Arc<EngineConfig>,
    sessions: Arc<dyn SessionStore>,
    transient: Arc<dyn TransientStore>,
    handles: Arc<DashMap<SessionId, SessionHandle>>,
}

impl Engine {
    pub fn new(
        config: EngineConfig,
        sessions: Arc<dyn SessionStore>,
        transient: Arc<dyn TransientStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            sessions,
            transient,
            handles: Arc::new(DashMap::new()),
        }
    }

    /// Engine wired to in-memory stores with the configured record TTL.
    pub fn in_memory(config: EngineConfig) -> Self {
        let ttl = config.record_ttl;
        Self::new(
            config,
            Arc::new(InMemorySessionStore::new(ttl)),
            Arc::new(InMemoryTransientStore::new(ttl)),
        )
    }

    /// Start a session for a roster of player names: assign roles, persist
    /// the document, spawn the timer-driven runtime.
    pub async fn create_session(&self, names: &[String]) -> Result<SessionHandle, EngineError> {
        let flow = GameFlowService;
        let session =
            flow.initialize_session(names, self.config.discussion_secs, self.config.vote_secs)?;
        self.create_session_from(session).await
    }

    /// Start a session from a pre-built document (tests and tools that
    /// control the role assignment).
    pub async fn create_session_from(
        &self,
        session: GameSession,
    ) -> Result<SessionHandle, EngineError> {
        let id = session.id;
        self.sessions.insert(session).await?;

        let (notifier, _) = broadcast::channel(NOTIFY_BUFFER);
        let ctx = SessionContext {
            session_id: id,
            sessions: self.sessions.clone(),
            transient: self.transient.clone(),
            notifier,
            config: self.config.clone(),
        };
        let cancel = CancellationToken::new();
        SessionRuntime::spawn(ctx.clone(), cancel.clone());

        let handle = SessionHandle {
            ctx,
            cancel,
            flow: GameFlowService,
        };
        self.handles.insert(id, handle.clone());

        // However the session ends (win, abort, empty roster), the token is
        // cancelled; reap the handle entry when that happens.
        let handles = self.handles.clone();
        let ended = handle.cancel.clone();
        tokio::spawn(async move {
            ended.cancelled().await;
            handles.remove(&id);
        });

        info!(session_id = %id, "Session created");
        Ok(handle)
    }

    /// Look up a live session handle.
    pub fn session(&self, id: SessionId) -> Option<SessionHandle> {
        let handle = self.handles.get(&id)?.clone();
        if handle.cancel.is_cancelled() {
            return None;
        }
        Some(handle)
    }

    /// Number of sessions with a live handle entry.
    pub fn active_sessions(&self) -> usize {
        self.handles.len()
    }
}

/// Cheap clonable handle to one running session.
#[derive(Clone)]
pub struct SessionHandle {
    ctx: SessionContext,
    cancel: CancellationToken,
    flow: GameFlowService,
}

impl SessionHandle {
    pub fn id(&self) -> SessionId {
        self.ctx.session_id
    }

    /// Subscribe to the session's notification stream.
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.ctx.notifier.subscribe()
    }

    pub fn is_ended(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Full session document (role reveal is the transport's concern).
    pub async fn state(&self) -> Result<GameSession, EngineError> {
        Ok(self.ctx.sessions.load(self.ctx.session_id).await?)
    }

    /// Route one player intent. Direct replies (snapshots, ability
    /// metadata, watch results) come back as `Some`; rejections also
    /// surface on the notification stream as an error message.
    pub async fn handle(
        &self,
        player: PlayerId,
        intent: Intent,
    ) -> Result<Option<Notification>, EngineError> {
        let result = self.dispatch(player, intent).await;
        if let Err(err) = &result {
            self.ctx.notify(Notification::Error {
                code: ErrorCode::from(err),
                message: err.to_string(),
            });
        }
        result
    }

    async fn dispatch(
        &self,
        player: PlayerId,
        intent: Intent,
    ) -> Result<Option<Notification>, EngineError> {
        if self.cancel.is_cancelled() {
            return Err(EngineError::SessionNotFound);
        }
        let ctx = &self.ctx;
        match intent {
            Intent::RequestSnapshot => Ok(Some(self.flow.snapshot(ctx).await?)),
            Intent::RequestAbilities => Ok(Some(self.flow.abilities(ctx, player).await?)),
            Intent::WatchQuery { target } => {
                Ok(Some(self.flow.watch_query(ctx, player, target).await?))
            }
            Intent::SelectTarget { target } => {
                self.flow.select_target(ctx, player, target).await?;
                Ok(None)
            }
            Intent::SubmitAction { action } => {
                self.flow.submit_action(ctx, player, action, None).await?;
                Ok(None)
            }
            Intent::Chat { text } => {
                self.flow.chat(ctx, player, text).await?;
                Ok(None)
            }
            Intent::CastVote { target } => {
                self.flow.cast_vote(ctx, player, target).await?;
                Ok(None)
            }
            Intent::Leave => {
                if self.flow.leave(ctx, player).await? {
                    self.teardown().await;
                }
                Ok(None)
            }
        }
    }

    /// Immediate teardown once the roster empties, independent of phase.
    async fn teardown(&self) {
        info!(session_id = %self.ctx.session_id, "Roster empty, tearing session down");
        self.cancel.cancel();
        self.flow
            .end_session(&self.ctx, None, "all players left")
            .await;
    }
}
