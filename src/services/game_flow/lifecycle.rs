//! Session lifecycle pieces that are not timer-driven: creation input,
//! snapshots, chat, and leaving.

use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;
use tracing::info;

use super::{GameFlowService, SessionContext};
use crate::domain::assignment::assign_players;
use crate::domain::player::PlayerId;
use crate::domain::session::{GameSession, Phase};
use crate::error::EngineError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::protocol::Notification;

impl GameFlowService {
    /// Build a fresh session document for a roster of names: role/trait
    /// assignment plus initial phase cursor.
    pub fn initialize_session(
        &self,
        names: &[String],
        discussion_secs: u32,
        vote_secs: u32,
    ) -> Result<GameSession, EngineError> {
        if names.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::InvalidInput,
                "cannot start a session with an empty roster",
            )
            .into());
        }
        let mut rng = ChaCha12Rng::from_os_rng();
        let players = assign_players(names, &mut rng);
        Ok(GameSession::new(discussion_secs, vote_secs, players))
    }

    /// Current phase/day/period snapshot.
    pub async fn snapshot(&self, ctx: &SessionContext) -> Result<Notification, EngineError> {
        let session = ctx.sessions.load(ctx.session_id).await?;
        Ok(Notification::Snapshot {
            phase: session.phase,
            day: session.day,
            period: session.period,
        })
    }

    /// Discussion-window chat from a living player, fanned out to the
    /// session group.
    pub async fn chat(
        &self,
        ctx: &SessionContext,
        player: PlayerId,
        text: String,
    ) -> Result<(), EngineError> {
        let session = ctx.sessions.load(ctx.session_id).await?;
        if session.phase != Phase::Discussion {
            return Err(DomainError::validation(
                ValidationKind::WrongPhase,
                "chat is only open during discussion",
            )
            .into());
        }
        let sender = session
            .player(player)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, "unknown player"))?;
        if !sender.is_alive {
            return Err(
                DomainError::validation(ValidationKind::DeadPerformer, "sender is dead").into(),
            );
        }
        ctx.notify(Notification::Chat {
            from: sender.name.clone(),
            text,
        });
        Ok(())
    }

    /// Remove a player from the roster. Returns `true` when the roster is
    /// now empty and the caller must tear the session down.
    pub async fn leave(
        &self,
        ctx: &SessionContext,
        player: PlayerId,
    ) -> Result<bool, EngineError> {
        let remaining = ctx.sessions.remove_player(ctx.session_id, player).await?;
        info!(session_id = %ctx.session_id, player = %player, remaining, "Player left session");
        Ok(remaining == 0)
    }
}
