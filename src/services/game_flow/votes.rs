//! Vote tally: scoped vote casting for the current voting window.

use tracing::debug;

use super::{GameFlowService, SessionContext};
use crate::domain::player::{Effect, PlayerId};
use crate::domain::session::Phase;
use crate::domain::votes::VoteOp;
use crate::error::EngineError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::protocol::Notification;

impl GameFlowService {
    /// Cast a vote for a living target, or abstain with `None` (removing any
    /// prior vote). Every successful cast re-broadcasts the full tally.
    pub async fn cast_vote(
        &self,
        ctx: &SessionContext,
        voter: PlayerId,
        target: Option<PlayerId>,
    ) -> Result<(), EngineError> {
        let session = ctx.sessions.load(ctx.session_id).await?;
        if session.phase != Phase::Vote {
            return Err(DomainError::validation(
                ValidationKind::WrongPhase,
                "votes are only accepted during the voting window",
            )
            .into());
        }

        let voter_player = session
            .player(voter)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, "unknown voter"))?;
        if !voter_player.is_alive {
            return Err(
                DomainError::validation(ValidationKind::DeadPerformer, "voter is dead").into(),
            );
        }
        if voter_player.has_effect(Effect::Paralyzed) {
            return Err(DomainError::validation(
                ValidationKind::PerformerParalyzed,
                "voter is paralyzed",
            )
            .into());
        }

        let op = match target {
            Some(target) => {
                let target_player = session.player(target).ok_or_else(|| {
                    DomainError::not_found(NotFoundKind::Player, "unknown target")
                })?;
                if !target_player.is_alive {
                    return Err(DomainError::validation(
                        ValidationKind::DeadTarget,
                        "cannot vote for a dead player",
                    )
                    .into());
                }
                VoteOp::Cast { voter, target }
            }
            None => VoteOp::Abstain { voter },
        };

        let entries = ctx.transient.apply_vote(ctx.session_id, &op).await?;
        debug!(session_id = %ctx.session_id, voter = %voter, entries = entries.len(), "Vote applied");
        ctx.notify(Notification::VoteTally { entries });
        Ok(())
    }
}
