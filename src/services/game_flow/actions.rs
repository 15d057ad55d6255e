//! Night-action resolver: validates and applies a single player action
//! against the session and the role capability registry.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};

use super::{GameFlowService, SessionContext};
use crate::domain::action::{updates_for, ActionName, ActionRecord, ActionStatus};
use crate::domain::player::{Effect, Player, PlayerId};
use crate::domain::roles::{capabilities_for, Alignment};
use crate::domain::session::{GameSession, Phase};
use crate::error::EngineError;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::protocol::Notification;

impl GameFlowService {
    /// Record the performer's chosen target for this night.
    ///
    /// This is the first half of the two-step night protocol: the pending
    /// record waits for `submit_action`, and a window that closes on a
    /// pending record is a valid empty action, not an error.
    pub async fn select_target(
        &self,
        ctx: &SessionContext,
        performer: PlayerId,
        target: PlayerId,
    ) -> Result<(), EngineError> {
        let session = ctx.sessions.load(ctx.session_id).await?;
        let p = require_night_actor(&session, performer)?;

        let target_player = session
            .player(target)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, "unknown target"))?;
        if !target_player.is_alive {
            return Err(DomainError::validation(ValidationKind::DeadTarget, "target is dead").into());
        }

        if let Some(record) = ctx.transient.load_action(ctx.session_id, performer).await? {
            if record.status.is_terminal() {
                return Err(DomainError::conflict(
                    ConflictKind::DuplicateAction,
                    "action already resolved this night",
                )
                .into());
            }
        }

        debug!(session_id = %ctx.session_id, performer = %p.id, target = %target, "Target selected");
        ctx.transient
            .put_action(
                ctx.session_id,
                performer,
                ActionRecord::pending(performer, vec![target]),
            )
            .await?;
        Ok(())
    }

    /// Submit one night action for the performer's current turn.
    ///
    /// Validation order (first failing check wins): performer alive,
    /// performer not blocked, target alive, uses remaining, no terminal
    /// record for this night. A mad performer passes the same checks; the
    /// submission is accepted for bookkeeping but applies no effect and
    /// consumes no use.
    pub async fn submit_action(
        &self,
        ctx: &SessionContext,
        performer: PlayerId,
        action: ActionName,
        explicit_target: Option<PlayerId>,
    ) -> Result<(), EngineError> {
        let session = ctx.sessions.load(ctx.session_id).await?;
        let actor = require_night_actor(&session, performer)?;

        if actor.has_effect(Effect::Blocked) {
            return Err(DomainError::validation(
                ValidationKind::PerformerBlocked,
                "performer is blocked this night",
            )
            .into());
        }

        let prior = ctx.transient.load_action(ctx.session_id, performer).await?;

        let target = explicit_target
            .or_else(|| {
                prior
                    .as_ref()
                    .and_then(|record| record.targets.first().copied())
            })
            .ok_or_else(|| {
                DomainError::validation(ValidationKind::InvalidInput, "no target selected")
            })?;

        let target_player = session
            .player(target)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, "unknown target"))?;
        if !target_player.is_alive {
            return Err(DomainError::validation(ValidationKind::DeadTarget, "target is dead").into());
        }

        if !actor.remaining_uses.available() {
            return Err(DomainError::validation(
                ValidationKind::NoUsesRemaining,
                "no ability uses remaining",
            )
            .into());
        }

        if prior.map(|r| r.status.is_terminal()).unwrap_or(false) {
            return Err(DomainError::conflict(
                ConflictKind::DuplicateAction,
                "action already resolved this night",
            )
            .into());
        }

        let caps = capabilities_for(actor.role, actor.alignment);
        if !caps.allows(action) {
            return Err(DomainError::validation(
                ValidationKind::ActionNotAvailable,
                format!("{} is not available to this role", action.as_str()),
            )
            .into());
        }

        // Mad abilities never take effect, independent of role. The record
        // still goes terminal so the idempotency guard holds.
        if actor.alignment == Alignment::Mad {
            info!(
                session_id = %ctx.session_id,
                performer = %performer,
                action = action.as_str(),
                "Mad action accepted without effect"
            );
            ctx.transient
                .put_action(
                    ctx.session_id,
                    performer,
                    ActionRecord {
                        status: ActionStatus::Successful,
                        action: Some(action),
                        performer,
                        targets: vec![target],
                    },
                )
                .await?;
            return Ok(());
        }

        // Atomic scoped decrement; never a read-then-write of the player.
        ctx.sessions
            .update_player(
                ctx.session_id,
                performer,
                &crate::domain::player::PlayerUpdate::DecrementUses,
            )
            .await?;

        let updates = updates_for(action, target_player);
        let status = if updates.is_empty() {
            ActionStatus::Failed
        } else {
            ActionStatus::Successful
        };
        for update in &updates {
            ctx.sessions
                .update_player(ctx.session_id, target, update)
                .await?;
        }

        info!(
            session_id = %ctx.session_id,
            performer = %performer,
            target = %target,
            action = action.as_str(),
            status = ?status,
            "Night action resolved"
        );

        ctx.transient
            .put_action(
                ctx.session_id,
                performer,
                ActionRecord {
                    status,
                    action: Some(action),
                    performer,
                    targets: vec![target],
                },
            )
            .await?;
        Ok(())
    }

    /// Watch side-channel: who is acting on a watched target this night.
    ///
    /// A mad watcher gets a fabricated random-length sample of all player
    /// names instead of the truth.
    pub async fn watch_query(
        &self,
        ctx: &SessionContext,
        watcher: PlayerId,
        target: PlayerId,
    ) -> Result<Notification, EngineError> {
        let session = ctx.sessions.load(ctx.session_id).await?;
        if session.phase != Phase::PerformAction {
            return Err(DomainError::validation(
                ValidationKind::WrongPhase,
                "watch queries are only valid during the night",
            )
            .into());
        }
        let watcher_player = session
            .player(watcher)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, "unknown player"))?;
        if !watcher_player.is_alive {
            return Err(
                DomainError::validation(ValidationKind::DeadPerformer, "watcher is dead").into(),
            );
        }
        if !capabilities_for(watcher_player.role, watcher_player.alignment).can_stalk {
            return Err(DomainError::validation(
                ValidationKind::ActionNotAvailable,
                "watch queries require a watching role",
            )
            .into());
        }

        if watcher_player.alignment == Alignment::Mad {
            let names: Vec<&Player> = session.players.iter().collect();
            let mut rng = StdRng::from_os_rng();
            let len = rng.random_range(0..=names.len());
            let performers = names
                .choose_multiple(&mut rng, len)
                .map(|p| p.name.clone())
                .collect();
            return Ok(Notification::WatchResult { target, performers });
        }

        let target_player = session
            .player(target)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, "unknown target"))?;
        if !target_player.has_effect(Effect::Watched) {
            return Err(DomainError::validation(
                ValidationKind::InvalidInput,
                "target is not being watched",
            )
            .into());
        }

        let records = ctx.transient.actions_for_session(ctx.session_id).await?;
        let performers = records
            .iter()
            .filter(|r| r.performer != watcher && r.targets.contains(&target))
            .filter_map(|r| session.player(r.performer).map(|p| p.name.clone()))
            .collect();
        Ok(Notification::WatchResult { target, performers })
    }

    /// Ability metadata the UI offers for one player.
    pub async fn abilities(
        &self,
        ctx: &SessionContext,
        player: PlayerId,
    ) -> Result<Notification, EngineError> {
        let session = ctx.sessions.load(ctx.session_id).await?;
        let p = session
            .player(player)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, "unknown player"))?;
        let caps = capabilities_for(p.role, p.alignment);
        Ok(Notification::Abilities {
            player,
            actions: caps.actions.to_vec(),
            remaining_uses: p.remaining_uses.remaining(),
            priority: p.priority,
        })
    }
}

/// Shared preamble for night submissions: phase, turn, and liveness.
fn require_night_actor(
    session: &GameSession,
    performer: PlayerId,
) -> Result<&Player, DomainError> {
    if session.phase != Phase::PerformAction {
        return Err(DomainError::validation(
            ValidationKind::WrongPhase,
            "night actions are only valid during the action phase",
        ));
    }
    let player = session
        .player(performer)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, "unknown player"))?;
    if !player.is_alive {
        return Err(DomainError::validation(
            ValidationKind::DeadPerformer,
            "performer is dead",
        ));
    }
    if player.priority != session.current_turn {
        return Err(DomainError::validation(
            ValidationKind::NotYourTurn,
            "performer does not act on the current turn",
        ));
    }
    Ok(player)
}
