//! Phase scheduler: the timer-driven state machine that owns phase
//! progression for one session.
//!
//! Phases advance in a fixed cycle; the terminal phase is reached only
//! through the win evaluator. Each phase runs on a [`PhaseTimer`] window,
//! and the per-session [`SessionRuntime`] task is the only caller of
//! [`GameFlowService::advance_phase`], so transition work never overlaps
//! itself. Player submissions race these transitions by design and stay
//! safe through the stores' scoped updates.

use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use super::timer::{PhaseTimer, TimerSignal};
use super::{GameFlowService, SessionContext};
use crate::domain::player::{Effect, PlayerId, PlayerUpdate};
use crate::domain::resolution::resolve_overnight;
use crate::domain::session::{GameSession, Period, Phase, PhaseUpdate};
use crate::domain::votes::leading_target;
use crate::domain::win::{evaluate, GameVerdict, Winner};
use crate::error::EngineError;
use crate::protocol::{Notification, RosterEntry, VoteOutcome};
use crate::store::StoreError;

/// Result of one phase transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseStep {
    /// Stay in the cycle: arm a new window of `ticks` for `phase`.
    Window { ticks: u32, phase: Phase },
    /// The session is over; the runtime must stop.
    Terminal,
}

impl GameFlowService {
    /// Advance the session out of its just-expired window.
    ///
    /// `night_roster` is the scheduler's memory of who was alive at
    /// nightfall; day resolution diffs against it to build the death
    /// report.
    pub async fn advance_phase(
        &self,
        ctx: &SessionContext,
        night_roster: &mut Vec<PlayerId>,
    ) -> Result<PhaseStep, EngineError> {
        let session = ctx.sessions.load(ctx.session_id).await?;

        match session.phase {
            Phase::ShowRoles => self.enter_night(ctx, session, night_roster).await,
            Phase::PerformAction => {
                if let Some(turn) = session.next_occupied_turn(session.current_turn + 1) {
                    let mut session = session;
                    session.current_turn = turn;
                    ctx.sessions
                        .update_phase(ctx.session_id, &PhaseUpdate::from_session(&session))
                        .await?;
                    info!(session_id = %ctx.session_id, turn, "Night turn advanced");
                    return Ok(PhaseStep::Window {
                        ticks: ctx.config.turn_window_ticks,
                        phase: Phase::PerformAction,
                    });
                }
                self.enter_day(ctx, session, night_roster).await
            }
            Phase::Day => {
                let mut session = session;
                session.phase = Phase::Discussion;
                ctx.sessions
                    .update_phase(ctx.session_id, &PhaseUpdate::from_session(&session))
                    .await?;
                self.emit_snapshot(ctx, &session);
                Ok(PhaseStep::Window {
                    ticks: session.discussion_secs,
                    phase: Phase::Discussion,
                })
            }
            Phase::Discussion => {
                // The vote collection starts every window empty.
                ctx.transient.clear_votes(ctx.session_id).await?;
                let mut session = session;
                session.phase = Phase::Vote;
                ctx.sessions
                    .update_phase(ctx.session_id, &PhaseUpdate::from_session(&session))
                    .await?;
                self.emit_snapshot(ctx, &session);
                Ok(PhaseStep::Window {
                    ticks: session.vote_secs,
                    phase: Phase::Vote,
                })
            }
            Phase::Vote => self.resolve_votes(ctx, session).await,
            Phase::HandleVotes => {
                if session.alive_count() == 0 {
                    return Ok(self
                        .end_session(ctx, None, "nobody is left alive")
                        .await);
                }
                match evaluate(session.alive_count(), &session.living_alignments())? {
                    GameVerdict::Over { winner, reason } => {
                        Ok(self.end_session(ctx, Some(winner), reason).await)
                    }
                    GameVerdict::Ongoing => {
                        // Paralysis lasts through the vote it disrupts.
                        let paralyzed: Vec<PlayerId> = session
                            .players
                            .iter()
                            .filter(|p| p.has_effect(Effect::Paralyzed))
                            .map(|p| p.id)
                            .collect();
                        for id in paralyzed {
                            ctx.sessions
                                .update_player(
                                    ctx.session_id,
                                    id,
                                    &PlayerUpdate::RemoveEffect(Effect::Paralyzed),
                                )
                                .await?;
                        }
                        let session = ctx.sessions.load(ctx.session_id).await?;
                        self.enter_night(ctx, session, night_roster).await
                    }
                }
            }
            // Terminal or unknown phase: release the cycle instead of
            // wedging the countdown.
            Phase::End => Ok(PhaseStep::Terminal),
        }
    }

    async fn enter_night(
        &self,
        ctx: &SessionContext,
        mut session: GameSession,
        night_roster: &mut Vec<PlayerId>,
    ) -> Result<PhaseStep, EngineError> {
        session.phase = Phase::PerformAction;
        session.period = Period::Night;
        session.current_turn = session.next_occupied_turn(1).unwrap_or(1);
        *night_roster = session.living().map(|p| p.id).collect();

        ctx.sessions
            .update_phase(ctx.session_id, &PhaseUpdate::from_session(&session))
            .await?;
        info!(
            session_id = %ctx.session_id,
            day = session.day,
            turn = session.current_turn,
            "Night begins"
        );
        self.emit_snapshot(ctx, &session);
        Ok(PhaseStep::Window {
            ticks: ctx.config.turn_window_ticks,
            phase: Phase::PerformAction,
        })
    }

    async fn enter_day(
        &self,
        ctx: &SessionContext,
        mut session: GameSession,
        night_roster: &mut Vec<PlayerId>,
    ) -> Result<PhaseStep, EngineError> {
        // The night is over: transient action records do not outlive it.
        ctx.transient.clear_actions(ctx.session_id).await?;

        session.current_turn = 1;
        session.day += 1;
        session.period = Period::Day;
        session.phase = Phase::Day;
        let report = resolve_overnight(&mut session, night_roster);

        // Whole-document write is safe here: only the guarded scheduler
        // path resolves overnight state. The nightfall roster must survive
        // a failed save so the retried resolution still sees it.
        ctx.sessions.save(session.clone()).await?;
        night_roster.clear();

        info!(
            session_id = %ctx.session_id,
            day = session.day,
            deaths = report.deaths.len(),
            "Day begins"
        );
        self.emit_snapshot(ctx, &session);
        ctx.notify(Notification::DayReport {
            deaths: report.deaths,
            poison_notices: report.poison_notices,
        });

        if session.alive_count() == 0 {
            return Ok(self.end_session(ctx, None, "nobody survived the night").await);
        }
        match evaluate(session.alive_count(), &session.living_alignments())? {
            GameVerdict::Over { winner, reason } => {
                Ok(self.end_session(ctx, Some(winner), reason).await)
            }
            GameVerdict::Ongoing => Ok(PhaseStep::Window {
                ticks: ctx.config.day_ticks,
                phase: Phase::Day,
            }),
        }
    }

    async fn resolve_votes(
        &self,
        ctx: &SessionContext,
        mut session: GameSession,
    ) -> Result<PhaseStep, EngineError> {
        let entries = ctx.transient.load_votes(ctx.session_id).await?;
        let result = if entries.is_empty() {
            VoteOutcome::NoVotes
        } else {
            match leading_target(&entries) {
                Some(target) => {
                    let name = session
                        .player(target)
                        .map(|p| p.name.clone())
                        .unwrap_or_else(|| target.to_string());
                    ctx.sessions
                        .update_player(ctx.session_id, target, &PlayerUpdate::SetAlive(false))
                        .await?;
                    info!(session_id = %ctx.session_id, target = %target, "Vote executed");
                    VoteOutcome::Executed { player: name }
                }
                None => VoteOutcome::Tie,
            }
        };
        ctx.transient.clear_votes(ctx.session_id).await?;

        session.phase = Phase::HandleVotes;
        ctx.sessions
            .update_phase(ctx.session_id, &PhaseUpdate::from_session(&session))
            .await?;
        self.emit_snapshot(ctx, &session);
        ctx.notify(Notification::VoteResolution { result });
        Ok(PhaseStep::Window {
            ticks: ctx.config.handle_votes_ticks,
            phase: Phase::HandleVotes,
        })
    }

    /// Terminate the session: reveal the roster, persist the terminal
    /// phase, drop all stored state. Cleanup failures are logged, not
    /// retried; the TTL on every record is the backstop.
    pub(crate) async fn end_session(
        &self,
        ctx: &SessionContext,
        winner: Option<Winner>,
        reason: &str,
    ) -> PhaseStep {
        let roster = match ctx.sessions.load(ctx.session_id).await {
            Ok(session) => session
                .players
                .iter()
                .map(|p| RosterEntry {
                    name: p.name.clone(),
                    role: p.role,
                    alignment: p.alignment,
                    survived: p.is_alive,
                })
                .collect(),
            Err(_) => Vec::new(),
        };

        info!(session_id = %ctx.session_id, winner = ?winner, reason, "Session ended");
        ctx.notify(Notification::SessionEnded {
            reason: reason.to_string(),
            winner,
            roster,
        });

        if let Err(err) = ctx.transient.clear_actions(ctx.session_id).await {
            warn!(session_id = %ctx.session_id, error = %err, "Failed to clear action records");
        }
        if let Err(err) = ctx.transient.clear_votes(ctx.session_id).await {
            warn!(session_id = %ctx.session_id, error = %err, "Failed to clear vote records");
        }
        if let Err(err) = ctx.sessions.delete(ctx.session_id).await {
            warn!(session_id = %ctx.session_id, error = %err, "Failed to delete session document");
        }
        PhaseStep::Terminal
    }

    fn emit_snapshot(&self, ctx: &SessionContext, session: &GameSession) {
        ctx.notify(Notification::Snapshot {
            phase: session.phase,
            day: session.day,
            period: session.period,
        });
    }
}

/// Per-session runtime: owns the phase timer and drives the scheduler.
///
/// One runtime task exists per active session, independent of all others.
pub struct SessionRuntime {
    ctx: SessionContext,
    flow: GameFlowService,
    cancel: CancellationToken,
    night_roster: Vec<PlayerId>,
    stalls: u32,
    phase: Phase,
}

enum RuntimeStep {
    Window(u32),
    Terminal,
}

impl SessionRuntime {
    /// Spawn the runtime task. Cancelling the token tears the session's
    /// timer down immediately, independent of current phase.
    pub fn spawn(ctx: SessionContext, cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
        let runtime = Self {
            ctx,
            flow: GameFlowService,
            cancel,
            night_roster: Vec::new(),
            stalls: 0,
            phase: Phase::ShowRoles,
        };
        tokio::spawn(runtime.run())
    }

    async fn run(mut self) {
        let mut window = self.ctx.config.show_roles_ticks;
        loop {
            let timer_cancel = self.cancel.child_token();
            let mut signals =
                PhaseTimer::start(window, self.ctx.config.tick_interval, timer_cancel);

            let step = loop {
                tokio::select! {
                    _ = self.cancel.cancelled() => return,
                    signal = signals.recv() => match signal {
                        Some(TimerSignal::Tick { remaining }) => self.on_tick(remaining),
                        Some(TimerSignal::Expired) | None => break self.advance().await,
                    }
                }
            };

            match step {
                RuntimeStep::Window(ticks) => window = ticks,
                RuntimeStep::Terminal => {
                    self.cancel.cancel();
                    return;
                }
            }
        }
    }

    fn on_tick(&self, remaining: u32) {
        self.ctx.notify(Notification::Countdown {
            seconds_remaining: remaining,
            message: countdown_message(self.phase, remaining),
        });
    }

    async fn advance(&mut self) -> RuntimeStep {
        match self
            .flow
            .advance_phase(&self.ctx, &mut self.night_roster)
            .await
        {
            Ok(PhaseStep::Window { ticks, phase }) => {
                self.stalls = 0;
                self.phase = phase;
                RuntimeStep::Window(ticks)
            }
            Ok(PhaseStep::Terminal) => RuntimeStep::Terminal,
            Err(EngineError::Store(StoreError::SessionNotFound))
            | Err(EngineError::SessionNotFound) => {
                // Session torn down underneath us (roster emptied).
                RuntimeStep::Terminal
            }
            Err(err) if err.is_liveness_fault() => {
                self.stalls += 1;
                warn!(
                    session_id = %self.ctx.session_id,
                    stalls = self.stalls,
                    error = %err,
                    "Persist failed at phase transition; phase held"
                );
                if self.stalls >= self.ctx.config.max_persist_stalls {
                    error!(
                        session_id = %self.ctx.session_id,
                        "Stall budget exhausted, aborting session"
                    );
                    self.flow
                        .end_session(&self.ctx, None, "aborted: persistence unavailable")
                        .await;
                    RuntimeStep::Terminal
                } else {
                    RuntimeStep::Window(self.ctx.config.persist_retry_ticks)
                }
            }
            Err(err) => {
                error!(
                    session_id = %self.ctx.session_id,
                    error = %err,
                    "Unrecoverable transition failure"
                );
                self.flow
                    .end_session(&self.ctx, None, "aborted: internal error")
                    .await;
                RuntimeStep::Terminal
            }
        }
    }
}

fn countdown_message(phase: Phase, remaining: u32) -> String {
    match phase {
        Phase::ShowRoles => format!("Roles revealed, game starts in {remaining}s"),
        Phase::PerformAction => format!("Night actions close in {remaining}s"),
        Phase::Day => format!("The day report closes in {remaining}s"),
        Phase::Discussion => format!("Discussion ends in {remaining}s"),
        Phase::Vote => format!("Voting closes in {remaining}s"),
        Phase::HandleVotes => format!("Votes resolve in {remaining}s"),
        Phase::End => String::new(),
    }
}
