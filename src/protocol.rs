//! Inbound intents and outbound notifications.
//!
//! The engine is transport-agnostic: whatever delivers player input maps it
//! onto [`Intent`] values, and subscribers receive [`Notification`] values
//! to forward however they like.

use serde::{Deserialize, Serialize};

use crate::domain::action::ActionName;
use crate::domain::player::PlayerId;
use crate::domain::roles::{Alignment, Role};
use crate::domain::session::{Period, Phase};
use crate::domain::votes::VoteEntry;
use crate::domain::win::Winner;
use crate::error::EngineError;
use crate::errors::domain::DomainError;

/// Player intent delivered by the external transport. The session is
/// implicit from the handle the intent arrives on.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Intent {
    RequestSnapshot,
    RequestAbilities,
    WatchQuery { target: PlayerId },
    SelectTarget { target: PlayerId },
    SubmitAction { action: ActionName },
    Chat { text: String },
    CastVote { target: Option<PlayerId> },
    Leave,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    Countdown {
        seconds_remaining: u32,
        message: String,
    },
    Snapshot {
        phase: Phase,
        day: u32,
        period: Period,
    },
    DayReport {
        deaths: Vec<String>,
        poison_notices: Vec<String>,
    },
    VoteTally {
        entries: Vec<VoteEntry>,
    },
    VoteResolution {
        result: VoteOutcome,
    },
    Chat {
        from: String,
        text: String,
    },
    Abilities {
        player: PlayerId,
        actions: Vec<ActionName>,
        remaining_uses: Option<u32>,
        priority: u8,
    },
    /// Watch query answer, delivered only to the querying watcher.
    WatchResult {
        target: PlayerId,
        performers: Vec<String>,
    },
    SessionEnded {
        reason: String,
        winner: Option<Winner>,
        roster: Vec<RosterEntry>,
    },
    Error {
        code: ErrorCode,
        message: String,
    },
}

/// Final roster reveal included in the session-ended notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    pub name: String,
    pub role: Role,
    pub alignment: Alignment,
    pub survived: bool,
}

/// What the vote window resolved to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VoteOutcome {
    Executed { player: String },
    Tie,
    NoVotes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    BadRequest,
    WrongPhase,
    Conflict,
    NotFound,
    Internal,
}

impl From<&EngineError> for ErrorCode {
    fn from(err: &EngineError) -> Self {
        match err {
            EngineError::Domain(DomainError::Validation(kind, _)) => {
                use crate::errors::domain::ValidationKind;
                match kind {
                    ValidationKind::WrongPhase | ValidationKind::NotYourTurn => {
                        ErrorCode::WrongPhase
                    }
                    _ => ErrorCode::BadRequest,
                }
            }
            EngineError::Domain(DomainError::Conflict(_, _)) => ErrorCode::Conflict,
            EngineError::Domain(DomainError::NotFound(_, _)) => ErrorCode::NotFound,
            EngineError::SessionNotFound => ErrorCode::NotFound,
            EngineError::Domain(DomainError::Infra(_, _)) | EngineError::Store(_) => {
                ErrorCode::Internal
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::domain::{ConflictKind, InfraErrorKind, NotFoundKind, ValidationKind};
    use crate::store::StoreError;

    #[test]
    fn every_engine_error_maps_to_a_code() {
        let cases: Vec<(EngineError, ErrorCode)> = vec![
            (
                DomainError::validation(ValidationKind::WrongPhase, "x").into(),
                ErrorCode::WrongPhase,
            ),
            (
                DomainError::validation(ValidationKind::NotYourTurn, "x").into(),
                ErrorCode::WrongPhase,
            ),
            (
                DomainError::validation(ValidationKind::DeadTarget, "x").into(),
                ErrorCode::BadRequest,
            ),
            (
                DomainError::conflict(ConflictKind::DuplicateAction, "x").into(),
                ErrorCode::Conflict,
            ),
            (
                DomainError::not_found(NotFoundKind::Player, "x").into(),
                ErrorCode::NotFound,
            ),
            (EngineError::SessionNotFound, ErrorCode::NotFound),
            (
                DomainError::infra(InfraErrorKind::StoreUnavailable, "x").into(),
                ErrorCode::Internal,
            ),
            (
                EngineError::Store(StoreError::Unavailable("x".into())),
                ErrorCode::Internal,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ErrorCode::from(&err), expected, "{err}");
        }
    }
}
