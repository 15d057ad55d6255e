//! Win condition evaluator: a pure function over the living roster.

use serde::{Deserialize, Serialize};

use crate::domain::roles::Alignment;
use crate::errors::domain::{DomainError, ValidationKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Villagers,
    Bad,
}

/// Game-over verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameVerdict {
    Ongoing,
    Over {
        winner: Winner,
        reason: &'static str,
    },
}

impl GameVerdict {
    pub fn is_over(&self) -> bool {
        matches!(self, GameVerdict::Over { .. })
    }
}

/// Evaluate the win condition, checked in order:
///
/// 1. `alive_count == 0` is invalid input, not a verdict.
/// 2. No bad alignment among the living: villagers win.
/// 3. Bad count reaches the living count (parity): bad wins.
/// 4. Otherwise the game continues.
pub fn evaluate(alive_count: usize, living: &[Alignment]) -> Result<GameVerdict, DomainError> {
    if alive_count == 0 {
        return Err(DomainError::validation(
            ValidationKind::InvalidInput,
            "alive count must be positive",
        ));
    }

    let bad = living.iter().filter(|a| **a == Alignment::Bad).count();
    if bad == 0 {
        return Ok(GameVerdict::Over {
            winner: Winner::Villagers,
            reason: "every threat has been eliminated",
        });
    }
    if bad >= alive_count {
        return Ok(GameVerdict::Over {
            winner: Winner::Bad,
            reason: "threats reached parity with the living",
        });
    }
    Ok(GameVerdict::Ongoing)
}
