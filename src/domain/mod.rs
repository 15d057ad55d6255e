//! Domain layer: pure game logic types and helpers, no I/O.

pub mod action;
pub mod assignment;
pub mod player;
pub mod resolution;
pub mod roles;
pub mod session;
pub mod votes;
pub mod win;

#[cfg(test)]
pub(crate) mod test_helpers;
#[cfg(test)]
mod tests_actions;
#[cfg(test)]
mod tests_assignment;
#[cfg(test)]
mod tests_props_votes;
#[cfg(test)]
mod tests_resolution;
#[cfg(test)]
mod tests_roles;
#[cfg(test)]
mod tests_votes;
#[cfg(test)]
mod tests_win;

// Re-exports for ergonomics
pub use action::{updates_for, ActionName, ActionRecord, ActionStatus};
pub use player::{Effect, Player, PlayerId, PlayerUpdate};
pub use roles::{capabilities_for, Alignment, Capabilities, Role, UsageBudget};
pub use session::{GameSession, Period, Phase, PhaseUpdate, SessionId};
pub use votes::{apply_vote_op, leading_target, VoteEntry, VoteOp};
pub use win::{evaluate, GameVerdict, Winner};
