//! Shared constructors for domain tests.

use crate::domain::player::{Player, PlayerId};
use crate::domain::roles::{capabilities_for, Alignment, Role};
use crate::domain::session::GameSession;

pub fn make_player(name: &str, role: Role, alignment: Alignment) -> Player {
    let caps = capabilities_for(role, alignment);
    Player {
        id: PlayerId::new(),
        name: name.to_string(),
        role,
        alignment,
        remaining_uses: caps.budget,
        priority: caps.priority,
        is_alive: true,
        effects: Vec::new(),
        poison_days_remaining: 0,
    }
}

pub fn make_session(players: Vec<Player>) -> GameSession {
    GameSession::new(60, 30, players)
}
