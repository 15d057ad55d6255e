//! Random role/trait assignment at session start.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::player::{Player, PlayerId};
use crate::domain::roles::{capabilities_for, Alignment, Role};

/// A slot in the configured role list: either a concrete role or a generic
/// filler to be substituted before the shuffle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleSlot {
    Fixed(Role),
    Filler,
}

/// Default role list for a session of `n` players: one of each core role in
/// table order, the remainder generic fillers.
pub fn default_role_slots(n: usize) -> Vec<RoleSlot> {
    const CORE: [Role; 7] = [
        Role::Trapper,
        Role::Sentinel,
        Role::Reaper,
        Role::Physician,
        Role::Stalker,
        Role::Plaguewright,
        Role::Mesmer,
    ];

    let mut slots: Vec<RoleSlot> = CORE.iter().take(n).map(|r| RoleSlot::Fixed(*r)).collect();
    while slots.len() < n {
        slots.push(RoleSlot::Filler);
    }
    slots
}

/// Trait deck for `n` players: `max(1, n/4)` bad, one mad from six players
/// up, the remainder good.
pub fn alignment_deck(n: usize) -> Vec<Alignment> {
    let bad = (n / 4).max(1).min(n);
    let mad = usize::from(n >= 6);

    let mut deck = Vec::with_capacity(n);
    deck.resize(bad, Alignment::Bad);
    deck.resize(bad + mad.min(n - bad), Alignment::Mad);
    deck.resize(n, Alignment::Good);
    deck
}

/// Assign roles and traits to a roster of player names.
///
/// Filler slots are substituted with the concrete villager role first, then
/// the role list and the trait list are shuffled independently; players are
/// paired with both by position, never by identity.
pub fn assign_players<R: Rng + ?Sized>(names: &[String], rng: &mut R) -> Vec<Player> {
    let mut roles: Vec<Role> = default_role_slots(names.len())
        .into_iter()
        .map(|slot| match slot {
            RoleSlot::Fixed(role) => role,
            RoleSlot::Filler => Role::Villager,
        })
        .collect();
    let mut alignments = alignment_deck(names.len());

    roles.shuffle(rng);
    alignments.shuffle(rng);

    names
        .iter()
        .zip(roles)
        .zip(alignments)
        .map(|((name, role), alignment)| {
            let caps = capabilities_for(role, alignment);
            Player {
                id: PlayerId::new(),
                name: name.clone(),
                role,
                alignment,
                remaining_uses: caps.budget,
                priority: caps.priority,
                is_alive: true,
                effects: Vec::new(),
                poison_days_remaining: 0,
            }
        })
        .collect()
}
