//! Role capability registry: a data-driven lookup keyed by (role, alignment).
//!
//! There is deliberately no role type hierarchy here. Every behavioral
//! difference between roles is expressed as data in [`Capabilities`], and the
//! resolver consults the table instead of dispatching on role-specific code.

use serde::{Deserialize, Serialize};

use crate::domain::action::ActionName;

/// Secondary alignment modifier on a role.
///
/// `Mad` players keep their role's nominal abilities but none of them ever
/// take effect; the resolver enforces that independent of role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Good,
    Bad,
    Mad,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Traps a player for the night, blocking their action.
    Trapper,
    /// Shields a player against kills for the night.
    Sentinel,
    /// The killer role.
    Reaper,
    /// Revives and cures.
    Physician,
    /// Watches a player and learns who acted on them.
    Stalker,
    /// Poisons; the bad counterpart can also lift toxins.
    Plaguewright,
    /// Paralyzes a player through the next vote.
    Mesmer,
    /// Filler role with no abilities.
    Villager,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Trapper => "trapper",
            Role::Sentinel => "sentinel",
            Role::Reaper => "reaper",
            Role::Physician => "physician",
            Role::Stalker => "stalker",
            Role::Plaguewright => "plaguewright",
            Role::Mesmer => "mesmer",
            Role::Villager => "villager",
        }
    }
}

/// Finite or unbounded ability usage budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UsageBudget {
    Unbounded,
    Limited(u32),
}

impl UsageBudget {
    pub fn available(&self) -> bool {
        match self {
            UsageBudget::Unbounded => true,
            UsageBudget::Limited(n) => *n > 0,
        }
    }

    pub fn decrement(&mut self) {
        if let UsageBudget::Limited(n) = self {
            *n = n.saturating_sub(1);
        }
    }

    /// Remaining uses, `None` when unbounded.
    pub fn remaining(&self) -> Option<u32> {
        match self {
            UsageBudget::Unbounded => None,
            UsageBudget::Limited(n) => Some(*n),
        }
    }
}

/// Ability set, ordering, and budget for one (role, alignment) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capabilities {
    pub can_kill: bool,
    pub can_save: bool,
    pub can_protect: bool,
    pub can_block: bool,
    pub can_stalk: bool,
    pub can_poison: bool,
    pub can_paralyze: bool,
    pub can_detox: bool,
    pub can_cure: bool,
    /// Lower acts first within the night phase.
    pub priority: u8,
    pub budget: UsageBudget,
    /// Action names the UI should offer for this pair.
    pub actions: &'static [ActionName],
}

impl Capabilities {
    fn none(priority: u8) -> Self {
        Self {
            can_kill: false,
            can_save: false,
            can_protect: false,
            can_block: false,
            can_stalk: false,
            can_poison: false,
            can_paralyze: false,
            can_detox: false,
            can_cure: false,
            priority,
            budget: UsageBudget::Unbounded,
            actions: &[],
        }
    }

    pub fn allows(&self, action: ActionName) -> bool {
        match action {
            ActionName::Kill => self.can_kill,
            ActionName::Save => self.can_save,
            ActionName::Protect => self.can_protect,
            ActionName::Block => self.can_block,
            ActionName::Stalk => self.can_stalk,
            ActionName::Poison => self.can_poison,
            ActionName::Paralyze => self.can_paralyze,
            ActionName::Detox => self.can_detox,
            ActionName::Cure => self.can_cure,
        }
    }
}

/// Capability lookup for a (role, alignment) pair.
///
/// Bad variants are usually stronger: finite good budgets widen, and a few
/// roles gain a second ability. Mad pairs keep the nominal table entry; the
/// efficacy strip happens in the resolver, not here.
pub fn capabilities_for(role: Role, alignment: Alignment) -> Capabilities {
    let bad = alignment == Alignment::Bad;

    match role {
        Role::Trapper => Capabilities {
            can_block: true,
            budget: if bad {
                UsageBudget::Unbounded
            } else {
                UsageBudget::Limited(3)
            },
            actions: &[ActionName::Block],
            ..Capabilities::none(1)
        },
        Role::Sentinel => Capabilities {
            can_protect: true,
            budget: if bad {
                UsageBudget::Limited(6)
            } else {
                UsageBudget::Limited(3)
            },
            actions: &[ActionName::Protect],
            ..Capabilities::none(2)
        },
        Role::Reaper => Capabilities {
            can_kill: true,
            budget: UsageBudget::Unbounded,
            actions: &[ActionName::Kill],
            ..Capabilities::none(3)
        },
        Role::Physician => Capabilities {
            can_save: true,
            can_cure: true,
            budget: if bad {
                UsageBudget::Limited(4)
            } else {
                UsageBudget::Limited(2)
            },
            actions: &[ActionName::Save, ActionName::Cure],
            ..Capabilities::none(4)
        },
        Role::Stalker => Capabilities {
            can_stalk: true,
            budget: UsageBudget::Unbounded,
            actions: &[ActionName::Stalk],
            ..Capabilities::none(5)
        },
        Role::Plaguewright => {
            if bad {
                Capabilities {
                    can_poison: true,
                    can_detox: true,
                    budget: UsageBudget::Limited(4),
                    actions: &[ActionName::Poison, ActionName::Detox],
                    ..Capabilities::none(6)
                }
            } else {
                Capabilities {
                    can_poison: true,
                    budget: UsageBudget::Limited(2),
                    actions: &[ActionName::Poison],
                    ..Capabilities::none(6)
                }
            }
        }
        Role::Mesmer => Capabilities {
            can_paralyze: true,
            budget: if bad {
                UsageBudget::Limited(4)
            } else {
                UsageBudget::Limited(2)
            },
            actions: &[ActionName::Paralyze],
            ..Capabilities::none(7)
        },
        // Villager: no abilities, unbounded no-op budget, acts last.
        Role::Villager => Capabilities::none(VILLAGER_PRIORITY),
    }
}

/// Priority assigned to the ability-less filler role.
pub const VILLAGER_PRIORITY: u8 = 8;
