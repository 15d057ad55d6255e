use crate::domain::action::ActionName;
use crate::domain::roles::{
    capabilities_for, Alignment, Role, UsageBudget, VILLAGER_PRIORITY,
};

const ALL_ROLES: [Role; 8] = [
    Role::Trapper,
    Role::Sentinel,
    Role::Reaper,
    Role::Physician,
    Role::Stalker,
    Role::Plaguewright,
    Role::Mesmer,
    Role::Villager,
];

#[test]
fn villager_has_no_abilities_and_acts_last() {
    for alignment in [Alignment::Good, Alignment::Bad, Alignment::Mad] {
        let caps = capabilities_for(Role::Villager, alignment);
        assert!(caps.actions.is_empty());
        assert_eq!(caps.budget, UsageBudget::Unbounded);
        assert_eq!(caps.priority, VILLAGER_PRIORITY);
    }
}

#[test]
fn offered_actions_match_ability_flags() {
    for role in ALL_ROLES {
        for alignment in [Alignment::Good, Alignment::Bad, Alignment::Mad] {
            let caps = capabilities_for(role, alignment);
            for action in caps.actions {
                assert!(
                    caps.allows(*action),
                    "{role:?}/{alignment:?} offers {action:?} but does not allow it"
                );
            }
        }
    }
}

#[test]
fn priorities_are_stable_across_alignments() {
    for role in ALL_ROLES {
        let good = capabilities_for(role, Alignment::Good).priority;
        let bad = capabilities_for(role, Alignment::Bad).priority;
        let mad = capabilities_for(role, Alignment::Mad).priority;
        assert_eq!(good, bad);
        assert_eq!(good, mad);
    }
}

#[test]
fn bad_budgets_are_at_least_as_wide_as_good() {
    for role in ALL_ROLES {
        let good = capabilities_for(role, Alignment::Good).budget;
        let bad = capabilities_for(role, Alignment::Bad).budget;
        match (good, bad) {
            (UsageBudget::Limited(g), UsageBudget::Limited(b)) => assert!(b >= g, "{role:?}"),
            (UsageBudget::Limited(_), UsageBudget::Unbounded) => {}
            (UsageBudget::Unbounded, UsageBudget::Unbounded) => {}
            (UsageBudget::Unbounded, UsageBudget::Limited(_)) => {
                panic!("{role:?}: bad budget narrower than good")
            }
        }
    }
}

#[test]
fn bad_plaguewright_gains_detox() {
    let good = capabilities_for(Role::Plaguewright, Alignment::Good);
    let bad = capabilities_for(Role::Plaguewright, Alignment::Bad);
    assert!(!good.allows(ActionName::Detox));
    assert!(bad.allows(ActionName::Detox));
}

#[test]
fn budget_decrement_saturates() {
    let mut budget = UsageBudget::Limited(1);
    budget.decrement();
    assert!(!budget.available());
    budget.decrement();
    assert_eq!(budget, UsageBudget::Limited(0));

    let mut unbounded = UsageBudget::Unbounded;
    unbounded.decrement();
    assert!(unbounded.available());
    assert_eq!(unbounded.remaining(), None);
}
