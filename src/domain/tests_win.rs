use crate::domain::roles::Alignment;
use crate::domain::win::{evaluate, GameVerdict, Winner};

#[test]
fn two_good_means_villagers_win() {
    let verdict = evaluate(2, &[Alignment::Good, Alignment::Good]).unwrap();
    assert!(matches!(
        verdict,
        GameVerdict::Over {
            winner: Winner::Villagers,
            ..
        }
    ));
}

#[test]
fn two_bad_means_bad_wins() {
    let verdict = evaluate(2, &[Alignment::Bad, Alignment::Bad]).unwrap();
    assert!(matches!(
        verdict,
        GameVerdict::Over {
            winner: Winner::Bad,
            ..
        }
    ));
}

#[test]
fn one_bad_of_three_keeps_the_game_going() {
    let verdict = evaluate(3, &[Alignment::Bad, Alignment::Good, Alignment::Good]).unwrap();
    assert_eq!(verdict, GameVerdict::Ongoing);
}

#[test]
fn mad_counts_as_not_bad() {
    // A mad player does not keep the bad side alive.
    let verdict = evaluate(2, &[Alignment::Mad, Alignment::Good]).unwrap();
    assert!(matches!(
        verdict,
        GameVerdict::Over {
            winner: Winner::Villagers,
            ..
        }
    ));
}

#[test]
fn bad_parity_with_mixed_roster() {
    let verdict = evaluate(2, &[Alignment::Bad, Alignment::Good]).unwrap();
    assert!(matches!(
        verdict,
        GameVerdict::Over {
            winner: Winner::Bad,
            ..
        }
    ));
}

#[test]
fn zero_alive_is_rejected_not_evaluated() {
    assert!(evaluate(0, &[]).is_err());
}
