//! Seat rotation observed through whole rounds.

use strictly_range::{HostTurnInvariant, Invariant, Round, TurnState, Verdict};

#[test]
fn test_host_never_moves_while_others_can() {
    let mut round = Round::new(1, 4, 2).unwrap();
    let mut low = 1;
    let mut high = 100;

    for step in 0..12 {
        assert_ne!(round.turn().current(), 2, "host moved at step {step}");
        let guess = (low + high) / 2;
        round.submit_guess(guess).unwrap();
        if step % 2 == 0 {
            round.apply_verdict(Verdict::Higher).unwrap();
            low = guess;
        } else {
            round.apply_verdict(Verdict::Lower).unwrap();
            high = guess;
        }
        assert!(HostTurnInvariant::holds(&round));
        if high - low <= 2 {
            break;
        }
    }
}

#[test]
fn test_rotation_skips_host() {
    let mut round = Round::new(1, 3, 1).unwrap();
    let mut seats = vec![round.turn().current()];
    for guess in [90, 80, 70, 60] {
        round.submit_guess(guess).unwrap();
        round.apply_verdict(Verdict::Lower).unwrap();
        seats.push(round.turn().current());
    }
    assert_eq!(seats, vec![2, 0, 2, 0, 2]);
}

#[test]
fn test_forced_only_when_everyone_guessed() {
    let partial = TurnState::with_current(4, 0, 0).unwrap().with_guessed([1, 2]);
    assert!(!partial.all_non_hosts_guessed());
    assert!(!partial.is_forced_host_turn());

    let full = TurnState::with_current(4, 0, 0)
        .unwrap()
        .with_guessed([1, 2, 3]);
    assert!(full.all_non_hosts_guessed());
    assert!(full.is_forced_host_turn());
}

#[test]
fn test_host_is_never_marked_guessed() {
    let turn = TurnState::new(3, 1).unwrap().with_guessed([0, 1, 2]);
    assert!(!turn.guessed_this_sub_round().contains(&1));
    assert_eq!(turn.non_host_count(), 2);
}
