//! Forced host turns driven through a game session.

use strictly_range::{
    Advice, FeedbackOutcome, Game, HostChoiceOutcome, HostIntent, RoundError, Strategy, Verdict,
};

fn forced_game() -> Game {
    let mut game = Game::new(2).unwrap();
    game.submit_guess(50).unwrap();
    game.apply_verdict(Verdict::Lower).unwrap();
    game
}

#[test]
fn test_forced_advice_points_near_estimate() {
    let game = forced_game();
    let Advice::HostChoice(rec) = game.advice().unwrap() else {
        panic!("expected host choice");
    };
    assert_eq!(rec.guess(), 25);
    assert_eq!(rec.strategy(), Strategy::HostForced);
    assert_eq!(rec.explanation(), "Choose the closest number to your secret.");
}

#[test]
fn test_higher_intent_submits_and_waits() {
    let mut game = forced_game();
    let outcome = game.declare_host_intent(HostIntent::Higher).unwrap();
    assert_eq!(outcome, HostChoiceOutcome::Submitted(26));
    assert_eq!(game.round().pending(), Some(26));

    let applied = game.apply_verdict(Verdict::Higher).unwrap();
    assert!(applied.record.is_forced_turn);
    assert_eq!(applied.record.player, 0);
    assert_eq!(game.round().range().low(), 26);
    assert_eq!(game.round().turn().current(), 1);
}

#[test]
fn test_host_answers_revealed_number_truthfully() {
    // Secret is 10: the host leans higher but 26 is above the secret.
    let mut game = forced_game();
    assert_eq!(
        game.declare_host_intent(HostIntent::Higher).unwrap(),
        HostChoiceOutcome::Submitted(26)
    );
    let applied = game.apply_verdict(Verdict::Lower).unwrap();
    assert_eq!(applied.record.verdict, Verdict::Lower);
    let range = game.round().range();
    assert_eq!((range.low(), range.high()), (1, 26));
    assert!(range.is_valid_guess(10));
}

#[test]
fn test_revealed_number_can_be_the_secret() {
    let mut game = forced_game();
    game.declare_host_intent(HostIntent::Lower).unwrap();
    let FeedbackOutcome::RoundOver(result) = game.apply_verdict(Verdict::Correct).unwrap().outcome
    else {
        panic!("expected round over");
    };
    assert_eq!(result.loser, 0);
    assert_eq!(result.losing_guess, 24);
    assert!(!result.declared_exact);
}

#[test]
fn test_lower_intent_picks_below_estimate() {
    let mut game = forced_game();
    assert_eq!(
        game.declare_host_intent(HostIntent::Lower).unwrap(),
        HostChoiceOutcome::Submitted(24)
    );
}

#[test]
fn test_exact_intent_ends_round_with_host_as_loser() {
    let mut game = forced_game();
    let HostChoiceOutcome::Caught(applied) = game.declare_host_intent(HostIntent::Exact).unwrap()
    else {
        panic!("expected the host to be caught");
    };
    let FeedbackOutcome::RoundOver(result) = applied.outcome else {
        panic!("expected round over");
    };
    assert_eq!(result.loser, 0);
    assert_eq!(result.losing_guess, 25);
    assert!(result.declared_exact);
    assert_eq!(applied.record.verdict, Verdict::Correct);

    game.start_next_round().unwrap();
    assert_eq!(game.round().turn().host(), 0);
}

#[test]
fn test_intent_rejected_with_pending_guess() {
    let mut game = forced_game();
    game.submit_guess(10).unwrap();
    assert_eq!(
        game.declare_host_intent(HostIntent::Exact),
        Err(RoundError::GuessPending(10))
    );
    assert_eq!(game.withdraw_guess(), Some(10));
    assert!(game.declare_host_intent(HostIntent::Exact).is_ok());
}

#[test]
fn test_intent_tokens_parse() {
    assert_eq!("EXACT".parse::<HostIntent>().unwrap(), HostIntent::Exact);
    assert_eq!("h".parse::<Verdict>().unwrap(), Verdict::Higher);
    assert!("sideways".parse::<HostIntent>().is_err());
}
