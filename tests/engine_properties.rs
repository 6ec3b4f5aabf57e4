//! Property-based tests for the game engine.
//!
//! These tests use proptest to drive the engine with arbitrary seeds and
//! command streams and check the state machine invariants after every step.

use proptest::prelude::*;
use simon_says::consts::{HIGH_SCORE_KEY, STARTING_LIVES};
use simon_says::persistence::{KeyValueStore, MemoryStore};
use simon_says::sim::{Phase, Signal, SubmitOutcome};
use simon_says::Engine;

#[derive(Debug, Clone)]
enum Action {
    Start,
    Submit(Signal),
    /// Submit the expected signal, if there is one
    SubmitCorrect,
    Tick(u64),
}

prop_compose! {
    fn arbitrary_signal()(i in 0..Signal::ALL.len()) -> Signal {
        Signal::ALL[i]
    }
}

fn arbitrary_action() -> impl Strategy<Value = Action> {
    prop_oneof![
        1 => Just(Action::Start),
        3 => arbitrary_signal().prop_map(Action::Submit),
        3 => Just(Action::SubmitCorrect),
        4 => (0u64..1500).prop_map(Action::Tick),
    ]
}

fn run_until(engine: &mut Engine<MemoryStore>, phase: Phase) {
    for _ in 0..10_000 {
        if engine.phase() == phase {
            return;
        }
        engine.tick(25);
    }
    panic!("never reached {:?}", phase);
}

fn wrong_for(expected: Signal) -> Signal {
    Signal::ALL[(expected.index() + 1) % Signal::ALL.len()]
}

proptest! {
    #[test]
    fn correct_play_scores_once_per_signal(seed in any::<u64>(), rounds in 1usize..8) {
        let mut engine = Engine::new(MemoryStore::new(), seed);
        prop_assert!(engine.start());

        let mut expected_score = 0;
        for round in 1..=rounds {
            run_until(&mut engine, Phase::Input);
            prop_assert_eq!(engine.snapshot().sequence_len, round);

            let sequence = engine.state().sequence.clone();
            for signal in sequence {
                engine.submit_color(signal);
                expected_score += 1;
                prop_assert_eq!(engine.snapshot().score, expected_score);
                prop_assert_eq!(engine.snapshot().lives, STARTING_LIVES);
            }

            run_until(&mut engine, Phase::Playback);
            prop_assert_eq!(engine.snapshot().sequence_len, round + 1);
        }
    }

    #[test]
    fn wrong_signal_costs_exactly_one_life(seed in any::<u64>()) {
        let mut engine = Engine::new(MemoryStore::new(), seed);
        engine.start();
        run_until(&mut engine, Phase::Input);

        let before = engine.snapshot();
        let expected = engine.state().expected_signal().unwrap();
        prop_assert_eq!(engine.submit_color(wrong_for(expected)), SubmitOutcome::Mistake);

        let after = engine.snapshot();
        prop_assert_eq!(after.lives, before.lives - 1);
        prop_assert_eq!(after.score, before.score);
        prop_assert_eq!(after.phase, Phase::Input);
    }

    #[test]
    fn invariants_hold_under_arbitrary_commands(
        seed in any::<u64>(),
        prior_best in 0u64..5,
        actions in prop::collection::vec(arbitrary_action(), 1..200),
    ) {
        let store = MemoryStore::with(HIGH_SCORE_KEY, &prior_best.to_string());
        let mut engine = Engine::new(store, seed);
        let mut last = engine.snapshot();

        for action in actions {
            let was_running = last.phase == Phase::Playback || last.phase == Phase::Input;
            let mut restarted = false;
            match action {
                Action::Start => {
                    let started = engine.start();
                    prop_assert_eq!(started, !was_running);
                    restarted = started;
                    if started {
                        let snap = engine.snapshot();
                        prop_assert_eq!(snap.score, 0);
                        prop_assert_eq!(snap.lives, STARTING_LIVES);
                        prop_assert_eq!(snap.sequence_len, 1);
                        prop_assert_eq!(snap.phase, Phase::Playback);
                    }
                }
                Action::Submit(signal) => {
                    let outcome = engine.submit_color(signal);
                    if outcome == SubmitOutcome::Ignored {
                        prop_assert_eq!(engine.snapshot(), last);
                    }
                }
                Action::SubmitCorrect => {
                    if let Some(signal) = engine.state().expected_signal() {
                        engine.submit_color(signal);
                    }
                }
                Action::Tick(dt) => engine.tick(dt),
            }

            let snap = engine.snapshot();
            let state = engine.state();
            prop_assert!(state.playback_pos <= state.sequence.len());
            prop_assert!(state.input_pos <= state.sequence.len());
            prop_assert!(snap.high_score >= last.high_score);

            if snap.phase == Phase::GameOver {
                prop_assert_eq!(snap.lives, 0);
                prop_assert_eq!(snap.active_signal, None);
                prop_assert_eq!(snap.high_score, last.high_score.max(snap.score));
            } else {
                prop_assert!(snap.lives >= 1 && snap.lives <= STARTING_LIVES);
            }

            // Sequence only grows within a game
            if !restarted {
                prop_assert!(snap.sequence_len >= last.sequence_len);
            }

            let stored = engine.store().get(HIGH_SCORE_KEY).unwrap().unwrap();
            prop_assert_eq!(stored.parse::<u64>().unwrap(), snap.high_score);

            last = snap;
        }
    }
}

#[test]
fn three_misses_end_the_game_in_the_same_call() {
    let mut engine = Engine::new(MemoryStore::new(), 5);
    engine.start();
    run_until(&mut engine, Phase::Input);

    let expected = engine.state().expected_signal().unwrap();
    let wrong = wrong_for(expected);
    assert_eq!(engine.submit_color(wrong), SubmitOutcome::Mistake);
    assert_eq!(engine.submit_color(wrong), SubmitOutcome::Mistake);
    assert_eq!(engine.submit_color(wrong), SubmitOutcome::GameOver);

    let snap = engine.snapshot();
    assert_eq!(snap.lives, 0);
    assert_eq!(snap.phase, Phase::GameOver);
    assert_eq!(snap.high_score, 0);
}
