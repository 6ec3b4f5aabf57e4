//! Commands and timer advance
//!
//! The host calls [`start`] and [`submit`] on player gestures and [`tick`]
//! from its timer. Exactly one of them runs at a time.

use super::schedule::Task;
use super::signal::Signal;
use super::state::{GameEvent, GameState, Phase, Timing};
use crate::consts::STARTING_LIVES;

/// Result of a player submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Not in Input phase (or the next round is already pending); nothing changed
    Ignored,
    /// Correct signal, more to go this round
    Correct,
    /// Correct signal that finished the sequence
    RoundComplete,
    /// Wrong signal, a life was lost
    Mistake,
    /// Wrong signal with the last life
    GameOver,
}

/// Start a new game. Ignored while a game is running; returns whether it started.
pub fn start(state: &mut GameState) -> bool {
    if state.phase.is_running() {
        log::debug!("start ignored: game already running ({:?})", state.phase);
        return false;
    }

    state.sequence.clear();
    state.playback_pos = 0;
    state.input_pos = 0;
    state.lives = STARTING_LIVES;
    state.score = 0;
    state.active_signal = None;
    state.round = 0;

    log::info!("New game (seed {}, high score {})", state.seed, state.high_score);
    begin_round(state);
    true
}

/// Submit the player's choice. Only meaningful in Input phase.
pub fn submit(state: &mut GameState, signal: Signal) -> SubmitOutcome {
    if state.phase != Phase::Input {
        log::debug!("submit {} ignored in {:?}", signal, state.phase);
        return SubmitOutcome::Ignored;
    }
    let Some(expected) = state.expected_signal() else {
        log::debug!("submit {} ignored: next round pending", signal);
        return SubmitOutcome::Ignored;
    };

    if signal == expected {
        let position = state.input_pos;
        state.score += 1;
        state.input_pos += 1;
        state.push_event(GameEvent::Accepted { position });

        if state.input_pos == state.sequence.len() {
            state.push_event(GameEvent::RoundComplete { round: state.round });
            let delay = state.timing.round_advance_delay_ms;
            state.schedule_in(delay, Task::AdvanceRound);
            log::debug!("Round {} complete, score {}", state.round, state.score);
            return SubmitOutcome::RoundComplete;
        }
        SubmitOutcome::Correct
    } else {
        // Position is kept: the player retries the same slot
        state.lives = state.lives.saturating_sub(1);
        state.push_event(GameEvent::Mistake {
            lives_left: state.lives,
        });
        log::debug!(
            "Wrong signal {} (expected {}), {} lives left",
            signal,
            expected,
            state.lives
        );

        if state.lives == 0 {
            end_game(state);
            return SubmitOutcome::GameOver;
        }
        SubmitOutcome::Mistake
    }
}

/// Advance the clock by `dt_ms`, firing due tasks in order at their exact due times
pub fn tick(state: &mut GameState, dt_ms: u64) {
    let target = state.time_ms.saturating_add(dt_ms);

    while let Some(entry) = state.scheduler.pop_due(target) {
        state.time_ms = state.time_ms.max(entry.due_ms);
        if entry.epoch != state.epoch {
            log::trace!("Dropping stale {:?} (epoch {})", entry.task, entry.epoch);
            continue;
        }
        run_task(state, entry.task);
    }

    state.time_ms = target;
}

fn run_task(state: &mut GameState, task: Task) {
    match task {
        Task::PlaybackStep => {
            if state.phase == Phase::Playback {
                playback_step(state);
            }
        }
        Task::ClearHighlight { position } => {
            // A later step owns the highlight now
            if state.playback_pos != position + 1 {
                return;
            }
            if state.active_signal.take().is_some() {
                state.push_event(GameEvent::SignalCleared);
            }
        }
        Task::AdvanceRound => {
            if state.round_pending() {
                begin_round(state);
            }
        }
    }
}

/// Append one signal and replay the whole sequence
fn begin_round(state: &mut GameState) {
    state.bump_epoch();

    let signal = Signal::random(&mut state.rng);
    state.sequence.push(signal);
    state.round += 1;
    state.playback_pos = 0;
    state.input_pos = 0;
    state.active_signal = None;
    state.phase = Phase::Playback;

    state.push_event(GameEvent::RoundStarted { round: state.round });
    log::debug!("Round {}: sequence length {}", state.round, state.sequence.len());

    playback_step(state);
}

/// Light the next signal, or hand over to the player once all were shown
fn playback_step(state: &mut GameState) {
    match state.sequence.get(state.playback_pos).copied() {
        Some(signal) => {
            let position = state.playback_pos;
            state.active_signal = Some(signal);
            state.playback_pos += 1;
            state.push_event(GameEvent::SignalLit(signal));

            let Timing {
                step_interval_ms,
                highlight_ms,
                ..
            } = state.timing;
            state.schedule_in(highlight_ms, Task::ClearHighlight { position });
            state.schedule_in(step_interval_ms, Task::PlaybackStep);
        }
        None => {
            if state.active_signal.take().is_some() {
                state.push_event(GameEvent::SignalCleared);
            }
            state.phase = Phase::Input;
            state.input_pos = 0;
            state.push_event(GameEvent::InputOpened);
        }
    }
}

/// Finish the game: cancel pending work and record the high score
fn end_game(state: &mut GameState) {
    state.bump_epoch();
    state.phase = Phase::GameOver;
    state.active_signal = None;

    let new_high_score = state.score > state.high_score;
    if new_high_score {
        state.high_score = state.score;
    }
    state.push_event(GameEvent::GameOver {
        score: state.score,
        new_high_score,
    });
    log::info!(
        "Game over after {} rounds, score {} (best {})",
        state.round,
        state.score,
        state.high_score
    );
}
