//! Game state and core types
//!
//! All state that the engine owns lives here. The renderer only ever sees a
//! [`Snapshot`].

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::schedule::{Scheduler, Task};
use super::signal::Signal;
use crate::consts::*;

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No game started yet
    Idle,
    /// Sequence is being shown; input is ignored
    Playback,
    /// Player reproduces the sequence
    Input,
    /// Lives ran out; waiting for a restart
    GameOver,
}

impl Phase {
    /// Playback or Input
    pub fn is_running(&self) -> bool {
        matches!(self, Phase::Playback | Phase::Input)
    }
}

/// Fixed timings for one game (ms)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timing {
    pub step_interval_ms: u64,
    pub highlight_ms: u64,
    pub round_advance_delay_ms: u64,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            step_interval_ms: STEP_INTERVAL_MS,
            highlight_ms: HIGHLIGHT_MS,
            round_advance_delay_ms: ROUND_ADVANCE_DELAY_MS,
        }
    }
}

/// Feedback for hosts (sound, animation, logging)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A new signal was appended; playback of `round` signals begins
    RoundStarted { round: u32 },
    SignalLit(Signal),
    SignalCleared,
    /// Playback finished, the player may answer
    InputOpened,
    /// Correct signal at `position`
    Accepted { position: usize },
    /// Wrong signal; `lives_left` after the loss
    Mistake { lives_left: u8 },
    /// Whole sequence reproduced
    RoundComplete { round: u32 },
    GameOver { score: u64, new_high_score: bool },
}

/// Read-only view handed to the renderer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: Phase,
    pub sequence_len: usize,
    pub score: u64,
    pub lives: u8,
    pub active_signal: Option<Signal>,
    pub high_score: u64,
    pub round: u32,
    /// Sequence reproduced, next round about to start; input is ignored
    pub round_pending: bool,
}

/// Complete game state (deterministic for a given seed)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Seed of the current RNG stream
    pub seed: u64,
    pub rng: Pcg32,
    pub timing: Timing,
    pub phase: Phase,
    /// Signals to reproduce; grows by one per round
    pub sequence: Vec<Signal>,
    /// Signals shown so far in this round's playback
    pub playback_pos: usize,
    /// Signals correctly reproduced so far in this round
    pub input_pos: usize,
    pub lives: u8,
    pub score: u64,
    /// Best score seen, including previous sessions
    pub high_score: u64,
    /// Signal highlighted right now (playback only)
    pub active_signal: Option<Signal>,
    /// Round number (1-based, 0 before the first game)
    pub round: u32,
    /// Version tag for scheduled tasks; bumped whenever pending tasks go stale
    pub epoch: u64,
    /// Host clock (ms since the state was created)
    pub time_ms: u64,
    pub scheduler: Scheduler,
    /// Events not yet drained by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create an idle state with the given seed
    pub fn new(seed: u64, timing: Timing, high_score: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            timing,
            phase: Phase::Idle,
            sequence: Vec::new(),
            playback_pos: 0,
            input_pos: 0,
            lives: STARTING_LIVES,
            score: 0,
            high_score,
            active_signal: None,
            round: 0,
            epoch: 0,
            time_ms: 0,
            scheduler: Scheduler::new(),
            events: Vec::new(),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            sequence_len: self.sequence.len(),
            score: self.score,
            lives: self.lives,
            active_signal: self.active_signal,
            high_score: self.high_score,
            round: self.round,
            round_pending: self.round_pending(),
        }
    }

    /// Invalidate every pending task and return the new epoch
    pub fn bump_epoch(&mut self) -> u64 {
        self.epoch += 1;
        self.scheduler.cancel_stale(self.epoch);
        self.epoch
    }

    /// Schedule `task` `delay_ms` from now under the current epoch
    pub fn schedule_in(&mut self, delay_ms: u64, task: Task) {
        // Clock saturates at u64::MAX; due times must not wrap below it
        let due_ms = self.time_ms.saturating_add(delay_ms);
        self.scheduler.schedule(due_ms, self.epoch, task);
    }

    /// Signal the player must enter next, if any
    pub fn expected_signal(&self) -> Option<Signal> {
        self.sequence.get(self.input_pos).copied()
    }

    /// Whether the player reproduced the full sequence and the next round is pending
    pub fn round_pending(&self) -> bool {
        self.phase == Phase::Input && self.input_pos == self.sequence.len()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
