//! Scripted player for demo/idle mode and soak tests
//!
//! Watches the playback through [`GameEvent`]s, remembers it and plays it
//! back during input, occasionally fumbling on purpose.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::signal::Signal;
use super::state::{GameEvent, Phase, Snapshot};

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Signals seen during this round's playback
    memory: Vec<Signal>,
    /// Next position to answer
    cursor: usize,
    /// Probability (0-1) of answering wrong on purpose
    mistake_chance: f64,
    rng: Pcg32,
}

impl Autopilot {
    pub fn new(seed: u64, mistake_chance: f64) -> Self {
        Self {
            memory: Vec::new(),
            cursor: 0,
            mistake_chance: mistake_chance.clamp(0.0, 1.0),
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Feed one event from the engine
    pub fn observe(&mut self, event: &GameEvent) {
        match event {
            GameEvent::RoundStarted { .. } => {
                self.memory.clear();
                self.cursor = 0;
            }
            GameEvent::SignalLit(signal) => self.memory.push(*signal),
            GameEvent::InputOpened => self.cursor = 0,
            GameEvent::Accepted { position } => self.cursor = position + 1,
            _ => {}
        }
    }

    /// Signal to submit now, if it's our turn
    pub fn next_move(&mut self, snapshot: &Snapshot) -> Option<Signal> {
        if snapshot.phase != Phase::Input {
            return None;
        }
        let correct = *self.memory.get(self.cursor)?;

        if self.mistake_chance > 0.0 && self.rng.random_bool(self.mistake_chance) {
            let offset = self.rng.random_range(1..Signal::ALL.len());
            return Some(Signal::ALL[(correct.index() + offset) % Signal::ALL.len()]);
        }
        Some(correct)
    }
}
