//! Host-facing game engine
//!
//! Owns the [`GameState`] and the storage collaborator. The host forwards
//! player gestures as [`Engine::start`] / [`Engine::submit_color`], drives
//! [`Engine::tick`] from its timer and renders [`Engine::snapshot`].

use crate::highscores::HighScore;
use crate::persistence::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{self, GameEvent, GameState, Phase, Signal, Snapshot, SubmitOutcome};

pub struct Engine<S: KeyValueStore> {
    state: GameState,
    high_score: HighScore,
    store: S,
}

impl<S: KeyValueStore> Engine<S> {
    /// Create an engine, reading settings and the high score from `store`
    pub fn new(store: S, seed: u64) -> Self {
        let settings = Settings::load(&store);
        Self::with_settings(store, &settings, seed)
    }

    /// Create an engine with explicit settings (the high score still comes from `store`)
    pub fn with_settings(store: S, settings: &Settings, seed: u64) -> Self {
        let high_score = HighScore::load(&store);
        log::info!("Engine ready (seed {}, high score {})", seed, high_score.best);
        Self {
            state: GameState::new(seed, settings.timing(), high_score.best),
            high_score,
            store,
        }
    }

    /// Start a new game; ignored while one is running
    pub fn start(&mut self) -> bool {
        sim::start(&mut self.state)
    }

    /// Player picked `signal`
    pub fn submit_color(&mut self, signal: Signal) -> SubmitOutcome {
        let outcome = sim::submit(&mut self.state, signal);
        if outcome == SubmitOutcome::GameOver {
            self.persist_high_score();
        }
        outcome
    }

    /// Host timer callback
    pub fn tick(&mut self, dt_ms: u64) {
        sim::tick(&mut self.state, dt_ms);
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn high_score(&self) -> u64 {
        self.high_score.best
    }

    /// Events since the last drain, oldest first
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.state.drain_events()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Write the record through if the finished game beat it
    fn persist_high_score(&mut self) {
        if self.high_score.record(self.state.high_score) {
            self.high_score.save(&mut self.store);
        }
    }
}
