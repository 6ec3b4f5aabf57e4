//! Simon Says - a colour sequence memory game
//!
//! Core modules:
//! - `sim`: Game state machine (sequence, playback/input phases, lives, scoring)
//! - `engine`: Host-facing wrapper that wires the sim to storage
//! - `persistence`: Key-value storage collaborator (memory, file, LocalStorage)
//! - `highscores`: The single persisted best score
//! - `settings`: Timing configuration
//! - `platform`: Browser/native platform abstraction

pub mod engine;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use engine::Engine;
pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Number of distinct signals in the palette
    pub const PALETTE_SIZE: usize = 9;
    /// Lives at the start of every game
    pub const STARTING_LIVES: u8 = 3;

    /// Time between playback steps (ms)
    pub const STEP_INTERVAL_MS: u64 = 600;
    /// How long a signal stays lit during playback (ms)
    pub const HIGHLIGHT_MS: u64 = 400;
    /// Pause between a completed round and the next playback (ms)
    pub const ROUND_ADVANCE_DELAY_MS: u64 = 300;

    /// Storage key for the persisted high score
    pub const HIGH_SCORE_KEY: &str = "highScore";
}
