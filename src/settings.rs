//! Game settings
//!
//! Timing configuration, persisted as JSON next to the high score.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::persistence::KeyValueStore;
use crate::sim::Timing;

/// Upper bound for any configured timing (ms)
pub const MAX_TIMING_MS: u64 = 60_000;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Time between playback steps (ms)
    pub step_interval_ms: u64,
    /// How long each signal stays lit (ms); must be shorter than a step
    pub highlight_ms: u64,
    /// Pause after a completed round (ms)
    pub round_advance_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            step_interval_ms: STEP_INTERVAL_MS,
            highlight_ms: HIGHLIGHT_MS,
            round_advance_delay_ms: ROUND_ADVANCE_DELAY_MS,
        }
    }
}

impl Settings {
    /// Storage key
    const STORAGE_KEY: &'static str = "simon_says_settings";

    /// Whether the timings can drive a playback
    pub fn is_valid(&self) -> bool {
        self.step_interval_ms > 0
            && self.highlight_ms < self.step_interval_ms
            && self.step_interval_ms <= MAX_TIMING_MS
            && self.round_advance_delay_ms <= MAX_TIMING_MS
    }

    /// Timings for the sim, falling back to defaults if these are invalid
    pub fn timing(&self) -> Timing {
        if !self.is_valid() {
            log::warn!("Invalid timings {:?}, using defaults", self);
            return Timing::default();
        }
        Timing {
            step_interval_ms: self.step_interval_ms,
            highlight_ms: self.highlight_ms,
            round_advance_delay_ms: self.round_advance_delay_ms,
        }
    }

    /// Load settings from storage
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match store.get(Self::STORAGE_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) if settings.is_valid() => {
                    log::info!("Loaded settings");
                    return settings;
                }
                Ok(settings) => log::warn!("Stored settings invalid: {:?}", settings),
                Err(e) => log::warn!("Stored settings unreadable: {}", e),
            },
            Ok(None) => {}
            Err(e) => log::warn!("Could not read settings: {}", e),
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to storage
    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) {
        let json = match serde_json::to_string(self) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not encode settings: {}", e);
                return;
            }
        };
        match store.set(Self::STORAGE_KEY, &json) {
            Ok(()) => log::info!("Settings saved"),
            Err(e) => log::warn!("Could not save settings: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn test_defaults_match_reference_timings() {
        let timing = Settings::default().timing();
        assert_eq!(timing.step_interval_ms, 600);
        assert_eq!(timing.highlight_ms, 400);
        assert_eq!(timing.round_advance_delay_ms, 300);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let store = MemoryStore::with(Settings::STORAGE_KEY, r#"{"step_interval_ms": 900}"#);
        let settings = Settings::load(&store);
        assert_eq!(settings.step_interval_ms, 900);
        assert_eq!(settings.highlight_ms, HIGHLIGHT_MS);
    }

    #[test]
    fn test_invalid_timings_fall_back() {
        let settings = Settings {
            step_interval_ms: 300,
            highlight_ms: 300,
            round_advance_delay_ms: 0,
        };
        assert!(!settings.is_valid());
        assert_eq!(settings.timing(), Timing::default());

        let mut store = MemoryStore::new();
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn test_oversized_timings_rejected() {
        let huge_delay = Settings {
            round_advance_delay_ms: u64::MAX,
            ..Settings::default()
        };
        assert!(!huge_delay.is_valid());
        assert_eq!(huge_delay.timing(), Timing::default());

        let store = MemoryStore::with(
            Settings::STORAGE_KEY,
            r#"{"step_interval_ms": 18446744073709551615, "highlight_ms": 400}"#,
        );
        assert_eq!(Settings::load(&store), Settings::default());

        let at_limit = Settings {
            step_interval_ms: MAX_TIMING_MS,
            round_advance_delay_ms: MAX_TIMING_MS,
            ..Settings::default()
        };
        assert!(at_limit.is_valid());
    }

    #[test]
    fn test_round_trip_through_store() {
        let settings = Settings {
            step_interval_ms: 800,
            highlight_ms: 500,
            round_advance_delay_ms: 200,
        };
        let mut store = MemoryStore::new();
        settings.save(&mut store);
        assert_eq!(Settings::load(&store), settings);
    }
}
