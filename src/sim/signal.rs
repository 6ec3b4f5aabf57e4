//! Palette of signals the player has to reproduce

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::PALETTE_SIZE;

/// One colour/tone of the palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Signal {
    Red,
    Blue,
    Green,
    Yellow,
    Purple,
    Orange,
    Pink,
    Cyan,
    Indigo,
}

impl Signal {
    /// Every signal, in palette order
    pub const ALL: [Signal; PALETTE_SIZE] = [
        Signal::Red,
        Signal::Blue,
        Signal::Green,
        Signal::Yellow,
        Signal::Purple,
        Signal::Orange,
        Signal::Pink,
        Signal::Cyan,
        Signal::Indigo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Signal::Red => "red",
            Signal::Blue => "blue",
            Signal::Green => "green",
            Signal::Yellow => "yellow",
            Signal::Purple => "purple",
            Signal::Orange => "orange",
            Signal::Pink => "pink",
            Signal::Cyan => "cyan",
            Signal::Indigo => "indigo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.iter().copied().find(|signal| signal.as_str() == s)
    }

    /// Position in the palette
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Uniform pick over the palette. Draws are independent, so repeats are allowed.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..PALETTE_SIZE)]
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
