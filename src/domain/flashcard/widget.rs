use super::busy::{BusyFlag, BusyGuard};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Face {
    Front,
    Back,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlipOutcome {
    pub face: Face,
    /// Revealing a non-empty back starts playback
    pub autoplay: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlaybackRefused {
    #[error("flip the card before playing its audio")]
    FrontShown,
    #[error("audio is already playing")]
    AlreadyPlaying,
}

/// Flip-card state for one viewer of one card.
///
/// front-shown --tap--> back-shown (autoplay) --tap--> front-shown.
/// Playback is only possible while the back is shown, one at a time.
#[derive(Debug, Default)]
pub struct CardWidget {
    back_shown: AtomicBool,
    playback: BusyFlag,
}

impl CardWidget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn face(&self) -> Face {
        if self.back_shown.load(Ordering::Acquire) {
            Face::Back
        } else {
            Face::Front
        }
    }

    /// Toggle the visible face. Each call toggles exactly once, even when taps race.
    pub fn flip(&self, back_text: &str) -> FlipOutcome {
        let was_back = self.back_shown.fetch_xor(true, Ordering::AcqRel);
        let face = if was_back { Face::Front } else { Face::Back };

        FlipOutcome {
            face,
            autoplay: face == Face::Back && !back_text.trim().is_empty(),
        }
    }

    pub fn begin_playback(&self) -> Result<BusyGuard<'_>, PlaybackRefused> {
        if self.face() == Face::Front {
            return Err(PlaybackRefused::FrontShown);
        }
        self.playback
            .try_acquire()
            .ok_or(PlaybackRefused::AlreadyPlaying)
    }

    pub fn is_playing(&self) -> bool {
        self.playback.is_busy()
    }
}
