use super::widget::Face;
use crate::domain::card::CardResponse;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for POST /api/cards
///
/// Missing sides deserialize as empty and are rejected by validation.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCardRequest {
    /// Native language side
    #[serde(default)]
    pub front_text: String,
    /// Target language side, spoken on reveal
    #[serde(default)]
    pub back_text: String,
}

/// Response for POST /api/cards
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCardResponse {
    pub message: String,
    pub card: CardResponse,
}

/// Response for POST /api/cards/{id}/flip
#[derive(Debug, Serialize, Deserialize)]
pub struct FlipResponse {
    pub card_id: Uuid,
    pub face: Face,
    pub text: String,
    pub autoplay: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioSource {
    Stored,
    Synthesized,
}

impl AudioSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioSource::Stored => "stored",
            AudioSource::Synthesized => "synthesized",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlaybackAudio {
    pub audio_data: Vec<u8>,
    pub source: AudioSource,
}
