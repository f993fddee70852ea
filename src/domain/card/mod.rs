pub mod gateway;
pub mod model;

pub use gateway::CardStoreGateway;
pub use model::{Card, NewCard};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Card as returned by the card endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct CardResponse {
    pub id: Uuid,
    pub front_text: String,
    pub back_text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<Card> for CardResponse {
    fn from(card: Card) -> Self {
        Self {
            id: card.id,
            front_text: card.front_text,
            back_text: card.back_text,
            audio_url: card.audio_url,
            created_at: card.created_at,
        }
    }
}
