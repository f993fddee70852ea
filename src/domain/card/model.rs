use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Card {
    pub id: Uuid,
    pub user_id: Uuid,
    pub front_text: String,
    pub back_text: String,
    pub audio_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A card ready to be written, after its audio has been uploaded
#[derive(Debug, Clone)]
pub struct NewCard {
    pub user_id: Uuid,
    pub front_text: String,
    pub back_text: String,
    pub audio_url: Option<String>,
}
