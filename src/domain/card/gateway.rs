use super::model::{Card, NewCard};
use crate::error::{AppError, AppResult};
use crate::infrastructure::repositories::{AudioStorage, CardRepository};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub const AUDIO_CONTENT_TYPE: &str = "audio/mpeg";

/// Thin wrapper over the hosted backend: the card table and the audio bucket.
pub struct CardStoreGateway {
    card_repo: Arc<dyn CardRepository>,
    audio_storage: Arc<dyn AudioStorage>,
}

impl CardStoreGateway {
    pub fn new(card_repo: Arc<dyn CardRepository>, audio_storage: Arc<dyn AudioStorage>) -> Self {
        Self {
            card_repo,
            audio_storage,
        }
    }

    pub async fn list_cards_for_user(&self, user_id: Uuid) -> AppResult<Vec<Card>> {
        self.card_repo.find_by_user(user_id).await
    }

    pub async fn find_card_for_user(&self, user_id: Uuid, card_id: Uuid) -> AppResult<Card> {
        self.card_repo
            .find_for_user(user_id, card_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Card not found".to_string()))
    }

    pub async fn insert_card(&self, card: NewCard) -> AppResult<Card> {
        let card = self.card_repo.insert(&card).await?;
        tracing::info!(card_id = %card.id, user_id = %card.user_id, "Card stored");
        Ok(card)
    }

    /// Upload synthesized audio under the owner's folder and return its public URL
    pub async fn upload_audio(&self, owner_id: Uuid, audio: Vec<u8>) -> AppResult<String> {
        let object_path = audio_object_path(owner_id, Utc::now().timestamp_millis());
        self.audio_storage
            .upload(&object_path, audio, AUDIO_CONTENT_TYPE)
            .await?;
        Ok(self.audio_storage.public_url(&object_path))
    }

    pub async fn fetch_audio(&self, public_url: &str) -> AppResult<Vec<u8>> {
        self.audio_storage.download(public_url).await
    }
}

pub fn audio_object_path(owner_id: Uuid, millis: i64) -> String {
    format!("{}/{}.mp3", owner_id, millis)
}
