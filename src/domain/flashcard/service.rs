use super::busy::BusyFlag;
use super::dto::{AudioSource, CreateCardRequest, FlipResponse, PlaybackAudio};
use super::error::FlashcardServiceError;
use super::widget::{CardWidget, Face, PlaybackRefused};
use crate::domain::card::{Card, CardResponse, CardStoreGateway, NewCard};
use crate::domain::speech::{SpeechError, SpeechSynthesisClient};
use crate::error::AppError;
use crate::infrastructure::config::PlaybackSource;
use async_trait::async_trait;
use moka::future::Cache;
use regex::Regex;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

pub const MAX_CARD_TEXT_CHARS: usize = 1000;
pub const CARD_CREATED_MESSAGE: &str = "Card created with audio!";

const WIDGET_CAPACITY: u64 = 10_000;
const WIDGET_IDLE: Duration = Duration::from_secs(30 * 60);
const SUBMISSION_CAPACITY: u64 = 10_000;
const SUBMISSION_IDLE: Duration = Duration::from_secs(5 * 60);

pub struct FlashcardService {
    gateway: Arc<CardStoreGateway>,
    speech: Arc<SpeechSynthesisClient>,
    playback_source: PlaybackSource,
    widgets: Cache<(Uuid, Uuid), Arc<CardWidget>>,
    submissions: Cache<Uuid, Arc<BusyFlag>>,
    whitespace: Regex,
}

impl FlashcardService {
    pub fn new(
        gateway: Arc<CardStoreGateway>,
        speech: Arc<SpeechSynthesisClient>,
        playback_source: PlaybackSource,
    ) -> Self {
        Self {
            gateway,
            speech,
            playback_source,
            widgets: Cache::builder()
                .max_capacity(WIDGET_CAPACITY)
                .time_to_idle(WIDGET_IDLE)
                .build(),
            submissions: Cache::builder()
                .max_capacity(SUBMISSION_CAPACITY)
                .time_to_idle(SUBMISSION_IDLE)
                .build(),
            whitespace: Regex::new(r"\s+").expect("static whitespace pattern"),
        }
    }

    /// Flip-card state for `user_id` looking at `card_id`, created on first use
    pub async fn widget(&self, user_id: Uuid, card_id: Uuid) -> Arc<CardWidget> {
        self.widgets
            .get_with((user_id, card_id), async { Arc::new(CardWidget::new()) })
            .await
    }
}

#[async_trait]
pub trait FlashcardServiceApi: Send + Sync {
    /// Creation form: synthesize the back, upload it, then store the card.
    ///
    /// No row is written unless synthesis and upload both succeeded.
    async fn create_card(
        &self,
        user_id: Uuid,
        request: CreateCardRequest,
    ) -> Result<Card, FlashcardServiceError>;

    /// Grid view: the user's cards, newest first
    async fn list_cards(&self, user_id: Uuid) -> Result<Vec<CardResponse>, FlashcardServiceError>;

    async fn flip_card(
        &self,
        user_id: Uuid,
        card_id: Uuid,
    ) -> Result<FlipResponse, FlashcardServiceError>;

    /// Audio for the back of a card; only while the back is shown, one at a time
    async fn play_card(
        &self,
        user_id: Uuid,
        card_id: Uuid,
    ) -> Result<PlaybackAudio, FlashcardServiceError>;
}

#[async_trait]
impl FlashcardServiceApi for FlashcardService {
    async fn create_card(
        &self,
        user_id: Uuid,
        request: CreateCardRequest,
    ) -> Result<Card, FlashcardServiceError> {
        let submission = self
            .submissions
            .get_with(user_id, async { Arc::new(BusyFlag::new()) })
            .await;
        let _submitting = submission.try_acquire().ok_or_else(|| {
            FlashcardServiceError::Busy("Card creation already in progress".to_string())
        })?;

        let front_text = self.validate_text("Front text", &request.front_text)?;
        let back_text = self.validate_text("Back text", &request.back_text)?;

        tracing::info!(
            user_id = %user_id,
            front_length = front_text.len(),
            back_length = back_text.len(),
            "Card creation request"
        );

        // 1. Generate audio for the back
        let audio = self.speech.synthesize(&back_text).await.map_err(|e| {
            tracing::error!(user_id = %user_id, error = %e, "Audio generation failed");
            FlashcardServiceError::GenerateAudio
        })?;

        // 2. Upload it and resolve the public URL
        let audio_url = self
            .gateway
            .upload_audio(user_id, audio)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user_id, error = %e, "Audio upload failed");
                FlashcardServiceError::UploadAudio
            })?;

        // 3. Insert the card pointing at that audio
        let card = self
            .gateway
            .insert_card(NewCard {
                user_id,
                front_text,
                back_text,
                audio_url: Some(audio_url),
            })
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user_id, error = %e, "Card insert failed");
                FlashcardServiceError::CreateCard
            })?;

        Ok(card)
    }

    async fn list_cards(&self, user_id: Uuid) -> Result<Vec<CardResponse>, FlashcardServiceError> {
        let cards = self
            .gateway
            .list_cards_for_user(user_id)
            .await
            .map_err(|e| {
                tracing::error!(user_id = %user_id, error = %e, "Card listing failed");
                FlashcardServiceError::FetchCards
            })?;

        Ok(cards.into_iter().map(CardResponse::from).collect())
    }

    async fn flip_card(
        &self,
        user_id: Uuid,
        card_id: Uuid,
    ) -> Result<FlipResponse, FlashcardServiceError> {
        let card = self.find_card(user_id, card_id).await?;
        let outcome = self.widget(user_id, card_id).await.flip(&card.back_text);

        tracing::debug!(
            user_id = %user_id,
            card_id = %card_id,
            face = ?outcome.face,
            autoplay = outcome.autoplay,
            "Card flipped"
        );

        let text = match outcome.face {
            Face::Front => card.front_text,
            Face::Back => card.back_text,
        };

        Ok(FlipResponse {
            card_id,
            face: outcome.face,
            text,
            autoplay: outcome.autoplay,
        })
    }

    async fn play_card(
        &self,
        user_id: Uuid,
        card_id: Uuid,
    ) -> Result<PlaybackAudio, FlashcardServiceError> {
        let card = self.find_card(user_id, card_id).await?;
        let widget = self.widget(user_id, card_id).await;
        let _playing = widget.begin_playback().map_err(|refused| match refused {
            PlaybackRefused::FrontShown => FlashcardServiceError::Invalid(refused.to_string()),
            PlaybackRefused::AlreadyPlaying => FlashcardServiceError::Busy(refused.to_string()),
        })?;

        let playback = match (self.playback_source, card.audio_url.as_deref()) {
            (PlaybackSource::Stored, Some(audio_url)) => PlaybackAudio {
                audio_data: self.gateway.fetch_audio(audio_url).await.map_err(|e| {
                    tracing::error!(card_id = %card_id, error = %e, "Stored audio fetch failed");
                    FlashcardServiceError::PlayAudio
                })?,
                source: AudioSource::Stored,
            },
            _ => PlaybackAudio {
                audio_data: self.speech.synthesize(&card.back_text).await.map_err(|e| {
                    tracing::error!(card_id = %card_id, error = %e, "Playback synthesis failed");
                    match e {
                        SpeechError::EmptyText => {
                            FlashcardServiceError::Invalid("Card has no back text".to_string())
                        }
                        SpeechError::Provider(_) => FlashcardServiceError::PlayAudio,
                    }
                })?,
                source: AudioSource::Synthesized,
            },
        };

        tracing::info!(
            card_id = %card_id,
            source = playback.source.as_str(),
            audio_size = playback.audio_data.len(),
            "Card playback ready"
        );

        Ok(playback)
    }
}

impl FlashcardService {
    async fn find_card(&self, user_id: Uuid, card_id: Uuid) -> Result<Card, FlashcardServiceError> {
        self.gateway
            .find_card_for_user(user_id, card_id)
            .await
            .map_err(|e| match e {
                AppError::NotFound(_) => FlashcardServiceError::NotFound,
                other => {
                    tracing::error!(card_id = %card_id, error = %other, "Card lookup failed");
                    FlashcardServiceError::LoadCard
                }
            })
    }

    /// Collapse whitespace, then require non-empty text within the size limit
    fn validate_text(&self, field: &str, text: &str) -> Result<String, FlashcardServiceError> {
        let normalized = self.whitespace.replace_all(text, " ").trim().to_string();

        if normalized.is_empty() {
            return Err(FlashcardServiceError::Invalid(format!(
                "{} is required",
                field
            )));
        }

        if normalized.chars().count() > MAX_CARD_TEXT_CHARS {
            return Err(FlashcardServiceError::TooLarge(format!(
                "{} must be {} characters or less",
                field, MAX_CARD_TEXT_CHARS
            )));
        }

        Ok(normalized)
    }
}
