use super::error::SpeechError;
use crate::infrastructure::repositories::TtsRepository;
use std::sync::Arc;

/// Turns text into MP3 bytes through the configured provider.
///
/// Stateless: re-entrancy is guarded by the callers' busy flags.
pub struct SpeechSynthesisClient {
    tts_repo: Arc<dyn TtsRepository>,
}

impl SpeechSynthesisClient {
    pub fn new(tts_repo: Arc<dyn TtsRepository>) -> Self {
        Self { tts_repo }
    }

    pub async fn synthesize(&self, text: &str) -> Result<Vec<u8>, SpeechError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SpeechError::EmptyText);
        }

        let audio = self
            .tts_repo
            .synthesize(text)
            .await
            .map_err(SpeechError::Provider)?;

        if audio.is_empty() {
            return Err(SpeechError::Provider("provider returned no audio".to_string()));
        }

        Ok(audio)
    }
}
