use super::tts_repository::TtsRepository;
use async_trait::async_trait;
use serde::Serialize;

const XI_API_KEY_HEADER: &str = "xi-api-key";

#[derive(Debug, Serialize)]
struct TextToSpeechBody<'a> {
    text: &'a str,
    model_id: &'a str,
}

/// ElevenLabs implementation of TTS repository
pub struct ElevenLabsTtsRepository {
    http_client: reqwest::Client,
    base_url: String,
    api_key: String,
    voice_id: String,
    model_id: String,
}

impl ElevenLabsTtsRepository {
    pub fn new(base_url: String, api_key: String, voice_id: String, model_id: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            voice_id,
            model_id,
        }
    }

    fn endpoint_url(&self) -> String {
        format!("{}/v1/text-to-speech/{}", self.base_url, self.voice_id)
    }
}

#[async_trait]
impl TtsRepository for ElevenLabsTtsRepository {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, String> {
        let start_time = std::time::Instant::now();

        tracing::info!(
            voice_id = %self.voice_id,
            model_id = %self.model_id,
            text_length = text.len(),
            "Calling ElevenLabs TTS API"
        );

        let response = self
            .http_client
            .post(self.endpoint_url())
            .header(XI_API_KEY_HEADER, &self.api_key)
            .header(reqwest::header::ACCEPT, "audio/mpeg")
            .json(&TextToSpeechBody {
                text,
                model_id: &self.model_id,
            })
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "ElevenLabs TTS request failed");
                format!("ElevenLabs TTS error: {}", e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::error!(
                status = status.as_u16(),
                body = %error_text,
                "ElevenLabs TTS API returned an error"
            );
            return Err(format!("ElevenLabs TTS error ({}): {}", status, error_text));
        }

        let audio_data = response
            .bytes()
            .await
            .map_err(|e| format!("Failed to read ElevenLabs audio: {}", e))?
            .to_vec();

        let duration = start_time.elapsed();
        tracing::info!(
            provider = "elevenlabs",
            model_id = %self.model_id,
            latency_ms = duration.as_millis(),
            characters_count = text.len(),
            audio_size_bytes = audio_data.len(),
            "TTS synthesis completed"
        );

        Ok(audio_data)
    }
}
