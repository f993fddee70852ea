use super::audio_storage::AudioStorage;
use crate::error::{AppError, AppResult};
use async_trait::async_trait;

/// Object storage of the hosted backend, reached through its REST API
pub struct SupabaseStorageRepository {
    http_client: reqwest::Client,
    base_url: String,
    service_key: String,
    bucket: String,
}

impl SupabaseStorageRepository {
    pub fn new(base_url: String, service_key: String, bucket: String) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
            bucket,
        }
    }

    fn object_url(&self, object_path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url, self.bucket, object_path
        )
    }
}

#[async_trait]
impl AudioStorage for SupabaseStorageRepository {
    async fn upload(&self, object_path: &str, data: Vec<u8>, content_type: &str) -> AppResult<()> {
        let size = data.len();
        let response = self
            .http_client
            .post(self.object_url(object_path))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(data)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Storage upload failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::ExternalService(format!(
                "Storage upload failed ({}): {}",
                status, error_text
            )));
        }

        tracing::info!(
            bucket = %self.bucket,
            object_path = object_path,
            size_bytes = size,
            "Audio uploaded"
        );

        Ok(())
    }

    fn public_url(&self, object_path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url, self.bucket, object_path
        )
    }

    async fn download(&self, public_url: &str) -> AppResult<Vec<u8>> {
        let response = self
            .http_client
            .get(public_url)
            .send()
            .await
            .map_err(|e| AppError::ExternalService(format!("Storage download failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::ExternalService(format!(
                "Storage download failed ({})",
                response.status()
            )));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| AppError::ExternalService(format!("Storage download failed: {}", e)))?;

        Ok(audio.to_vec())
    }
}
