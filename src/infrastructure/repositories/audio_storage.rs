use crate::error::AppResult;
use async_trait::async_trait;

/// Hosted object storage holding synthesized card audio.
#[async_trait]
pub trait AudioStorage: Send + Sync {
    /// Store `data` under `object_path`; existing objects are never overwritten
    async fn upload(&self, object_path: &str, data: Vec<u8>, content_type: &str) -> AppResult<()>;

    /// Publicly readable URL for an uploaded object
    fn public_url(&self, object_path: &str) -> String;

    /// Download previously uploaded audio by its public URL
    async fn download(&self, public_url: &str) -> AppResult<Vec<u8>>;
}
