use async_trait::async_trait;
use flipspeak_backend::error::{AppError, AppResult};
use flipspeak_backend::infrastructure::repositories::{AudioStorage, TtsRepository};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

pub const FAKE_STORAGE_URL: &str = "http://storage.test";

/// Minimal MP3 frame header followed by the spoken text
pub fn fake_audio(text: &str) -> Vec<u8> {
    let mut audio = vec![0xFF, 0xFB, 0x90, 0x00];
    audio.extend_from_slice(text.as_bytes());
    audio
}

#[derive(Default)]
pub struct FakeTts {
    pub fail: AtomicBool,
    pub calls: AtomicUsize,
}

#[async_trait]
impl TtsRepository for FakeTts {
    async fn synthesize(&self, text: &str) -> Result<Vec<u8>, String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err("fake provider unavailable".to_string());
        }
        Ok(fake_audio(text))
    }
}

#[derive(Default)]
pub struct FakeStorage {
    pub fail_upload: AtomicBool,
    objects: Mutex<HashMap<String, Vec<u8>>>,
}

impl FakeStorage {
    pub fn object_count(&self) -> usize {
        self.objects.lock().len()
    }
}

#[async_trait]
impl AudioStorage for FakeStorage {
    async fn upload(&self, object_path: &str, data: Vec<u8>, content_type: &str) -> AppResult<()> {
        assert_eq!(content_type, "audio/mpeg");
        if self.fail_upload.load(Ordering::SeqCst) {
            return Err(AppError::ExternalService("fake bucket unavailable".to_string()));
        }
        self.objects.lock().insert(object_path.to_string(), data);
        Ok(())
    }

    fn public_url(&self, object_path: &str) -> String {
        format!("{}/public/card-audio/{}", FAKE_STORAGE_URL, object_path)
    }

    async fn download(&self, public_url: &str) -> AppResult<Vec<u8>> {
        let object_path = public_url
            .strip_prefix(&format!("{}/public/card-audio/", FAKE_STORAGE_URL))
            .ok_or_else(|| AppError::NotFound("object".to_string()))?;
        self.objects
            .lock()
            .get(object_path)
            .cloned()
            .ok_or_else(|| AppError::NotFound("object".to_string()))
    }
}
