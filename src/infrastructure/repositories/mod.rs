pub mod audio_storage;
pub mod card_repository;
pub mod elevenlabs_tts_repository;
pub mod supabase_storage_repository;
pub mod tts_repository;

pub use audio_storage::AudioStorage;
pub use card_repository::{CardRepository, PgCardRepository};
pub use elevenlabs_tts_repository::ElevenLabsTtsRepository;
pub use supabase_storage_repository::SupabaseStorageRepository;
pub use tts_repository::TtsRepository;
