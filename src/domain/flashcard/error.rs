use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum FlashcardServiceError {
    #[error("invalid input: {0}")]
    Invalid(String),
    #[error("text too large: {0}")]
    TooLarge(String),
    #[error("card not found")]
    NotFound,
    #[error("busy: {0}")]
    Busy(String),
    #[error("Failed to generate audio")]
    GenerateAudio,
    #[error("Failed to upload audio")]
    UploadAudio,
    #[error("Failed to play audio")]
    PlayAudio,
    #[error("Failed to create card")]
    CreateCard,
    #[error("Failed to fetch cards")]
    FetchCards,
    #[error("Failed to load card")]
    LoadCard,
}

impl From<FlashcardServiceError> for AppError {
    fn from(err: FlashcardServiceError) -> Self {
        match err {
            FlashcardServiceError::Invalid(msg) => AppError::BadRequest(msg),
            FlashcardServiceError::TooLarge(msg) => AppError::PayloadTooLarge(msg),
            FlashcardServiceError::NotFound => AppError::NotFound("Card not found".to_string()),
            FlashcardServiceError::Busy(msg) => AppError::Conflict(msg),
            // Speech provider and object storage
            FlashcardServiceError::GenerateAudio
            | FlashcardServiceError::UploadAudio
            | FlashcardServiceError::PlayAudio => AppError::ExternalService(err.to_string()),
            // Card table
            FlashcardServiceError::CreateCard
            | FlashcardServiceError::FetchCards
            | FlashcardServiceError::LoadCard => AppError::Internal(err.to_string()),
        }
    }
}
