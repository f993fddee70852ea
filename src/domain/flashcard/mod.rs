pub mod busy;
pub mod dto;
pub mod error;
pub mod service;
pub mod widget;

pub use busy::{BusyFlag, BusyGuard};
pub use dto::{AudioSource, CreateCardRequest, CreateCardResponse, FlipResponse, PlaybackAudio};
pub use error::FlashcardServiceError;
pub use service::{FlashcardService, FlashcardServiceApi};
pub use widget::{CardWidget, Face, FlipOutcome, PlaybackRefused};
