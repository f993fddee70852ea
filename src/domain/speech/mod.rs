pub mod client;
pub mod error;

pub use client::SpeechSynthesisClient;
pub use error::SpeechError;
