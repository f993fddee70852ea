pub mod auth;
pub mod card;
pub mod flashcard;
pub mod speech;
