#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("nothing to synthesize")]
    EmptyText,
    #[error("provider error: {0}")]
    Provider(String),
}
