use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuizError {
    /// Question or image acquisition failed. The message is shown to the player as is.
    #[error("{0}")]
    DataLoad(String),
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
    #[error("telegram request failed: {0}")]
    Telegram(#[from] teloxide::RequestError),
    #[error("invalid configuration: {0}")]
    Config(String),
}
