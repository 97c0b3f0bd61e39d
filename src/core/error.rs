use thiserror::Error;

#[derive(Error, Debug)]
pub enum MilsimError {
    #[error("Player not found: {0:?}")]
    UnknownPlayer(crate::core::types::PlayerId),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl MilsimError {
    /// Chat text for the player who caused the error
    pub fn into_reply(self) -> String {
        match self {
            MilsimError::InvalidInput(text) => text,
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, MilsimError>;
