use thiserror::Error;

#[derive(Error, Debug)]
pub enum LifeError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("Chat login refused: {0}")]
    ChatAuth(String),
}

pub type Result<T> = std::result::Result<T, LifeError>;
