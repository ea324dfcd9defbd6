use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChatError {
    #[error("Transport error: {0}")]
    Ui(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Handler error: {0}")]
    Handler(#[from] HandlerError),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("No text in message")]
    NoText,

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("State error: {0}")]
    State(String),
}

pub type Result<T> = std::result::Result<T, ChatError>;
