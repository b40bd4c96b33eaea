use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid cursor position: line {line}, character {character}")]
    InvalidPosition { line: usize, character: usize },

    #[error("Unknown command: {0}")]
    UnknownCommand(String),

    #[error("Editor host error: {0}")]
    Host(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
