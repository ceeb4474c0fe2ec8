use std::io;
use thiserror::Error;

// Re-export anyhow's Result type
pub use anyhow::Result;

/// Custom Error type for the rootline library
#[derive(Error, Debug)]
pub enum StatusError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Process error: {0}")]
    Process(String),

    #[error("Sink error: {0}")]
    Sink(String),

    #[error("Channel error: {0}")]
    Channel(String),
}
