use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {reason}", .path.display())]
    Read { path: PathBuf, reason: String },
    #[error("bad value for [{section}] {key}: {reason}")]
    Parse {
        section: String,
        key: String,
        reason: String,
    },
    #[error("[{section}] {key} = {value} is out of range")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
    },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("terminal i/o failed")]
    Io(#[from] io::Error),
}
