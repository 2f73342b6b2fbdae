use snake_core::SnakeError;
use snake_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("game configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] SnakeError),

    #[error("board error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SimResult<T> = Result<T, SimError>;
