//! Spatial-subsystem error type.

use thiserror::Error;

use snake_core::Position;

/// Errors produced by `snake-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no free cell found after {attempts} attempts")]
    BoardFull { attempts: u32 },

    #[error("portal endpoint {0} lies outside the board")]
    PortalOutOfBounds(Position),

    #[error("rectangle {width}x{height} does not fit the board")]
    RectTooLarge { width: i32, height: i32 },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
