use thiserror::Error;

use crate::maze::Position;

/// Failures raised by the maze model, the generators and the solvers.
///
/// Every variant is scoped to the single call that produced it; none of them
/// leaves a grid in an inconsistent state.
#[derive(Debug, Error)]
pub enum MazeError {
    #[error("position {position} is outside the {height}x{width} grid")]
    OutOfBounds {
        position: Position,
        height: usize,
        width: usize,
    },
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("invalid format at line {line}, column {column}: {reason}")]
    InvalidFormat {
        line: usize,
        column: usize,
        reason: String,
    },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, MazeError>;
