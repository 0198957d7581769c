// Domain-level errors for the simulation core.

use crate::domain::events::Topic;
use thiserror::Error;

/// Failures looking up or slicing a named sprite sheet.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("asset {name} not found")]
    NotFound { name: String },
    #[error("texture {name} ({width}x{height}) does not divide into {rows}x{cols} frames")]
    GridMismatch {
        name: String,
        width: u32,
        height: u32,
        rows: u32,
        cols: u32,
    },
    #[error("frame {index} out of bounds for {name}")]
    FrameOutOfBounds { name: String, index: u32 },
    #[error("cell ({row}, {col}) out of bounds for {name}")]
    CellOutOfBounds { name: String, row: u32, col: u32 },
}

/// Failure inside a single entity's update, draw or destruction step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error(transparent)]
    Asset(#[from] AssetError),
}

/// Failures managing event bus subscriptions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BusError {
    #[error("subscription {id} is not registered on {topic}")]
    NotSubscribed { topic: Topic, id: u64 },
}

/// A tuning value that would break a random draw or a timer during play.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TuningError {
    #[error("tuning value {field} {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Failures building or driving a game session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("a game must be created inside a tokio runtime")]
    NoRuntime,
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Tuning(#[from] TuningError),
}
