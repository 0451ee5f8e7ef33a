// Error types shared by gesture construction, extraction and the learner

use thiserror::Error;

/// Errors that can occur while building gestures or training the learner
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GestureError {
    #[error("A stroke needs at least one point")]
    EmptyStroke,

    #[error("Gesture has no strokes to sample")]
    EmptyGesture,

    #[error("Instance {id} has no label and cannot be used for training")]
    UnlabeledInstance { id: u64 },
}

pub type GestureResult<T> = Result<T, GestureError>;
