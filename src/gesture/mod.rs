// Gesture capture model
// Points, strokes and gestures consumed by feature extraction

pub mod types;

pub use types::{BoundingBox, Gesture, GesturePoint, GestureStroke};
