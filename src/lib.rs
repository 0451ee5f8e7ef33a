// Gesture Learner - instance-based pen gesture recognition
// Module declarations

pub mod error;
pub mod geometry;
pub mod gesture;
pub mod learner;
pub mod store;

pub use error::{GestureError, GestureResult};
pub use gesture::{BoundingBox, Gesture, GesturePoint, GestureStroke};
pub use learner::{classify, Instance, InstanceLearner, Orientation, Prediction, SequenceType};
pub use store::{GestureStore, StoreSettings};
