// Gesture store module
// Named example gestures kept in sync with the instance learner

pub mod gesture_store;

pub use gesture_store::{GestureStore, StoreSettings};
