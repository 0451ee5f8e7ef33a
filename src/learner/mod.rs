// Instance-based learning module
// Feature extraction from gestures and nearest-neighbor classification

pub mod classifier;
pub mod instance;
pub mod types;

pub use classifier::{classify, InstanceLearner};
pub use instance::{orientation_adjustment, PATCH_SAMPLE_SIZE, SEQUENCE_SAMPLE_SIZE};
pub use types::{Instance, Orientation, Prediction, SequenceType};
