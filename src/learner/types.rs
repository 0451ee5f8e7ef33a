// Learner types
// Classification modes, feature instances and ranked predictions

use serde::{Deserialize, Serialize};
use std::fmt;

/// How stroke order is treated when building feature vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SequenceType {
    /// Order-insensitive: the whole gesture is rasterized into a patch
    /// Multi-stroke gestures are compared by shape only
    Invariant,

    /// Order-preserving: the first stroke is resampled in drawing order
    /// Vectors are compared by cosine distance under rotation
    Sensitive,
}

/// How much rotational alignment is applied to sequence vectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    /// Intrinsic angle is cancelled entirely
    Invariant,

    /// Snapped to the nearest of 8 principal directions
    Sensitive,

    /// Snapped, and matching only rotates within a quarter turn
    Sensitive4,

    /// Snapped, and matching only rotates within an eighth turn
    Sensitive8,
}

impl Orientation {
    /// Number of distinguishable orientations used by the rotation search
    pub fn num_orientations(&self) -> u32 {
        match self {
            Orientation::Invariant => 1,
            Orientation::Sensitive => 2,
            Orientation::Sensitive4 => 4,
            Orientation::Sensitive8 => 8,
        }
    }

    pub fn is_invariant(&self) -> bool {
        matches!(self, Orientation::Invariant)
    }
}

/// Extracted feature vector of one gesture
///
/// A `Sample` carries the label it was trained under; a `Query` is the
/// unlabeled vector of a gesture being recognized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Instance {
    Sample {
        id: u64,
        label: String,
        vector: Vec<f32>,
    },
    Query {
        id: u64,
        vector: Vec<f32>,
    },
}

impl Instance {
    /// Labeled instance when `label` is present, query otherwise
    pub fn new(id: u64, vector: Vec<f32>, label: Option<String>) -> Self {
        match label {
            Some(label) => Instance::Sample { id, label, vector },
            None => Instance::Query { id, vector },
        }
    }

    /// Id of the gesture this instance was extracted from
    pub fn id(&self) -> u64 {
        match self {
            Instance::Sample { id, .. } | Instance::Query { id, .. } => *id,
        }
    }

    pub fn vector(&self) -> &[f32] {
        match self {
            Instance::Sample { vector, .. } | Instance::Query { vector, .. } => vector.as_slice(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            Instance::Sample { label, .. } => Some(label.as_str()),
            Instance::Query { .. } => None,
        }
    }

    pub fn is_query(&self) -> bool {
        matches!(self, Instance::Query { .. })
    }
}

/// A candidate label for a recognized gesture
///
/// `score` grows with similarity. It is a reciprocal distance, not a
/// probability, and only comparable within one classification run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub label: String,
    pub score: f64,
}

impl Prediction {
    pub fn new(label: String, score: f64) -> Self {
        Prediction { label, score }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
