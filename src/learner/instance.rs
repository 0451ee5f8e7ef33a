// Feature extraction
// Turns raw gesture geometry into fixed-length instance vectors

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::error::{GestureError, GestureResult};
use crate::geometry::{compute_centroid, rotate, spatial_sampling, temporal_sampling, translate};
use crate::gesture::Gesture;
use crate::learner::types::{Instance, Orientation, SequenceType};

/// Points resampled from the first stroke in sequence mode
pub const SEQUENCE_SAMPLE_SIZE: usize = 16;

/// Side length of the rasterized patch in spatial mode
pub const PATCH_SAMPLE_SIZE: usize = 16;

/// Principal directions a sequence is snapped to when not fully invariant
/// Zero and the half turn appear with both signs
const ORIENTATIONS: [f32; 10] = [
    0.0,
    FRAC_PI_4,
    FRAC_PI_2,
    PI * 3.0 / 4.0,
    PI,
    -0.0,
    -FRAC_PI_4,
    -FRAC_PI_2,
    -PI * 3.0 / 4.0,
    -PI,
];

impl Instance {
    /// Extract the feature vector of a gesture
    ///
    /// Sequence mode resamples the first stroke, centers and rotates it, and
    /// scales the result to unit length. Spatial mode rasterizes every stroke
    /// into a patch and leaves its magnitude untouched.
    ///
    /// With a label the result is a training `Sample`, otherwise a `Query`.
    pub fn from_gesture(
        sequence_type: SequenceType,
        orientation: Orientation,
        gesture: &Gesture,
        label: Option<String>,
    ) -> GestureResult<Self> {
        let vector = match sequence_type {
            SequenceType::Sensitive => {
                let mut pts = temporal_sampler(orientation, gesture)?;
                normalize(&mut pts);
                pts
            }
            SequenceType::Invariant => spatial_sampler(gesture),
        };

        log::debug!(
            "Extracted {} features from gesture {} ({:?}, {:?})",
            vector.len(),
            gesture.id(),
            sequence_type,
            orientation
        );

        Ok(Instance::new(gesture.id(), vector, label))
    }
}

fn spatial_sampler(gesture: &Gesture) -> Vec<f32> {
    spatial_sampling(gesture, PATCH_SAMPLE_SIZE, false)
}

fn temporal_sampler(orientation: Orientation, gesture: &Gesture) -> GestureResult<Vec<f32>> {
    let stroke = gesture.strokes().first().ok_or(GestureError::EmptyGesture)?;

    let mut pts = temporal_sampling(stroke, SEQUENCE_SAMPLE_SIZE);
    let [center_x, center_y] = compute_centroid(&pts);
    let angle = (pts[1] - center_y).atan2(pts[0] - center_x);
    let adjustment = orientation_adjustment(angle, orientation);

    translate(&mut pts, -center_x, -center_y);
    rotate(&mut pts, adjustment);

    Ok(pts)
}

/// Rotation applied to a sequence whose first point sits at `angle` from its centroid
///
/// Invariant mode cancels the angle. Otherwise the smallest rotation that
/// lands on one of the principal directions is chosen.
pub fn orientation_adjustment(angle: f32, orientation: Orientation) -> f32 {
    let mut adjustment = -angle;

    if !orientation.is_invariant() {
        for canonical in ORIENTATIONS {
            let delta = canonical - angle;
            if delta.abs() < adjustment.abs() {
                adjustment = delta;
            }
        }
    }

    adjustment
}

/// Scale to unit Euclidean length
///
/// A zero vector is not special-cased: every component becomes NaN.
/// `classify` then scores the sample NaN, which ranks in label order
/// rather than last.
fn normalize(vector: &mut [f32]) {
    let sum: f32 = vector.iter().map(|v| v * v).sum();
    let magnitude = sum.sqrt();

    if magnitude == 0.0 {
        log::warn!("Normalizing a zero-magnitude feature vector; result is not finite");
    }

    for v in vector.iter_mut() {
        *v /= magnitude;
    }
}
