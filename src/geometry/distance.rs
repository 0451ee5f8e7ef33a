// Vector distances used for nearest-neighbor matching

use std::f64::consts::{FRAC_PI_2, PI};

use crate::learner::Orientation;

/// Mean squared difference per component
///
/// Both vectors must have the same length; the caller skips pairs that don't.
pub fn squared_euclidean_distance(vector1: &[f32], vector2: &[f32]) -> f64 {
    if vector1.is_empty() {
        return 0.0;
    }

    let squared_distance: f64 = vector1
        .iter()
        .zip(vector2)
        .map(|(&a, &b)| {
            let difference = (a - b) as f64;
            difference * difference
        })
        .sum();

    squared_distance / vector1.len() as f64
}

/// Smallest angle between two unit point sequences over in-plane rotations
///
/// Both vectors hold interleaved (x, y) coordinates and are expected to be
/// normalized. The optimal rotation is solved in closed form. With more than
/// two orientations configured, rotations of `PI / n` or more are not
/// allowed and the unrotated cosine distance is returned instead.
pub fn minimum_cosine_distance(vector1: &[f32], vector2: &[f32], orientation: Orientation) -> f64 {
    let mut a = 0.0f64;
    let mut b = 0.0f64;

    for (p1, p2) in vector1.chunks_exact(2).zip(vector2.chunks_exact(2)) {
        let (x1, y1) = (p1[0] as f64, p1[1] as f64);
        let (x2, y2) = (p2[0] as f64, p2[1] as f64);
        a += x1 * x2 + y1 * y2;
        b += x1 * y2 - y1 * x2;
    }

    if a == 0.0 {
        return FRAC_PI_2;
    }

    let tan = b / a;
    let angle = tan.atan();
    let num_orientations = orientation.num_orientations();

    if num_orientations > 2 && angle.abs() >= PI / num_orientations as f64 {
        clamped_acos(a)
    } else {
        let cosine = angle.cos();
        let sine = cosine * tan;
        clamped_acos(a * cosine + b * sine)
    }
}

/// `acos` tolerant of rounding just outside [-1, 1]
fn clamped_acos(cosine: f64) -> f64 {
    cosine.clamp(-1.0, 1.0).acos()
}
