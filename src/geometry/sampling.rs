// Stroke resampling and gesture rasterization
// Produces the raw point sequences and patches that feature vectors are built from

use crate::gesture::{Gesture, GestureStroke};

/// Below this short/long side ratio a gesture is scaled uniformly
const SCALING_THRESHOLD: f32 = 0.26;

/// Maximum stretch of one axis relative to the other when scaling non-uniformly
const NONUNIFORM_SCALE: f32 = std::f32::consts::SQRT_2;

/// Resample a stroke into `num_points` points evenly spaced along its arc length
///
/// Returns interleaved coordinates (x0, y0, x1, y1, ...) of length `2 * num_points`.
/// If the walk ends early because of rounding, the tail is padded with the last
/// emitted point. A zero-length stroke yields copies of its first point.
pub fn temporal_sampling(stroke: &GestureStroke, num_points: usize) -> Vec<f32> {
    let vector_length = num_points * 2;
    let mut vector = vec![0.0; vector_length];
    if num_points == 0 {
        return vector;
    }

    let pts = stroke.points();
    let count = stroke.point_count();
    let mut last_x = pts[0];
    let mut last_y = pts[1];
    vector[0] = last_x;
    vector[1] = last_y;
    let mut index = 2;

    let increment = if num_points > 1 {
        stroke.length() / (num_points - 1) as f32
    } else {
        0.0
    };

    if increment > 0.0 {
        let mut distance_so_far = 0.0;
        let mut current: Option<(f32, f32)> = None;
        let mut i = 0;

        while index < vector_length {
            let (cx, cy) = match current {
                Some(point) => point,
                None => {
                    i += 1;
                    if i >= count {
                        break;
                    }
                    let point = (pts[i * 2], pts[i * 2 + 1]);
                    current = Some(point);
                    point
                }
            };

            let dx = cx - last_x;
            let dy = cy - last_y;
            let distance = dx.hypot(dy);

            if distance_so_far + distance >= increment {
                let ratio = (increment - distance_so_far) / distance;
                let nx = last_x + ratio * dx;
                let ny = last_y + ratio * dy;
                vector[index] = nx;
                vector[index + 1] = ny;
                index += 2;
                last_x = nx;
                last_y = ny;
                distance_so_far = 0.0;
            } else {
                last_x = cx;
                last_y = cy;
                current = None;
                distance_so_far += distance;
            }
        }
    }

    for i in (index..vector_length).step_by(2) {
        vector[i] = last_x;
        vector[i + 1] = last_y;
    }

    vector
}

/// Rasterize a whole gesture into a `bitmap_size` x `bitmap_size` patch
///
/// The gesture bounding box is centered and scaled into the patch. With
/// `keep_aspect_ratio` both axes share the smaller scale; otherwise very thin
/// gestures are scaled uniformly and the rest may stretch one axis by up to
/// sqrt(2) relative to the other. Consecutive points are joined by evaluating
/// each segment at every integer column and row it crosses.
pub fn spatial_sampling(gesture: &Gesture, bitmap_size: usize, keep_aspect_ratio: bool) -> Vec<f32> {
    let mut sample = vec![0.0; bitmap_size * bitmap_size];
    let rect = match gesture.bounding_box() {
        Some(rect) if bitmap_size > 0 => rect,
        _ => return sample,
    };

    let target_patch_size = (bitmap_size - 1) as f32;
    let gesture_width = rect.width();
    let gesture_height = rect.height();
    let mut sx = target_patch_size / gesture_width;
    let mut sy = target_patch_size / gesture_height;

    if keep_aspect_ratio {
        let scale = sx.min(sy);
        sx = scale;
        sy = scale;
    } else {
        let mut aspect_ratio = gesture_width / gesture_height;
        if aspect_ratio > 1.0 {
            aspect_ratio = 1.0 / aspect_ratio;
        }
        if aspect_ratio < SCALING_THRESHOLD {
            let scale = sx.min(sy);
            sx = scale;
            sy = scale;
        } else if sx > sy {
            sx = sx.min(sy * NONUNIFORM_SCALE);
        } else {
            sy = sy.min(sx * NONUNIFORM_SCALE);
        }
    }

    let pre_dx = -rect.center_x();
    let pre_dy = -rect.center_y();
    let post_dx = target_patch_size / 2.0;
    let post_dy = target_patch_size / 2.0;

    for stroke in gesture.strokes() {
        let mut segment_end: Option<(f32, f32)> = None;

        for point in stroke.points().chunks_exact(2) {
            let x = (point[0] + pre_dx) * sx + post_dx;
            let y = (point[1] + pre_dy) * sy + post_dy;
            let start_x = x.max(0.0).min(target_patch_size);
            let start_y = y.max(0.0).min(target_patch_size);

            plot(start_x, start_y, &mut sample, bitmap_size);

            if let Some((end_x, end_y)) = segment_end {
                plot_segment(start_x, start_y, end_x, end_y, &mut sample, bitmap_size);
            }
            segment_end = Some((start_x, start_y));
        }
    }

    sample
}

/// Fill the cells a segment crosses, column by column and then row by row
fn plot_segment(
    start_x: f32,
    start_y: f32,
    end_x: f32,
    end_y: f32,
    sample: &mut [f32],
    size: usize,
) {
    if end_x != start_x {
        let slope = (end_y - start_y) / (end_x - start_x);
        let (from, to) = if end_x > start_x {
            (start_x, end_x)
        } else {
            (end_x, start_x)
        };
        let mut xpos = from.ceil();
        while xpos < to {
            let ypos = slope * (xpos - start_x) + start_y;
            plot(xpos, ypos, sample, size);
            xpos += 1.0;
        }
    }

    if end_y != start_y {
        let inverse_slope = (end_x - start_x) / (end_y - start_y);
        let (from, to) = if end_y > start_y {
            (start_y, end_y)
        } else {
            (end_y, start_y)
        };
        let mut ypos = from.ceil();
        while ypos < to {
            let xpos = inverse_slope * (ypos - start_y) + start_x;
            plot(xpos, ypos, sample, size);
            ypos += 1.0;
        }
    }
}

/// Deposit a point into the patch
///
/// Integral coordinates mark their cell with at least 1.0. Fractional
/// coordinates spread distance-proportional values over the four surrounding
/// cells; every cell keeps the largest value it has received.
fn plot(x: f32, y: f32, sample: &mut [f32], size: usize) {
    let max = (size - 1) as f32;
    let x = x.max(0.0).min(max);
    let y = y.max(0.0).min(max);

    let x_floor = x.floor();
    let x_ceil = x.ceil();
    let y_floor = y.floor();
    let y_ceil = y.ceil();

    let cell = |cx: f32, cy: f32| cy as usize * size + cx as usize;

    if x == x_floor && y == y_floor {
        let index = cell(x_ceil, y_ceil);
        if sample[index] < 1.0 {
            sample[index] = 1.0;
        }
        return;
    }

    let x_floor_sq = (x_floor - x).powi(2);
    let y_floor_sq = (y_floor - y).powi(2);
    let x_ceil_sq = (x_ceil - x).powi(2);
    let y_ceil_sq = (y_ceil - y).powi(2);

    let top_left = (x_floor_sq + y_floor_sq).sqrt();
    let top_right = (x_ceil_sq + y_floor_sq).sqrt();
    let bottom_left = (x_floor_sq + y_ceil_sq).sqrt();
    let bottom_right = (x_ceil_sq + y_ceil_sq).sqrt();
    let sum = top_left + top_right + bottom_left + bottom_right;

    for (value, cx, cy) in [
        (top_left, x_floor, y_floor),
        (top_right, x_ceil, y_floor),
        (bottom_left, x_floor, y_ceil),
        (bottom_right, x_ceil, y_ceil),
    ] {
        let value = value / sum;
        let index = cell(cx, cy);
        if value > sample[index] {
            sample[index] = value;
        }
    }
}
