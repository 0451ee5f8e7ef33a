// In-place transforms over interleaved point arrays

/// Mean position of interleaved points (x0, y0, x1, y1, ...)
pub fn compute_centroid(points: &[f32]) -> [f32; 2] {
    let mut center_x = 0.0;
    let mut center_y = 0.0;
    let mut count = 0usize;

    for point in points.chunks_exact(2) {
        center_x += point[0];
        center_y += point[1];
        count += 1;
    }

    if count == 0 {
        return [0.0, 0.0];
    }

    [center_x / count as f32, center_y / count as f32]
}

pub fn translate(points: &mut [f32], dx: f32, dy: f32) {
    for point in points.chunks_exact_mut(2) {
        point[0] += dx;
        point[1] += dy;
    }
}

/// Rotate counter-clockwise about the origin by `angle` radians
pub fn rotate(points: &mut [f32], angle: f32) {
    let (sin, cos) = angle.sin_cos();

    for point in points.chunks_exact_mut(2) {
        let x = point[0] * cos - point[1] * sin;
        let y = point[0] * sin + point[1] * cos;
        point[0] = x;
        point[1] = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_centroid() {
        let square = [0.0, 0.0, 2.0, 0.0, 2.0, 2.0, 0.0, 2.0];
        assert_eq!(compute_centroid(&square), [1.0, 1.0]);
        assert_eq!(compute_centroid(&[]), [0.0, 0.0]);
    }

    #[test]
    fn test_translate_then_rotate_quarter_turn() {
        let mut points = [1.0, 1.0, 2.0, 1.0];
        translate(&mut points, -1.0, -1.0);
        assert_eq!(points, [0.0, 0.0, 1.0, 0.0]);

        rotate(&mut points, FRAC_PI_2);
        assert!(points[2].abs() < 1e-6);
        assert!((points[3] - 1.0).abs() < 1e-6);
    }
}
