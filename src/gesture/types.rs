// Gesture capture types
// Timestamped points, strokes and multi-stroke gestures

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::{GestureError, GestureResult};

/// Source of process-unique gesture ids
static NEXT_GESTURE_ID: AtomicU64 = AtomicU64::new(1);

/// A single sampled pen position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GesturePoint {
    pub x: f32,
    pub y: f32,

    /// Capture time in milliseconds
    pub timestamp: i64,
}

impl GesturePoint {
    pub fn new(x: f32, y: f32, timestamp: i64) -> Self {
        GesturePoint { x, y, timestamp }
    }
}

/// Axis-aligned bounds in gesture coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BoundingBox {
    /// Degenerate box around a single point
    pub fn at(x: f32, y: f32) -> Self {
        BoundingBox {
            left: x,
            top: y,
            right: x,
            bottom: y,
        }
    }

    /// Grow the box so it contains the point
    pub fn include(&mut self, x: f32, y: f32) {
        self.left = self.left.min(x);
        self.top = self.top.min(y);
        self.right = self.right.max(x);
        self.bottom = self.bottom.max(y);
    }

    /// Smallest box containing both boxes
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        BoundingBox {
            left: self.left.min(other.left),
            top: self.top.min(other.top),
            right: self.right.max(other.right),
            bottom: self.bottom.max(other.bottom),
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center_x(&self) -> f32 {
        (self.left + self.right) / 2.0
    }

    pub fn center_y(&self) -> f32 {
        (self.top + self.bottom) / 2.0
    }
}

/// One continuous pen-down to pen-up trace
#[derive(Debug, Clone, PartialEq)]
pub struct GestureStroke {
    /// Interleaved coordinates: x0, y0, x1, y1, ...
    points: Vec<f32>,

    timestamps: Vec<i64>,

    /// Arc length of the polyline
    length: f32,

    bounding_box: BoundingBox,
}

impl GestureStroke {
    /// Build a stroke from time-ordered points
    pub fn new(points: &[GesturePoint]) -> GestureResult<Self> {
        let first = points.first().ok_or(GestureError::EmptyStroke)?;

        let mut coords = Vec::with_capacity(points.len() * 2);
        let mut timestamps = Vec::with_capacity(points.len());
        let mut bounding_box = BoundingBox::at(first.x, first.y);
        let mut length = 0.0;
        let mut previous: Option<&GesturePoint> = None;

        for point in points {
            coords.push(point.x);
            coords.push(point.y);
            timestamps.push(point.timestamp);
            bounding_box.include(point.x, point.y);

            if let Some(prev) = previous {
                length += (point.x - prev.x).hypot(point.y - prev.y);
            }
            previous = Some(point);
        }

        Ok(GestureStroke {
            points: coords,
            timestamps,
            length,
            bounding_box,
        })
    }

    /// Interleaved x/y coordinates
    pub fn points(&self) -> &[f32] {
        &self.points
    }

    pub fn timestamps(&self) -> &[i64] {
        &self.timestamps
    }

    pub fn point_count(&self) -> usize {
        self.timestamps.len()
    }

    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }
}

/// A drawing made of one or more strokes
#[derive(Debug, Clone, PartialEq)]
pub struct Gesture {
    id: u64,
    strokes: Vec<GestureStroke>,
}

impl Gesture {
    /// Create an empty gesture with a freshly allocated id
    pub fn new() -> Self {
        Gesture {
            id: NEXT_GESTURE_ID.fetch_add(1, Ordering::Relaxed),
            strokes: Vec::new(),
        }
    }

    /// Create an empty gesture with a caller-chosen id
    pub fn with_id(id: u64) -> Self {
        Gesture {
            id,
            strokes: Vec::new(),
        }
    }

    /// Convenience constructor for a gesture drawn in one stroke
    pub fn from_stroke(stroke: GestureStroke) -> Self {
        let mut gesture = Gesture::new();
        gesture.add_stroke(stroke);
        gesture
    }

    pub fn add_stroke(&mut self, stroke: GestureStroke) {
        self.strokes.push(stroke);
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn strokes(&self) -> &[GestureStroke] {
        &self.strokes
    }

    pub fn stroke_count(&self) -> usize {
        self.strokes.len()
    }

    /// Union of all stroke bounds, `None` for a gesture without strokes
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        let mut strokes = self.strokes.iter();
        let first = strokes.next()?.bounding_box();
        Some(strokes.fold(first, |acc, s| acc.union(&s.bounding_box())))
    }

    /// Total arc length across all strokes
    pub fn length(&self) -> f32 {
        self.strokes.iter().map(|s| s.length()).sum()
    }
}

impl Default for Gesture {
    fn default() -> Self {
        Self::new()
    }
}
