//! Raw samples to solver points and pixel points.
//!
//! Solver points and pixel points are two independent derivations from the
//! same [`RawSample`]; neither is computed from the other.

use crate::sample::SampleValue;
use crate::RawSample;
use serde::{Deserialize, Serialize};

/// A point in solver space.
///
/// `x = relative(sample.x)`, `y = -relative(sample.y)`. The y flip aligns
/// sensor "up" with image "up".
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point2D) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn midpoint(&self, other: &Point2D) -> Point2D {
        Point2D::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// A point in image space; row 0 is the top of the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: i64,
    pub y: i64,
}

/// Normalized point set plus the parallel pixel coordinates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointCloud {
    /// Canvas edge length the pixel coordinates were computed for
    pub canvas_size: u32,
    /// Solver-space points, same order as the input samples
    pub points: Vec<Point2D>,
    /// Image-space markers, same order as `points`
    pub pixels: Vec<PixelPoint>,
}

impl PointCloud {
    /// Build the cloud for a canvas of `canvas_size` × `canvas_size` pixels.
    ///
    /// An empty sample list yields an empty cloud.
    pub fn from_samples(samples: &[RawSample], canvas_size: u32) -> Self {
        let mut points = Vec::with_capacity(samples.len());
        let mut pixels = Vec::with_capacity(samples.len());

        for sample in samples {
            let x = SampleValue::new(sample.x);
            let y = SampleValue::new(sample.y);

            points.push(Point2D::new(x.relative(), -y.relative()));
            pixels.push(PixelPoint {
                x: x.to_pixel(canvas_size),
                y: i64::from(canvas_size) - y.to_pixel(canvas_size),
            });
        }

        Self {
            canvas_size,
            points,
            pixels,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}
