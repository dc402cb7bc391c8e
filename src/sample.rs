//! Native sensor value normalization.
//!
//! The order of operations is fixed: scale to relative, then remap to
//! abs-relative, then scale to pixels. Tests compare exact floats.

use crate::MAX_SAMPLE_VALUE;

/// A native sensor reading with its derived forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SampleValue {
    pub native: i32,
}

impl SampleValue {
    pub fn new(native: i32) -> Self {
        Self { native }
    }

    /// `native / MAX_SAMPLE_VALUE`, no clamping.
    pub fn relative(self) -> f64 {
        f64::from(self.native) / f64::from(MAX_SAMPLE_VALUE)
    }

    /// `relative / 2 + 0.5`, the form used for pixel placement.
    pub fn abs_relative(self) -> f64 {
        self.relative() / 2.0 + 0.5
    }

    /// `floor(abs_relative * size)`.
    ///
    /// Not clamped to the canvas; callers drawing to a fixed canvas clip.
    pub fn to_pixel(self, size: u32) -> i64 {
        (self.abs_relative() * f64::from(size)).floor() as i64
    }
}

impl From<i32> for SampleValue {
    fn from(native: i32) -> Self {
        Self::new(native)
    }
}
