//! # ALS Report Viewer Core Library
//!
//! This library reduces ambient light sensor (ALS) calibration reports to a
//! geometric fit and classifies the fit against pass/fail tolerance bands.
//! Each report carries a list of raw sensor samples; the samples are
//! normalized into a bounded coordinate space, the smallest circle covering
//! all of them is computed, and the circle's center and radius are checked
//! against configured expectations.
//!
//! ## Design Philosophy
//!
//! ### Pure Core
//! - **No I/O in the math**: [`sample`], [`point_cloud`], [`enclosing_circle`]
//!   and [`tolerance`] are pure functions over owned values
//! - **One report at a time**: nothing is retained between reports, every
//!   [`analysis::ReportAnalysis`] is built from scratch and dropped after rendering
//! - **Degenerate geometry is valid**: a single point, duplicates or a
//!   collinear cloud all have well defined minimal circles
//!
//! ### Two Coordinate Spaces
//! - **Solver space**: `(x / 2048, -(y / 2048))`, used for the circle fit
//! - **Pixel space**: `floor((v / 2048 / 2 + 0.5) * size)`, used for drawing
//!
//! Both are derived independently from the same raw sample.
//!
//! ### Data Flow
//! 1. **Ingest**: JSON report → [`Report`] ([`report_data`])
//! 2. **Reduce**: samples → points → [`enclosing_circle::Circle`] ([`analysis`])
//! 3. **Classify**: circle metrics → [`tolerance::ClassifiedMetric`]
//! 4. **Render**: raster canvas and terminal preview ([`renderer`])
//!
//! ## Core Types
//!
//! - [`RawSample`]: a single sensor reading in native units
//! - [`Report`]: serial number plus the ordered sample list

use serde::{Deserialize, Serialize};

// Module declarations
pub mod analysis;
pub mod batch;
pub mod canvas;
pub mod config;
pub mod enclosing_circle;
pub mod point_cloud;
pub mod renderer;
pub mod report_data;
pub mod sample;
pub mod tolerance;

/// Full scale of a native sensor reading.
///
/// Native values nominally span `0..=MAX_SAMPLE_VALUE`; the midpoint
/// (1024) corresponds to the optical axis.
pub const MAX_SAMPLE_VALUE: i32 = 2048;

/// A single raw sensor reading in native units.
///
/// `x` and `y` are the two angular axes used for the circle fit. `z` is the
/// auxiliary axis; only the first sample's `z` is evaluated.
///
/// Values outside `0..=MAX_SAMPLE_VALUE` are not rejected. They flow through
/// normalization unchanged so a mis-scaled report stays visible.
///
/// # Example
/// ```
/// use als_report_lib::RawSample;
///
/// let center = RawSample { x: 1024, y: 1024, z: 2048 };
/// assert_eq!(center.x, 1024);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSample {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

/// A calibration report as handed to the core.
///
/// Created by [`report_data`], consumed read-only by [`analysis::analyze`].
///
/// # Example
/// ```
/// use als_report_lib::{RawSample, Report};
///
/// let report = Report {
///     serial_number: "ALS-0001".to_string(),
///     samples: vec![RawSample { x: 1024, y: 1024, z: 2048 }],
/// };
///
/// assert_eq!(report.samples.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Hardware serial number of the sensor node
    pub serial_number: String,
    /// Samples in acquisition order
    pub samples: Vec<RawSample>,
}
