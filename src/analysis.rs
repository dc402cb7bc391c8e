//! Per-report reduction: samples → circle fit → classified metrics.
//!
//! [`analyze`] is everything the renderers need for one report. It performs
//! no I/O and keeps nothing once the returned value is dropped.

use crate::config::ToleranceConfig;
use crate::enclosing_circle::{min_enclosing_circle, Circle, CircleError};
use crate::point_cloud::{PixelPoint, PointCloud};
use crate::sample::SampleValue;
use crate::tolerance::ClassifiedMetric;
use crate::Report;
use serde::Serialize;
use tracing::{info, warn};

/// Inputs to [`analyze`] besides the report itself.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnalysisSettings {
    pub canvas_size: u32,
    pub tolerances: ToleranceConfig,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            canvas_size: 1024,
            tolerances: ToleranceConfig::default(),
        }
    }
}

/// The fitted circle in image space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct PixelCircle {
    pub center: PixelPoint,
    pub radius: i64,
    /// Center falls outside `[0, size)` on either axis. Not clamped.
    pub out_of_canvas: bool,
}

impl PixelCircle {
    /// `center = floor((c / 2 + 0.5) * size)`, `radius = floor(r / 2 * size)`.
    pub fn from_circle(circle: &Circle, size: u32) -> Self {
        let size_f = f64::from(size);
        let to_pixel = |coord: f64| ((coord / 2.0 + 0.5) * size_f).floor() as i64;

        let center = PixelPoint {
            x: to_pixel(circle.center.x),
            y: to_pixel(circle.center.y),
        };
        let radius = (circle.radius / 2.0 * size_f).floor() as i64;

        let inside = |v: i64| (0..i64::from(size)).contains(&v);
        let out_of_canvas = !(inside(center.x) && inside(center.y));

        Self {
            center,
            radius,
            out_of_canvas,
        }
    }
}

/// The four classified metrics of a report.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ReportMetrics {
    pub center_x: ClassifiedMetric,
    pub center_y: ClassifiedMetric,
    pub radius: ClassifiedMetric,
    /// First sample's `z`, relative to full scale
    pub z_axis: ClassifiedMetric,
}

impl ReportMetrics {
    /// `(label, metric)` in display order.
    pub fn labeled(&self) -> [(&'static str, &ClassifiedMetric); 4] {
        [
            ("x", &self.center_x),
            ("y", &self.center_y),
            ("radius", &self.radius),
            ("z", &self.z_axis),
        ]
    }

    pub fn all_passed(&self) -> bool {
        self.labeled().iter().all(|(_, metric)| metric.passed())
    }
}

/// Everything produced for one report.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReportAnalysis {
    pub serial_number: String,
    pub cloud: PointCloud,
    pub circle: Circle,
    pub pixel_circle: PixelCircle,
    pub metrics: ReportMetrics,
}

/// Reduce a report to its circle fit and classified metrics.
///
/// # Errors
/// [`CircleError::InvalidInput`] when the report has no samples.
pub fn analyze(report: &Report, settings: &AnalysisSettings) -> Result<ReportAnalysis, CircleError> {
    let cloud = PointCloud::from_samples(&report.samples, settings.canvas_size);
    let circle = min_enclosing_circle(&cloud.points)?;
    let pixel_circle = PixelCircle::from_circle(&circle, settings.canvas_size);

    if pixel_circle.out_of_canvas {
        warn!(
            serial = %report.serial_number,
            center_x = pixel_circle.center.x,
            center_y = pixel_circle.center.y,
            "fitted circle center lies outside the canvas"
        );
    }

    // Non-empty: the solver rejected empty input above
    let z = report
        .samples
        .first()
        .map_or(0.0, |sample| SampleValue::new(sample.z).relative());

    let tolerances = &settings.tolerances;
    let metrics = ReportMetrics {
        center_x: tolerances.center_x.evaluate(circle.center.x),
        center_y: tolerances.center_y.evaluate(circle.center.y),
        radius: tolerances.radius.evaluate(circle.radius),
        z_axis: tolerances.z_axis.evaluate(z),
    };

    info!(
        serial = %report.serial_number,
        samples = cloud.len(),
        x = circle.center.x,
        y = circle.center.y,
        radius = circle.radius,
        passed = metrics.all_passed(),
        "report analyzed"
    );

    Ok(ReportAnalysis {
        serial_number: report.serial_number.clone(),
        cloud,
        circle,
        pixel_circle,
        metrics,
    })
}
