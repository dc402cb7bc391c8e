//! # Report Visualization Rendering
//!
//! This module renders a [`ReportAnalysis`] both to a raster draw target and to
//! ASCII terminal output. The raster view is what operators inspect; the
//! ASCII view is a quick preview while stepping through a batch.
//!
//! Metric text is colored by verdict only: [`PASS_COLOR`] or [`FAIL_COLOR`].

use crate::analysis::ReportAnalysis;
use crate::tolerance::{ClassifiedMetric, Verdict};
use chrono::{DateTime, Local};
use embedded_graphics::{
    mono_font::{ascii::FONT_9X15, MonoTextStyle},
    pixelcolor::Rgb888,
    prelude::*,
    primitives::{Circle as CirclePrimitive, Line, PrimitiveStyle},
    text::Text,
};

pub const SAMPLE_COLOR: Rgb888 = Rgb888::GREEN;
pub const AXIS_COLOR: Rgb888 = Rgb888::BLUE;
pub const FIT_COLOR: Rgb888 = Rgb888::RED;
pub const LABEL_COLOR: Rgb888 = Rgb888::MAGENTA;
pub const PASS_COLOR: Rgb888 = Rgb888::GREEN;
pub const FAIL_COLOR: Rgb888 = Rgb888::RED;

const TEXT_LEFT: i32 = 10;
const LINE_HEIGHT: i32 = 20;

/// Free-text annotations drawn alongside the analysis.
#[derive(Clone, Debug)]
pub struct RenderLabels {
    /// Where the report came from, usually its file path
    pub source: String,
    pub rendered_at: DateTime<Local>,
}

pub fn verdict_color(verdict: Verdict) -> Rgb888 {
    match verdict {
        Verdict::Pass => PASS_COLOR,
        Verdict::Fail => FAIL_COLOR,
    }
}

/// Format a metric value the way it is shown on the canvas
fn format_metric(label: &str, metric: &ClassifiedMetric) -> String {
    let precision = if label == "z" { 3 } else { 2 };
    format!("{}: {:.*}", label, precision, metric.value)
}

fn to_point(x: i64, y: i64) -> Option<Point> {
    Some(Point::new(i32::try_from(x).ok()?, i32::try_from(y).ok()?))
}

/// Render one report onto `display`.
///
/// Draws sample markers, the axis guides through the canvas middle, the
/// fitted circle with its center marks, and the annotation text.
pub fn draw_report<D>(
    analysis: &ReportAnalysis,
    labels: &RenderLabels,
    display: &mut D,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb888>,
{
    let size = analysis.cloud.canvas_size as i32;
    let half = size / 2;

    // Samples; markers that do not fit in i32 cannot land on the canvas anyway
    display.draw_iter(
        analysis
            .cloud
            .pixels
            .iter()
            .filter_map(|p| to_point(p.x, p.y))
            .map(|point| Pixel(point, SAMPLE_COLOR)),
    )?;

    // Axis guides
    let axis = PrimitiveStyle::with_stroke(AXIS_COLOR, 1);
    Line::new(Point::new(half, 0), Point::new(half, size))
        .into_styled(axis)
        .draw(display)?;
    Line::new(Point::new(0, half), Point::new(size, half))
        .into_styled(axis)
        .draw(display)?;

    // Fitted circle and center marks. Fits many canvases wide only come
    // from mis-scaled data and are skipped.
    let fit = &analysis.pixel_circle;
    let drawable = fit.radius <= i64::from(size) * 8;
    if let Some(center) = to_point(fit.center.x, fit.center.y).filter(|_| drawable) {
        let stroke = PrimitiveStyle::with_stroke(FIT_COLOR, 1);
        let diameter = u32::try_from(fit.radius.saturating_mul(2)).unwrap_or(u32::MAX);
        let mark = (analysis.cloud.canvas_size / 256).max(1) * 2;

        for d in [diameter, 2, mark] {
            CirclePrimitive::with_center(center, d)
                .into_styled(stroke)
                .draw(display)?;
        }
    }

    // Annotations
    let label_style = MonoTextStyle::new(&FONT_9X15, LABEL_COLOR);
    let mut y = LINE_HEIGHT;
    Text::new(&labels.source, Point::new(TEXT_LEFT, y), label_style).draw(display)?;
    y += LINE_HEIGHT;
    Text::new(&analysis.serial_number, Point::new(TEXT_LEFT, y), label_style).draw(display)?;

    for (label, metric) in analysis.metrics.labeled() {
        y += LINE_HEIGHT;
        let style = MonoTextStyle::new(&FONT_9X15, verdict_color(metric.verdict));
        let text = format_metric(label, metric);
        Text::new(&text, Point::new(TEXT_LEFT, y), style).draw(display)?;
    }

    let stamp = labels.rendered_at.format("%Y-%m-%d %H:%M").to_string();
    Text::new(&stamp, Point::new(TEXT_LEFT, size - 10), label_style).draw(display)?;

    Ok(())
}

/// Build the ASCII preview: point cloud, fitted circle and metric lines.
///
/// `rows` is the grid height; the grid is twice as wide to compensate for
/// terminal character aspect.
pub fn ascii_preview(analysis: &ReportAnalysis, rows: usize) -> String {
    let rows = rows.max(3);
    let cols = rows * 2;

    // Solver space [-1, 1] -> grid cell, same abs-relative mapping as pixels
    let to_cell = |v: f64, cells: usize| -> Option<usize> {
        let cell = ((v / 2.0 + 0.5) * (cells - 1) as f64).round();
        (cell >= 0.0 && cell < cells as f64).then_some(cell as usize)
    };
    // Rows count from the top, solver y grows upwards
    let to_row = |v: f64| to_cell(v, rows).map(|r| rows - 1 - r);

    let mut grid = vec![vec![' '; cols]; rows];

    let (mid_row, mid_col) = (rows / 2, cols / 2);
    for (r, row) in grid.iter_mut().enumerate() {
        row[mid_col] = if r == mid_row { '+' } else { '│' };
    }
    for (c, cell) in grid[mid_row].iter_mut().enumerate() {
        if c != mid_col {
            *cell = '─';
        }
    }

    let circle = &analysis.circle;
    if circle.radius > 0.0 {
        let steps = cols * 4;
        for i in 0..steps {
            let angle = i as f64 * std::f64::consts::TAU / steps as f64;
            let x = circle.center.x + circle.radius * angle.cos();
            let y = circle.center.y + circle.radius * angle.sin();
            if let (Some(c), Some(r)) = (to_cell(x, cols), to_row(y)) {
                grid[r][c] = 'o';
            }
        }
    }

    for point in &analysis.cloud.points {
        if let (Some(c), Some(r)) = (to_cell(point.x, cols), to_row(point.y)) {
            grid[r][c] = '•';
        }
    }

    if let (Some(c), Some(r)) = (to_cell(circle.center.x, cols), to_row(circle.center.y)) {
        grid[r][c] = 'X';
    }

    let mut out = String::new();
    out.push_str(&format!("{}\n", analysis.serial_number));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    for (label, metric) in analysis.metrics.labeled() {
        out.push_str(&format!(
            "{:<16} expected {:.3}  [{}]\n",
            format_metric(label, metric),
            metric.expected,
            metric.verdict
        ));
    }
    if analysis.pixel_circle.out_of_canvas {
        out.push_str("⚠ fitted center is outside the canvas\n");
    }
    out
}

/// Print the ASCII preview to the terminal.
pub fn draw_ascii(analysis: &ReportAnalysis, rows: usize) {
    println!("{}", ascii_preview(analysis, rows));
}
