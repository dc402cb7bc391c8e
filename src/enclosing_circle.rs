//! # Minimal Enclosing Circle
//!
//! Computes the smallest circle covering a finite set of solver-space points.
//!
//! ## Algorithm
//!
//! [`min_enclosing_circle`] is the incremental construction: walk the points,
//! and whenever one falls outside the current candidate rebuild the candidate
//! with that point on its boundary, first alone, then paired with each earlier
//! violator (diameter), then with a third (circumcircle). The input is
//! shuffled with a fixed seed first, giving expected linear time while
//! keeping the output reproducible run to run.
//!
//! [`min_enclosing_circle_exhaustive`] checks every pair and triple. It is
//! O(n⁴) and exists as a cross-check for the fast solver.
//!
//! ## Numerics
//!
//! Coordinates live in roughly `[-1, 1]`. All containment checks use the
//! absolute [`EPSILON`], both inside the solver and in [`Circle::covers`].

use crate::point_cloud::Point2D;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Absolute slack for "point lies inside circle".
pub const EPSILON: f64 = 1e-7;

/// Below this the three points are treated as collinear.
const COLLINEAR_DET: f64 = 1e-12;

const SHUFFLE_SEED: u64 = 0x5eed_c1c1e;

/// Errors returned by the circle solvers.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CircleError {
    /// The point set was empty; there is no meaningful circle to return.
    #[error("invalid input: cannot fit a circle to an empty point set")]
    InvalidInput,
}

/// A circle in solver space.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2D,
    pub radius: f64,
}

impl Circle {
    pub const fn new(center: Point2D, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Zero-radius circle at `p`.
    pub const fn from_point(p: Point2D) -> Self {
        Self::new(p, 0.0)
    }

    /// Circle having segment `a`–`b` as its diameter.
    pub fn from_diameter(a: &Point2D, b: &Point2D) -> Self {
        Self::new(a.midpoint(b), a.distance(b) / 2.0)
    }

    /// Circle passing through all three points, or `None` when they are
    /// (nearly) collinear.
    pub fn circumscribe(a: &Point2D, b: &Point2D, c: &Point2D) -> Option<Self> {
        let (bx, by) = (b.x - a.x, b.y - a.y);
        let (cx, cy) = (c.x - a.x, c.y - a.y);
        let det = 2.0 * (bx * cy - by * cx);
        if det.abs() < COLLINEAR_DET {
            return None;
        }

        let b_sq = bx * bx + by * by;
        let c_sq = cx * cx + cy * cy;
        let ux = (cy * b_sq - by * c_sq) / det;
        let uy = (bx * c_sq - cx * b_sq) / det;

        Some(Self::new(Point2D::new(a.x + ux, a.y + uy), ux.hypot(uy)))
    }

    /// Circle with all three points on its boundary.
    ///
    /// Collinear input only shows up through rounding here; it falls back to
    /// the diameter circle of the widest pair, which covers all three.
    pub fn from_three(a: &Point2D, b: &Point2D, c: &Point2D) -> Self {
        Self::circumscribe(a, b, c).unwrap_or_else(|| {
            [
                Self::from_diameter(a, b),
                Self::from_diameter(a, c),
                Self::from_diameter(b, c),
            ]
            .into_iter()
            .max_by(|l, r| l.radius.total_cmp(&r.radius))
            .unwrap_or(Self::from_point(*a))
        })
    }

    /// `distance(center, p) <= radius + EPSILON`.
    pub fn contains(&self, p: &Point2D) -> bool {
        self.center.distance(p) <= self.radius + EPSILON
    }

    /// True if every point is inside the circle.
    pub fn covers(&self, points: &[Point2D]) -> bool {
        points.iter().all(|p| self.contains(p))
    }
}

/// Smallest circle covering `points`.
///
/// The result does not depend on input order beyond floating-point rounding.
///
/// # Errors
/// [`CircleError::InvalidInput`] for an empty slice.
///
/// # Example
/// ```
/// use als_report_lib::enclosing_circle::min_enclosing_circle;
/// use als_report_lib::point_cloud::Point2D;
///
/// let points = [Point2D::new(-1.0, 0.0), Point2D::new(1.0, 0.0), Point2D::new(0.0, 0.5)];
/// let circle = min_enclosing_circle(&points).unwrap();
///
/// assert!((circle.radius - 1.0).abs() < 1e-9);
/// assert!(circle.center.x.abs() < 1e-9 && circle.center.y.abs() < 1e-9);
/// ```
pub fn min_enclosing_circle(points: &[Point2D]) -> Result<Circle, CircleError> {
    if points.is_empty() {
        return Err(CircleError::InvalidInput);
    }

    let mut shuffled = points.to_vec();
    shuffled.shuffle(&mut StdRng::seed_from_u64(SHUFFLE_SEED));
    let p = &shuffled;

    let mut circle = Circle::from_point(p[0]);
    let mut rebuilds = 0usize;

    for i in 1..p.len() {
        if circle.contains(&p[i]) {
            continue;
        }
        rebuilds += 1;

        // p[i] is on the boundary of the circle covering p[..=i]
        circle = Circle::from_point(p[i]);
        for j in 0..i {
            if circle.contains(&p[j]) {
                continue;
            }

            // p[i] and p[j] are both on the boundary; any later violator
            // joins them, even when the triangle is obtuse
            circle = Circle::from_diameter(&p[i], &p[j]);
            for k in 0..j {
                if !circle.contains(&p[k]) {
                    circle = Circle::from_three(&p[i], &p[j], &p[k]);
                }
            }
        }
    }

    debug!(
        points = points.len(),
        rebuilds,
        radius = circle.radius,
        "minimal enclosing circle fitted"
    );

    Ok(circle)
}

/// Brute-force reference: smallest covering circle over all pair diameters
/// and triple circumcircles.
///
/// # Errors
/// [`CircleError::InvalidInput`] for an empty slice.
pub fn min_enclosing_circle_exhaustive(points: &[Point2D]) -> Result<Circle, CircleError> {
    let Some(first) = points.first() else {
        return Err(CircleError::InvalidInput);
    };

    // Always-covering start: centered on the first point, reaching the farthest
    let reach = points
        .iter()
        .map(|p| first.distance(p))
        .fold(0.0, f64::max);
    let mut best = Circle::new(*first, reach);

    let n = points.len();
    for a in 0..n {
        for b in (a + 1)..n {
            let candidate = Circle::from_diameter(&points[a], &points[b]);
            if candidate.radius < best.radius && candidate.covers(points) {
                best = candidate;
            }

            for c in (b + 1)..n {
                let Some(candidate) = Circle::circumscribe(&points[a], &points[b], &points[c])
                else {
                    continue;
                };
                if candidate.radius < best.radius && candidate.covers(points) {
                    best = candidate;
                }
            }
        }
    }

    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pt(x: f64, y: f64) -> Point2D {
        Point2D::new(x, y)
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert_eq!(min_enclosing_circle(&[]), Err(CircleError::InvalidInput));
        assert_eq!(
            min_enclosing_circle_exhaustive(&[]),
            Err(CircleError::InvalidInput)
        );
    }

    #[test]
    fn test_single_point() {
        let circle = min_enclosing_circle(&[pt(0.3, -0.7)]).unwrap();
        assert_eq!(circle.center, pt(0.3, -0.7));
        assert_eq!(circle.radius, 0.0);
    }

    #[test]
    fn test_two_points() {
        let circle = min_enclosing_circle(&[pt(0.0, 0.0), pt(0.6, 0.8)]).unwrap();
        assert_close(circle.radius, 0.5);
        assert_close(circle.center.x, 0.3);
        assert_close(circle.center.y, 0.4);
    }

    #[test]
    fn test_duplicate_points() {
        let points = vec![pt(0.5, 0.5); 5];
        let circle = min_enclosing_circle(&points).unwrap();
        assert_eq!(circle.radius, 0.0);
        assert_eq!(circle.center, pt(0.5, 0.5));
    }

    #[test]
    fn test_square_corners() {
        let points = [pt(1.0, 1.0), pt(-1.0, 1.0), pt(-1.0, -1.0), pt(1.0, -1.0)];
        let circle = min_enclosing_circle(&points).unwrap();
        assert_close(circle.radius, 2.0_f64.sqrt());
        assert_close(circle.center.x, 0.0);
        assert_close(circle.center.y, 0.0);
    }

    #[test]
    fn test_equilateral_triangle_uses_circumcircle() {
        let h = 3.0_f64.sqrt() / 2.0;
        let points = [pt(-0.5, 0.0), pt(0.5, 0.0), pt(0.0, h)];
        let circle = min_enclosing_circle(&points).unwrap();
        assert_close(circle.radius, 1.0 / 3.0_f64.sqrt());
        assert!(circle.covers(&points));
    }

    #[test]
    fn test_obtuse_triangle_uses_longest_side() {
        let points = [pt(0.0, 0.0), pt(0.8, 0.0), pt(0.4, 0.1)];
        let circle = min_enclosing_circle(&points).unwrap();
        assert_close(circle.radius, 0.4);
        assert_close(circle.center.x, 0.4);
        assert_close(circle.center.y, 0.0);
    }

    #[test]
    fn test_collinear_points() {
        let points = [pt(0.0, 0.0), pt(0.25, 0.0), pt(0.5, 0.0), pt(1.0, 0.0)];
        let circle = min_enclosing_circle(&points).unwrap();
        assert_close(circle.radius, 0.5);
        assert!(circle.covers(&points));
    }

    #[test]
    fn test_from_three_collinear_falls_back_to_widest_pair() {
        let (a, b, c) = (pt(0.0, 0.0), pt(2.0, 0.0), pt(1.0, 0.0));
        assert!(Circle::circumscribe(&a, &b, &c).is_none());

        let circle = Circle::from_three(&a, &b, &c);
        assert_close(circle.radius, 1.0);
        assert_close(circle.center.x, 1.0);
    }

    #[test]
    fn test_from_three_keeps_obtuse_circumcircle() {
        let (a, b, c) = (pt(0.0, 0.0), pt(0.8, 0.0), pt(0.4, 0.1));
        let circle = Circle::from_three(&a, &b, &c);
        for p in [a, b, c] {
            assert_close(circle.center.distance(&p), circle.radius);
        }
        assert!(circle.radius > 0.4);
    }

    #[test]
    fn test_ring_of_samples() {
        let points: Vec<Point2D> = (0..36)
            .map(|i| {
                let angle = f64::from(i) * std::f64::consts::TAU / 36.0;
                pt(0.1 + 0.6 * angle.cos(), -0.2 + 0.6 * angle.sin())
            })
            .collect();
        let circle = min_enclosing_circle(&points).unwrap();
        assert!((circle.radius - 0.6).abs() < 1e-6);
        assert!((circle.center.x - 0.1).abs() < 1e-6);
        assert!((circle.center.y + 0.2).abs() < 1e-6);
    }

    fn arb_points(max: usize) -> impl Strategy<Value = Vec<Point2D>> {
        prop::collection::vec((-1.0..1.0f64, -1.0..1.0f64), 1..=max)
            .prop_map(|coords| coords.into_iter().map(|(x, y)| pt(x, y)).collect())
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn prop_circle_covers_all_points(points in arb_points(40)) {
            let circle = min_enclosing_circle(&points).unwrap();
            prop_assert!(circle.covers(&points));
        }

        #[test]
        fn prop_matches_exhaustive_reference(points in arb_points(9)) {
            let fast = min_enclosing_circle(&points).unwrap();
            let reference = min_enclosing_circle_exhaustive(&points).unwrap();
            prop_assert!(reference.covers(&points));
            prop_assert!(
                (fast.radius - reference.radius).abs() < 1e-6,
                "fast {} vs reference {}", fast.radius, reference.radius
            );
        }

        #[test]
        fn prop_radius_is_order_independent(points in arb_points(30), rotate in 0usize..30) {
            let original = min_enclosing_circle(&points).unwrap();

            let mut reordered = points.clone();
            reordered.reverse();
            let shift = rotate % reordered.len();
            reordered.rotate_left(shift);

            let permuted = min_enclosing_circle(&reordered).unwrap();
            prop_assert!((original.radius - permuted.radius).abs() < 1e-6);
        }
    }
}
