//! # Tolerance Evaluation
//!
//! Classifies a measured value against an expected value with a
//! [`ToleranceBand`]: an optional limit below and an optional limit above.
//! A missing limit means that side never fails.
//!
//! The two bands used for reports are special cases of the same rule:
//! - [`ToleranceBand::symmetric`]: `±t` around the expected value
//! - [`ToleranceBand::minimum`]: anything at or above the expected value

use serde::{Deserialize, Serialize};
use std::fmt;

/// Allowed deviation below (`negative`) and above (`positive`) the expected value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ToleranceBand {
    /// Maximum allowed `expected - value`; `None` is unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub negative: Option<f64>,
    /// Maximum allowed `value - expected`; `None` is unbounded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub positive: Option<f64>,
}

impl ToleranceBand {
    pub const fn new(negative: Option<f64>, positive: Option<f64>) -> Self {
        Self { negative, positive }
    }

    /// `±tolerance` around the expected value.
    pub const fn symmetric(tolerance: f64) -> Self {
        Self::new(Some(tolerance), Some(tolerance))
    }

    /// Value must not be below the expected value; no upper limit.
    pub const fn minimum() -> Self {
        Self::new(Some(0.0), None)
    }

    /// Never fails.
    pub const fn unbounded() -> Self {
        Self::new(None, None)
    }

    pub fn classify(&self, value: f64, expected: f64) -> Verdict {
        let too_low = self.negative.is_some_and(|limit| expected - value > limit);
        let too_high = self.positive.is_some_and(|limit| value - expected > limit);

        if too_low || too_high {
            Verdict::Fail
        } else {
            Verdict::Pass
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Pass,
    Fail,
}

impl Verdict {
    pub fn is_pass(self) -> bool {
        self == Verdict::Pass
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Pass => write!(f, "PASS"),
            Verdict::Fail => write!(f, "FAIL"),
        }
    }
}

/// Result of evaluating one value. Never modified after construction.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedMetric {
    pub value: f64,
    pub expected: f64,
    pub band: ToleranceBand,
    pub verdict: Verdict,
}

impl ClassifiedMetric {
    /// # Example
    /// ```
    /// use als_report_lib::tolerance::{ClassifiedMetric, ToleranceBand, Verdict};
    ///
    /// let metric = ClassifiedMetric::evaluate(0.04, 0.0, ToleranceBand::symmetric(0.05));
    /// assert_eq!(metric.verdict, Verdict::Pass);
    ///
    /// let metric = ClassifiedMetric::evaluate(0.49, 0.5, ToleranceBand::minimum());
    /// assert_eq!(metric.verdict, Verdict::Fail);
    /// ```
    pub fn evaluate(value: f64, expected: f64, band: ToleranceBand) -> Self {
        Self {
            value,
            expected,
            band,
            verdict: band.classify(value, expected),
        }
    }

    pub fn passed(&self) -> bool {
        self.verdict.is_pass()
    }
}

/// Configured expectation for one report metric.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MetricSpec {
    pub expected: f64,
    pub band: ToleranceBand,
}

impl MetricSpec {
    pub const fn new(expected: f64, band: ToleranceBand) -> Self {
        Self { expected, band }
    }

    pub fn evaluate(&self, value: f64) -> ClassifiedMetric {
        ClassifiedMetric::evaluate(value, self.expected, self.band)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symmetric_band() {
        let band = ToleranceBand::symmetric(0.05);

        assert_eq!(band.classify(0.04, 0.0), Verdict::Pass);
        assert_eq!(band.classify(0.06, 0.0), Verdict::Fail);
        assert_eq!(band.classify(-0.06, 0.0), Verdict::Fail);
        assert_eq!(band.classify(-0.04, 0.0), Verdict::Pass);
        assert_eq!(band.classify(0.0, 0.0), Verdict::Pass);
    }

    #[test]
    fn test_minimum_band() {
        let band = ToleranceBand::minimum();

        assert_eq!(band.classify(0.5, 0.5), Verdict::Pass);
        assert_eq!(band.classify(0.49999, 0.5), Verdict::Fail);
        assert_eq!(band.classify(10.0, 0.5), Verdict::Pass);
    }

    #[test]
    fn test_unbounded_sides_never_fail() {
        assert_eq!(
            ToleranceBand::unbounded().classify(-1e9, 0.0),
            Verdict::Pass
        );
        assert_eq!(ToleranceBand::unbounded().classify(1e9, 0.0), Verdict::Pass);

        let upper_only = ToleranceBand::new(None, Some(0.1));
        assert_eq!(upper_only.classify(-100.0, 1.0), Verdict::Pass);
        assert_eq!(upper_only.classify(1.2, 1.0), Verdict::Fail);
    }

    #[test]
    fn test_asymmetric_band() {
        let band = ToleranceBand::new(Some(0.1), Some(0.3));
        assert_eq!(band.classify(0.95, 1.0), Verdict::Pass);
        assert_eq!(band.classify(0.8, 1.0), Verdict::Fail);
        assert_eq!(band.classify(1.25, 1.0), Verdict::Pass);
        assert_eq!(band.classify(1.35, 1.0), Verdict::Fail);
    }

    #[test]
    fn test_classified_metric_keeps_inputs() {
        let spec = MetricSpec::new(1.0, ToleranceBand::symmetric(0.01));
        let metric = spec.evaluate(0.995);

        assert_eq!(metric.value, 0.995);
        assert_eq!(metric.expected, 1.0);
        assert_eq!(metric.band, ToleranceBand::symmetric(0.01));
        assert!(metric.passed());
        assert_eq!(spec.expected, 1.0);
    }

    #[test]
    fn test_band_toml_roundtrip_omits_unbounded_side() {
        let spec = MetricSpec::new(0.5, ToleranceBand::minimum());
        let text = toml::to_string(&spec).unwrap();
        assert!(!text.contains("positive"));

        let parsed: MetricSpec = toml::from_str(&text).unwrap();
        assert_eq!(parsed, spec);
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::Pass.to_string(), "PASS");
        assert_eq!(Verdict::Fail.to_string(), "FAIL");
    }
}
