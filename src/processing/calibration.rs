// src/processing/calibration.rs
//! Ratio-of-ratios to SpO2 calibration
//!
//! The curve is the empirical lookup table from the AN-6595 reference
//! application (indexed there by `ratio * 100`), sampled at 0.1-ratio steps
//! into piecewise-linear breakpoints. Evaluation is a binary search over
//! the sorted breakpoints followed by linear interpolation; ratios outside
//! the domain clamp to the boundary SpO2.

use crate::error::PpgError;

/// `(ratio, spo2_percent)` breakpoints sampled from the AN-6595 lookup table
pub const AN6595_BREAKPOINTS: [(f32, f32); 18] = [
    (0.10, 97.0),
    (0.20, 99.0),
    (0.30, 100.0),
    (0.40, 100.0),
    (0.50, 99.0),
    (0.60, 97.0),
    (0.70, 94.0),
    (0.80, 90.0),
    (0.90, 86.0),
    (1.00, 80.0),
    (1.10, 74.0),
    (1.20, 66.0),
    (1.30, 58.0),
    (1.40, 49.0),
    (1.50, 39.0),
    (1.60, 28.0),
    (1.70, 16.0),
    (1.80, 3.0),
];

/// Immutable ratio-to-SpO2 calibration curve
#[derive(Debug, Clone)]
pub struct CalibrationCurve {
    breakpoints: Vec<(f32, f32)>,
}

/// Result of a curve lookup
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurvePoint {
    /// Interpolated (or boundary-clamped) SpO2 percent
    pub spo2: f32,
    /// Whether the queried ratio fell inside the curve domain
    pub in_domain: bool,
}

impl CalibrationCurve {
    /// Build a curve from sorted breakpoints
    pub fn new(breakpoints: Vec<(f32, f32)>) -> Result<Self, PpgError> {
        if breakpoints.len() < 2 {
            return Err(PpgError::Calibration(
                "need at least two breakpoints".to_string(),
            ));
        }
        if !breakpoints.windows(2).all(|w| w[0].0 < w[1].0) {
            return Err(PpgError::Calibration(
                "breakpoints must be strictly increasing in ratio".to_string(),
            ));
        }
        if breakpoints
            .iter()
            .any(|&(r, s)| !r.is_finite() || !s.is_finite())
        {
            return Err(PpgError::Calibration(
                "breakpoints must be finite".to_string(),
            ));
        }
        Ok(Self { breakpoints })
    }

    /// The reference AN-6595 curve
    pub fn an6595() -> Self {
        // The constant table is sorted and finite
        Self::new(AN6595_BREAKPOINTS.to_vec()).unwrap_or_else(|_| unreachable!())
    }

    /// Curve domain as `(min_ratio, max_ratio)`
    pub fn domain(&self) -> (f32, f32) {
        (
            self.breakpoints[0].0,
            self.breakpoints[self.breakpoints.len() - 1].0,
        )
    }

    /// Evaluate the curve at `ratio`
    ///
    /// Lookups at a breakpoint ratio return the breakpoint SpO2 exactly;
    /// between breakpoints the value is linearly interpolated; outside the
    /// domain it clamps to the nearest boundary and reports `in_domain =
    /// false`.
    pub fn lookup(&self, ratio: f32) -> CurvePoint {
        let first = self.breakpoints[0];
        let last = self.breakpoints[self.breakpoints.len() - 1];

        if ratio.is_nan() || ratio < first.0 {
            return CurvePoint {
                spo2: first.1,
                in_domain: false,
            };
        }
        // +inf falls through to the high clamp
        if ratio > last.0 {
            return CurvePoint {
                spo2: last.1,
                in_domain: false,
            };
        }

        // Index of the first breakpoint with ratio >= query
        let upper = self
            .breakpoints
            .partition_point(|&(r, _)| r < ratio);
        let (r1, s1) = self.breakpoints[upper];
        if r1 == ratio || upper == 0 {
            return CurvePoint {
                spo2: s1,
                in_domain: true,
            };
        }
        let (r0, s0) = self.breakpoints[upper - 1];
        let t = (ratio - r0) / (r1 - r0);
        CurvePoint {
            spo2: s0 + t * (s1 - s0),
            in_domain: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoints_are_exact() {
        let curve = CalibrationCurve::an6595();
        for &(ratio, spo2) in AN6595_BREAKPOINTS.iter() {
            let point = curve.lookup(ratio);
            assert_eq!(point.spo2, spo2, "at ratio {}", ratio);
            assert!(point.in_domain);
        }
    }

    #[test]
    fn test_midpoint_interpolation() {
        let curve = CalibrationCurve::an6595();
        // Halfway between (0.60, 97) and (0.70, 94)
        let point = curve.lookup(0.65);
        assert!((point.spo2 - 95.5).abs() < 1e-3);
        assert!(point.in_domain);
    }

    #[test]
    fn test_clamp_below_domain() {
        let curve = CalibrationCurve::an6595();
        let point = curve.lookup(0.01);
        assert_eq!(point.spo2, 97.0);
        assert!(!point.in_domain);
    }

    #[test]
    fn test_clamp_above_domain() {
        let curve = CalibrationCurve::an6595();
        let point = curve.lookup(5.0);
        assert_eq!(point.spo2, 3.0);
        assert!(!point.in_domain);
    }

    #[test]
    fn test_non_finite_ratio_clamps_to_nearest_boundary() {
        let curve = CalibrationCurve::an6595();
        assert!(!curve.lookup(f32::NAN).in_domain);

        let high = curve.lookup(f32::INFINITY);
        assert_eq!(high.spo2, 3.0);
        assert!(!high.in_domain);

        let low = curve.lookup(f32::NEG_INFINITY);
        assert_eq!(low.spo2, 97.0);
        assert!(!low.in_domain);
    }

    #[test]
    fn test_rejects_malformed_breakpoints() {
        assert!(CalibrationCurve::new(vec![(0.5, 99.0)]).is_err());
        assert!(CalibrationCurve::new(vec![(0.5, 99.0), (0.3, 100.0)]).is_err());
        assert!(CalibrationCurve::new(vec![(0.3, f32::NAN), (0.5, 99.0)]).is_err());
    }

    #[test]
    fn test_domain() {
        let curve = CalibrationCurve::an6595();
        let (lo, hi) = curve.domain();
        assert_eq!(lo, 0.10);
        assert_eq!(hi, 1.80);
    }
}
