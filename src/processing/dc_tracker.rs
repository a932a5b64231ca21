// src/processing/dc_tracker.rs
//! Exponential DC baseline estimator
//!
//! Fixed-point form from the reference firmware:
//! `p += ((x << 15) - p) >> 4`, estimate is `p >> 15`. The 1/16 step gives
//! a slow-moving baseline that follows ambient drift while leaving the
//! cardiac band largely intact.

use crate::config::constants::beat::DC_ESTIMATOR_SHIFT;

/// Running estimate of a channel's DC component
#[derive(Debug, Clone, Default)]
pub struct DcTracker {
    reg: i64,
    primed: bool,
}

impl DcTracker {
    /// Create an unprimed tracker; the first sample seeds the baseline
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in a raw sample and return the updated baseline estimate
    pub fn update(&mut self, sample: u32) -> i64 {
        let x = (sample as i64) << 15;
        if !self.primed {
            // Seeding from the first sample avoids a multi-second ramp from 0
            self.reg = x;
            self.primed = true;
        } else {
            self.reg += (x - self.reg) >> DC_ESTIMATOR_SHIFT;
        }
        self.reg >> 15
    }

    /// Current baseline estimate
    pub fn estimate(&self) -> i64 {
        self.reg >> 15
    }

    /// Forget all history
    pub fn reset(&mut self) {
        self.reg = 0;
        self.primed = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_sample_seeds_baseline() {
        let mut tracker = DcTracker::new();
        assert_eq!(tracker.update(80_000), 80_000);
    }

    #[test]
    fn test_converges_to_constant_input() {
        let mut tracker = DcTracker::new();
        tracker.update(0);
        // Worst case start, constant input thereafter
        let mut estimate = 0;
        for _ in 0..200 {
            estimate = tracker.update(100_000);
        }
        assert!((estimate - 100_000).abs() <= 1);
    }

    #[test]
    fn test_tracks_slow_drift() {
        let mut tracker = DcTracker::new();
        tracker.update(50_000);
        for i in 0..500 {
            tracker.update(50_000 + i * 10);
        }
        let estimate = tracker.estimate();
        // Lags the ramp but stays in its neighborhood
        assert!(estimate > 53_000 && estimate < 55_000);
    }

    #[test]
    fn test_reset() {
        let mut tracker = DcTracker::new();
        tracker.update(90_000);
        tracker.reset();
        assert_eq!(tracker.estimate(), 0);
        assert_eq!(tracker.update(1_000), 1_000);
    }
}
