// src/processing/oxygen.rs
//! Window-based SpO2 and cross-check heart rate estimation
//!
//! Operates on two equal-length, chronologically aligned sample windows.
//! SpO2 comes from the ratio-of-ratios `(AC_red/DC_red) / (AC_ir/DC_ir)`
//! mapped through the calibration curve; the cross-check heart rate comes
//! from valley spacing in the IR channel. Pure function of its inputs —
//! the only state is the immutable calibration curve, so repeated calls on
//! the same window are bit-identical.

use crate::config::constants::signal::MIN_WINDOW_SIZE_SAMPLES;
use crate::config::constants::spo2::SMOOTHING_SPAN;
use crate::config::PipelineConfig;
use crate::error::PpgError;
use crate::processing::calibration::CalibrationCurve;
use crate::processing::peaks::{find_peaks, mean_interval};
use crate::types::VitalsEstimate;
use crate::utils::stats::channel_stats;
use tracing::{debug, warn};

/// Windowed SpO2 and heart-rate estimator
pub struct OxygenEstimator {
    curve: CalibrationCurve,
    min_perfusion: f32,
    ratio_bounds: (f32, f32),
    max_peaks: usize,
    min_peak_distance: usize,
    sampling_rate_hz: f32,
}

impl OxygenEstimator {
    /// Build an estimator from the pipeline configuration
    pub fn new(config: &PipelineConfig) -> Result<Self, PpgError> {
        let curve = CalibrationCurve::new(config.spo2.calibration.clone())?;
        if config.spo2.ratio_bounds.0 >= config.spo2.ratio_bounds.1 {
            return Err(PpgError::config("oxygen_estimator", "empty ratio bounds"));
        }
        Ok(Self {
            curve,
            min_perfusion: config.spo2.min_perfusion,
            ratio_bounds: config.spo2.ratio_bounds,
            max_peaks: config.spo2.max_peaks,
            min_peak_distance: config.refractory_samples() as usize,
            sampling_rate_hz: config.sampling_rate_hz as f32,
        })
    }

    /// The calibration curve in use
    pub fn curve(&self) -> &CalibrationCurve {
        &self.curve
    }

    /// Estimate SpO2 and heart rate from one window.
    ///
    /// Mismatched or too-short windows are a caller contract violation and
    /// report both flags false; they never panic or produce float faults.
    pub fn calculate(&self, ir: &[u32], red: &[u32]) -> VitalsEstimate {
        if ir.len() != red.len() {
            warn!(ir_len = ir.len(), red_len = red.len(), "mismatched window lengths");
            return VitalsEstimate::invalid();
        }
        if ir.len() < MIN_WINDOW_SIZE_SAMPLES {
            warn!(len = ir.len(), "window too short for estimation");
            return VitalsEstimate::invalid();
        }

        let ir_stats = channel_stats(ir);
        let red_stats = channel_stats(red);

        let (bpm, bpm_valid) = self.window_heart_rate(ir, ir_stats.dc);

        // Perfusion: without a pulsatile component on both channels the
        // ratio is meaningless
        let ir_perfusion = perfusion(ir_stats.ac_rms, ir_stats.dc);
        let red_perfusion = perfusion(red_stats.ac_rms, red_stats.dc);
        let perfused = ir_perfusion >= self.min_perfusion && red_perfusion >= self.min_perfusion;

        let ratio = red_perfusion / ir_perfusion;
        let point = self.curve.lookup(ratio);
        let spo2_valid = perfused
            && point.in_domain
            && ratio >= self.ratio_bounds.0
            && ratio <= self.ratio_bounds.1;

        debug!(
            ratio,
            spo2 = point.spo2,
            spo2_valid,
            bpm,
            bpm_valid,
            "window estimate"
        );

        VitalsEstimate {
            spo2: point.spo2,
            spo2_valid,
            bpm,
            bpm_valid,
        }
    }

    /// Heart rate from valley spacing in the IR channel: de-mean, invert so
    /// valleys become peaks, smooth, then locate peaks over an adaptive
    /// height floor
    fn window_heart_rate(&self, ir: &[u32], dc: f32) -> (f32, bool) {
        let n = ir.len();
        if n < SMOOTHING_SPAN * 2 {
            return (0.0, false);
        }

        let inverted: Vec<f32> = ir.iter().map(|&x| dc - x as f32).collect();
        let mut smoothed = Vec::with_capacity(n - SMOOTHING_SPAN + 1);
        for k in 0..=(n - SMOOTHING_SPAN) {
            let sum: f32 = inverted[k..k + SMOOTHING_SPAN].iter().sum();
            smoothed.push(sum / SMOOTHING_SPAN as f32);
        }

        // Adaptive floor: RMS of the smoothed signal sits between the noise
        // and the pulse crests
        let rms = (smoothed.iter().map(|&x| x * x).sum::<f32>() / smoothed.len() as f32).sqrt();
        let min_height = rms.max(1.0);

        let peaks = find_peaks(&smoothed, min_height, self.min_peak_distance, self.max_peaks);
        match mean_interval(&peaks) {
            Some(interval) if interval > 0.0 => {
                (60.0 * self.sampling_rate_hz / interval, true)
            }
            _ => (0.0, false),
        }
    }
}

fn perfusion(ac_rms: f32, dc: f32) -> f32 {
    if dc > 0.0 {
        ac_rms / dc
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn estimator() -> OxygenEstimator {
        OxygenEstimator::new(&PipelineConfig::default()).unwrap()
    }

    fn sine_channel(fs: u32, freq_hz: f32, n: usize, dc: f32, amplitude: f32) -> Vec<u32> {
        (0..n)
            .map(|i| {
                let t = i as f32 / fs as f32;
                (dc + amplitude * (2.0 * PI * freq_hz * t).sin()).round() as u32
            })
            .collect()
    }

    #[test]
    fn test_mismatched_lengths_invalid() {
        let est = estimator();
        let result = est.calculate(&[1000; 100], &[1000; 99]);
        assert!(!result.spo2_valid);
        assert!(!result.bpm_valid);
    }

    #[test]
    fn test_short_window_invalid() {
        let est = estimator();
        let result = est.calculate(&[1000; 4], &[1000; 4]);
        assert!(!result.spo2_valid);
        assert!(!result.bpm_valid);
    }

    #[test]
    fn test_flat_window_invalid() {
        let est = estimator();
        let result = est.calculate(&[80_000; 200], &[60_000; 200]);
        assert!(!result.spo2_valid);
        assert!(!result.bpm_valid);
    }

    #[test]
    fn test_window_heart_rate_from_sine() {
        let est = estimator();
        // 1.2 Hz = 72 BPM over 10 s at 100 Hz
        let ir = sine_channel(100, 1.2, 1000, 80_000.0, 2_000.0);
        let red = sine_channel(100, 1.2, 1000, 60_000.0, 1_000.0);
        let result = est.calculate(&ir, &red);
        assert!(result.bpm_valid);
        assert!((result.bpm - 72.0).abs() < 6.0, "bpm {}", result.bpm);
        assert!(result.spo2_valid);
    }

    #[test]
    fn test_halved_channel_hits_unity_ratio() {
        // red = ir / 2 makes both perfusions identical, so the ratio is
        // exactly 1.0 and SpO2 lands exactly on the (1.00, 80) breakpoint
        let est = estimator();
        let ir: Vec<u32> = sine_channel(100, 1.2, 1000, 40_000.0, 4_000.0)
            .into_iter()
            .map(|x| x * 2)
            .collect();
        let red: Vec<u32> = ir.iter().map(|&x| x / 2).collect();
        let result = est.calculate(&ir, &red);
        assert!(result.spo2_valid);
        assert_eq!(result.spo2, 80.0);
    }

    #[test]
    fn test_idempotent() {
        let est = estimator();
        let ir = sine_channel(100, 1.5, 500, 90_000.0, 3_000.0);
        let red = sine_channel(100, 1.5, 500, 70_000.0, 1_500.0);
        let first = est.calculate(&ir, &red);
        let second = est.calculate(&ir, &red);
        assert_eq!(first.spo2.to_bits(), second.spo2.to_bits());
        assert_eq!(first.bpm.to_bits(), second.bpm.to_bits());
        assert_eq!(first.spo2_valid, second.spo2_valid);
        assert_eq!(first.bpm_valid, second.bpm_valid);
    }

    #[test]
    fn test_extreme_ratio_clamps_and_invalidates() {
        let est = estimator();
        // Strong red pulsation over a weak IR one drives the ratio far
        // beyond the table
        let ir = sine_channel(100, 1.2, 1000, 80_000.0, 100.0);
        let red = sine_channel(100, 1.2, 1000, 20_000.0, 4_000.0);
        let result = est.calculate(&ir, &red);
        assert!(!result.spo2_valid);
        // Clamped to the high-ratio boundary of the curve
        assert_eq!(result.spo2, 3.0);
    }
}
