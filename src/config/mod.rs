// src/config/mod.rs
//! Pipeline configuration
//!
//! All options are fixed at construction time; nothing here is runtime
//! mutable. Configurations serialize to TOML so deployments can ship a
//! tuning file next to the firmware image.

pub mod constants;

pub use constants::*;

use crate::processing::calibration::AN6595_BREAKPOINTS;
use serde::{Deserialize, Serialize};

/// Complete pipeline configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Sensor sampling rate in Hz
    #[serde(default = "defaults::sampling_rate_hz")]
    pub sampling_rate_hz: u32,

    /// SpO2 estimation window length in samples
    #[serde(default = "defaults::window_size")]
    pub window_size: usize,

    /// Raw IR level above which a finger is considered on the sensor
    #[serde(default = "defaults::presence_threshold")]
    pub presence_threshold: u32,

    /// Required IR excursion above the running minimum before readings
    /// are trusted
    #[serde(default = "defaults::min_signal_strength")]
    pub min_signal_strength: u32,

    /// EMA weight applied to each newly accepted beat's BPM
    #[serde(default = "defaults::bpm_smoothing")]
    pub bpm_smoothing: f32,

    /// Beat detector tuning
    #[serde(default)]
    pub beat: BeatConfig,

    /// Oxygen estimator tuning
    #[serde(default)]
    pub spo2: SpO2Config,
}

/// Streaming beat detector configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct BeatConfig {
    /// Fraction of the running amplitude envelope used as the adaptive
    /// threshold
    #[serde(default = "defaults::threshold_factor")]
    pub threshold_factor: f32,

    /// Minimum interval between confirmed beats, in milliseconds
    #[serde(default = "defaults::refractory_ms")]
    pub refractory_ms: u32,

    /// Lower edge of the plausible heart-rate band
    #[serde(default = "defaults::min_bpm")]
    pub min_bpm: f32,

    /// Upper edge of the plausible heart-rate band
    #[serde(default = "defaults::max_bpm")]
    pub max_bpm: f32,

    /// Filtered AC peak-to-peak floor below which detection is suppressed
    #[serde(default = "defaults::min_amplitude")]
    pub min_amplitude: f32,

    /// Low-pass FIR kernel override. `None` selects the built-in cardiac
    /// kernel from the reference application note.
    #[serde(default)]
    pub fir_coefficients: Option<Vec<f32>>,
}

/// Oxygen estimator configuration
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SpO2Config {
    /// Per-channel AC/DC floor below which the window has no perfusion signal
    #[serde(default = "defaults::min_perfusion")]
    pub min_perfusion: f32,

    /// Plausible ratio-of-ratios domain; estimates outside it are clamped
    /// and flagged invalid
    #[serde(default = "defaults::ratio_bounds")]
    pub ratio_bounds: (f32, f32),

    /// Upper bound on pulses considered per window
    #[serde(default = "defaults::max_peaks")]
    pub max_peaks: usize,

    /// Calibration curve as sorted `(ratio, spo2_percent)` breakpoints
    #[serde(default = "defaults::calibration")]
    pub calibration: Vec<(f32, f32)>,
}

/// Default value providers backed by the constants module
mod defaults {
    use super::AN6595_BREAKPOINTS;
    use crate::config::constants::*;

    pub fn sampling_rate_hz() -> u32 { signal::DEFAULT_SAMPLING_RATE_HZ }
    pub fn window_size() -> usize { signal::DEFAULT_WINDOW_SIZE_SAMPLES }
    pub fn presence_threshold() -> u32 { signal::DEFAULT_PRESENCE_THRESHOLD }
    pub fn min_signal_strength() -> u32 { signal::DEFAULT_MIN_SIGNAL_STRENGTH }
    pub fn bpm_smoothing() -> f32 { beat::DEFAULT_BPM_SMOOTHING }

    pub fn threshold_factor() -> f32 { beat::DEFAULT_THRESHOLD_FACTOR }
    pub fn refractory_ms() -> u32 { beat::DEFAULT_REFRACTORY_MS }
    pub fn min_bpm() -> f32 { beat::DEFAULT_MIN_BPM }
    pub fn max_bpm() -> f32 { beat::DEFAULT_MAX_BPM }
    pub fn min_amplitude() -> f32 { beat::DEFAULT_MIN_AMPLITUDE }

    pub fn min_perfusion() -> f32 { spo2::DEFAULT_MIN_PERFUSION }
    pub fn ratio_bounds() -> (f32, f32) { (spo2::DEFAULT_MIN_RATIO, spo2::DEFAULT_MAX_RATIO) }
    pub fn max_peaks() -> usize { spo2::DEFAULT_MAX_PEAKS }
    pub fn calibration() -> Vec<(f32, f32)> { AN6595_BREAKPOINTS.to_vec() }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            sampling_rate_hz: defaults::sampling_rate_hz(),
            window_size: defaults::window_size(),
            presence_threshold: defaults::presence_threshold(),
            min_signal_strength: defaults::min_signal_strength(),
            bpm_smoothing: defaults::bpm_smoothing(),
            beat: BeatConfig::default(),
            spo2: SpO2Config::default(),
        }
    }
}

impl Default for BeatConfig {
    fn default() -> Self {
        Self {
            threshold_factor: defaults::threshold_factor(),
            refractory_ms: defaults::refractory_ms(),
            min_bpm: defaults::min_bpm(),
            max_bpm: defaults::max_bpm(),
            min_amplitude: defaults::min_amplitude(),
            fir_coefficients: None,
        }
    }
}

impl Default for SpO2Config {
    fn default() -> Self {
        Self {
            min_perfusion: defaults::min_perfusion(),
            ratio_bounds: defaults::ratio_bounds(),
            max_peaks: defaults::max_peaks(),
            calibration: defaults::calibration(),
        }
    }
}

impl PipelineConfig {
    /// Refractory period expressed in samples at the configured rate.
    /// Widened internally so absurd deserialized values cannot overflow
    /// before validation reports them.
    pub fn refractory_samples(&self) -> u32 {
        let samples = self.beat.refractory_ms as u64 * self.sampling_rate_hz as u64 / 1000;
        samples.min(u32::MAX as u64) as u32
    }

    /// Validate configuration consistency
    pub fn validate_consistency(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.sampling_rate_hz < signal::MIN_SAMPLING_RATE_HZ
            || self.sampling_rate_hz > signal::MAX_SAMPLING_RATE_HZ
        {
            errors.push(format!(
                "Sampling rate ({} Hz) outside supported band {}-{} Hz",
                self.sampling_rate_hz,
                signal::MIN_SAMPLING_RATE_HZ,
                signal::MAX_SAMPLING_RATE_HZ
            ));
        }

        if self.window_size < signal::MIN_WINDOW_SIZE_SAMPLES {
            errors.push(format!(
                "Window size ({}) below minimum usable size ({})",
                self.window_size,
                signal::MIN_WINDOW_SIZE_SAMPLES
            ));
        }

        if !(0.0 < self.beat.threshold_factor && self.beat.threshold_factor < 1.0) {
            errors.push(format!(
                "Threshold factor ({}) must lie in (0, 1)",
                self.beat.threshold_factor
            ));
        }

        if self.refractory_samples() == 0 {
            errors.push(format!(
                "Refractory period ({} ms) shorter than one sample at {} Hz",
                self.beat.refractory_ms, self.sampling_rate_hz
            ));
        }

        if self.beat.min_bpm >= self.beat.max_bpm {
            errors.push(format!(
                "Plausible BPM band is empty ({} >= {})",
                self.beat.min_bpm, self.beat.max_bpm
            ));
        }

        if let Some(ref coeffs) = self.beat.fir_coefficients {
            if coeffs.is_empty() {
                errors.push("FIR kernel override is empty".to_string());
            }
            if coeffs.len() >= self.window_size {
                errors.push(format!(
                    "FIR kernel ({} taps) must be shorter than the window ({})",
                    coeffs.len(),
                    self.window_size
                ));
            }
        }

        if self.spo2.ratio_bounds.0 >= self.spo2.ratio_bounds.1 {
            errors.push(format!(
                "Ratio bounds are empty ({} >= {})",
                self.spo2.ratio_bounds.0, self.spo2.ratio_bounds.1
            ));
        }

        if self.spo2.calibration.len() < 2 {
            errors.push("Calibration curve needs at least two breakpoints".to_string());
        } else if !self
            .spo2
            .calibration
            .windows(2)
            .all(|w| w[0].0 < w[1].0)
        {
            errors.push("Calibration breakpoints must be strictly increasing in ratio".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
