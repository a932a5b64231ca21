// src/types.rs
//! Core data types shared across the PPG pipeline

use serde::{Deserialize, Serialize};

/// One paired photodiode reading at a single time tick
///
/// Values are raw ADC counts (18-bit typical on the MAX3010x family, so
/// 0 .. 2^18-1). Immutable once captured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplePair {
    /// Infrared channel reading
    pub ir: u32,
    /// Red channel reading
    pub red: u32,
}

impl SamplePair {
    /// Create a sample pair
    pub fn new(ir: u32, red: u32) -> Self {
        Self { ir, red }
    }
}

/// A confirmed heartbeat emitted by the streaming detector
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BeatEvent {
    /// Index of the sample on which the beat was confirmed (0-based from
    /// stream start)
    pub sample_index: u64,
    /// Instantaneous heart rate derived from the interval to the previous
    /// confirmed beat
    pub bpm: f32,
    /// Inter-beat interval in samples
    pub interval_samples: u32,
}

/// Per-window output of the oxygen estimator
///
/// Both quantities carry their own validity flag because they can fail
/// independently: SpO2 needs perfusion on both channels and a plausible
/// ratio, the cross-check heart rate only needs two locatable pulses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VitalsEstimate {
    /// Estimated oxygen saturation in percent (clamped to the calibration
    /// curve domain; meaningful only when `spo2_valid`)
    pub spo2: f32,
    /// Whether `spo2` came from a well-perfused window with an in-domain ratio
    pub spo2_valid: bool,
    /// Heart rate re-derived from the window (cross-check against the
    /// streaming detector; meaningful only when `bpm_valid`)
    pub bpm: f32,
    /// Whether at least two pulses were located in the window
    pub bpm_valid: bool,
}

impl VitalsEstimate {
    /// Estimate for a malformed or unusable window: both flags down
    pub fn invalid() -> Self {
        Self {
            spo2: 0.0,
            spo2_valid: false,
            bpm: 0.0,
            bpm_valid: false,
        }
    }
}

/// Pipeline output snapshot, produced once per pushed sample
///
/// `None` is the absent-marker: a vital that has not yet been confirmed, or
/// whose last estimate was invalid, is simply not reported.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VitalsResult {
    /// Smoothed streaming heart rate, present once two in-band beats have
    /// been confirmed
    pub bpm: Option<f32>,
    /// Latest valid window SpO2 estimate
    pub spo2: Option<f32>,
    /// Cross-check heart rate from the latest completed window
    pub window_bpm: Option<f32>,
    /// Whether a finger is currently detected on the sensor
    pub finger_present: bool,
    /// Raw IR excursion above the running minimum, a cheap signal-strength
    /// figure for display layers
    pub signal_strength: u32,
}

impl VitalsResult {
    /// Snapshot for the no-finger state
    pub fn absent() -> Self {
        Self {
            bpm: None,
            spo2: None,
            window_bpm: None,
            finger_present: false,
            signal_strength: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_estimate_flags() {
        let est = VitalsEstimate::invalid();
        assert!(!est.spo2_valid);
        assert!(!est.bpm_valid);
    }

    #[test]
    fn test_absent_result() {
        let result = VitalsResult::absent();
        assert!(result.bpm.is_none());
        assert!(result.spo2.is_none());
        assert!(!result.finger_present);
    }

    #[test]
    fn test_sample_pair_construction() {
        let pair = SamplePair::new(81234, 65210);
        assert_eq!(pair.ir, 81234);
        assert_eq!(pair.red, 65210);
    }
}
