// src/processing/beat_detector.rs
//! Streaming heartbeat detection with an adaptive threshold
//!
//! Consumes one IR sample per call. The raw sample is DC-stripped, low-pass
//! filtered into the cardiac band, and fed through a four-phase threshold
//! state machine. A beat is confirmed on the first downturn after an upward
//! threshold crossing, debounced by a refractory interval; the instantaneous
//! BPM comes from the sample-index distance to the previous confirmed beat.

use crate::config::constants::beat::ENVELOPE_TAU_S;
use crate::config::PipelineConfig;
use crate::error::PpgError;
use crate::processing::dc_tracker::DcTracker;
use crate::processing::envelope::AmplitudeEnvelope;
use crate::processing::fir::FirFilter;
use crate::types::BeatEvent;
use tracing::{debug, warn};

/// Threshold-crossing phase of the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BeatPhase {
    /// AC signal below the adaptive threshold
    BelowThreshold,
    /// Crossed the threshold upward on the previous sample
    RisingEdge,
    /// Above threshold, tracking the peak candidate
    AboveThreshold,
    /// Beat confirmed, waiting for the signal to fall back below threshold
    FallingEdge,
}

/// Adaptive-threshold streaming beat detector
pub struct BeatDetector {
    fir: FirFilter,
    dc: DcTracker,
    envelope: AmplitudeEnvelope,

    threshold_factor: f32,
    min_amplitude: f32,
    refractory_samples: u64,
    min_bpm: f32,
    max_bpm: f32,
    sampling_rate_hz: f32,

    phase: BeatPhase,
    prev_ac: f32,
    peak: f32,
    index: u64,
    last_beat_index: Option<u64>,
}

impl BeatDetector {
    /// Build a detector from the pipeline configuration
    pub fn new(config: &PipelineConfig) -> Result<Self, PpgError> {
        let fir = match &config.beat.fir_coefficients {
            Some(coefficients) => FirFilter::new(coefficients.clone())?,
            None => FirFilter::cardiac_lowpass(),
        };

        let refractory_samples = config.refractory_samples() as u64;
        if refractory_samples == 0 {
            return Err(PpgError::config(
                "beat_detector",
                "refractory period shorter than one sample",
            ));
        }
        if config.beat.min_bpm >= config.beat.max_bpm {
            return Err(PpgError::config("beat_detector", "empty plausible BPM band"));
        }

        let decay = AmplitudeEnvelope::decay_for(config.sampling_rate_hz, ENVELOPE_TAU_S);

        Ok(Self {
            fir,
            dc: DcTracker::new(),
            envelope: AmplitudeEnvelope::new(decay),
            threshold_factor: config.beat.threshold_factor,
            min_amplitude: config.beat.min_amplitude,
            refractory_samples,
            min_bpm: config.beat.min_bpm,
            max_bpm: config.beat.max_bpm,
            sampling_rate_hz: config.sampling_rate_hz as f32,
            phase: BeatPhase::BelowThreshold,
            prev_ac: 0.0,
            peak: 0.0,
            index: 0,
            last_beat_index: None,
        })
    }

    /// Process one IR sample, in strict chronological order.
    ///
    /// Returns a [`BeatEvent`] only on the sample where a beat is newly
    /// confirmed and its interval to the previous beat is plausible.
    pub fn process(&mut self, sample: u32) -> Option<BeatEvent> {
        let index = self.index;
        self.index += 1;

        let baseline = self.dc.update(sample) as f32;
        let ac = self.fir.process_sample(sample as f32 - baseline);
        let amplitude = self.envelope.update(ac);

        // Warm-up: no decisions until the delay line has filled
        if index + 1 < self.fir.length() as u64 {
            self.prev_ac = ac;
            return None;
        }

        // Flat or saturated signal: no pulse to find, park the state machine
        if amplitude < self.min_amplitude {
            self.phase = BeatPhase::BelowThreshold;
            self.prev_ac = ac;
            return None;
        }

        let threshold = self.threshold_factor * self.envelope.max();
        let rising = ac > self.prev_ac;
        let mut event = None;

        match self.phase {
            BeatPhase::BelowThreshold => {
                if ac >= threshold {
                    self.phase = BeatPhase::RisingEdge;
                    self.peak = ac;
                }
            }
            BeatPhase::RisingEdge => {
                if ac < threshold {
                    // Glitch: fell straight back below
                    self.phase = BeatPhase::BelowThreshold;
                } else {
                    self.peak = self.peak.max(ac);
                    self.phase = BeatPhase::AboveThreshold;
                }
            }
            BeatPhase::AboveThreshold => {
                if rising {
                    self.peak = self.peak.max(ac);
                } else {
                    // First downturn after the upward crossing: the beat
                    event = self.confirm_beat(index);
                    self.phase = BeatPhase::FallingEdge;
                }
            }
            BeatPhase::FallingEdge => {
                if ac < threshold {
                    self.phase = BeatPhase::BelowThreshold;
                }
            }
        }

        self.prev_ac = ac;
        event
    }

    /// Restart the detector, e.g. when the finger returns to the sensor
    pub fn reset(&mut self) {
        self.fir.reset();
        self.dc.reset();
        self.envelope.reset();
        self.phase = BeatPhase::BelowThreshold;
        self.prev_ac = 0.0;
        self.peak = 0.0;
        self.index = 0;
        self.last_beat_index = None;
    }

    /// Number of samples consumed so far
    pub fn samples_processed(&self) -> u64 {
        self.index
    }

    fn confirm_beat(&mut self, index: u64) -> Option<BeatEvent> {
        let last = match self.last_beat_index {
            None => {
                // First beat only seeds the interval reference
                self.last_beat_index = Some(index);
                return None;
            }
            Some(last) => last,
        };

        let interval = index - last;
        if interval < self.refractory_samples {
            // Ringing on a single beat; keep the established reference
            return None;
        }

        let bpm = 60.0 * self.sampling_rate_hz / interval as f32;
        if bpm > self.max_bpm {
            // Spike: too fast to be a beat, the reference stays put
            warn!(bpm, interval, "discarding implausibly short beat interval");
            return None;
        }
        if bpm < self.min_bpm {
            // Dropout: re-sync on the current beat without emitting
            warn!(bpm, interval, "discarding implausibly long beat interval");
            self.last_beat_index = Some(index);
            return None;
        }

        self.last_beat_index = Some(index);
        debug!(bpm, interval, sample_index = index, "beat confirmed");
        Some(BeatEvent {
            sample_index: index,
            bpm,
            interval_samples: interval as u32,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn detector_at(fs: u32) -> BeatDetector {
        let mut config = PipelineConfig::default();
        config.sampling_rate_hz = fs;
        BeatDetector::new(&config).unwrap()
    }

    fn sine_signal(fs: u32, freq_hz: f32, seconds: f32, dc: f32, amplitude: f32) -> Vec<u32> {
        let n = (fs as f32 * seconds) as usize;
        (0..n)
            .map(|i| {
                let t = i as f32 / fs as f32;
                (dc + amplitude * (2.0 * PI * freq_hz * t).sin()).round() as u32
            })
            .collect()
    }

    #[test]
    fn test_sine_beats_at_expected_rate() {
        let mut detector = detector_at(100);
        // 1.2 Hz = 72 BPM
        let signal = sine_signal(100, 1.2, 10.0, 80_000.0, 2_000.0);

        let events: Vec<BeatEvent> = signal.iter().filter_map(|&s| detector.process(s)).collect();
        assert!(events.len() >= 8, "expected most beats found, got {}", events.len());
        for event in &events {
            assert!((event.bpm - 72.0).abs() < 72.0 * 0.05, "bpm {}", event.bpm);
        }
    }

    #[test]
    fn test_flat_signal_emits_nothing() {
        let mut detector = detector_at(100);
        for _ in 0..1000 {
            assert!(detector.process(80_000).is_none());
        }
    }

    #[test]
    fn test_warmup_emits_nothing() {
        let mut detector = detector_at(100);
        let signal = sine_signal(100, 1.2, 0.2, 80_000.0, 2_000.0);
        for &s in &signal {
            assert!(detector.process(s).is_none());
        }
    }

    #[test]
    fn test_refractory_between_events() {
        let mut detector = detector_at(100);
        let signal = sine_signal(100, 2.0, 20.0, 80_000.0, 2_000.0);

        let indices: Vec<u64> = signal
            .iter()
            .filter_map(|&s| detector.process(s))
            .map(|e| e.sample_index)
            .collect();
        for pair in indices.windows(2) {
            assert!(pair[1] - pair[0] >= 30, "events too close: {:?}", pair);
        }
    }

    #[test]
    fn test_reset_clears_reference() {
        let mut detector = detector_at(100);
        let signal = sine_signal(100, 1.2, 5.0, 80_000.0, 2_000.0);
        for &s in &signal {
            detector.process(s);
        }
        detector.reset();
        assert_eq!(detector.samples_processed(), 0);
        // The replay covers one beat period, so it holds a single
        // confirmable crest; with a cleared reference that crest can only
        // re-seed and nothing is emitted
        let mut events = 0;
        for &s in &signal[..100] {
            if detector.process(s).is_some() {
                events += 1;
            }
        }
        assert_eq!(events, 0);
    }
}
