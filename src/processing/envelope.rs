// src/processing/envelope.rs
//! Decaying peak-to-peak amplitude envelope
//!
//! Tracks the recent extrema of the zero-mean filtered AC signal. Both
//! extrema decay exponentially toward zero, so the envelope shrinks within
//! a few seconds when the pulse weakens instead of latching the largest
//! excursion ever seen. The adaptive beat threshold scales off this
//! envelope.

/// Running amplitude envelope of a zero-mean signal
#[derive(Debug, Clone)]
pub struct AmplitudeEnvelope {
    max: f32,
    min: f32,
    decay: f32,
}

impl AmplitudeEnvelope {
    /// `decay` is the per-sample retention factor in (0, 1); derive it from
    /// the sampling rate as `exp(-1 / (fs * tau))`
    pub fn new(decay: f32) -> Self {
        Self {
            max: 0.0,
            min: 0.0,
            decay,
        }
    }

    /// Decay factor for a given sampling rate and time constant
    pub fn decay_for(sampling_rate_hz: u32, tau_s: f32) -> f32 {
        (-1.0 / (sampling_rate_hz as f32 * tau_s)).exp()
    }

    /// Fold in a sample and return the updated peak-to-peak amplitude
    pub fn update(&mut self, value: f32) -> f32 {
        self.max = (self.max * self.decay).max(value);
        self.min = (self.min * self.decay).min(value);
        self.peak_to_peak()
    }

    /// Current peak-to-peak amplitude estimate
    pub fn peak_to_peak(&self) -> f32 {
        self.max - self.min
    }

    /// Current positive extremum
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Forget all history
    pub fn reset(&mut self) {
        self.max = 0.0;
        self.min = 0.0;
    }
}
