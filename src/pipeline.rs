// src/pipeline.rs
//! Vitals pipeline orchestration
//!
//! Owns the streaming beat detector, the windowed oxygen estimator, and the
//! sample window that feeds it. The caller pushes every acquired pair in
//! chronological order and gets a vitals snapshot back; finger presence,
//! signal-strength gating, and heart-rate smoothing follow the reference
//! firmware's acquisition loop.

use crate::acquisition::SampleWindow;
use crate::config::PipelineConfig;
use crate::error::PpgError;
use crate::processing::{BeatDetector, OxygenEstimator};
use crate::types::{SamplePair, VitalsResult};
use tracing::{debug, info};

/// Real-time vitals pipeline
pub struct VitalsPipeline {
    config: PipelineConfig,
    detector: BeatDetector,
    estimator: OxygenEstimator,
    window: SampleWindow,

    finger_present: bool,
    min_ir: u32,
    window_strength_ok: bool,
    bpm: Option<f32>,
    spo2: Option<f32>,
    window_bpm: Option<f32>,
    windows_processed: u64,
}

impl VitalsPipeline {
    /// Build a pipeline; the configuration is validated as a whole first
    pub fn new(config: PipelineConfig) -> Result<Self, PpgError> {
        if let Err(errors) = config.validate_consistency() {
            return Err(PpgError::config("pipeline", errors.join("; ")));
        }
        let detector = BeatDetector::new(&config)?;
        let estimator = OxygenEstimator::new(&config)?;
        let window = SampleWindow::new(config.window_size);

        Ok(Self {
            config,
            detector,
            estimator,
            window,
            finger_present: false,
            min_ir: u32::MAX,
            window_strength_ok: false,
            bpm: None,
            spo2: None,
            window_bpm: None,
            windows_processed: 0,
        })
    }

    /// Push one acquired pair and get the current vitals snapshot
    pub fn push(&mut self, pair: SamplePair) -> VitalsResult {
        if pair.ir < self.config.presence_threshold {
            if self.finger_present {
                info!("finger removed, resetting pipeline state");
                self.reset_measurement();
            }
            return VitalsResult::absent();
        }

        if !self.finger_present {
            info!("finger detected, measuring");
            self.finger_present = true;
            self.min_ir = u32::MAX;
        }

        self.min_ir = self.min_ir.min(pair.ir);
        let signal_strength = pair.ir - self.min_ir;

        // The detector and the window both consume every sample while the
        // finger is present: the detector's beat-to-beat clock is its sample
        // index, and the estimator assumes a gap-free constant-rate window.
        // The strength gate decides what we trust, not what we buffer.
        let beat = self.detector.process(pair.ir);

        if signal_strength >= self.config.min_signal_strength {
            self.window_strength_ok = true;
            if let Some(event) = beat {
                self.smooth_bpm(event.bpm);
            }
        }

        if self.window.push(pair) {
            if self.window_strength_ok {
                let estimate = self.estimator.calculate(self.window.ir(), self.window.red());
                self.windows_processed += 1;
                if estimate.spo2_valid {
                    self.spo2 = Some(estimate.spo2);
                }
                self.window_bpm = estimate.bpm_valid.then_some(estimate.bpm);
                debug!(
                    windows = self.windows_processed,
                    spo2_valid = estimate.spo2_valid,
                    "window handed to estimator"
                );
            } else {
                debug!("discarding window that never reached the strength threshold");
            }
            self.window.clear();
            self.window_strength_ok = false;
        }

        VitalsResult {
            bpm: self.bpm,
            spo2: self.spo2,
            window_bpm: self.window_bpm,
            finger_present: true,
            signal_strength,
        }
    }

    /// Current snapshot without consuming a sample
    pub fn current(&self) -> VitalsResult {
        if !self.finger_present {
            return VitalsResult::absent();
        }
        VitalsResult {
            bpm: self.bpm,
            spo2: self.spo2,
            window_bpm: self.window_bpm,
            finger_present: true,
            signal_strength: 0,
        }
    }

    /// Number of full windows handed to the estimator so far
    pub fn windows_processed(&self) -> u64 {
        self.windows_processed
    }

    /// The configuration the pipeline was built with
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    fn smooth_bpm(&mut self, new_bpm: f32) {
        let alpha = self.config.bpm_smoothing;
        self.bpm = Some(match self.bpm {
            None => new_bpm,
            Some(old) => old * (1.0 - alpha) + new_bpm * alpha,
        });
    }

    fn reset_measurement(&mut self) {
        self.detector.reset();
        self.window.clear();
        self.finger_present = false;
        self.min_ir = u32::MAX;
        self.window_strength_ok = false;
        self.bpm = None;
        self.spo2 = None;
        self.window_bpm = None;
    }
}
