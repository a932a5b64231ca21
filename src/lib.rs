//! PPG-Core: Real-time photoplethysmography processing for pulse oximetry
//!
//! This library turns raw infrared and red photodiode samples from an
//! optical pulse-oximetry sensor (MAX3010x family) into heart rate and
//! blood-oxygen saturation. It features:
//!
//! - Streaming beat detection with an adaptive-threshold state machine
//! - Window-based SpO2 estimation via the AN-6595 ratio-of-ratios method
//! - Fixed-capacity, allocation-free per-sample hot path for embedded targets
//! - Finger-presence and signal-strength gating
//! - A deterministic synthetic signal generator for hardware-free testing
//!
//! # Quick Start
//!
//! ```rust
//! use ppg_core::config::PipelineConfig;
//! use ppg_core::pipeline::VitalsPipeline;
//! use ppg_core::simulation::{PpgGeneratorConfig, PpgSignalGenerator};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut pipeline = VitalsPipeline::new(PipelineConfig::default())?;
//!     // Perfusion strong enough for the default signal-strength gate
//!     let mut sensor = PpgSignalGenerator::new(PpgGeneratorConfig {
//!         ir_perfusion: 0.15,
//!         red_perfusion: 0.09,
//!         ..Default::default()
//!     });
//!
//!     for _ in 0..1000 {
//!         let vitals = pipeline.push(sensor.next_pair());
//!         if let (Some(bpm), Some(spo2)) = (vitals.bpm, vitals.spo2) {
//!             println!("HR: {:.0} bpm  SpO2: {:.0} %", bpm, spo2);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod acquisition;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod processing;
pub mod simulation;
pub mod types;
pub mod utils;

// Re-export commonly used types for convenience
pub use acquisition::SampleWindow;
pub use config::PipelineConfig;
pub use error::PpgError;
pub use pipeline::VitalsPipeline;
pub use processing::{BeatDetector, CalibrationCurve, OxygenEstimator};
pub use types::{BeatEvent, SamplePair, VitalsEstimate, VitalsResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
