// src/processing/mod.rs
//! Signal processing for PPG data

pub mod beat_detector;
pub mod calibration;
pub mod dc_tracker;
pub mod envelope;
pub mod fir;
pub mod oxygen;
pub mod peaks;

pub use beat_detector::BeatDetector;
pub use calibration::{CalibrationCurve, CurvePoint, AN6595_BREAKPOINTS};
pub use dc_tracker::DcTracker;
pub use envelope::AmplitudeEnvelope;
pub use fir::FirFilter;
pub use oxygen::OxygenEstimator;
pub use peaks::{find_peaks, mean_interval};
