// src/error.rs
//! Unified error handling for the PPG pipeline
//!
//! Errors here cover construction-time contract violations only: a bad
//! configuration, a malformed filter kernel, an unusable calibration curve.
//! Ordinary signal conditions (weak pulse, finger removed, implausible ratio)
//! are never errors — they are reported through the validity flags on
//! [`crate::types::VitalsEstimate`] and [`crate::types::VitalsResult`].

use thiserror::Error;

/// Unified error type for the PPG processing core
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PpgError {
    /// Configuration rejected at pipeline construction
    #[error("invalid configuration for {component}: {reason}")]
    Config {
        /// Component that rejected its configuration
        component: &'static str,
        /// Human-readable rejection reason
        reason: String,
    },

    /// FIR filter construction failure
    #[error("invalid filter: {0}")]
    Filter(String),

    /// Calibration curve construction failure
    #[error("invalid calibration curve: {0}")]
    Calibration(String),
}

impl PpgError {
    /// Shorthand for a configuration error
    pub fn config(component: &'static str, reason: impl Into<String>) -> Self {
        Self::Config {
            component,
            reason: reason.into(),
        }
    }
}
