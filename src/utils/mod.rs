// src/utils/mod.rs
//! Shared numeric utilities

pub mod stats;

pub use stats::{channel_stats, mean, peak_to_peak, rms_about_mean, variance, ChannelStats};
