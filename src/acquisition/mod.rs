// src/acquisition/mod.rs
//! Sample accumulation for windowed estimation

pub mod window;

pub use window::SampleWindow;
