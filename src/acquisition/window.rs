// src/acquisition/window.rs
//! Fixed-capacity paired sample window
//!
//! The window is pre-allocated once at pipeline construction and then
//! follows a fill / hand-off / clear lifecycle: the caller pushes pairs
//! until [`SampleWindow::push`] reports the window full, runs the oxygen
//! estimator on the channel slices, and clears. Clearing empties the window
//! without releasing its storage, so the per-sample path never allocates.

use crate::types::SamplePair;

/// Ordered, fixed-capacity sequence of chronologically aligned IR/RED pairs
#[derive(Debug, Clone)]
pub struct SampleWindow {
    ir: Vec<u32>,
    red: Vec<u32>,
    capacity: usize,
}

impl SampleWindow {
    /// Create an empty window with the given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            ir: Vec::with_capacity(capacity),
            red: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a pair. Returns `true` when the window just became full.
    /// Pushing into a full window is ignored; the caller is expected to
    /// clear between fills.
    pub fn push(&mut self, pair: SamplePair) -> bool {
        if self.ir.len() >= self.capacity {
            return true;
        }
        self.ir.push(pair.ir);
        self.red.push(pair.red);
        self.ir.len() == self.capacity
    }

    /// Infrared channel in insertion (chronological) order
    pub fn ir(&self) -> &[u32] {
        &self.ir
    }

    /// Red channel in insertion (chronological) order
    pub fn red(&self) -> &[u32] {
        &self.red
    }

    /// Number of pairs currently held
    pub fn len(&self) -> usize {
        self.ir.len()
    }

    /// Whether the window holds no pairs
    pub fn is_empty(&self) -> bool {
        self.ir.is_empty()
    }

    /// Whether the window is at capacity
    pub fn is_full(&self) -> bool {
        self.ir.len() == self.capacity
    }

    /// Window capacity in pairs
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Empty the window without releasing storage
    pub fn clear(&mut self) {
        self.ir.clear();
        self.red.clear();
    }
}
