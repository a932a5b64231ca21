// src/processing/fir.rs
//! FIR (Finite Impulse Response) digital filters

use crate::error::PpgError;

/// Symmetric half of the reference application note's cardiac low-pass
/// kernel. The full 23-tap kernel is this table mirrored about its last
/// entry; values are the raw Q15-scaled integers from the reference
/// firmware.
const CARDIAC_KERNEL_HALF: [f32; 12] = [
    172.0, 321.0, 579.0, 927.0, 1360.0, 1858.0, 2390.0, 2916.0, 3391.0, 3768.0, 4012.0, 4096.0,
];

/// FIR filter with a circular delay line
pub struct FirFilter {
    coefficients: Vec<f32>,
    delay_line: Vec<f32>,
    index: usize,
    length: usize,
}

impl FirFilter {
    /// Create FIR filter from coefficients, normalized to unit DC gain
    pub fn new(coefficients: Vec<f32>) -> Result<Self, PpgError> {
        if coefficients.is_empty() {
            return Err(PpgError::Filter("empty coefficients".to_string()));
        }
        let dc_gain: f32 = coefficients.iter().sum();
        if dc_gain.abs() < f32::EPSILON {
            return Err(PpgError::Filter("kernel has zero DC gain".to_string()));
        }

        let coefficients: Vec<f32> = coefficients.iter().map(|&c| c / dc_gain).collect();
        let length = coefficients.len();
        Ok(Self {
            coefficients,
            delay_line: vec![0.0; length],
            index: 0,
            length,
        })
    }

    /// The built-in 23-tap cardiac-band low-pass kernel from the reference
    /// application note, mirrored from its symmetric half and normalized
    pub fn cardiac_lowpass() -> Self {
        let mut coefficients = Vec::with_capacity(CARDIAC_KERNEL_HALF.len() * 2 - 1);
        coefficients.extend_from_slice(&CARDIAC_KERNEL_HALF);
        coefficients.extend(CARDIAC_KERNEL_HALF[..CARDIAC_KERNEL_HALF.len() - 1].iter().rev());
        // The mirrored kernel is non-empty with positive DC gain
        Self::new(coefficients).unwrap_or_else(|_| unreachable!())
    }

    /// Create low-pass FIR using a Hamming-windowed sinc, for sampling rates
    /// where the built-in kernel's passband does not fit
    pub fn lowpass_windowed_sinc(
        cutoff_hz: f32,
        sample_rate_hz: f32,
        length: usize,
    ) -> Result<Self, PpgError> {
        if length % 2 == 0 {
            return Err(PpgError::Filter("length must be odd".to_string()));
        }
        if cutoff_hz <= 0.0 || cutoff_hz >= sample_rate_hz / 2.0 {
            return Err(PpgError::Filter("invalid cutoff frequency".to_string()));
        }

        let mut coefficients = vec![0.0; length];
        let fc = cutoff_hz / sample_rate_hz;
        let m = (length - 1) / 2;

        for (i, coeff) in coefficients.iter_mut().enumerate() {
            let n = i as isize - m as isize;
            *coeff = if n == 0 {
                2.0 * fc
            } else {
                let n_f = n as f32;
                (2.0 * std::f32::consts::PI * fc * n_f).sin() / (std::f32::consts::PI * n_f)
            };

            // Apply Hamming window
            let window =
                0.54 - 0.46 * (2.0 * std::f32::consts::PI * i as f32 / (length - 1) as f32).cos();
            *coeff *= window;
        }

        Self::new(coefficients)
    }

    /// Process single sample
    pub fn process_sample(&mut self, input: f32) -> f32 {
        // Store input in circular delay line
        self.delay_line[self.index] = input;

        // Calculate output using convolution
        let mut output = 0.0;
        for i in 0..self.length {
            let delay_index = (self.index + self.length - i) % self.length;
            output += self.coefficients[i] * self.delay_line[delay_index];
        }

        // Update circular buffer index
        self.index = (self.index + 1) % self.length;

        output
    }

    /// Reset filter state
    pub fn reset(&mut self) {
        self.delay_line.fill(0.0);
        self.index = 0;
    }

    /// Get filter length
    pub fn length(&self) -> usize {
        self.length
    }

    /// Get coefficients
    pub fn coefficients(&self) -> &[f32] {
        &self.coefficients
    }
}
