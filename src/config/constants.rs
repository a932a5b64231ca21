// src/config/constants.rs
//! System-wide configuration constants

/// Signal acquisition constants
pub mod signal {
    /// Typical MAX3010x configuration used by the defaults
    pub const DEFAULT_SAMPLING_RATE_HZ: u32 = 100;
    /// Lowest supported sampling rate
    pub const MIN_SAMPLING_RATE_HZ: u32 = 25;
    /// Highest supported sampling rate
    pub const MAX_SAMPLING_RATE_HZ: u32 = 400;

    /// Default SpO2 estimation window (1 s at the default rate)
    pub const DEFAULT_WINDOW_SIZE_SAMPLES: usize = 100;
    /// Shortest window in which a valley interval can exist (twice the
    /// smoothing span used by the batch peak detector)
    pub const MIN_WINDOW_SIZE_SAMPLES: usize = 8;

    /// MAX3010x ADC resolution
    pub const ADC_RESOLUTION_BITS: u8 = 18;
    /// Largest raw count the ADC can produce
    pub const ADC_MAX_COUNT: u32 = (1 << ADC_RESOLUTION_BITS) - 1;

    /// Raw IR level above which a finger is considered present
    pub const DEFAULT_PRESENCE_THRESHOLD: u32 = 50_000;
    /// Required IR excursion above the running minimum before samples are
    /// trusted for vitals
    pub const DEFAULT_MIN_SIGNAL_STRENGTH: u32 = 15_000;
}

/// Beat detection constants
pub mod beat {
    /// Fraction of the amplitude envelope used as the adaptive threshold
    pub const DEFAULT_THRESHOLD_FACTOR: f32 = 0.4;
    /// Minimum interval between confirmed beats
    pub const DEFAULT_REFRACTORY_MS: u32 = 300;
    /// Lower edge of the plausible heart-rate band
    pub const DEFAULT_MIN_BPM: f32 = 30.0;
    /// Upper edge of the plausible heart-rate band
    pub const DEFAULT_MAX_BPM: f32 = 240.0;

    /// Filtered AC peak-to-peak floor below which detection is suppressed
    /// (flat or saturated signal, no finger)
    pub const DEFAULT_MIN_AMPLITUDE: f32 = 50.0;

    /// Time constant of the amplitude envelope decay, in seconds
    pub const ENVELOPE_TAU_S: f32 = 2.0;

    /// New-beat weight of the exponential BPM smoother
    pub const DEFAULT_BPM_SMOOTHING: f32 = 0.3;

    /// Right shift of the fixed-point DC baseline estimator
    /// (`p += ((x << 15) - p) >> 4`)
    pub const DC_ESTIMATOR_SHIFT: u32 = 4;
}

/// Oxygen saturation constants
pub mod spo2 {
    /// AC/DC perfusion floor per channel; below this the window carries no
    /// usable pulsatile signal
    pub const DEFAULT_MIN_PERFUSION: f32 = 1e-4;

    /// Low edge of the plausible ratio-of-ratios domain; matches the
    /// calibration table
    pub const DEFAULT_MIN_RATIO: f32 = 0.10;
    /// High edge of the plausible ratio-of-ratios domain
    pub const DEFAULT_MAX_RATIO: f32 = 1.80;

    /// Upper bound on pulses considered per window
    pub const DEFAULT_MAX_PEAKS: usize = 15;

    /// Span of the moving-average smoother applied before peak location
    pub const SMOOTHING_SPAN: usize = 4;
}
