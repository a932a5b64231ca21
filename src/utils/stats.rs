// src/utils/stats.rs
//! Moving statistics over sample slices

/// DC/AC summary of one channel's window
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelStats {
    /// Mean of the window (the DC component)
    pub dc: f32,
    /// RMS of the window about its mean (the AC component)
    pub ac_rms: f32,
}

/// Arithmetic mean; 0 for an empty slice
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

/// RMS of the deviations about a given mean; 0 for an empty slice
pub fn rms_about_mean(values: &[f32], mean: f32) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let sum_sq = values.iter().map(|&x| (x - mean) * (x - mean)).sum::<f32>();
    (sum_sq / values.len() as f32).sqrt()
}

/// Population variance; 0 for an empty slice
pub fn variance(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    let m = mean(values);
    values.iter().map(|&x| (x - m) * (x - m)).sum::<f32>() / values.len() as f32
}

/// Max minus min; 0 for an empty slice
pub fn peak_to_peak(values: &[f32]) -> f32 {
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for &x in values {
        if x < min {
            min = x;
        }
        if x > max {
            max = x;
        }
    }
    if min > max {
        0.0
    } else {
        max - min
    }
}

/// DC (mean) and AC (RMS about mean) of a raw sample channel
pub fn channel_stats(samples: &[u32]) -> ChannelStats {
    if samples.is_empty() {
        return ChannelStats { dc: 0.0, ac_rms: 0.0 };
    }
    let dc = samples.iter().map(|&x| x as f32).sum::<f32>() / samples.len() as f32;
    let sum_sq = samples
        .iter()
        .map(|&x| {
            let d = x as f32 - dc;
            d * d
        })
        .sum::<f32>();
    let ac_rms = (sum_sq / samples.len() as f32).sqrt();
    ChannelStats { dc, ac_rms }
}
