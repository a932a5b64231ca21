// src/processing/peaks.rs
//! Batch peak location over a finished window
//!
//! Windowed counterpart of the streaming detector: finds local maxima above
//! a height floor, walks plateaus, then prunes peaks that sit closer than a
//! minimum distance, keeping the tallest first.

/// Indices of up to `max_peaks` local maxima in `x` that exceed
/// `min_height` and are at least `min_distance` samples apart, in
/// chronological order
pub fn find_peaks(x: &[f32], min_height: f32, min_distance: usize, max_peaks: usize) -> Vec<usize> {
    let mut peaks = Vec::new();
    let n = x.len();
    let mut i = 1;
    while i + 1 < n {
        if x[i] > min_height && x[i] > x[i - 1] {
            // Walk any plateau of equal values
            let mut width = 1;
            while i + width < n && x[i] == x[i + width] {
                width += 1;
            }
            if i + width < n && x[i] > x[i + width] {
                peaks.push(i);
                i += width + 1;
            } else {
                i += width;
            }
        } else {
            i += 1;
        }
    }

    let mut peaks = remove_close_peaks(x, peaks, min_distance);
    peaks.truncate(max_peaks);
    peaks
}

/// Mean distance between consecutive indices; `None` for fewer than two
pub fn mean_interval(peaks: &[usize]) -> Option<f32> {
    if peaks.len() < 2 {
        return None;
    }
    let total: usize = peaks.windows(2).map(|w| w[1] - w[0]).sum();
    Some(total as f32 / (peaks.len() - 1) as f32)
}

/// Keep the tallest of any cluster of peaks closer than `min_distance`
fn remove_close_peaks(x: &[f32], peaks: Vec<usize>, min_distance: usize) -> Vec<usize> {
    if peaks.is_empty() {
        return peaks;
    }
    let mut by_height = peaks;
    by_height.sort_by(|&a, &b| x[b].partial_cmp(&x[a]).unwrap_or(std::cmp::Ordering::Equal));

    let mut kept: Vec<usize> = Vec::with_capacity(by_height.len());
    for idx in by_height {
        if kept
            .iter()
            .all(|&k| idx.abs_diff(k) > min_distance)
        {
            kept.push(idx);
        }
    }
    kept.sort_unstable();
    kept
}
