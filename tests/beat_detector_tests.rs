// tests/beat_detector_tests.rs
//! Behavioral tests for the streaming beat detector on synthetic signals

use ppg_core::config::PipelineConfig;
use ppg_core::processing::BeatDetector;
use ppg_core::types::BeatEvent;
use std::f32::consts::PI;

fn detector() -> BeatDetector {
    BeatDetector::new(&PipelineConfig::default()).unwrap()
}

/// Sinusoid at `freq_hz` plus deterministic small-amplitude jitter
fn noisy_sine(fs: u32, freq_hz: f32, seconds: f32, dc: f32, amplitude: f32) -> Vec<u32> {
    let n = (fs as f32 * seconds) as usize;
    (0..n)
        .map(|i| {
            let t = i as f32 / fs as f32;
            // Incommensurate high-frequency component stands in for noise
            let jitter = 40.0 * (2.0 * PI * 17.3 * t).sin();
            (dc + amplitude * (2.0 * PI * freq_hz * t).sin() + jitter).round() as u32
        })
        .collect()
}

/// Baseline plus raised-cosine pulses centered at the given times
fn pulse_train(fs: u32, seconds: f32, dc: f32, amplitude: f32, beat_times: &[f32]) -> Vec<u32> {
    let n = (fs as f32 * seconds) as usize;
    let width = 0.12; // pulse half-width in seconds
    (0..n)
        .map(|i| {
            let t = i as f32 / fs as f32;
            let mut v = dc;
            for &tc in beat_times {
                let d = t - tc;
                if d.abs() < width {
                    v += amplitude * 0.5 * (1.0 + (PI * d / width).cos());
                }
            }
            v.round() as u32
        })
        .collect()
}

#[test]
fn sine_at_72_bpm_is_tracked_within_five_percent() {
    let mut det = detector();
    // 1.2 Hz = 72 BPM, 10 s at 100 Hz
    let signal = noisy_sine(100, 1.2, 10.0, 80_000.0, 2_000.0);

    let events: Vec<BeatEvent> = signal.iter().filter_map(|&s| det.process(s)).collect();
    assert!(
        events.len() >= 8,
        "expected most of the ~12 beats, got {}",
        events.len()
    );
    for event in &events {
        assert!(
            (event.bpm - 72.0).abs() <= 72.0 * 0.05,
            "bpm {} outside +/-5% of 72",
            event.bpm
        );
    }
}

#[test]
fn no_two_beats_within_the_refractory_period() {
    let config = PipelineConfig::default();
    let refractory = config.refractory_samples() as u64;
    let mut det = BeatDetector::new(&config).unwrap();

    // A double-peak artifact 200 ms after each genuine beat
    let mut beat_times = Vec::new();
    for k in 0..10 {
        let t = 1.0 + k as f32 * 0.9;
        beat_times.push(t);
        beat_times.push(t + 0.2);
    }
    let signal = pulse_train(100, 11.0, 70_000.0, 3_000.0, &beat_times);

    let indices: Vec<u64> = signal
        .iter()
        .filter_map(|&s| det.process(s))
        .map(|e| e.sample_index)
        .collect();
    for pair in indices.windows(2) {
        assert!(
            pair[1] - pair[0] >= refractory,
            "beats at {:?} violate the refractory period",
            pair
        );
    }
}

#[test]
fn short_interval_is_discarded_without_moving_the_reference() {
    let mut det = detector();
    // Genuine beat at 1.0 s, artifact at 1.2 s (blocked by refractory /
    // plausibility), next genuine beat at 1.83 s. If the reference were
    // corrupted by the artifact the emitted BPM would be ~95 instead of ~72.
    let signal = pulse_train(100, 3.0, 70_000.0, 3_000.0, &[1.0, 1.2, 1.83]);

    let events: Vec<BeatEvent> = signal.iter().filter_map(|&s| det.process(s)).collect();
    assert_eq!(events.len(), 1, "events: {:?}", events);
    assert!(
        (events[0].bpm - 72.0).abs() < 8.0,
        "reference beat was corrupted: bpm {}",
        events[0].bpm
    );
}

#[test]
fn long_dropout_resyncs_without_emitting() {
    let mut det = detector();
    // Beat at 1.0 s, a 3 s dropout (20 BPM, implausible), then a normal
    // 0.8 s interval which must be measured against the 4.0 s beat
    let signal = pulse_train(100, 6.0, 70_000.0, 3_000.0, &[1.0, 4.0, 4.8]);

    let events: Vec<BeatEvent> = signal.iter().filter_map(|&s| det.process(s)).collect();
    assert_eq!(events.len(), 1, "events: {:?}", events);
    assert!(
        (events[0].bpm - 75.0).abs() < 8.0,
        "resync failed: bpm {}",
        events[0].bpm
    );
}

#[test]
fn flat_and_weak_signals_emit_nothing() {
    let mut det = detector();
    for _ in 0..2_000 {
        assert!(det.process(80_000).is_none());
    }

    // Amplitude below the detection floor
    let mut det = detector();
    let weak = noisy_sine(100, 1.2, 10.0, 80_000.0, 5.0);
    let beats = weak.iter().filter_map(|&s| det.process(s)).count();
    assert_eq!(beats, 0);
}
