// demos/vitals_monitor.rs
//! End-to-end demo: a synthetic subject measured once per second

use ppg_core::config::PipelineConfig;
use ppg_core::pipeline::VitalsPipeline;
use ppg_core::simulation::{PpgGeneratorConfig, PpgSignalGenerator};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = PipelineConfig::default();
    let fs = config.sampling_rate_hz as usize;
    let mut pipeline = VitalsPipeline::new(config)?;

    // Strong perfusion so the default signal-strength gate passes
    let mut sensor = PpgSignalGenerator::new(PpgGeneratorConfig {
        bpm: 68.0,
        ir_perfusion: 0.15,
        red_perfusion: 0.09,
        ..Default::default()
    });

    println!("Simulating 30 s of acquisition at {} Hz...", fs);
    for second in 1..=30 {
        let mut vitals = pipeline.push(sensor.next_pair());
        for _ in 1..fs {
            vitals = pipeline.push(sensor.next_pair());
        }

        let bpm = vitals
            .bpm
            .map(|v| format!("{v:5.1} bpm"))
            .unwrap_or_else(|| "  ---    ".to_string());
        let spo2 = vitals
            .spo2
            .map(|v| format!("{v:5.1} %"))
            .unwrap_or_else(|| "  --- ".to_string());
        println!("t={second:2} s  HR {bpm}  SpO2 {spo2}  strength {}", vitals.signal_strength);
    }

    Ok(())
}
