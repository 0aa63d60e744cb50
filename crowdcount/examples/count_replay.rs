/// Count unique objects in a recorded detection stream
///
/// Replays per-frame rectangles (as a detector would produce them) through the
/// crowd counter and prints one JSON report per frame.
///
/// Usage:
///   cargo run --example count_replay [-- [--config <config.json>] <recording.json>]
///
/// Examples:
///   cargo run --example count_replay
///   cargo run --example count_replay -- --config crowdcount/data/counter.json crowdcount/data/walkthrough.json
use crowdcount::{CounterConfig, CrowdCounter, ReplayDetector};
use std::env;

const DEFAULT_RECORDING: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/walkthrough.json");
const DEFAULT_CONFIG: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data/counter.json");

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut config_path = DEFAULT_CONFIG.to_string();
    let mut recording_path = DEFAULT_RECORDING.to_string();

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => {
                config_path = args
                    .next()
                    .ok_or_else(|| anyhow::anyhow!("--config needs a path"))?;
            }
            _ => recording_path = arg,
        }
    }

    let config = CounterConfig::from_json_file(&config_path)?;
    let detector = ReplayDetector::from_json_file(&recording_path)?;
    let frames = detector.frame_indices();

    let mut counter = CrowdCounter::new(detector, config);
    for frame in frames {
        let report = counter.process_frame(&frame);
        println!("{}", serde_json::to_string(&report)?);
    }

    let summary = counter.summary();
    println!(
        "Frames: {} | Detector failures: {} | Peak live: {} | Total unique: {}",
        summary.frames_processed,
        summary.detector_failures,
        summary.peak_live_objects,
        summary.total_unique
    );

    Ok(())
}
