//! Detect strides on a synthetic treadmill recording
//!
//! Runs both extrema strategies over the same smoothed belt-speed trace and
//! prints the stride timing each one recovers.

use gait_core::{CategoricalStateSeries, EventKind, TimeSeries};
use gait_detect::{
    DetectorProperties, ExtremaDetector, ModeDetector, MovingAverage, PairedParameters,
    PairedWindowDetector, SlidingExtremaDetector, ThresholdPolicy, TransitionDetector,
};
use rand::prelude::*;
use rand_distr::Normal;

const STRIDE: usize = 180;
const STRIDES: usize = 12;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Synthetic Gait Detection ===\n");

    let (speed, contact) = create_recording(11)?;
    let smoothed = MovingAverage::default().smooth(&speed)?;
    println!(
        "Recording: {} samples, {} defined after smoothing",
        speed.len(),
        smoothed.defined_count()
    );

    let policy = ThresholdPolicy::constant(4.55, 4.35)?;
    let detectors: Vec<ModeDetector> = vec![
        SlidingExtremaDetector::with_policy(policy.clone()).into(),
        PairedWindowDetector::new(
            PairedParameters {
                window_size: 120,
                max_separation: 120,
                min_gap: 60.0,
                ..Default::default()
            },
            policy,
        )?
        .into(),
    ];

    for detector in &detectors {
        let stream = detector.detect(&smoothed)?;
        let peaks = stream.of_kind(&EventKind::Peak);
        let intervals = peaks.intervals();
        let mean = if intervals.is_empty() {
            f64::NAN
        } else {
            intervals.iter().sum::<f64>() / intervals.len() as f64
        };

        println!("\n--- {} ---", detector.algorithm_name());
        println!("  peaks:   {}", peaks.len());
        println!("  valleys: {}", stream.count(&EventKind::Valley));
        println!("  mean stride interval: {:.1} (expected {})", mean, STRIDE);
    }

    let lift_down = TransitionDetector::new("SC")?.detect(&contact)?;
    println!("\n--- contact mode ---");
    println!("  lift-downs: {}", lift_down.len());
    for (i, interval) in lift_down.intervals().iter().enumerate().take(5) {
        println!("  interval {}: {:.1}", i + 1, interval);
    }

    Ok(())
}

fn create_recording(seed: u64) -> Result<(TimeSeries, CategoricalStateSeries), Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let noise = Normal::new(0.0, 0.015)?;
    let n = STRIDE * STRIDES;
    let timestamps: Vec<f64> = (0..n).map(|i| i as f64).collect();

    let speed = (0..n)
        .map(|i| {
            let phase = 2.0 * std::f64::consts::PI * i as f64 / STRIDE as f64;
            4.45 + 0.2 * phase.sin() + noise.sample(&mut rng)
        })
        .collect();

    // Single contact for the first half of each stride, then double contact
    let labels: Vec<&str> = (0..n)
        .map(|i| if i % STRIDE < STRIDE / 2 { "SC" } else { "DC" })
        .collect();

    Ok((
        TimeSeries::from_raw(timestamps.clone(), speed)?,
        CategoricalStateSeries::from_labels(timestamps, &labels)?,
    ))
}
