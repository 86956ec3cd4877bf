//! Property-based tests for the core value types

use gait_core::{round_to, Event, EventKind, EventStream, TimeSeries};
use proptest::prelude::*;

fn increasing(gaps: &[f64]) -> Vec<f64> {
    gaps.iter()
        .scan(0.0, |t, gap| {
            *t += gap;
            Some(*t)
        })
        .collect()
}

proptest! {
    #[test]
    fn prop_nan_becomes_missing(
        values in prop::collection::vec(prop::option::of(-1e6f64..1e6), 1..100),
        nan_at in any::<prop::sample::Index>(),
    ) {
        let mut raw: Vec<f64> = values.iter().map(|v| v.unwrap_or(f64::NAN)).collect();
        let idx = nan_at.index(raw.len());
        raw[idx] = f64::NAN;

        let timestamps = (0..raw.len()).map(|i| i as f64 * 0.001).collect();
        let series = TimeSeries::from_raw(timestamps, raw.clone()).unwrap();

        prop_assert_eq!(series.value(idx), None);
        prop_assert_eq!(series.defined_count(), raw.iter().filter(|v| !v.is_nan()).count());
    }

    #[test]
    fn prop_out_of_order_timestamps_rejected(
        gaps in prop::collection::vec(0.001f64..10.0, 2..50),
        swap in any::<prop::sample::Index>(),
    ) {
        let mut timestamps = increasing(&gaps);
        let i = swap.index(timestamps.len() - 1);
        timestamps.swap(i, i + 1);

        let values = vec![Some(1.0); timestamps.len()];
        prop_assert!(TimeSeries::new(timestamps, values).is_err());
    }

    #[test]
    fn prop_intervals_follow_events(gaps in prop::collection::vec(0.0f64..500.0, 0..40)) {
        let mut events = vec![Event::transition(0.0, "SC")];
        events.extend(increasing(&gaps).into_iter().map(|t| Event::transition(t, "SC")));
        let stream = EventStream::new(events).unwrap();

        let intervals = stream.intervals();
        prop_assert_eq!(intervals.len(), stream.len() - 1);
        prop_assert!(intervals.iter().all(|i| *i >= 0.0));
        for (k, interval) in intervals.iter().enumerate() {
            prop_assert_eq!(stream.interval(k), Some(*interval));
        }
        prop_assert_eq!(stream.interval(stream.len() - 1), None);
    }

    #[test]
    fn prop_rounding_is_stable(value in -1e4f64..1e4, decimals in 0u32..6) {
        let once = round_to(value, decimals);
        prop_assert_eq!(round_to(once, decimals), once);
        prop_assert!((once - value).abs() <= 0.5 * 10f64.powi(-(decimals as i32)) + 1e-9);
    }
}

#[test]
fn test_event_json_shape() {
    let peak = serde_json::to_value(Event::peak(12.5, 4.61)).unwrap();
    assert_eq!(peak["timestamp"], 12.5);
    assert_eq!(peak["value"], 4.61);
    assert_eq!(peak["kind"], "Peak");

    let lift_off = serde_json::to_value(Event::transition(40.0, "Aerial")).unwrap();
    assert!(lift_off["value"].is_null());
    assert_eq!(lift_off["kind"]["Transition"], "Aerial");
}

#[test]
fn test_mixed_families_rejected() {
    let mixed = EventStream::new(vec![Event::peak(0.0, 1.0), Event::transition(1.0, "SC")]);
    assert!(mixed.is_err());

    let extrema = EventStream::new(vec![Event::peak(0.0, 1.0), Event::valley(1.0, 0.0)]).unwrap();
    assert_eq!(extrema.count(&EventKind::Peak), 1);
}
