mod common;

use std::time::Duration;

use hifitime::Duration as Elapsed;
use luna::engine::{EngineConfig, EngineEvent, LunaEngine, RefreshMode};
use luna::numeric::TrigMode;
use luna::observer::{LocationMessage, ObserverLocation};

use crate::common::{engine, utc};

#[test]
fn test_warm_up_then_steady_after_six_ticks() {
    let engine = engine(TrigMode::Series);
    let mut state = engine.initial_state(ObserverLocation::default());
    let mut now = utc(2024, 3, 1, 12, 0, 0);

    for tick in 1..=6 {
        assert_eq!(state.mode, RefreshMode::WarmUp, "before tick {tick}");
        assert_eq!(state.refresh_interval(engine.config()), Duration::from_secs(1));

        let (next, result) = engine.tick(state, now);
        assert_eq!(result.moon_range_rate_mph.is_some(), tick > 1);
        state = next;
        now += Elapsed::from_seconds(1.0);
    }

    assert_eq!(state.mode, RefreshMode::Steady);
    assert_eq!(state.refresh_interval(engine.config()), Duration::from_secs(60));
}

#[test]
fn test_location_update_resets_rate() {
    let engine = engine(TrigMode::Native);
    let mut state = engine.initial_state(ObserverLocation::from_geographic(2.0, 48.0));
    let mut now = utc(2024, 3, 1, 12, 0, 0);

    for _ in 0..8 {
        let (next, _) = engine.tick(state, now);
        state = next;
        now += Elapsed::from_seconds(60.0);
    }
    assert_eq!(state.mode, RefreshMode::Steady);

    state = engine.handle(state, &EngineEvent::LocationUpdate(LocationMessage::longitude(-71)));
    assert_eq!(state.mode, RefreshMode::WarmUp);

    let (state, first) = engine.tick(state, now);
    assert_eq!(first.moon_range_rate_mph, None);

    let (_, second) = engine.tick(state, now + Elapsed::from_seconds(1.0));
    assert!(second.moon_range_rate_mph.is_some());
}

#[test]
fn test_latitude_update_also_restarts_warm_up() {
    let engine = engine(TrigMode::Native);
    let (state, _) = engine.tick(
        engine.initial_state(ObserverLocation::default()),
        utc(2024, 3, 1, 12, 0, 0),
    );
    assert!(state.sample.is_some());

    let state = engine.handle(state, &EngineEvent::LocationUpdate(LocationMessage::latitude(45)));
    assert_eq!(state.sample, None);
    assert_eq!(state.observer.latitude_deg, 45.0);
}

#[test]
fn test_zero_elapsed_time_is_finite() {
    let engine = engine(TrigMode::Series);
    let now = utc(2024, 3, 1, 12, 0, 0);

    let (state, _) = engine.tick(engine.initial_state(ObserverLocation::default()), now);
    let (_, repeated) = engine.tick(state, now);

    let rate = repeated.moon_range_rate_mph.unwrap();
    assert!(rate.is_finite());
    assert_eq!(rate, 0.0);
}

#[test]
fn test_focus_lost_keeps_rate_continuity() {
    let engine = engine(TrigMode::Native);
    let mut state = engine.initial_state(ObserverLocation::default());
    let mut now = utc(2024, 3, 1, 12, 0, 0);

    for _ in 0..7 {
        let (next, _) = engine.tick(state, now);
        state = next;
        now += Elapsed::from_seconds(60.0);
    }
    state = engine.handle(state, &EngineEvent::FocusLost);
    assert_eq!(state.mode, RefreshMode::WarmUp);

    let (_, result) = engine.tick(state, now);
    assert!(result.moon_range_rate_mph.is_some());
}

#[test]
fn test_custom_warm_up_length() {
    let config = EngineConfig::builder(TrigMode::Native)
        .warm_up_ticks(0)
        .build()
        .unwrap();
    let engine = LunaEngine::new(config);

    let (state, _) = engine.tick(
        engine.initial_state(ObserverLocation::default()),
        utc(2024, 3, 1, 12, 0, 0),
    );
    assert_eq!(state.mode, RefreshMode::Steady);
}
