//! # Refresh engine
//!
//! One refresh tick turns a wall-clock instant and the current observer
//! location into an [`EphemerisResult`]. All cross-tick state lives in an
//! explicit [`EngineState`] value that is passed into each tick and returned
//! from it; the engine itself only holds its immutable [`EngineConfig`].
//!
//! ## Refresh modes
//!
//! The engine runs a two-mode state machine:
//!
//! ```text
//!            tick_count > warm_up_ticks
//!   WarmUp ───────────────────────────────▶ Steady
//!     ▲                                        │
//!     └──────── LocationUpdate / FocusLost ────┘
//! ```
//!
//! * [`RefreshMode::WarmUp`] refreshes at the short interval. The range rate
//!   is unavailable on the first tick since no previous sample exists.
//! * [`RefreshMode::Steady`] refreshes at the long interval.
//!
//! A location update discards the stored distance sample. A focus loss only
//! restarts the warm-up cadence and keeps the sample.
//!
//! ## Tick pipeline
//!
//! 1. `Epoch` → UTC [`Instant`] → Julian Date and centuries `T`.
//! 2. Lunar longitude and distance from the 60-term series, Moon right ascension.
//! 3. Sun right ascension from its true longitude.
//! 4. Greenwich mean sidereal time and the two hour angles.
//! 5. Range rate against the stored sample, orbital speed from vis-viva.
//! 6. The new sample is stored and the tick counter advances.
use std::fmt;
use std::time::Duration;

use hifitime::Epoch;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    ephemeris::EphemerisResult,
    luna_errors::LunaError,
    lunar::LunarPosition,
    numeric::TrigMode,
    observer::{LocationMessage, ObserverLocation},
    rate::{orbital_speed, EphemerisSample},
    solar::sun_right_ascension,
    time::{Instant, JulianTime},
    topocentric::{greenwich_sidereal_time, hour_angle},
};

/// Configuration of a [`LunaEngine`].
///
/// Fields
/// -----------------
/// * `trig_mode` – trigonometric and square-root backend, no default.
/// * `warm_up_ticks` – warm-up ends once the tick counter exceeds this value.
/// * `warm_up_interval` – refresh cadence while warming up.
/// * `steady_interval` – refresh cadence once steady.
///
/// Defaults
/// -----------------
/// * `warm_up_ticks`: 5
/// * `warm_up_interval`: 1 s
/// * `steady_interval`: 60 s
///
/// Validation
/// -----------------
/// * `warm_up_interval > 0`
/// * `steady_interval ≥ warm_up_interval`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub trig_mode: TrigMode,
    pub warm_up_ticks: u32,
    pub warm_up_interval: Duration,
    pub steady_interval: Duration,
}

impl EngineConfig {
    /// Configuration with the default cadence for the given backend.
    pub fn new(trig_mode: TrigMode) -> Self {
        EngineConfig {
            trig_mode,
            warm_up_ticks: 5,
            warm_up_interval: Duration::from_secs(1),
            steady_interval: Duration::from_secs(60),
        }
    }

    /// Create a new [`EngineConfigBuilder`] for the given backend.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use luna::engine::EngineConfig;
    /// use luna::numeric::TrigMode;
    ///
    /// let config = EngineConfig::builder(TrigMode::Native)
    ///     .warm_up_ticks(3)
    ///     .steady_interval(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(config.warm_up_ticks, 3);
    /// ```
    pub fn builder(trig_mode: TrigMode) -> EngineConfigBuilder {
        EngineConfigBuilder::new(trig_mode)
    }
}

impl fmt::Display for EngineConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Engine configuration")?;
        writeln!(f, "-------------------------------------------")?;
        writeln!(f, "  trig backend      = {}", self.trig_mode)?;
        writeln!(f, "  warm-up ticks     = {}", self.warm_up_ticks)?;
        writeln!(f, "  warm-up interval  = {:?}", self.warm_up_interval)?;
        write!(f, "  steady interval   = {:?}", self.steady_interval)
    }
}

/// Builder for [`EngineConfig`], with validation.
#[derive(Debug, Clone)]
pub struct EngineConfigBuilder {
    config: EngineConfig,
}

impl EngineConfigBuilder {
    pub fn new(trig_mode: TrigMode) -> Self {
        Self {
            config: EngineConfig::new(trig_mode),
        }
    }

    pub fn trig_mode(mut self, v: TrigMode) -> Self {
        self.config.trig_mode = v;
        self
    }
    pub fn warm_up_ticks(mut self, v: u32) -> Self {
        self.config.warm_up_ticks = v;
        self
    }
    pub fn warm_up_interval(mut self, v: Duration) -> Self {
        self.config.warm_up_interval = v;
        self
    }
    pub fn steady_interval(mut self, v: Duration) -> Self {
        self.config.steady_interval = v;
        self
    }

    /// Finalize the builder.
    ///
    /// Returns
    /// -----------------
    /// * `Err(LunaError::InvalidEngineConfig)` if the warm-up interval is zero
    ///   or longer than the steady interval.
    pub fn build(self) -> Result<EngineConfig, LunaError> {
        let c = &self.config;

        if c.warm_up_interval.is_zero() {
            return Err(LunaError::InvalidEngineConfig(
                "warm_up_interval must be > 0".into(),
            ));
        }
        if c.steady_interval < c.warm_up_interval {
            return Err(LunaError::InvalidEngineConfig(
                "steady_interval must be >= warm_up_interval".into(),
            ));
        }

        Ok(self.config)
    }
}

/// Refresh cadence of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RefreshMode {
    WarmUp,
    Steady,
}

impl RefreshMode {
    pub fn refresh_interval(&self, config: &EngineConfig) -> Duration {
        match self {
            RefreshMode::WarmUp => config.warm_up_interval,
            RefreshMode::Steady => config.steady_interval,
        }
    }
}

/// Event driving the refresh state machine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineEvent {
    /// A refresh tick completed.
    Tick,
    /// The observer location changed.
    LocationUpdate(LocationMessage),
    /// The display lost focus.
    FocusLost,
}

/// Everything carried from one tick to the next.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineState {
    pub mode: RefreshMode,
    pub tick_count: u32,
    pub sample: Option<EphemerisSample>,
    pub observer: ObserverLocation,
}

impl Default for EngineState {
    fn default() -> Self {
        Self::new(ObserverLocation::default())
    }
}

impl EngineState {
    /// Fresh state in warm-up, with no sample.
    pub fn new(observer: ObserverLocation) -> Self {
        EngineState {
            mode: RefreshMode::WarmUp,
            tick_count: 0,
            sample: None,
            observer,
        }
    }

    /// Apply one event and return the next state.
    pub fn apply(self, event: &EngineEvent, config: &EngineConfig) -> Self {
        match event {
            EngineEvent::Tick => match self.mode {
                RefreshMode::WarmUp => {
                    let tick_count = self.tick_count + 1;
                    let mode = if tick_count > config.warm_up_ticks {
                        info!("warm-up finished after {tick_count} ticks, steady refresh");
                        RefreshMode::Steady
                    } else {
                        RefreshMode::WarmUp
                    };
                    EngineState {
                        mode,
                        tick_count,
                        ..self
                    }
                }
                RefreshMode::Steady => self,
            },
            EngineEvent::LocationUpdate(message) => {
                let observer = self.observer.updated(message);
                info!("observer location updated: {observer}, restarting warm-up");
                EngineState::new(observer)
            }
            EngineEvent::FocusLost => {
                info!("focus lost, restarting warm-up");
                EngineState {
                    mode: RefreshMode::WarmUp,
                    tick_count: 0,
                    ..self
                }
            }
        }
    }

    pub fn refresh_interval(&self, config: &EngineConfig) -> Duration {
        self.mode.refresh_interval(config)
    }
}

/// Computation engine for one refresh tick.
#[derive(Debug, Clone)]
pub struct LunaEngine {
    config: EngineConfig,
}

impl LunaEngine {
    pub fn new(config: EngineConfig) -> Self {
        LunaEngine { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Initial state for an observer at a geographic position.
    pub fn initial_state(&self, observer: ObserverLocation) -> EngineState {
        EngineState::new(observer)
    }

    /// Feed a location update or a focus loss to the state machine.
    ///
    /// A [`EngineEvent::Tick`] carries no instant, so it is ignored here and the
    /// state is returned unchanged. Refreshes go through [`LunaEngine::tick`].
    pub fn handle(&self, state: EngineState, event: &EngineEvent) -> EngineState {
        match event {
            EngineEvent::Tick => state,
            _ => state.apply(event, &self.config),
        }
    }

    /// Run one refresh tick.
    ///
    /// Arguments
    /// ---------
    /// * `state`: the state returned by the previous tick or event
    /// * `now`: the wall-clock instant of this tick
    ///
    /// Return
    /// ------
    /// * the next state, with this tick's distance stored as the sample
    /// * the computed ephemeris record
    pub fn tick(&self, state: EngineState, now: Epoch) -> (EngineState, EphemerisResult) {
        let trig = self.config.trig_mode;
        let instant = Instant::from_epoch(now);
        let time = JulianTime::from_instant(&instant);

        let moon = LunarPosition::at(time.t, trig);
        let moon_distance_miles = moon.distance_miles();
        let sample = EphemerisSample::new(moon_distance_miles, now);

        let gst = greenwich_sidereal_time(time.t, &instant);
        let longitude = state.observer.longitude_deg;

        let result = EphemerisResult {
            moon_hour_angle_deg: hour_angle(gst, longitude, moon.right_ascension(trig)),
            moon_distance_miles,
            moon_range_rate_mph: state
                .sample
                .map(|previous| previous.range_rate_to(&sample)),
            moon_orbital_speed_mph: orbital_speed(moon_distance_miles, trig),
            sun_hour_angle_deg: hour_angle(gst, longitude, sun_right_ascension(time.t, trig)),
        };
        debug!("tick {} at {instant}: {result}", state.tick_count + 1);

        let next = EngineState {
            sample: Some(sample),
            ..state
        }
        .apply(&EngineEvent::Tick, &self.config);

        (next, result)
    }
}
