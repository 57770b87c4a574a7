//! # Async ticker
//!
//! [`run_ticker`] is a single-owner task: it owns the [`EngineState`], so
//! ticks and events are serialized by construction and no lock guards the
//! stored distance sample. The task waits on whichever comes first:
//!
//! * the refresh timer, whose period follows the current refresh mode,
//! * an [`EngineEvent`] from the event channel.
//!
//! Location updates and focus loss go through the state machine and re-arm
//! the timer at the warm-up cadence. A [`EngineEvent::Tick`] forces an
//! immediate refresh.
//!
//! The task ends when the event channel is closed and returns the final state.
//! It fails with [`LunaError::SchedulerClosed`] if the result receiver is
//! dropped first.
use hifitime::Epoch;
use log::{debug, info};
use tokio::sync::mpsc;

use crate::{
    engine::{EngineEvent, EngineState, LunaEngine},
    ephemeris::EphemerisResult,
    luna_errors::LunaError,
};

/// Run the refresh loop until the event channel closes.
///
/// Arguments
/// ---------
/// * `engine`: the tick engine
/// * `state`: initial state, usually [`LunaEngine::initial_state`]
/// * `clock`: wall-clock source called once per tick
/// * `events`: location updates, focus loss and forced refreshes
/// * `results`: receives one [`EphemerisResult`] per tick
///
/// Return
/// ------
/// * the state after the last processed tick or event
pub async fn run_ticker<C>(
    engine: LunaEngine,
    mut state: EngineState,
    mut clock: C,
    mut events: mpsc::Receiver<EngineEvent>,
    results: mpsc::Sender<EphemerisResult>,
) -> Result<EngineState, LunaError>
where
    C: FnMut() -> Epoch,
{
    info!("ticker started ({} backend)", engine.config().trig_mode);

    // first refresh is immediate
    state = tick_and_send(&engine, state, &mut clock, &results).await?;

    loop {
        let interval = state.refresh_interval(engine.config());

        tokio::select! {
            biased;

            event = events.recv() => match event {
                Some(EngineEvent::Tick) => {
                    state = tick_and_send(&engine, state, &mut clock, &results).await?;
                }
                Some(event) => {
                    debug!("ticker received {event:?}");
                    state = engine.handle(state, &event);
                }
                None => {
                    info!("event channel closed, ticker stopping");
                    return Ok(state);
                }
            },
            _ = tokio::time::sleep(interval) => {
                state = tick_and_send(&engine, state, &mut clock, &results).await?;
            }
        }
    }
}

async fn tick_and_send<C>(
    engine: &LunaEngine,
    state: EngineState,
    clock: &mut C,
    results: &mpsc::Sender<EphemerisResult>,
) -> Result<EngineState, LunaError>
where
    C: FnMut() -> Epoch,
{
    let (next, result) = engine.tick(state, clock());
    results
        .send(result)
        .await
        .map_err(|_| LunaError::SchedulerClosed)?;
    Ok(next)
}
