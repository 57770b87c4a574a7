//! Console moon clock.
//!
//! ```text
//! RUST_LOG=info cargo run --example moon_clock -- series -71 42
//! ```
//!
//! Arguments: trigonometric backend (`series` or `native`), then optional
//! geographic longitude and latitude in whole degrees. The ticker prints the
//! warm-up ticks and the first steady one, then shuts down.
use std::error::Error;

use hifitime::{Duration, Epoch};
use luna::engine::{EngineConfig, EngineEvent, LunaEngine};
use luna::numeric::TrigMode;
use luna::observer::{LocationMessage, ObserverLocation};
use luna::scheduler::run_ticker;
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let trig: TrigMode = args
        .next()
        .ok_or("usage: moon_clock <series|native> [longitude] [latitude]")?
        .parse()?;
    let longitude: i32 = args.next().map(|a| a.parse()).transpose()?.unwrap_or(0);
    let latitude: i32 = args.next().map(|a| a.parse()).transpose()?.unwrap_or(0);

    let config = EngineConfig::builder(trig).build()?;
    println!("{config}");
    let engine = LunaEngine::new(config);

    // wall clock anchored once, advanced by the monotonic clock
    let origin = Epoch::now()?;
    let started = std::time::Instant::now();
    let clock = move || origin + Duration::from_seconds(started.elapsed().as_secs_f64());

    let (event_tx, event_rx) = mpsc::channel(8);
    let (result_tx, mut result_rx) = mpsc::channel(8);
    let ticker = tokio::spawn(run_ticker(
        engine.clone(),
        engine.initial_state(ObserverLocation::default()),
        clock,
        event_rx,
        result_tx,
    ));

    // the location arrives out of band, after the first refresh
    if let Some(first) = result_rx.recv().await {
        println!("{first}");
    }
    event_tx
        .send(EngineEvent::LocationUpdate(LocationMessage::longitude(longitude)))
        .await?;
    event_tx
        .send(EngineEvent::LocationUpdate(LocationMessage::latitude(latitude)))
        .await?;

    let ticks = engine.config().warm_up_ticks + 2;
    for _ in 0..ticks {
        match result_rx.recv().await {
            Some(result) => println!("{result}"),
            None => break,
        }
    }

    drop(event_tx);
    let final_state = ticker.await??;
    println!(
        "stopped in {:?} mode at {}",
        final_state.mode, final_state.observer
    );

    Ok(())
}
