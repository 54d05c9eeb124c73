//! Full battle demo.
//!
//! Seeds 50 actors on a 100x100 map, runs for 30 seconds (or the number of
//! seconds given as the first argument), prints the map every second, and
//! finishes with the survivors. Kills go to stdout and are appended to
//! `log.txt`.
//!
//! Set `RUST_LOG=debug` to see individual contests.

use std::sync::Arc;
use std::time::Duration;

use skirmish::prelude::*;
use skirmish::roster::fresh_roster;
use tracing_subscriber::prelude::*;

const ACTOR_COUNT: usize = 50;
const DEFAULT_SECONDS: u64 = 30;

fn print_map(battle: &Battle) {
    println!("\n====== MAP ======");
    let snapshot = battle.snapshot();
    for actor in snapshot.iter().filter(|a| a.alive) {
        println!("{actor}");
    }
    println!("Alive: {}/{}", battle.alive_count(), snapshot.len());
    println!("======================\n");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let seconds = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => DEFAULT_SECONDS,
    };

    let config = BattleConfig::default();
    let actors = fresh_roster(ACTOR_COUNT, config.bounds);
    println!("Generated {ACTOR_COUNT} actors");

    let hub = Arc::new(NotificationHub::new());
    hub.subscribe_global(Arc::new(ConsoleSink));
    hub.subscribe_global(Arc::new(WriterSink::append_file("log.txt")?));

    println!("Starting battle for {seconds} seconds...");
    let mut battle = Battle::start(config, actors, hub)?;
    let report = battle.run_for(Duration::from_secs(seconds), Duration::from_secs(1), print_map);

    println!("\n===== GAME OVER =====");
    println!("Survivors:");
    for actor in battle.snapshot().into_iter().filter(|a| a.alive) {
        println!("  {actor}");
    }
    println!("\nTotal survived: {}/{ACTOR_COUNT}", battle.alive_count());

    let m = battle.metrics();
    tracing::info!(
        kills = m.kills,
        repelled = m.repelled,
        harmless = m.harmless,
        stale = m.stale_discarded,
        shutdown_ms = report.total_ms,
        "battle summary"
    );
    Ok(())
}
