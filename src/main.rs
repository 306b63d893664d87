//! Runs the exchange simulation and prints the book ladder as it evolves.
//!
//! Configuration: `SIM_CONFIG` (JSON file), `SIM_SEED`, `SIM_TICKS`, `SIM_TICK_INTERVAL_MS`.
//! Logging: `RUST_LOG`.

use log::info;
use std::thread;
use std::time::Duration;
use tick_exchange::{SimConfig, Simulation};

fn main() -> tick_exchange::Result<()> {
    let _ = env_logger::try_init();
    let config = SimConfig::load()?;
    let interval = Duration::from_millis(config.tick_interval_ms);
    let render_every = config.render_every;
    let ticks = config.ticks;
    let mut sim = Simulation::new(config)?;

    let mut tick: u64 = 0;
    while ticks == 0 || tick < ticks {
        sim.step();
        tick += 1;
        if render_every > 0 && tick % render_every == 0 {
            println!("tick {}\n{}", tick, sim.frame());
        }
        if !interval.is_zero() {
            thread::sleep(interval);
        }
    }

    for s in sim.summary() {
        info!(
            "trader={} policy={} money={} shares={} open_orders={}",
            s.trader.0, s.policy, s.money, s.shares, s.open_orders
        );
    }
    Ok(())
}
