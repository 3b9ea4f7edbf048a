//! Coin Runner entry point
//!
//! Native: headless run driven by the autopilot, printing a summary.
//! Web: the library's `WebRunner` is the entry point.
//!
//! Usage: coin-runner [--ticks N] [--seed S] [--config tuning.json]
//!                    [--save progress.json] [--buy SKIN]

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use coin_runner::cosmetics::CosmeticCatalog;
    use coin_runner::persistence::JsonFileStore;
    use coin_runner::platform::{autopilot_input, init_logging};
    use coin_runner::sim::{GameEvent, RunState, SimulationEngine};
    use coin_runner::tuning::Tuning;

    use std::path::PathBuf;

    use clap::Parser;

    /// Headless endless-runner session driven by the autopilot
    #[derive(Debug, Parser)]
    #[command(name = "coin-runner", version, about)]
    struct Options {
        /// Maximum ticks to simulate before stopping
        #[arg(long, default_value_t = 10_000)]
        ticks: u64,
        /// Seed for reproducible coin placement
        #[arg(long)]
        seed: Option<u64>,
        /// Tuning JSON file (defaults are used when missing or invalid)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Progress save file
        #[arg(long, default_value = "coin-runner-progress.json")]
        save: PathBuf,
        /// Skin to buy before the run starts
        #[arg(long)]
        buy: Option<String>,
    }

    pub fn run() {
        let opts = Options::parse();
        init_logging();

        let tuning = opts
            .config
            .as_deref()
            .map(Tuning::load_or_default)
            .unwrap_or_default();
        let store = JsonFileStore::open(&opts.save);
        let catalog = CosmeticCatalog::default();
        let mut engine = match opts.seed {
            Some(seed) => SimulationEngine::seeded(tuning, catalog, store, seed),
            None => SimulationEngine::new(tuning, catalog, store),
        };
        log::info!("Coin Runner (native) starting...");
        log::info!("{} trees along the track", engine.scenery().len());

        if let Some(skin) = opts.buy.as_deref() {
            match engine.purchase(skin) {
                Ok(applied) => log::info!(
                    "Now wearing '{}' (#{:06x}), {} coins left",
                    applied.cosmetic_id,
                    applied.tint,
                    applied.balance
                ),
                Err(e) => log::warn!("Could not buy '{}': {}", skin, e),
            }
        }

        let mut ticks = 0;
        while ticks < opts.ticks {
            let input = autopilot_input(engine.world(), engine.tuning());
            let outcome = engine.tick(&input);
            ticks += 1;
            for event in &outcome.events {
                match event {
                    GameEvent::LevelUp { level } => log::info!("Level {}", level),
                    GameEvent::PersistenceWriteFailed { key, reason } => {
                        log::warn!("Progress not saved ({}): {}", key, reason)
                    }
                    _ => {}
                }
            }
            if outcome.run_state == RunState::GameOver {
                break;
            }
        }

        let snap = engine.snapshot();
        println!("state:    {:?}", snap.run_state);
        println!("ticks:    {}", ticks);
        println!("distance: {:.1}", snap.player_pos.z.abs());
        println!("level:    {}", snap.current_level);
        println!("score:    {}", snap.score);
        println!("coins:    {}", snap.total_currency);
        println!("skin:     {} (#{:06x})", snap.skin, snap.tint);
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    native::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
