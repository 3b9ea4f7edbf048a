//! Simulation engine
//!
//! Owns the world, the persistent coin balance, the skin selection and the
//! progression store. Drivers call [`SimulationEngine::tick`] once per frame
//! and read state back through shared borrows or [`FrameSnapshot`].

use super::spawn::{SpawnGenerator, generate_scenery_markers};
use super::state::{FrameSnapshot, GameEvent, Pickup, RunState, SceneryMarker, World};
use super::tick::{InputSnapshot, tick};
use crate::cosmetics::{Applied, CosmeticCatalog, PurchaseError};
use crate::persistence::{KEY_CURRENT_SKIN, KEY_TOTAL_COINS, PersistenceError, ProgressionStore};
use crate::tuning::Tuning;

/// Result of one engine tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    pub run_state: RunState,
    /// The run state changed on this tick (edge, reported once)
    pub transitioned: bool,
    pub events: Vec<GameEvent>,
}

/// The endless-runner core
pub struct SimulationEngine<S: ProgressionStore> {
    tuning: Tuning,
    catalog: CosmeticCatalog,
    store: S,
    spawner: SpawnGenerator,
    world: World,
    total_currency: u64,
    skin: String,
    /// Next coin id; ids stay unique across restarts
    next_id: u32,
}

impl<S: ProgressionStore> SimulationEngine<S> {
    /// Engine with entropy-seeded coin placement
    pub fn new(tuning: Tuning, catalog: CosmeticCatalog, store: S) -> Self {
        let spawner = SpawnGenerator::from_entropy(tuning.pickup_height);
        Self::with_spawner(tuning, catalog, store, spawner)
    }

    /// Engine with reproducible coin placement
    pub fn seeded(tuning: Tuning, catalog: CosmeticCatalog, store: S, seed: u64) -> Self {
        let spawner = SpawnGenerator::seeded(seed, tuning.pickup_height);
        Self::with_spawner(tuning, catalog, store, spawner)
    }

    fn with_spawner(
        tuning: Tuning,
        catalog: CosmeticCatalog,
        store: S,
        spawner: SpawnGenerator,
    ) -> Self {
        let stored_coins = store.load_int(KEY_TOTAL_COINS);
        let total_currency = u64::try_from(stored_coins).unwrap_or_else(|_| {
            log::warn!("Stored coin balance {} is negative, using 0", stored_coins);
            0
        });

        let skin = match store.load_string(KEY_CURRENT_SKIN) {
            Some(id) if catalog.contains(&id) => id,
            Some(id) => {
                log::warn!("Stored skin '{}' not in catalog, using default", id);
                catalog.default_id().to_string()
            }
            None => catalog.default_id().to_string(),
        };

        let mut engine = Self {
            world: World::new(&tuning, Vec::new()),
            tuning,
            catalog,
            store,
            spawner,
            total_currency,
            skin,
            next_id: 1,
        };
        let pickups = engine.spawn_pickups();
        engine.world.pickups = pickups;

        log::info!(
            "Run started: {} coins on track, balance {}, skin '{}'",
            engine.world.pickups.len(),
            engine.total_currency,
            engine.skin
        );
        engine
    }

    fn spawn_pickups(&mut self) -> Vec<Pickup> {
        let t = &self.tuning;
        let pickups = self.spawner.generate_pickups(
            self.next_id,
            t.pickup_start_z,
            t.pickup_end_z,
            t.pickup_stride,
            t.pickup_jitter,
        );
        self.next_id = self.next_id.wrapping_add(pickups.len() as u32);
        pickups
    }

    /// Persist the coin balance; failures are logged and returned, not retried
    fn save_balance(&mut self) -> Result<(), PersistenceError> {
        let value = i64::try_from(self.total_currency).unwrap_or(i64::MAX);
        self.store.save_int(KEY_TOTAL_COINS, value).inspect_err(|e| {
            log::warn!("Failed to save {}: {}", KEY_TOTAL_COINS, e);
        })
    }

    fn save_skin(&mut self) -> Result<(), PersistenceError> {
        self.store
            .save_string(KEY_CURRENT_SKIN, &self.skin)
            .inspect_err(|e| log::warn!("Failed to save {}: {}", KEY_CURRENT_SKIN, e))
    }

    /// Advance one frame
    pub fn tick(&mut self, input: &InputSnapshot) -> TickOutcome {
        let before = self.world.run_state;
        let report = tick(&mut self.world, input, &self.tuning);
        let mut events = Vec::new();

        if !report.collected.is_empty() {
            self.total_currency += report.collected.len() as u64;
            log::debug!(
                "Collected {} coin(s), score {}, balance {}",
                report.collected.len(),
                self.world.score,
                self.total_currency
            );
            events.extend(
                report
                    .collected
                    .iter()
                    .map(|&id| GameEvent::PickupCollected { id }),
            );
            if let Err(e) = self.save_balance() {
                events.push(GameEvent::PersistenceWriteFailed {
                    key: KEY_TOTAL_COINS.to_string(),
                    reason: e.to_string(),
                });
            }
        }

        if let Some(level) = report.level_up {
            log::debug!(
                "Level {} at distance {:.1}, monster speed {:.3}",
                level,
                self.world.distance(),
                self.world.adversary.speed
            );
            events.push(GameEvent::LevelUp { level });
        }

        if report.caught {
            log::info!(
                "Caught after {} ticks: score {}, level {}",
                self.world.time_ticks,
                self.world.score,
                self.world.current_level
            );
            events.push(GameEvent::Caught {
                score: self.world.score,
            });
        }

        TickOutcome {
            run_state: self.world.run_state,
            transitioned: self.world.run_state != before,
            events,
        }
    }

    /// Start a new run. Coins collected so far stay in the balance.
    /// Returns true if this ended a GameOver.
    pub fn restart(&mut self) -> bool {
        let was_over = self.world.run_state == RunState::GameOver;
        let pickups = self.spawn_pickups();
        self.world.reset(&self.tuning, pickups);
        log::info!("Restarted with {} coins on track", self.world.pickups.len());
        was_over
    }

    /// Buy and select a skin. On refusal nothing changes.
    pub fn purchase(&mut self, cosmetic_id: &str) -> Result<Applied, PurchaseError> {
        let (skin, remaining) = self
            .catalog
            .quote(cosmetic_id, self.total_currency)
            .inspect_err(|e| log::info!("Purchase of '{}' refused: {}", cosmetic_id, e))?;

        self.total_currency = remaining;
        self.skin = cosmetic_id.to_string();

        let mut persistence_failures = Vec::new();
        if let Err(e) = self.save_balance() {
            persistence_failures.push(e);
        }
        if let Err(e) = self.save_skin() {
            persistence_failures.push(e);
        }

        log::info!(
            "Bought '{}' for {}, balance {}",
            cosmetic_id,
            skin.cost,
            self.total_currency
        );
        Ok(Applied {
            cosmetic_id: self.skin.clone(),
            tint: skin.tint,
            balance: self.total_currency,
            persistence_failures,
        })
    }

    // === Read-only views ===

    pub fn run_state(&self) -> RunState {
        self.world.run_state
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn pickups(&self) -> &[Pickup] {
        &self.world.pickups
    }

    pub fn score(&self) -> u64 {
        self.world.score
    }

    pub fn current_level(&self) -> u32 {
        self.world.current_level
    }

    pub fn total_currency(&self) -> u64 {
        self.total_currency
    }

    pub fn skin(&self) -> &str {
        &self.skin
    }

    /// Tint of the selected skin
    pub fn tint(&self) -> u32 {
        self.catalog.get(&self.skin).map(|s| s.tint).unwrap_or_default()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn catalog(&self) -> &CosmeticCatalog {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Roadside trees for the renderer; fixed for the lifetime of the track
    pub fn scenery(&self) -> Vec<SceneryMarker> {
        let t = &self.tuning;
        generate_scenery_markers(
            t.scenery_start_z,
            t.scenery_end_z,
            t.scenery_stride,
            t.scenery_offset,
        )
    }

    /// Copy of everything the renderer draws this frame
    pub fn snapshot(&self) -> FrameSnapshot {
        FrameSnapshot {
            run_state: self.world.run_state,
            player_pos: self.world.player.pos,
            adversary_pos: self.world.adversary.pos,
            pickups: self.world.pickups.clone(),
            score: self.world.score,
            current_level: self.world.current_level,
            total_currency: self.total_currency,
            skin: self.skin.clone(),
            tint: self.tint(),
        }
    }

    /// Mutable world access for tests that need exact setups
    #[cfg(test)]
    pub(crate) fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }
}
