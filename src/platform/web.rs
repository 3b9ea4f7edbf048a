//! Browser binding
//!
//! The page's render loop owns a `WebRunner`, maps keyboard state to the
//! three input flags, calls `tick` once per animation frame and reads
//! positions back for the 3D scene.

use wasm_bindgen::prelude::*;

use crate::cosmetics::CosmeticCatalog;
use crate::persistence::LocalStorageStore;
use crate::sim::{GameEvent, InputSnapshot, RunState, SimulationEngine};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_main() {
    super::init_logging();
    log::info!("Coin Runner (web) starting...");
}

#[wasm_bindgen]
pub struct WebRunner {
    engine: SimulationEngine<LocalStorageStore>,
    /// Coin ids collected on the last tick, for removing meshes
    last_collected: Vec<u32>,
}

#[wasm_bindgen]
impl WebRunner {
    #[wasm_bindgen(constructor)]
    pub fn new() -> WebRunner {
        WebRunner {
            engine: SimulationEngine::new(
                Tuning::default(),
                CosmeticCatalog::default(),
                LocalStorageStore::new(),
            ),
            last_collected: Vec::new(),
        }
    }

    /// Advance one frame. Returns true when the run state just changed.
    pub fn tick(&mut self, left: bool, right: bool, jump: bool) -> bool {
        let outcome = self.engine.tick(&InputSnapshot {
            steer_left: left,
            steer_right: right,
            jump_held: jump,
        });
        self.last_collected.clear();
        for event in &outcome.events {
            match event {
                GameEvent::PickupCollected { id } => self.last_collected.push(*id),
                GameEvent::PersistenceWriteFailed { key, reason } => {
                    log::warn!("Progress not saved ({}): {}", key, reason);
                }
                _ => {}
            }
        }
        outcome.transitioned
    }

    pub fn restart(&mut self) {
        self.engine.restart();
    }

    /// Returns false (and changes nothing) when the skin is unaffordable
    pub fn purchase(&mut self, id: &str) -> bool {
        self.engine.purchase(id).is_ok()
    }

    pub fn is_game_over(&self) -> bool {
        self.engine.run_state() == RunState::GameOver
    }

    /// Player position as [x, y, z]
    pub fn player_pos(&self) -> Vec<f32> {
        self.engine.world().player.pos.to_array().to_vec()
    }

    /// Monster position as [x, y, z]
    pub fn adversary_pos(&self) -> Vec<f32> {
        self.engine.world().adversary.pos.to_array().to_vec()
    }

    /// Active coins flattened as [id, x, y, z, id, x, y, z, ...]
    pub fn pickups(&self) -> Vec<f32> {
        self.engine
            .pickups()
            .iter()
            .flat_map(|p| [p.id as f32, p.pos.x, p.pos.y, p.pos.z])
            .collect()
    }

    pub fn collected_last_tick(&self) -> Vec<u32> {
        self.last_collected.clone()
    }

    pub fn score(&self) -> u64 {
        self.engine.score()
    }

    pub fn level(&self) -> u32 {
        self.engine.current_level()
    }

    pub fn total_coins(&self) -> u64 {
        self.engine.total_currency()
    }

    /// Selected skin tint, 0xRRGGBB
    pub fn tint(&self) -> u32 {
        self.engine.tint()
    }
}

impl Default for WebRunner {
    fn default() -> Self {
        Self::new()
    }
}
