//! Simulation state and core entity types
//!
//! Plain data only. All mutation happens in `tick` and `SimulationEngine`.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

/// Lifecycle of a single run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Active gameplay
    #[default]
    Playing,
    /// Caught by the monster; waits for restart
    GameOver,
}

/// The runner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec3,
    pub vel_y: f32,
    /// Lateral track bounds (min x, max x)
    pub bounds: (f32, f32),
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec3::new(0.0, tuning.rest_height, 0.0),
            vel_y: 0.0,
            bounds: (tuning.lateral_min, tuning.lateral_max),
        }
    }

    /// Standing exactly on the ground; the only state a jump can start from
    #[inline]
    pub fn is_grounded(&self, rest_height: f32) -> bool {
        self.pos.y == rest_height
    }
}

/// The pursuing monster. Only z changes during a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Adversary {
    pub pos: Vec3,
    pub speed: f32,
}

impl Adversary {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec3::new(0.0, tuning.adversary_height, tuning.adversary_start_z),
            speed: tuning.adversary_start_speed,
        }
    }
}

/// A coin on the track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub pos: Vec3,
}

/// Purely cosmetic roadside tree
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SceneryMarker {
    pub x: f32,
    pub z: f32,
}

/// Something the driver may want to react to (sound, UI, logging)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PickupCollected { id: u32 },
    LevelUp { level: u32 },
    /// Monster reached the player; final score of the run
    Caught { score: u64 },
    /// A progress write failed; the run continues on in-memory values
    PersistenceWriteFailed { key: String, reason: String },
}

/// Per-run mutable world: entities, coins and run counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub player: Player,
    pub adversary: Adversary,
    /// Active coins, in spawn order
    pub pickups: Vec<Pickup>,
    pub run_state: RunState,
    /// Coins collected this run
    pub score: u64,
    pub current_level: u32,
    /// Simulation tick counter (this run)
    pub time_ticks: u64,
}

impl World {
    /// Fresh run with the given coins
    pub fn new(tuning: &Tuning, pickups: Vec<Pickup>) -> Self {
        Self {
            player: Player::new(tuning),
            adversary: Adversary::new(tuning),
            pickups,
            run_state: RunState::Playing,
            score: 0,
            current_level: 1,
            time_ticks: 0,
        }
    }

    /// Reset everything for a new run, reusing allocations
    pub fn reset(&mut self, tuning: &Tuning, pickups: Vec<Pickup>) {
        self.player = Player::new(tuning);
        self.adversary = Adversary::new(tuning);
        self.pickups = pickups;
        self.run_state = RunState::Playing;
        self.score = 0;
        self.current_level = 1;
        self.time_ticks = 0;
    }

    /// Distance run so far
    #[inline]
    pub fn distance(&self) -> f32 {
        self.player.pos.z.abs()
    }

    /// Gap between monster and player (positive while still running)
    #[inline]
    pub fn lead(&self) -> f32 {
        self.player.pos.z - self.adversary.pos.z
    }
}

/// Copied, read-only view of one frame for the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub run_state: RunState,
    pub player_pos: Vec3,
    pub adversary_pos: Vec3,
    pub pickups: Vec<Pickup>,
    pub score: u64,
    pub current_level: u32,
    pub total_currency: u64,
    pub skin: String,
    pub tint: u32,
}
