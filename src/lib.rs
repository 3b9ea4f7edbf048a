//! Coin Runner - An endless runner simulation core
//!
//! Core modules:
//! - `sim`: Fixed-step simulation (movement, coins, monster, run state)
//! - `persistence`: Key-value progression storage (coins, selected skin)
//! - `cosmetics`: Skin catalog and purchase rule
//! - `tuning`: Data-driven game constants
//! - `platform`: Logging setup, demo autopilot, browser binding

pub mod cosmetics;
pub mod persistence;
pub mod platform;
pub mod sim;
pub mod tuning;

pub use cosmetics::{Applied, Cosmetic, CosmeticCatalog, PurchaseError};
pub use persistence::{MemoryStore, PersistenceError, ProgressionStore};
pub use sim::{InputSnapshot, RunState, SimulationEngine, TickOutcome};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Distance the player auto-runs each tick (toward -z)
    pub const FORWARD_STEP: f32 = 0.1;
    /// Lateral distance per tick while steering
    pub const LATERAL_STEP: f32 = 0.1;
    /// Lateral track bounds
    pub const LATERAL_MIN: f32 = -5.0;
    pub const LATERAL_MAX: f32 = 5.0;

    /// Player standing height (group origin above the ground plane)
    pub const REST_HEIGHT: f32 = 0.75;
    /// Vertical velocity set when a jump starts
    pub const JUMP_IMPULSE: f32 = 0.2;
    /// Vertical velocity lost per airborne tick
    pub const GRAVITY_STEP: f32 = 0.01;

    /// Monster starts ahead on the track and walks toward +z
    pub const ADVERSARY_START_Z: f32 = -10.0;
    pub const ADVERSARY_HEIGHT: f32 = 1.0;
    pub const ADVERSARY_START_SPEED: f32 = 0.05;
    /// Speed added to the monster on every level-up
    pub const DIFFICULTY_SPEED_STEP: f32 = 0.01;
    /// Distance per level
    pub const LEVEL_DISTANCE: f32 = 100.0;

    /// Coin collection radius
    pub const PICKUP_RADIUS: f32 = 0.5;
    pub const PICKUP_HEIGHT: f32 = 0.5;
    /// Coin rows: z from -20 down to (not including) -500, every 5 units
    pub const PICKUP_START_Z: f32 = -20.0;
    pub const PICKUP_END_Z: f32 = -500.0;
    pub const PICKUP_STRIDE: f32 = -5.0;
    /// Total width of the random lateral spread (x in [-2, 2))
    pub const PICKUP_JITTER: f32 = 4.0;

    /// Roadside trees, both sides, every 20 units
    pub const SCENERY_START_Z: f32 = -500.0;
    pub const SCENERY_END_Z: f32 = 500.0;
    pub const SCENERY_STRIDE: f32 = 20.0;
    pub const SCENERY_OFFSET: f32 = 10.0;
}

/// Unpack a 0xRRGGBB tint into linear `[r, g, b]` in 0..=1
#[inline]
pub fn tint_to_rgb(tint: u32) -> [f32; 3] {
    [
        ((tint >> 16) & 0xff) as f32 / 255.0,
        ((tint >> 8) & 0xff) as f32 / 255.0,
        (tint & 0xff) as f32 / 255.0,
    ]
}
