//! Simulation module
//!
//! All gameplay logic lives here. No rendering or platform dependencies:
//! - Fixed logical step per tick, no wall clock
//! - Coin placement is the only randomness (seedable for tests)
//! - Stable iteration order (spawn order)

pub mod collision;
pub mod engine;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{collect_pickups, within_radius};
pub use engine::{SimulationEngine, TickOutcome};
pub use spawn::{SpawnGenerator, generate_scenery_markers};
pub use state::{
    Adversary, FrameSnapshot, GameEvent, Pickup, Player, RunState, SceneryMarker, World,
};
pub use tick::{InputSnapshot, TickReport, tick};
