//! Fixed-step simulation tick
//!
//! One call = one frame. No delta time: every tick moves the world by the
//! same logical step, so perceived speed follows the host frame rate.

use super::collision::collect_pickups;
use super::state::{RunState, World};
use crate::tuning::Tuning;

/// Normalized input for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub steer_left: bool,
    pub steer_right: bool,
    pub jump_held: bool,
}

impl InputSnapshot {
    pub const NONE: Self = Self {
        steer_left: false,
        steer_right: false,
        jump_held: false,
    };
}

/// What a single tick changed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Ids of coins removed this tick
    pub collected: Vec<u32>,
    /// New level, if one was reached
    pub level_up: Option<u32>,
    /// Playing -> GameOver happened this tick
    pub caught: bool,
}

/// Advance the world by one fixed step.
///
/// Sub-step order:
///  1. Auto-run toward -z
///  2. Lateral steering (each direction clamped independently)
///  3. Jump start (grounded only)
///  4. Gravity + Euler integration, or snap to the ground
///  5. Monster advance
///  6. Coin collection
///  7. Level progression (at most one per tick)
///  8. Caught check
pub fn tick(world: &mut World, input: &InputSnapshot, tuning: &Tuning) -> TickReport {
    let mut report = TickReport::default();
    if world.run_state == RunState::GameOver {
        return report;
    }

    world.time_ticks += 1;
    let player = &mut world.player;
    let (min_x, max_x) = player.bounds;

    // 1. Auto-run
    player.pos.z -= tuning.forward_step;

    // 2. Steering
    if input.steer_left {
        player.pos.x = (player.pos.x - tuning.lateral_step).max(min_x);
    }
    if input.steer_right {
        player.pos.x = (player.pos.x + tuning.lateral_step).min(max_x);
    }

    // 3. Jump
    if input.jump_held && player.is_grounded(tuning.rest_height) {
        player.vel_y = tuning.jump_impulse;
    }

    // 4. Vertical integration. A jump started this tick is still on the
    // ground, so upward velocity also counts as airborne.
    if player.pos.y > tuning.rest_height || player.vel_y > 0.0 {
        player.vel_y -= tuning.gravity_step;
        player.pos.y += player.vel_y;
    } else {
        player.pos.y = tuning.rest_height;
        player.vel_y = 0.0;
    }

    // 5. Monster
    world.adversary.pos.z += world.adversary.speed;

    // 6. Coins
    report.collected = collect_pickups(&mut world.pickups, world.player.pos, tuning.pickup_radius);
    world.score += report.collected.len() as u64;

    // 7. Levels
    if world.distance() > world.current_level as f32 * tuning.level_distance {
        world.current_level += 1;
        world.adversary.speed += tuning.difficulty_speed_step;
        report.level_up = Some(world.current_level);
    }

    // 8. Caught
    if world.adversary.pos.z >= world.player.pos.z {
        world.run_state = RunState::GameOver;
        report.caught = true;
    }

    report
}
