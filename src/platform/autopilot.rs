//! Demo autopilot
//!
//! Produces an `InputSnapshot` that chases the nearest coin ahead. Used by
//! the headless binary and the browser attract mode.

use crate::sim::{InputSnapshot, Pickup, World};
use crate::tuning::Tuning;

/// How far ahead (in z) the autopilot looks for coins
const LOOKAHEAD: f32 = 30.0;

/// Nearest coin ahead of the player within the lookahead window
fn target_pickup<'a>(world: &'a World, tuning: &Tuning) -> Option<&'a Pickup> {
    let pos = world.player.pos;
    world
        .pickups
        .iter()
        .filter(|p| p.pos.z < pos.z && pos.z - p.pos.z <= LOOKAHEAD)
        .filter(|p| p.pos.x >= tuning.lateral_min && p.pos.x <= tuning.lateral_max)
        .min_by(|a, b| {
            pos.distance_squared(a.pos)
                .partial_cmp(&pos.distance_squared(b.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
}

/// Steer toward the nearest coin ahead; jump only for coins above the
/// player's standing height
pub fn autopilot_input(world: &World, tuning: &Tuning) -> InputSnapshot {
    let Some(target) = target_pickup(world, tuning) else {
        return InputSnapshot::NONE;
    };
    let dx = target.pos.x - world.player.pos.x;
    let deadzone = tuning.lateral_step / 2.0;
    let dz = world.player.pos.z - target.pos.z;

    InputSnapshot {
        steer_left: dx < -deadzone,
        steer_right: dx > deadzone,
        jump_held: target.pos.y > tuning.rest_height && dz < 2.0,
    }
}
