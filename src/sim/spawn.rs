//! Procedural coin and scenery placement
//!
//! "Ahead" on the track is negative z, so coin rows are generated with a
//! negative start and stride. Rows are computed as `start + k * stride`
//! rather than accumulated, so long tracks do not drift.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Pickup, SceneryMarker};

/// Guard against absurd configs producing unbounded allocations
const MAX_ROWS: usize = 1_000_000;

/// Positions `start + k * stride` strictly before `end` in the stride direction
fn rows(start: f32, end: f32, stride: f32) -> impl Iterator<Item = f32> {
    let valid = stride != 0.0 && stride.is_finite() && (end - start) * stride > 0.0;
    let count = if valid {
        (((end - start) / stride).ceil() as usize).min(MAX_ROWS)
    } else {
        0
    };
    (0..count)
        .map(move |k| start + k as f32 * stride)
        // ceil() can include one row sitting exactly on `end`
        .filter(move |z| (end - z) * stride > 0.0)
}

/// Coin spawner with its own RNG stream
#[derive(Debug, Clone)]
pub struct SpawnGenerator {
    rng: Pcg32,
    pickup_height: f32,
}

impl SpawnGenerator {
    /// Entropy-seeded generator: every run gets a fresh layout
    pub fn from_entropy(pickup_height: f32) -> Self {
        Self {
            rng: Pcg32::from_rng(&mut rand::rng()),
            pickup_height,
        }
    }

    /// Reproducible generator for tests and replays of a layout
    pub fn seeded(seed: u64, pickup_height: f32) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            pickup_height,
        }
    }

    /// One coin per row from `start_z` toward `end_z` (exclusive), laterally
    /// jittered uniformly in `[-jitter/2, jitter/2)`. Ids are consecutive
    /// from `first_id`.
    pub fn generate_pickups(
        &mut self,
        first_id: u32,
        start_z: f32,
        end_z: f32,
        stride: f32,
        jitter: f32,
    ) -> Vec<Pickup> {
        let half = jitter / 2.0;
        rows(start_z, end_z, stride)
            .zip(first_id..)
            .map(|(z, id)| {
                let x = if half > 0.0 {
                    self.rng.random_range(-half..half)
                } else {
                    0.0
                };
                Pickup {
                    id,
                    pos: Vec3::new(x, self.pickup_height, z),
                }
            })
            .collect()
    }
}

/// Two trees per row at `x = -offset` and `x = +offset`
pub fn generate_scenery_markers(
    start_z: f32,
    end_z: f32,
    stride: f32,
    lateral_offset: f32,
) -> Vec<SceneryMarker> {
    rows(start_z, end_z, stride)
        .flat_map(|z| {
            [
                SceneryMarker { x: -lateral_offset, z },
                SceneryMarker { x: lateral_offset, z },
            ]
        })
        .collect()
}
