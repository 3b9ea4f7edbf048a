//! Game tuning
//!
//! Every gameplay constant as data. Defaults match `crate::consts`; native
//! drivers may override them from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Errors from loading or validating tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse tuning file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning: {0}")]
    Invalid(String),
}

/// Gameplay constants for one engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Player ===
    pub forward_step: f32,
    pub lateral_step: f32,
    pub lateral_min: f32,
    pub lateral_max: f32,
    pub rest_height: f32,
    pub jump_impulse: f32,
    pub gravity_step: f32,

    // === Monster / difficulty ===
    pub adversary_start_z: f32,
    pub adversary_height: f32,
    pub adversary_start_speed: f32,
    pub difficulty_speed_step: f32,
    pub level_distance: f32,

    // === Coins ===
    pub pickup_radius: f32,
    pub pickup_height: f32,
    pub pickup_start_z: f32,
    pub pickup_end_z: f32,
    pub pickup_stride: f32,
    pub pickup_jitter: f32,

    // === Scenery ===
    pub scenery_start_z: f32,
    pub scenery_end_z: f32,
    pub scenery_stride: f32,
    pub scenery_offset: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            forward_step: FORWARD_STEP,
            lateral_step: LATERAL_STEP,
            lateral_min: LATERAL_MIN,
            lateral_max: LATERAL_MAX,
            rest_height: REST_HEIGHT,
            jump_impulse: JUMP_IMPULSE,
            gravity_step: GRAVITY_STEP,

            adversary_start_z: ADVERSARY_START_Z,
            adversary_height: ADVERSARY_HEIGHT,
            adversary_start_speed: ADVERSARY_START_SPEED,
            difficulty_speed_step: DIFFICULTY_SPEED_STEP,
            level_distance: LEVEL_DISTANCE,

            pickup_radius: PICKUP_RADIUS,
            pickup_height: PICKUP_HEIGHT,
            pickup_start_z: PICKUP_START_Z,
            pickup_end_z: PICKUP_END_Z,
            pickup_stride: PICKUP_STRIDE,
            pickup_jitter: PICKUP_JITTER,

            scenery_start_z: SCENERY_START_Z,
            scenery_end_z: SCENERY_END_Z,
            scenery_stride: SCENERY_STRIDE,
            scenery_offset: SCENERY_OFFSET,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; omitted fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, TuningError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load tuning, falling back to defaults when the file is missing or bad
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Using default tuning ({}): {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let fields = [
            ("forward_step", self.forward_step),
            ("lateral_step", self.lateral_step),
            ("lateral_min", self.lateral_min),
            ("lateral_max", self.lateral_max),
            ("rest_height", self.rest_height),
            ("jump_impulse", self.jump_impulse),
            ("gravity_step", self.gravity_step),
            ("adversary_start_z", self.adversary_start_z),
            ("adversary_height", self.adversary_height),
            ("adversary_start_speed", self.adversary_start_speed),
            ("difficulty_speed_step", self.difficulty_speed_step),
            ("level_distance", self.level_distance),
            ("pickup_radius", self.pickup_radius),
            ("pickup_height", self.pickup_height),
            ("pickup_start_z", self.pickup_start_z),
            ("pickup_end_z", self.pickup_end_z),
            ("pickup_stride", self.pickup_stride),
            ("pickup_jitter", self.pickup_jitter),
            ("scenery_start_z", self.scenery_start_z),
            ("scenery_end_z", self.scenery_end_z),
            ("scenery_stride", self.scenery_stride),
            ("scenery_offset", self.scenery_offset),
        ];
        if let Some((name, _)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(TuningError::Invalid(format!("{name} must be finite")));
        }
        if self.lateral_min > self.lateral_max {
            return Err(TuningError::Invalid(format!(
                "lateral_min ({}) exceeds lateral_max ({})",
                self.lateral_min, self.lateral_max
            )));
        }
        // The runner spawns at x = 0
        if self.lateral_min > 0.0 || self.lateral_max < 0.0 {
            return Err(TuningError::Invalid(format!(
                "lateral bounds [{}, {}] must contain 0",
                self.lateral_min, self.lateral_max
            )));
        }
        if self.lateral_step < 0.0 {
            return Err(TuningError::Invalid("lateral_step must not be negative".into()));
        }
        if self.forward_step <= 0.0 {
            return Err(TuningError::Invalid("forward_step must be positive".into()));
        }
        if self.jump_impulse <= 0.0 {
            return Err(TuningError::Invalid("jump_impulse must be positive".into()));
        }
        // Every jump has to come back down
        if self.gravity_step <= 0.0 {
            return Err(TuningError::Invalid("gravity_step must be positive".into()));
        }
        if self.level_distance <= 0.0 {
            return Err(TuningError::Invalid("level_distance must be positive".into()));
        }
        if self.pickup_radius <= 0.0 {
            return Err(TuningError::Invalid("pickup_radius must be positive".into()));
        }
        // Speed may never decrease within a run
        if self.difficulty_speed_step < 0.0 {
            return Err(TuningError::Invalid(
                "difficulty_speed_step must not be negative".into(),
            ));
        }
        Ok(())
    }

    /// Ticks until the monster catches a player running straight from z=0,
    /// ignoring level-ups. `None` if it never does.
    pub fn ticks_until_caught(&self) -> Option<u64> {
        let closing = self.forward_step + self.adversary_start_speed;
        if self.adversary_start_z >= 0.0 {
            return Some(1);
        }
        if closing <= 0.0 {
            return None;
        }
        Some((-self.adversary_start_z / closing).ceil() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_consts() {
        let t = Tuning::default();
        assert_eq!(t.forward_step, 0.1);
        assert_eq!(t.rest_height, 0.75);
        assert_eq!(t.adversary_start_speed, 0.05);
        assert_eq!(t.level_distance, 100.0);
        assert!(t.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let t = Tuning::from_json(r#"{ "forward_step": 0.2, "pickup_jitter": 0.0 }"#).unwrap();
        assert_eq!(t.forward_step, 0.2);
        assert_eq!(t.pickup_jitter, 0.0);
        assert_eq!(t.lateral_max, LATERAL_MAX);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let err = Tuning::from_json(r#"{ "lateral_min": 3.0, "lateral_max": -3.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid(_)));
    }

    fn rejected(tuning: Tuning) -> String {
        match tuning.validate() {
            Err(TuningError::Invalid(msg)) => msg,
            other => panic!("expected Invalid, got {:?}", other),
        }
    }

    #[test]
    fn test_bounds_must_contain_spawn() {
        let err = Tuning::from_json(r#"{ "lateral_min": 1.0, "lateral_max": 5.0 }"#).unwrap_err();
        assert!(matches!(&err, TuningError::Invalid(msg) if msg.contains("contain 0")), "{err}");
        let msg = rejected(Tuning {
            lateral_min: -5.0,
            lateral_max: -1.0,
            ..Tuning::default()
        });
        assert!(msg.contains("contain 0"), "{msg}");

        // Bounds touching 0 are fine
        let edge = Tuning {
            lateral_min: 0.0,
            lateral_max: 5.0,
            ..Tuning::default()
        };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_motion_steps_rejected() {
        let cases = [
            ("forward_step", Tuning { forward_step: 0.0, ..Tuning::default() }),
            ("forward_step", Tuning { forward_step: -0.1, ..Tuning::default() }),
            ("gravity_step", Tuning { gravity_step: 0.0, ..Tuning::default() }),
            ("gravity_step", Tuning { gravity_step: -0.01, ..Tuning::default() }),
            ("jump_impulse", Tuning { jump_impulse: 0.0, ..Tuning::default() }),
            ("lateral_step", Tuning { lateral_step: -0.1, ..Tuning::default() }),
            ("level_distance", Tuning { level_distance: 0.0, ..Tuning::default() }),
            ("pickup_radius", Tuning { pickup_radius: 0.0, ..Tuning::default() }),
            (
                "difficulty_speed_step",
                Tuning { difficulty_speed_step: -0.01, ..Tuning::default() },
            ),
        ];
        for (field, tuning) in cases {
            let msg = rejected(tuning);
            assert!(msg.starts_with(field), "{field}: {msg}");
        }

        // Standing still sideways is allowed
        let no_steer = Tuning {
            lateral_step: 0.0,
            ..Tuning::default()
        };
        assert!(no_steer.validate().is_ok());
    }

    #[test]
    fn test_non_finite_rejected() {
        let msg = rejected(Tuning {
            gravity_step: f32::NAN,
            ..Tuning::default()
        });
        assert_eq!(msg, "gravity_step must be finite");
        let msg = rejected(Tuning {
            scenery_offset: f32::INFINITY,
            ..Tuning::default()
        });
        assert_eq!(msg, "scenery_offset must be finite");
    }

    #[test]
    fn test_bad_json_rejected() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, TuningError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let t = Tuning::load_or_default("/definitely/not/here/tuning.json");
        assert_eq!(t, Tuning::default());
    }

    #[test]
    fn test_ticks_until_caught_default() {
        // -10 + 0.05n >= -0.1n  =>  n >= 66.67
        assert_eq!(Tuning::default().ticks_until_caught(), Some(67));
    }
}
