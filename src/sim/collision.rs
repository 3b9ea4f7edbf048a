//! Proximity collision
//!
//! Coins are points; the player is collected against a sphere of fixed
//! radius around its origin.

use glam::Vec3;

use super::state::Pickup;

/// Strictly inside `radius` of `center`
#[inline]
pub fn within_radius(center: Vec3, point: Vec3, radius: f32) -> bool {
    center.distance_squared(point) < radius * radius
}

/// Remove every coin within `radius` of `player_pos`, returning the ids
/// collected in spawn order. Single compaction pass, so no entry is skipped
/// or visited twice.
pub fn collect_pickups(pickups: &mut Vec<Pickup>, player_pos: Vec3, radius: f32) -> Vec<u32> {
    let mut collected = Vec::new();
    pickups.retain(|p| {
        if within_radius(player_pos, p.pos, radius) {
            collected.push(p.id);
            false
        } else {
            true
        }
    });
    collected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(id: u32, x: f32, z: f32) -> Pickup {
        Pickup {
            id,
            pos: Vec3::new(x, 0.5, z),
        }
    }

    #[test]
    fn test_within_radius_is_strict() {
        let c = Vec3::ZERO;
        assert!(within_radius(c, Vec3::new(0.49, 0.0, 0.0), 0.5));
        assert!(!within_radius(c, Vec3::new(0.5, 0.0, 0.0), 0.5));
        assert!(!within_radius(c, Vec3::new(0.3, 0.3, 0.3), 0.5)); // |d| ~ 0.52
    }

    #[test]
    fn test_collect_adjacent_coins() {
        // Adjacent hits must not skip each other during removal
        let mut coins = vec![
            coin(1, 0.0, -1.0),
            coin(2, 0.0, -1.1),
            coin(3, 0.0, -1.2),
            coin(4, 3.0, -1.0),
        ];
        let player = Vec3::new(0.0, 0.75, -1.1);
        let ids = collect_pickups(&mut coins, player, 0.5);
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(coins.len(), 1);
        assert_eq!(coins[0].id, 4);
    }

    #[test]
    fn test_collect_none() {
        let mut coins = vec![coin(1, 0.0, -20.0)];
        let ids = collect_pickups(&mut coins, Vec3::new(0.0, 0.75, 0.0), 0.5);
        assert!(ids.is_empty());
        assert_eq!(coins.len(), 1);
    }

    #[test]
    fn test_height_matters() {
        // Coin at 0.5, player mid-jump at 1.2: vertical gap 0.7
        let mut coins = vec![coin(1, 0.0, -5.0)];
        let ids = collect_pickups(&mut coins, Vec3::new(0.0, 1.2, -5.0), 0.5);
        assert!(ids.is_empty());
    }
}
