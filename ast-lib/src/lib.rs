use log::trace;
use macroquad::prelude::Vec2;
use slotmap::{Key, SlotMap};

// ==== TRAITS ====

/// Anything in the playfield that has a centre and a circular hitbox
pub trait CosmicEntity {
    fn get_position(&self) -> Vec2;
    fn get_radius(&self) -> f32;

    /// Is the entity outside of the playfield
    fn is_out_of_bounds(&self, bounds: &Vec2) -> bool {
        let pos = self.get_position();
        pos.x < 0.0 || pos.x > bounds.x || pos.y < 0.0 || pos.y > bounds.y
    }

    /// Check collision with another entity.
    /// Circles that only touch do not collide.
    fn collides_with<T: CosmicEntity + ?Sized>(&self, other: &T) -> bool {
        let distance = self.get_position().distance(other.get_position());
        distance < self.get_radius() + other.get_radius()
    }
}

// ==== GEOMETRY ====

/// Teleport a coordinate that left `[0, max]` to the opposite edge
pub fn wrap_coordinate(coord: f32, max: f32) -> f32 {
    if coord < 0.0 {
        max
    } else if coord > max {
        0.0
    } else {
        coord
    }
}

/// Move a position at the opposite edge when it leaves the playfield
pub fn wrap_position(mut pos: Vec2, bounds: &Vec2) -> Vec2 {
    pos.x = wrap_coordinate(pos.x, bounds.x);
    pos.y = wrap_coordinate(pos.y, bounds.y);
    pos
}

/// Unit vector for a heading given in degrees (canvas coordinates, y down)
pub fn heading_vector(degrees: f32) -> Vec2 {
    let radians = degrees.to_radians();
    Vec2::new(radians.cos(), radians.sin())
}

// ==== MISC ====

/// Change enum for adding/removing entities
#[derive(Debug, Clone, PartialEq)]
pub enum Change<K, T> {
    Add(T),
    Remove(K),
}

/// Returns true when a removal of `key` is already queued
pub fn is_removal_queued<K: Key, T>(changes: &[Change<K, T>], key: K) -> bool {
    changes
        .iter()
        .any(|c| matches!(c, Change::Remove(k) if *k == key))
}

/// Apply changes to a collection of entities.
/// Removing a key twice, or a key that is already gone, is a no-op.
/// Returns the number of entities actually removed.
pub fn apply_changes<K: Key, T>(map: &mut SlotMap<K, T>, changes: &mut Vec<Change<K, T>>) -> usize {
    let mut removed = 0;
    for change in changes.drain(..) {
        match change {
            Change::Add(item) => {
                let key = map.insert(item);
                trace!("Inserted entity {:?}", key);
            }
            Change::Remove(key) => {
                if map.remove(key).is_some() {
                    removed += 1;
                }
            }
        }
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use slotmap::DefaultKey;

    struct Dot {
        position: Vec2,
        radius: f32,
    }

    impl CosmicEntity for Dot {
        fn get_position(&self) -> Vec2 {
            self.position
        }
        fn get_radius(&self) -> f32 {
            self.radius
        }
    }

    fn dot(x: f32, y: f32, radius: f32) -> Dot {
        Dot {
            position: Vec2::new(x, y),
            radius,
        }
    }

    #[test]
    fn wrap_teleports_to_opposite_edge() {
        let bounds = Vec2::new(800.0, 600.0);
        assert_eq!(wrap_position(Vec2::new(-0.1, 300.0), &bounds), Vec2::new(800.0, 300.0));
        assert_eq!(wrap_position(Vec2::new(800.1, 300.0), &bounds), Vec2::new(0.0, 300.0));
        assert_eq!(wrap_position(Vec2::new(400.0, -3.0), &bounds), Vec2::new(400.0, 600.0));
        assert_eq!(wrap_position(Vec2::new(400.0, 601.0), &bounds), Vec2::new(400.0, 0.0));
    }

    #[test]
    fn wrap_keeps_positions_on_the_edge() {
        let bounds = Vec2::new(800.0, 600.0);
        assert_eq!(wrap_position(Vec2::new(0.0, 600.0), &bounds), Vec2::new(0.0, 600.0));
        assert_eq!(wrap_position(Vec2::new(800.0, 0.0), &bounds), Vec2::new(800.0, 0.0));
    }

    #[test]
    fn collision_is_strict_at_the_radius_sum() {
        let a = dot(0.0, 0.0, 30.0);
        assert!(!a.collides_with(&dot(32.0, 0.0, 2.0)));
        assert!(a.collides_with(&dot(31.99, 0.0, 2.0)));
        // 3-4-5 triangle, distance exactly 5
        assert!(!dot(0.0, 0.0, 2.0).collides_with(&dot(3.0, 4.0, 3.0)));
    }

    #[test]
    fn out_of_bounds_excludes_edges() {
        let bounds = Vec2::new(100.0, 100.0);
        assert!(!dot(100.0, 0.0, 1.0).is_out_of_bounds(&bounds));
        assert!(dot(100.5, 50.0, 1.0).is_out_of_bounds(&bounds));
        assert!(dot(50.0, -0.5, 1.0).is_out_of_bounds(&bounds));
    }

    #[test]
    fn heading_vector_points_down_at_ninety_degrees() {
        let v = heading_vector(90.0);
        assert_relative_eq!(v.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(v.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn apply_changes_keeps_other_keys_stable() {
        let mut map: SlotMap<DefaultKey, Dot> = SlotMap::new();
        let first = map.insert(dot(1.0, 1.0, 1.0));
        let second = map.insert(dot(2.0, 2.0, 1.0));

        let mut changes = vec![
            Change::Remove(first),
            Change::Remove(first),
            Change::Add(dot(3.0, 3.0, 1.0)),
        ];
        assert!(is_removal_queued(&changes, first));
        assert!(!is_removal_queued(&changes, second));

        let removed = apply_changes(&mut map, &mut changes);
        assert_eq!(removed, 1);
        assert!(changes.is_empty());
        assert_eq!(map.len(), 2);
        assert!(map.get(first).is_none());
        assert_eq!(map[second].position, Vec2::new(2.0, 2.0));
    }
}
