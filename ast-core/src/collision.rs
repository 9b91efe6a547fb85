//! Pairwise circle-distance checks between the ship, bullets and asteroids.

use ast_lib::CosmicEntity;
use slotmap::SlotMap;
use std::collections::HashSet;

use crate::asteroid::Asteroid;
use crate::bullet::Bullet;
use crate::gamestate::{AsteroidKey, BulletKey};
use crate::spaceship::Spaceship;

/// First asteroid overlapping the ship, if any
pub fn ship_hit(ship: &Spaceship, asteroids: &SlotMap<AsteroidKey, Asteroid>) -> Option<AsteroidKey> {
    asteroids
        .iter()
        .find(|(_, asteroid)| asteroid.collides_with(ship))
        .map(|(key, _)| key)
}

/// Bullet/asteroid pairs that collide this frame.
/// Each bullet and each asteroid shows up in at most one pair.
pub fn bullet_hits(
    bullets: &SlotMap<BulletKey, Bullet>,
    asteroids: &SlotMap<AsteroidKey, Asteroid>,
) -> Vec<(BulletKey, AsteroidKey)> {
    let mut destroyed: HashSet<AsteroidKey> = HashSet::new();
    let mut hits = Vec::new();

    for (bullet_key, bullet) in bullets {
        let target = asteroids
            .iter()
            .filter(|(key, _)| !destroyed.contains(key))
            .find(|(_, asteroid)| asteroid.collides_with(bullet))
            .map(|(key, _)| key);

        if let Some(asteroid_key) = target {
            destroyed.insert(asteroid_key);
            hits.push((bullet_key, asteroid_key));
        }
    }

    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::prelude::{vec2, Vec2};

    const BOUNDS: Vec2 = Vec2::new(1000.0, 800.0);

    fn asteroid_at(x: f32, y: f32) -> Asteroid {
        Asteroid::new(vec2(x, y), 30.0, Vec2::ZERO)
    }

    #[test]
    fn ship_hit_at_exact_boundary_is_ignored() {
        // Ship radius is 10 on this playfield, centred at (500, 400)
        let ship = Spaceship::new(&BOUNDS);
        let mut asteroids = SlotMap::with_key();
        asteroids.insert(asteroid_at(540.0, 400.0));
        assert_eq!(ship_hit(&ship, &asteroids), None);

        let inside = asteroids.insert(asteroid_at(539.5, 400.0));
        assert_eq!(ship_hit(&ship, &asteroids), Some(inside));
    }

    #[test]
    fn bullet_hits_pair_each_asteroid_once() {
        let mut asteroids = SlotMap::with_key();
        let target = asteroids.insert(asteroid_at(100.0, 100.0));
        asteroids.insert(asteroid_at(500.0, 500.0));

        let mut bullets = SlotMap::with_key();
        let first = bullets.insert(Bullet::new(vec2(110.0, 100.0), 0.0, 5.0, 2.0));
        bullets.insert(Bullet::new(vec2(90.0, 100.0), 0.0, 5.0, 2.0));
        bullets.insert(Bullet::new(vec2(300.0, 300.0), 0.0, 5.0, 2.0));

        let hits = bullet_hits(&bullets, &asteroids);
        assert_eq!(hits, vec![(first, target)]);
    }

    #[test]
    fn bullet_touching_the_rim_misses() {
        let mut asteroids = SlotMap::with_key();
        asteroids.insert(asteroid_at(100.0, 100.0));
        let mut bullets = SlotMap::with_key();
        bullets.insert(Bullet::new(vec2(132.0, 100.0), 0.0, 5.0, 2.0));
        assert!(bullet_hits(&bullets, &asteroids).is_empty());
    }
}
