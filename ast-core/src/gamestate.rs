use ast_lib::{apply_changes, is_removal_queued, Change, CosmicEntity};
use log::{debug, info, trace};
use macroquad::prelude::Vec2;
use rand::{rngs::SmallRng, SeedableRng};
use slotmap::{new_key_type, SlotMap};

use crate::asteroid::Asteroid;
use crate::bullet::Bullet;
use crate::collision::{bullet_hits, ship_hit};
use crate::error::ConfigError;
use crate::input::Controls;
use crate::settings::{CollisionPolicy, Settings};
use crate::spaceship::Spaceship;

/// Length of one simulation frame in seconds
pub const TICKS: f64 = 1.0 / 60.0;

new_key_type! {
    pub struct AsteroidKey;
    pub struct BulletKey;
}

/// What happened during one call to [`Gamestate::step`]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    pub fired: bool,
    pub bullets_expired: usize,
    pub asteroids_destroyed: usize,
    pub ship_destroyed: bool,
    pub reset: bool,
    pub wave_spawned: bool,
}

pub struct Gamestate {
    pub settings: Settings,
    pub bounds: Vec2,
    pub frame: u64,
    pub score: u64,
    pub waves: u32,

    pub spaceship: Spaceship,
    pub asteroids: SlotMap<AsteroidKey, Asteroid>,
    pub bullets: SlotMap<BulletKey, Bullet>,

    pub asteroid_changes: Vec<Change<AsteroidKey, Asteroid>>,
    pub bullet_changes: Vec<Change<BulletKey, Bullet>>,

    rng: SmallRng,
}

impl Gamestate {
    /// Build a game with its first wave, seeded from the settings when a seed is given
    pub fn new(settings: Settings, bounds: Vec2) -> Result<Gamestate, ConfigError> {
        settings.validate()?;
        let rng = match settings.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };

        let mut gamestate = Gamestate {
            spaceship: Spaceship::new(&bounds),
            settings,
            bounds,
            frame: 0,
            score: 0,
            waves: 0,
            asteroids: SlotMap::with_key(),
            bullets: SlotMap::with_key(),
            asteroid_changes: Vec::new(),
            bullet_changes: Vec::new(),
            rng,
        };
        gamestate.spawn_wave();
        Ok(gamestate)
    }

    /// Reset the gamestate to a playable environment
    pub fn reset(&mut self) {
        info!("Resetting game at frame {} (score {})", self.frame, self.score);
        self.spaceship = Spaceship::new(&self.bounds);
        self.asteroids.clear();
        self.bullets.clear();
        self.asteroid_changes.clear();
        self.bullet_changes.clear();
        self.score = 0;
        self.waves = 0;
        self.spawn_wave();
    }

    /// Fill the playfield with a fresh batch of asteroids
    pub fn spawn_wave(&mut self) {
        for _ in 0..self.settings.asteroid_count {
            let asteroid = Asteroid::random(&mut self.rng, &self.settings, &self.bounds);
            self.asteroids.insert(asteroid);
        }
        self.waves += 1;
        debug!(
            "Spawned wave {} with {} asteroids",
            self.waves,
            self.asteroids.len()
        );
    }

    /// Adopt new playfield bounds, pulling wrapped entities back inside.
    /// Minimised windows report an empty playfield, those sizes are ignored
    pub fn resize(&mut self, bounds: Vec2) {
        if bounds == self.bounds {
            return;
        }
        if !(bounds.x > 0.0 && bounds.y > 0.0) {
            trace!("Ignoring resize to {}x{}", bounds.x, bounds.y);
            return;
        }
        debug!("Playfield resized to {}x{}", bounds.x, bounds.y);
        self.bounds = bounds;
        self.spaceship.rewrap(&bounds);
        for asteroid in self.asteroids.values_mut() {
            asteroid.rewrap(&bounds);
        }
    }

    /// Makes the updates of the simulation so things move and interact
    pub fn step(&mut self, controls: &Controls) -> FrameReport {
        let mut report = FrameReport::default();
        self.frame += 1;

        self.update_spaceship(controls, &mut report);
        self.update_bullets(&mut report);
        self.update_asteroids();

        // Check the collision between the SPACESHIP and ASTEROIDS
        if let Some(asteroid_key) = ship_hit(&self.spaceship, &self.asteroids) {
            report.ship_destroyed = true;
            match self.settings.collision_policy {
                CollisionPolicy::Reset => {
                    self.reset();
                    report.reset = true;
                    return report;
                }
                CollisionPolicy::RemovePair => {
                    debug!("Ship destroyed by asteroid {:?}", asteroid_key);
                    self.asteroid_changes.push(Change::Remove(asteroid_key));
                    self.spaceship = Spaceship::new(&self.bounds);
                }
            }
        }

        // Missile collisions
        for (bullet_key, asteroid_key) in bullet_hits(&self.bullets, &self.asteroids) {
            self.bullet_changes.push(Change::Remove(bullet_key));
            // The ship already took this asteroid out, the bullet is spent without scoring
            if is_removal_queued(&self.asteroid_changes, asteroid_key) {
                continue;
            }
            self.asteroid_changes.push(Change::Remove(asteroid_key));
            self.score += self.settings.points_per_asteroid;
        }

        // Remove destroyed objects
        let removed = apply_changes(&mut self.asteroids, &mut self.asteroid_changes);
        report.asteroids_destroyed = removed.saturating_sub(usize::from(report.ship_destroyed));
        apply_changes(&mut self.bullets, &mut self.bullet_changes);

        if self.asteroids.is_empty() {
            self.spawn_wave();
            report.wave_spawned = true;
        }

        if report != FrameReport::default() {
            trace!("Frame {}: {:?}", self.frame, report);
        }
        report
    }

    fn update_spaceship(&mut self, controls: &Controls, report: &mut FrameReport) {
        self.spaceship.update(controls, &self.settings, &self.bounds);

        if controls.fire && self.spaceship.can_fire() {
            let bullet = Bullet::new(
                self.spaceship.nose(),
                self.spaceship.get_heading(),
                self.settings.bullet_speed,
                self.settings.bullet_radius,
            );
            self.bullets.insert(bullet);
            self.spaceship.set_fire_cooldown(self.settings.fire_cooldown);
            report.fired = true;
        }
    }

    fn update_bullets(&mut self, report: &mut FrameReport) {
        for (key, bullet) in &mut self.bullets {
            bullet.update();
            // Discard bullets that are out of bounds
            if bullet.is_out_of_bounds(&self.bounds) {
                self.bullet_changes.push(Change::Remove(key));
                report.bullets_expired += 1;
            }
        }
        apply_changes(&mut self.bullets, &mut self.bullet_changes);
    }

    fn update_asteroids(&mut self) {
        for asteroid in self.asteroids.values_mut() {
            asteroid.update(&self.bounds);
        }
    }
}
