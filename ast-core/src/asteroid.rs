use ast_lib::{heading_vector, wrap_position};
use entity_derive::Entity;
use macroquad::prelude::{vec2, Vec2};
use rand::Rng;

use crate::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Entity)]
pub struct Asteroid {
    position: Vec2,
    radius: f32,
    velocity: Vec2,
}

impl Asteroid {
    pub fn new(position: Vec2, radius: f32, velocity: Vec2) -> Self {
        Asteroid {
            position,
            radius: radius.max(0.0),
            velocity,
        }
    }

    /// An asteroid near one of the playfield edges drifting in a random direction
    pub fn random<R: Rng>(rng: &mut R, settings: &Settings, bounds: &Vec2) -> Self {
        let position = Self::new_alea_pos(rng, bounds, settings.asteroid_radius);
        let speed = rng.gen_range(settings.asteroid_min_speed..=settings.asteroid_max_speed);
        let direction = rng.gen_range(0.0..360.0);
        Self::new(
            position,
            settings.asteroid_radius,
            heading_vector(direction) * speed,
        )
    }

    /// Generates a random position near one of the screen edges.
    fn new_alea_pos<R: Rng>(rng: &mut R, bounds: &Vec2, offset: f32) -> Vec2 {
        let nearpos: f32 = if offset > 0.0 {
            rng.gen_range(offset * 0.5..=offset)
        } else {
            0.0
        };
        // 1 = top, 2 = right, 3 = bottom, 4 = left
        let nearside = rng.gen_range(1..=4);
        let xpos = match nearside {
            2 => bounds.x - nearpos,
            4 => nearpos,
            _ => rng.gen_range(0.0..=bounds.x),
        };
        let ypos = match nearside {
            1 => nearpos,
            3 => bounds.y - nearpos,
            _ => rng.gen_range(0.0..=bounds.y),
        };
        wrap_position(vec2(xpos, ypos), bounds)
    }

    // Linear motion, moving at the opposite edge
    pub fn update(&mut self, bounds: &Vec2) {
        self.position = wrap_position(self.position + self.velocity, bounds);
    }

    pub fn rewrap(&mut self, bounds: &Vec2) {
        self.position = wrap_position(self.position, bounds);
    }

    pub fn get_velocity(&self) -> Vec2 {
        self.velocity
    }
}
