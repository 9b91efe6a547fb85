use ast_lib::heading_vector;
use entity_derive::Entity;
use macroquad::prelude::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Entity)]
pub struct Bullet {
    position: Vec2,
    /// Degrees
    heading: f32,
    speed: f32,
    radius: f32,
}

impl Bullet {
    /// Create a bullet projectile
    pub fn new(position: Vec2, heading: f32, speed: f32, radius: f32) -> Self {
        Bullet {
            position,
            heading,
            speed: speed.abs(),
            radius: radius.abs(),
        }
    }

    /// Bullets fly straight and are not wrapped, the caller discards them once out of bounds
    pub fn update(&mut self) {
        self.position += heading_vector(self.heading) * self.speed;
    }

    pub fn get_speed(&self) -> f32 {
        self.speed
    }
}
