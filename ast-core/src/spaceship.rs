use ast_lib::{heading_vector, wrap_position};
use entity_derive::Entity;
use macroquad::prelude::{vec2, Vec2};

use crate::input::Controls;
use crate::settings::{Settings, ThrustModel};

#[derive(Debug, Clone, Copy, PartialEq, Entity)]
pub struct Spaceship {
    position: Vec2,
    /// Degrees, kept within [0, 360)
    heading: f32,
    thrust: Vec2,
    width: f32,
    height: f32,
    radius: f32,

    // Scalar motion used by the inertia model
    speed: f32,
    drift_heading: f32,
    current_speed: f32,
    inertia_speed: f32,

    fire_cooldown: u32,
}

impl Spaceship {
    /// Ship proportions relative to the playfield
    pub const WIDTH_DIVISOR: f32 = 50.0;
    pub const HEIGHT_DIVISOR: f32 = 100.0;

    /// A ship resting at the centre of the playfield, facing right
    pub fn new(bounds: &Vec2) -> Self {
        let width = bounds.x / Self::WIDTH_DIVISOR;
        Spaceship {
            position: vec2(bounds.x / 2.0, bounds.y / 2.0),
            heading: 0.0,
            thrust: Vec2::ZERO,
            width,
            height: bounds.y / Self::HEIGHT_DIVISOR,
            radius: width / 2.0,
            speed: 0.0,
            drift_heading: 0.0,
            current_speed: 0.0,
            inertia_speed: 0.0,
            fire_cooldown: 0,
        }
    }

    /// Advance the ship by one frame
    pub fn update(&mut self, controls: &Controls, settings: &Settings, bounds: &Vec2) {
        match settings.thrust_model {
            ThrustModel::Vector => self.apply_vector_thrust(controls.thrust, settings),
            ThrustModel::Inertia => self.apply_inertia(controls.thrust, settings),
        }
        self.position = wrap_position(self.position, bounds);

        if controls.rotate_left {
            self.rotate(-settings.ship_turn_rate);
        }
        if controls.rotate_right {
            self.rotate(settings.ship_turn_rate);
        }

        self.fire_cooldown = self.fire_cooldown.saturating_sub(1);
    }

    fn apply_vector_thrust(&mut self, thrusting: bool, settings: &Settings) {
        if thrusting {
            self.thrust += heading_vector(self.heading) * settings.ship_acceleration;
            self.thrust = self.thrust.clamp_length_max(settings.ship_max_speed);
        } else {
            self.thrust *= settings.ship_friction;
        }
        self.position += self.thrust;
    }

    fn apply_inertia(&mut self, thrusting: bool, settings: &Settings) {
        if thrusting {
            if self.inertia_speed > 0.0 {
                // Bleed off the previous drift before accelerating again
                self.inertia_speed = (self.inertia_speed - settings.ship_acceleration).max(0.0);
                self.current_speed = self.inertia_speed;
                self.position += heading_vector(self.drift_heading) * self.inertia_speed;
            } else {
                if self.speed < settings.ship_max_speed {
                    self.speed =
                        (self.speed + settings.ship_acceleration).min(settings.ship_max_speed);
                }
                self.position += heading_vector(self.heading) * self.speed;
                self.drift_heading = self.heading;
                self.current_speed = self.speed;
            }
        } else if self.current_speed > 0.0 {
            self.speed = 0.0;
            self.position += heading_vector(self.drift_heading) * self.current_speed;
            self.inertia_speed = self.current_speed;
        }
        self.thrust = heading_vector(self.drift_heading) * self.current_speed;
    }

    fn rotate(&mut self, degrees: f32) {
        self.heading = (self.heading + degrees).rem_euclid(360.0);
    }

    /// Point at the front of the ship, where bullets leave from
    pub fn nose(&self) -> Vec2 {
        self.position + heading_vector(self.heading) * (self.width / 2.0)
    }

    pub fn can_fire(&self) -> bool {
        self.fire_cooldown == 0
    }

    pub fn set_fire_cooldown(&mut self, frames: u32) {
        self.fire_cooldown = frames;
    }

    /// Keep the ship inside new bounds after a resize
    pub fn rewrap(&mut self, bounds: &Vec2) {
        self.position = wrap_position(self.position, bounds);
    }

    pub fn get_heading(&self) -> f32 {
        self.heading
    }

    /// Velocity applied during the last frame
    pub fn get_thrust(&self) -> Vec2 {
        self.thrust
    }

    pub fn get_width(&self) -> f32 {
        self.width
    }

    pub fn get_height(&self) -> f32 {
        self.height
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, position: Vec2, heading: f32) {
        self.position = position;
        self.heading = heading;
    }
}
