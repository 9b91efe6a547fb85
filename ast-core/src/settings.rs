use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::{
    fs::{read_to_string, write},
    path::Path,
};

/// How the ship turns key input into motion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ThrustModel {
    /// Scalar speed along the heading; releasing thrust keeps the ship drifting
    Inertia,
    /// Thrust vector accumulated from input and damped by friction
    #[default]
    Vector,
}

/// What happens when something hits an asteroid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionPolicy {
    /// A ship hit restarts the whole game
    Reset,
    /// Only the colliding pair is removed, the ship respawns at the centre
    #[default]
    RemovePair,
}

/// Tunable gameplay values, all speeds are in pixels per frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ship_acceleration: f32,
    pub ship_max_speed: f32,
    /// Degrees per frame
    pub ship_turn_rate: f32,
    /// Fraction of the thrust kept every frame without input
    pub ship_friction: f32,
    pub thrust_model: ThrustModel,
    pub collision_policy: CollisionPolicy,

    pub asteroid_count: u32,
    pub asteroid_radius: f32,
    pub asteroid_min_speed: f32,
    pub asteroid_max_speed: f32,

    pub bullet_speed: f32,
    pub bullet_radius: f32,
    /// Frames between two shots while fire is held
    pub fire_cooldown: u32,

    pub points_per_asteroid: u64,
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            ship_acceleration: 0.05,
            ship_max_speed: 10.0,
            ship_turn_rate: 2.0,
            ship_friction: 0.99,
            thrust_model: ThrustModel::default(),
            collision_policy: CollisionPolicy::default(),

            asteroid_count: 5,
            asteroid_radius: 30.0,
            asteroid_min_speed: 0.5,
            asteroid_max_speed: 1.5,

            bullet_speed: 5.0,
            bullet_radius: 2.0,
            fire_cooldown: 10,

            points_per_asteroid: 100,
            seed: None,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, missing fields take their default value
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = read_to_string(path)?;
        Self::from_json(&data)
    }

    pub fn from_json(data: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(data)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a JSON file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)?;
        write(path, json)?;
        Ok(())
    }

    /// Reject values the simulation cannot work with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("ship_acceleration", self.ship_acceleration),
            ("ship_max_speed", self.ship_max_speed),
            ("ship_turn_rate", self.ship_turn_rate),
            ("asteroid_radius", self.asteroid_radius),
            ("asteroid_min_speed", self.asteroid_min_speed),
            ("asteroid_max_speed", self.asteroid_max_speed),
            ("bullet_speed", self.bullet_speed),
            ("bullet_radius", self.bullet_radius),
        ];
        for (field, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(
                    field,
                    format!("must be a non-negative number, got {}", value),
                ));
            }
        }

        if self.asteroid_count == 0 {
            return Err(ConfigError::invalid(
                "asteroid_count",
                "a wave needs at least one asteroid",
            ));
        }

        if !(0.0..=1.0).contains(&self.ship_friction) {
            return Err(ConfigError::invalid(
                "ship_friction",
                format!("must be within [0, 1], got {}", self.ship_friction),
            ));
        }

        if self.asteroid_min_speed > self.asteroid_max_speed {
            return Err(ConfigError::invalid(
                "asteroid_min_speed",
                format!(
                    "{} is above asteroid_max_speed {}",
                    self.asteroid_min_speed, self.asteroid_max_speed
                ),
            ));
        }

        Ok(())
    }
}
