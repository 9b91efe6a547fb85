//! Headless simulation of the asteroids arcade game.
//!
//! Everything here advances in whole frames and never touches the window,
//! so the binary decides how frames map onto wall-clock time.

// Make modules public
pub mod asteroid;
pub mod bullet;
pub mod collision;
pub mod error;
pub mod gamestate;
pub mod input;
pub mod settings;
pub mod spaceship;

pub use error::ConfigError;
pub use gamestate::{AsteroidKey, BulletKey, FrameReport, Gamestate, TICKS};
pub use input::Controls;
pub use settings::{CollisionPolicy, Settings, ThrustModel};
