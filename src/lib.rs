//! Tank Duel - A turn-based artillery game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, tanks, projectiles, turn rotation)
//! - `input`: Button state sampling for the five controls
//! - `palette`: Player colours shared by drawing and announcements
//! - `render`: Drawing surface abstraction
//! - `session`: Match loop that drives the simulation once per tick
//! - `settings`: Match configuration

pub mod input;
pub mod palette;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;

pub use input::{Button, Buttons};
pub use palette::Color;
pub use render::Surface;
pub use session::{GameOverSink, Match};
pub use settings::{ConfigError, MatchConfig};

/// Game configuration constants
pub mod consts {
    /// Default field dimensions
    pub const FIELD_WIDTH: u32 = 640;
    pub const FIELD_HEIGHT: u32 = 480;

    /// Terrain never walks closer than this to the top or bottom edge
    pub const TERRAIN_MARGIN: i32 = 10;
    /// Probability of the terrain stepping up (and, separately, down) per column
    pub const TERRAIN_STEP_CHANCE: f64 = 0.3;

    /// Tank defaults
    pub const START_HEALTH: f32 = 100.0;
    pub const START_FUEL: u32 = 100;
    /// Ticks the turn-indicator arrow stays visible after a turn starts
    pub const START_TICKS_TO_DISPLAY_ARROW: u32 = 60;
    /// Barrel rotation per tick (radians)
    pub const BARREL_ROTATE_SPEED: f32 = 0.05;
    /// Starting barrel angle (straight up, 0 faces right, clockwise increasing)
    pub const START_BARREL_ANGLE: f32 = 1.5 * std::f32::consts::PI;
    /// Horizontal movement per tick while a move control is held
    pub const TANK_MOVE_STEP: f32 = 1.0;

    /// Projectile launch speed (pixels/tick)
    pub const PROJECTILE_SPEED: f32 = 10.0;
    /// Downward acceleration (pixels/tick²)
    pub const GRAVITY: f32 = 0.25;
    /// Ticks an explosion lasts
    pub const EXPLOSION_LENGTH: u32 = 30;
    /// Blast radius at the peak of the explosion, also the damage reach
    pub const MAX_BLAST_RADIUS: f32 = 30.0;
    /// Damage per pixel inside the blast radius
    pub const DAMAGE_RATIO: f32 = 2.0;
}
