//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per call, no wall-clock time
//! - Seeded RNG only, and only while setting up a match
//! - Stable iteration order (by tank id)
//! - No rendering or platform dependencies

pub mod field;
pub mod projectile;
pub mod state;
pub mod tank;
pub mod terrain;
pub mod tick;

pub use field::Field;
pub use projectile::{Blast, PROJECTILE_RADIUS, Projectile};
pub use state::{GameEvent, Outcome};
pub use tank::{BARREL_LENGTH, TANK_RADIUS, Tank, TankStep};
pub use terrain::Terrain;
pub use tick::{Controls, tick};
