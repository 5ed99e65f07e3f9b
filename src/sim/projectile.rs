//! Shells in flight and their explosions
//!
//! A projectile falls under constant gravity until the ground reaches it,
//! then explodes. Damage is dealt once, at the moment of impact; the
//! explosion countdown afterwards only drives the visible blast.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::GameEvent;
use super::tank::Tank;
use super::terrain::Terrain;
use crate::consts::*;

/// Scale that makes `blast_radius` peak at `MAX_BLAST_RADIUS` halfway through
const BLAST_CONSTANT: f32 =
    MAX_BLAST_RADIUS / ((EXPLOSION_LENGTH as f32 / 2.0) * (EXPLOSION_LENGTH as f32 / 2.0));

/// Drawn radius of a shell in flight
pub const PROJECTILE_RADIUS: f32 = 3.0;

/// A fired shell, owned by the tank that fired it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    pub vel: Vec2,
    /// Ticks of explosion left (0 while airborne)
    pub exploding_ticks: u32,
    pub finished_exploding: bool,
}

/// Where a projectile hit the ground
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Blast {
    pub pos: Vec2,
}

impl Projectile {
    /// Launch from `pos` along `angle` (0 faces right, clockwise increasing)
    pub fn launch(pos: Vec2, angle: f32, speed: f32) -> Self {
        Self {
            pos,
            vel: Vec2::new(speed * angle.cos(), speed * angle.sin()),
            exploding_ticks: 0,
            finished_exploding: false,
        }
    }

    /// Ground has reached (or passed) the shell
    pub fn landed(&self, terrain: &Terrain) -> bool {
        terrain.height_at(self.pos.x) <= self.pos.y
    }

    #[inline]
    pub fn is_exploding(&self) -> bool {
        self.exploding_ticks > 0
    }

    /// Advance one tick. Returns the impact when the shell lands this tick.
    pub fn update(&mut self, terrain: &Terrain) -> Option<Blast> {
        if self.is_exploding() {
            self.exploding_ticks -= 1;
            if self.exploding_ticks == 0 {
                self.finished_exploding = true;
            }
            return None;
        }

        self.vel.y += GRAVITY;
        self.pos += self.vel;

        if self.landed(terrain) {
            self.pos.y = terrain.height_at(self.pos.x);
            return Some(self.explode());
        }
        None
    }

    /// Start the explosion countdown at the current position
    pub fn explode(&mut self) -> Blast {
        self.exploding_ticks = EXPLOSION_LENGTH;
        Blast { pos: self.pos }
    }

    /// Visible explosion size: zero at both ends of the countdown, peaking
    /// at `MAX_BLAST_RADIUS` halfway through
    pub fn blast_radius(&self) -> f32 {
        let t = self.exploding_ticks as f32;
        BLAST_CONSTANT * (t * EXPLOSION_LENGTH as f32 - t * t)
    }
}

impl Blast {
    /// Damage dealt to a target `distance` pixels from the impact
    #[inline]
    pub fn damage_at(distance: f32) -> f32 {
        DAMAGE_RATIO * (MAX_BLAST_RADIUS - distance).max(0.0)
    }

    /// Damage every tank still standing, including the one that fired.
    ///
    /// A tank whose health does not exceed the damage is destroyed; its
    /// recorded health is left untouched.
    pub fn apply(&self, tanks: &mut [Tank], terrain: &Terrain, events: &mut Vec<GameEvent>) {
        for (id, tank) in tanks.iter_mut().enumerate() {
            if tank.destroyed {
                continue;
            }
            let target = Vec2::new(tank.x, terrain.height_at(tank.x));
            let damage = Self::damage_at(self.pos.distance(target));

            if tank.health > damage {
                tank.health -= damage;
                if damage > 0.0 {
                    log::debug!("Tank {} hit for {:.1}, health {:.1}", id, damage, tank.health);
                    events.push(GameEvent::TankDamaged {
                        tank: id,
                        damage,
                        health: tank.health,
                    });
                }
            } else {
                tank.destroyed = true;
                log::info!("Tank {} (player {}) destroyed", id, tank.player);
                events.push(GameEvent::TankDestroyed {
                    tank: id,
                    player: tank.player,
                });
            }
        }
    }
}
