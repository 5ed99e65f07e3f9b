//! Player-controlled tanks
//!
//! A tank only has an x position; its y is always the ground under it.

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::projectile::{Blast, Projectile};
use super::terrain::Terrain;
use super::tick::Controls;
use crate::consts::*;

/// Drawn radius of a tank body
pub const TANK_RADIUS: f32 = 5.0;
/// Drawn barrel length
pub const BARREL_LENGTH: f32 = 10.0;

/// A single tank
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tank {
    /// Horizontal position, within `[0, width - 1]`
    pub x: f32,
    /// Owning player index
    pub player: usize,
    pub health: f32,
    /// Movement budget for the current turn
    pub fuel: u32,
    /// Radians in `[π, 2π]`: π faces left, 1.5π straight up, 2π right
    pub barrel_angle: f32,
    pub fired: bool,
    /// Already had a turn in the current round for its player
    pub has_taken_turn: bool,
    pub destroyed: bool,
    pub projectile: Option<Projectile>,
    /// Ticks left to show the turn-indicator arrow
    pub arrow_ticks: u32,
}

/// What happened to the active tank during one update
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TankStep {
    pub fired: bool,
    pub blast: Option<Blast>,
}

impl Tank {
    pub fn new(x: f32, player: usize) -> Self {
        Self {
            x,
            player,
            health: START_HEALTH,
            fuel: START_FUEL,
            barrel_angle: START_BARREL_ANGLE,
            fired: false,
            has_taken_turn: false,
            destroyed: false,
            projectile: None,
            arrow_ticks: 0,
        }
    }

    #[inline]
    pub fn may_move(&self) -> bool {
        self.fuel > 0
    }

    #[inline]
    pub fn may_fire(&self) -> bool {
        !self.fired
    }

    /// Fire a shell from the ground under the tank. Uses up the remaining fuel.
    pub fn fire(&mut self, terrain: &Terrain) {
        debug_assert!(self.may_fire());
        self.fired = true;
        self.fuel = 0;

        let origin = Vec2::new(self.x, terrain.height_at(self.x));
        self.projectile = Some(Projectile::launch(origin, self.barrel_angle, PROJECTILE_SPEED));
    }

    /// The tank has fired and its shell has finished exploding
    pub fn finished_turn(&self) -> bool {
        self.fired && self.projectile.is_none()
    }

    pub fn end_turn(&mut self) {
        self.fuel = START_FUEL;
        self.fired = false;
        self.has_taken_turn = true;
        self.arrow_ticks = 0;
    }

    pub fn start_turn(&mut self) {
        self.arrow_ticks = START_TICKS_TO_DISPLAY_ARROW;
    }

    /// End of the barrel, for drawing
    pub fn barrel_tip(&self, ground_y: f32) -> Vec2 {
        Vec2::new(
            self.x + BARREL_LENGTH * self.barrel_angle.cos(),
            ground_y + BARREL_LENGTH * self.barrel_angle.sin(),
        )
    }

    /// Advance the active tank one tick under the given controls
    pub fn update(&mut self, controls: &Controls, terrain: &Terrain) -> TankStep {
        let mut step = TankStep::default();

        if self.arrow_ticks > 0 {
            self.arrow_ticks -= 1;
        }

        if self.may_move() {
            let max_x = terrain.width().saturating_sub(1) as f32;
            if controls.move_left && self.x > 0.0 {
                self.fuel -= 1;
                self.x = (self.x - TANK_MOVE_STEP).max(0.0);
            } else if controls.move_right && self.x < max_x {
                self.fuel -= 1;
                self.x = (self.x + TANK_MOVE_STEP).min(max_x);
            }
        }

        if self.may_fire() {
            if controls.fire {
                self.fire(terrain);
                step.fired = true;
            }

            if controls.aim_left && self.barrel_angle > PI {
                self.barrel_angle = (self.barrel_angle - BARREL_ROTATE_SPEED).max(PI);
            } else if controls.aim_right && self.barrel_angle < TAU {
                self.barrel_angle = (self.barrel_angle + BARREL_ROTATE_SPEED).min(TAU);
            }
        }

        if let Some(projectile) = &mut self.projectile {
            step.blast = projectile.update(terrain);
            if projectile.finished_exploding {
                self.projectile = None;
            }
        }

        step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat() -> Terrain {
        Terrain::from_heights(vec![400; 640])
    }

    fn all_held() -> Controls {
        Controls {
            move_left: true,
            move_right: true,
            aim_left: true,
            aim_right: true,
            fire: true,
        }
    }

    #[test]
    fn test_new_tank_is_ready() {
        let tank = Tank::new(10.0, 0);
        assert!(tank.may_move());
        assert!(tank.may_fire());
        assert!(!tank.finished_turn());
        assert_eq!(tank.health, START_HEALTH);
    }

    #[test]
    fn test_move_consumes_fuel_and_clamps() {
        let terrain = flat();
        let mut tank = Tank::new(1.0, 0);
        let left = Controls {
            move_left: true,
            ..Default::default()
        };

        tank.update(&left, &terrain);
        assert_eq!(tank.x, 0.0);
        assert_eq!(tank.fuel, START_FUEL - 1);

        // Already at the edge: no movement, no fuel spent
        tank.update(&left, &terrain);
        assert_eq!(tank.x, 0.0);
        assert_eq!(tank.fuel, START_FUEL - 1);

        let mut tank = Tank::new(639.0, 0);
        let right = Controls {
            move_right: true,
            ..Default::default()
        };
        tank.update(&right, &terrain);
        assert_eq!(tank.x, 639.0);
        assert_eq!(tank.fuel, START_FUEL);
    }

    #[test]
    fn test_fuel_runs_out() {
        let terrain = flat();
        let mut tank = Tank::new(300.0, 0);
        let right = Controls {
            move_right: true,
            ..Default::default()
        };
        for _ in 0..START_FUEL + 20 {
            tank.update(&right, &terrain);
        }
        assert_eq!(tank.fuel, 0);
        assert_eq!(tank.x, 300.0 + START_FUEL as f32);
        assert!(!tank.may_move());
    }

    #[test]
    fn test_no_fuel_means_no_movement() {
        let terrain = flat();
        let mut tank = Tank::new(300.0, 0);
        tank.fuel = 0;
        tank.fired = true;
        for _ in 0..10 {
            tank.update(&all_held(), &terrain);
            assert_eq!(tank.x, 300.0);
            assert_eq!(tank.fuel, 0);
        }
    }

    #[test]
    fn test_aim_clamps_to_half_circle() {
        let terrain = flat();
        let mut tank = Tank::new(300.0, 0);
        let aim_left = Controls {
            aim_left: true,
            ..Default::default()
        };
        for _ in 0..100 {
            tank.update(&aim_left, &terrain);
        }
        assert_eq!(tank.barrel_angle, PI);

        let aim_right = Controls {
            aim_right: true,
            ..Default::default()
        };
        for _ in 0..100 {
            tank.update(&aim_right, &terrain);
        }
        assert_eq!(tank.barrel_angle, TAU);
    }

    #[test]
    fn test_fire_then_resolve_finishes_turn() {
        let terrain = flat();
        let mut tank = Tank::new(300.0, 0);
        let fire = Controls {
            fire: true,
            ..Default::default()
        };

        let step = tank.update(&fire, &terrain);
        assert!(step.fired);
        assert!(tank.fired);
        assert_eq!(tank.fuel, 0);
        assert!(tank.projectile.is_some());
        assert!(!tank.finished_turn());

        // Holding fire does nothing more once the shot is away
        let mut blasts = 0;
        for _ in 0..500 {
            let step = tank.update(&fire, &terrain);
            assert!(!step.fired);
            if step.blast.is_some() {
                blasts += 1;
            }
            if tank.finished_turn() {
                break;
            }
        }
        assert_eq!(blasts, 1);
        assert!(tank.finished_turn());

        tank.end_turn();
        assert!(tank.has_taken_turn);
        assert_eq!(tank.fuel, START_FUEL);
        assert!(tank.may_fire());
        assert!(!tank.finished_turn());
    }

    #[test]
    fn test_arrow_countdown() {
        let terrain = flat();
        let mut tank = Tank::new(300.0, 0);
        tank.start_turn();
        assert_eq!(tank.arrow_ticks, START_TICKS_TO_DISPLAY_ARROW);
        tank.update(&Controls::default(), &terrain);
        assert_eq!(tank.arrow_ticks, START_TICKS_TO_DISPLAY_ARROW - 1);
        tank.end_turn();
        assert_eq!(tank.arrow_ticks, 0);
    }
}
