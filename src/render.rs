//! Drawing surface abstraction
//!
//! The simulation never touches pixels. `Field::draw` describes the scene
//! through a `Surface`; a canvas, terminal or test recorder does the rest.
//! Coordinates are field pixels with y growing downward.

use glam::Vec2;

pub use crate::palette::Color;
use crate::sim::{Field, PROJECTILE_RADIUS, Projectile, TANK_RADIUS, Tank};

/// Tanks sit this far above the ground line so they look parked on it
pub const TANK_GROUND_OFFSET: f32 = 5.0;
/// Terrain polyline samples every n-th column
pub const TERRAIN_STEP: usize = 3;

pub const HEALTHBAR_WIDTH: f32 = 30.0;
pub const HEALTHBAR_HEIGHT: f32 = 5.0;
/// Health bar / arrow offset above the tank
pub const INDICATOR_OFFSET: f32 = 45.0;

/// Drawing primitives supplied by the rendering collaborator
pub trait Surface {
    /// Wipe the whole surface
    fn clear(&mut self);
    /// Open line through `points`
    fn polyline(&mut self, points: &[Vec2], color: Color);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color);
    fn fill_rect(&mut self, top_left: Vec2, size: Vec2, color: Color);
    fn stroke_rect(&mut self, top_left: Vec2, size: Vec2, color: Color);
    /// Turn-indicator arrow image, top-left corner at `top_left`
    fn arrow(&mut self, top_left: Vec2);
}

impl Field {
    /// Describe the whole scene to `surface`
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        let terrain = self.terrain();
        let heights = terrain.heights();
        surface.clear();

        let mut points = vec![Vec2::new(0.0, heights[0] as f32)];
        points.extend(
            heights
                .iter()
                .enumerate()
                .step_by(TERRAIN_STEP)
                .map(|(x, &h)| Vec2::new(x as f32, h as f32)),
        );
        surface.polyline(&points, Color::Black);

        for tank in self.tanks() {
            let y = self.height_at(tank.x) - TANK_GROUND_OFFSET;
            draw_tank(tank, y, surface);
        }

        if let Some(projectile) = &self.current_tank().projectile {
            draw_projectile(projectile, surface);
        }
    }
}

fn draw_tank<S: Surface + ?Sized>(tank: &Tank, y: f32, surface: &mut S) {
    if tank.destroyed {
        return;
    }
    let color = Color::for_player(tank.player);
    let body = Vec2::new(tank.x, y);

    surface.fill_circle(body, TANK_RADIUS, color);
    surface.line(body, tank.barrel_tip(y), color);

    if tank.arrow_ticks > 0 {
        surface.arrow(Vec2::new(tank.x - 8.0, y - INDICATOR_OFFSET));
    } else {
        let top_left = Vec2::new(tank.x - HEALTHBAR_WIDTH / 2.0, y - INDICATOR_OFFSET);
        let fill = Vec2::new(HEALTHBAR_WIDTH * (tank.health / 100.0), HEALTHBAR_HEIGHT);
        surface.fill_rect(top_left, fill, Color::for_health(tank.health));
        surface.stroke_rect(
            top_left,
            Vec2::new(HEALTHBAR_WIDTH, HEALTHBAR_HEIGHT),
            Color::Black,
        );
    }
}

fn draw_projectile<S: Surface + ?Sized>(projectile: &Projectile, surface: &mut S) {
    if projectile.is_exploding() {
        surface.fill_circle(projectile.pos, projectile.blast_radius(), Color::Orange);
    } else {
        surface.fill_circle(projectile.pos, PROJECTILE_RADIUS, Color::Black);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Controls, Terrain};

    #[derive(Debug, PartialEq)]
    enum Op {
        Clear,
        Polyline(usize),
        Circle(Vec2, f32, Color),
        Line(Color),
        FillRect(Vec2, Color),
        StrokeRect,
        Arrow(Vec2),
    }

    #[derive(Default)]
    struct Recorder {
        ops: Vec<Op>,
    }

    impl Surface for Recorder {
        fn clear(&mut self) {
            self.ops.push(Op::Clear);
        }
        fn polyline(&mut self, points: &[Vec2], _color: Color) {
            self.ops.push(Op::Polyline(points.len()));
        }
        fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
            self.ops.push(Op::Circle(center, radius, color));
        }
        fn line(&mut self, _from: Vec2, _to: Vec2, color: Color) {
            self.ops.push(Op::Line(color));
        }
        fn fill_rect(&mut self, _top_left: Vec2, size: Vec2, color: Color) {
            self.ops.push(Op::FillRect(size, color));
        }
        fn stroke_rect(&mut self, _top_left: Vec2, _size: Vec2, _color: Color) {
            self.ops.push(Op::StrokeRect);
        }
        fn arrow(&mut self, top_left: Vec2) {
            self.ops.push(Op::Arrow(top_left));
        }
    }

    fn field() -> Field {
        let mut field = Field::with_terrain(Terrain::from_heights(vec![400; 9]));
        field.add_tank(Tank::new(2.0, 0));
        field.add_tank(Tank::new(6.0, 1));
        field.start();
        field
    }

    #[test]
    fn test_scene_layout() {
        let mut field = field();
        field.tanks_mut()[1].health = 50.0;
        let mut recorder = Recorder::default();
        field.draw(&mut recorder);

        assert_eq!(
            recorder.ops,
            vec![
                Op::Clear,
                // first point plus columns 0, 3, 6
                Op::Polyline(4),
                Op::Circle(Vec2::new(2.0, 395.0), TANK_RADIUS, Color::Red),
                Op::Line(Color::Red),
                Op::Arrow(Vec2::new(-6.0, 350.0)),
                Op::Circle(Vec2::new(6.0, 395.0), TANK_RADIUS, Color::Blue),
                Op::Line(Color::Blue),
                Op::FillRect(Vec2::new(15.0, HEALTHBAR_HEIGHT), Color::Orange),
                Op::StrokeRect,
            ]
        );
    }

    #[test]
    fn test_destroyed_tanks_are_hidden() {
        let mut field = field();
        field.tanks_mut()[1].destroyed = true;
        let mut recorder = Recorder::default();
        field.draw(&mut recorder);
        assert!(
            !recorder
                .ops
                .iter()
                .any(|op| matches!(op, Op::Circle(_, _, Color::Blue)))
        );
    }

    #[test]
    fn test_active_projectile_is_drawn() {
        let mut field = field();
        let fire = Controls {
            fire: true,
            ..Default::default()
        };
        field.update(&fire);
        let mut recorder = Recorder::default();
        field.draw(&mut recorder);
        assert!(
            recorder
                .ops
                .iter()
                .any(|op| matches!(op, Op::Circle(_, r, Color::Black) if *r == PROJECTILE_RADIUS))
        );
    }

    #[test]
    fn test_health_colours() {
        assert_eq!(Color::for_health(100.0), Color::Green);
        assert_eq!(Color::for_health(66.0), Color::Orange);
        assert_eq!(Color::for_health(34.0), Color::Orange);
        assert_eq!(Color::for_health(33.0), Color::Red);
        assert_eq!(Color::for_player(6), Color::Red);
    }
}
