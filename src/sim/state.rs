//! Match outcome and simulation events
//!
//! Events are collected by the field during a tick and drained by whoever
//! drives the match (sound, UI, logs). They never feed back into the sim.

use serde::{Deserialize, Serialize};

use crate::palette::Color;

/// Something notable that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A tank became the active tank
    TurnStarted { tank: usize, player: usize },
    /// The active tank's shot resolved and its turn is over
    TurnEnded { tank: usize, player: usize },
    /// The active tank fired; the fire control should be acknowledged
    Fired { tank: usize },
    /// A shell hit the ground
    Exploded { x: f32, y: f32 },
    /// A tank survived a hit
    TankDamaged { tank: usize, damage: f32, health: f32 },
    /// A tank was knocked out
    TankDestroyed { tank: usize, player: usize },
}

/// How a match ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Every tank was destroyed
    Draw,
    /// Only this player's tanks remain
    Winner(usize),
}

impl Outcome {
    /// Announcement shown to the players
    pub fn message(&self) -> String {
        match self {
            Outcome::Draw => "Nobody wins. Such is war...".to_string(),
            // Same palette the tanks are drawn with, so the name matches the screen
            Outcome::Winner(player) => {
                format!("The {} player wins!", Color::for_player(*player).as_str())
            }
        }
    }
}
