//! Player and indicator colours
//!
//! Players are known by colour both on screen and in the win announcement,
//! so both read from this one palette.

use serde::{Deserialize, Serialize};

/// Named colours used by the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Color {
    Red,
    Blue,
    Green,
    Orange,
    Purple,
    Black,
}

impl Color {
    const PLAYERS: [Color; 6] = [
        Color::Red,
        Color::Blue,
        Color::Green,
        Color::Orange,
        Color::Purple,
        Color::Black,
    ];

    /// Colour for a player, wrapping past the palette
    pub fn for_player(player: usize) -> Self {
        Self::PLAYERS[player % Self::PLAYERS.len()]
    }

    /// Health bar fill by remaining health
    pub fn for_health(health: f32) -> Self {
        if health > 66.0 {
            Color::Green
        } else if health > 33.0 {
            Color::Orange
        } else {
            Color::Red
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Red => "red",
            Color::Blue => "blue",
            Color::Green => "green",
            Color::Orange => "orange",
            Color::Purple => "purple",
            Color::Black => "black",
        }
    }
}
