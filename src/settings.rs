//! Match configuration
//!
//! Player and tank counts come from the players before a match starts;
//! field size and seed usually come from defaults or a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{FIELD_HEIGHT, FIELD_WIDTH, TERRAIN_MARGIN};

/// Why a configuration or a typed-in answer was rejected
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Please enter a number.")]
    NotANumber,
    #[error("There must be at least two players.")]
    TooFewPlayers,
    #[error("There must be at least one tank per player")]
    TooFewTanks,
    #[error("That number is too large.")]
    TooLarge,
    #[error("{players} players x {tanks_per_player} tanks will not fit on a field {width} pixels wide")]
    TooManyTanks {
        players: u32,
        tanks_per_player: u32,
        width: u32,
    },
    #[error("Field must be at least 1 column wide and more than {min_height} pixels tall, got {width}x{height}")]
    FieldTooSmall {
        width: u32,
        height: u32,
        min_height: u32,
    },
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("could not read config: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything needed to set up a match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchConfig {
    /// Field width in pixels (one terrain column per pixel)
    pub width: u32,
    /// Field height in pixels
    pub height: u32,
    pub players: u32,
    pub tanks_per_player: u32,
    /// Fixed seed for a reproducible match; random when absent
    pub seed: Option<u64>,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
            players: 2,
            tanks_per_player: 1,
            seed: None,
        }
    }
}

impl MatchConfig {
    pub fn new(players: u32, tanks_per_player: u32) -> Self {
        Self {
            players,
            tanks_per_player,
            ..Self::default()
        }
    }

    /// Check the config can produce a playable match
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players < 2 {
            return Err(ConfigError::TooFewPlayers);
        }
        if self.tanks_per_player < 1 {
            return Err(ConfigError::TooFewTanks);
        }
        let min_height = 2 * TERRAIN_MARGIN as u32;
        if self.width == 0 || self.height <= min_height {
            return Err(ConfigError::FieldTooSmall {
                width: self.width,
                height: self.height,
                min_height,
            });
        }
        // Every tank needs a column of its own
        let fits = self
            .players
            .checked_mul(self.tanks_per_player)
            .is_some_and(|total| total <= self.width);
        if !fits {
            return Err(ConfigError::TooManyTanks {
                players: self.players,
                tanks_per_player: self.tanks_per_player,
                width: self.width,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded match config from {}", path.as_ref().display());
        Ok(config)
    }
}

/// Validate a typed-in player count
pub fn parse_players(text: &str) -> Result<u32, ConfigError> {
    let players = parse_count(text)?;
    if players < 2 {
        return Err(ConfigError::TooFewPlayers);
    }
    Ok(players)
}

/// Validate a typed-in tanks-per-player count
pub fn parse_tanks(text: &str) -> Result<u32, ConfigError> {
    let tanks = parse_count(text)?;
    if tanks < 1 {
        return Err(ConfigError::TooFewTanks);
    }
    Ok(tanks)
}

/// Leading integer of the input, ignoring surrounding whitespace and any
/// trailing junk ("3 players" reads as 3)
fn parse_count(text: &str) -> Result<u32, ConfigError> {
    let text = text.trim();
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return Err(ConfigError::NotANumber);
    }
    if negative {
        // Any negative count is below every minimum
        return Ok(0);
    }
    digits[..end].parse().map_err(|_| ConfigError::TooLarge)
}
