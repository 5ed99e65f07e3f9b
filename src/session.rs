//! Match loop
//!
//! Owns the field and the button state, and runs one simulation step per
//! animation tick: sample controls, tick the field, acknowledge a consumed
//! fire, draw. When the match ends the sink hears about it once and every
//! later step does nothing.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::input::Buttons;
use crate::render::Surface;
use crate::settings::{ConfigError, MatchConfig};
use crate::sim::{Field, GameEvent, Outcome, tick};

/// Receives the end-of-match announcement
pub trait GameOverSink {
    fn game_over(&mut self, outcome: Outcome, message: &str);
}

impl<F: FnMut(Outcome, &str)> GameOverSink for F {
    fn game_over(&mut self, outcome: Outcome, message: &str) {
        self(outcome, message)
    }
}

/// A running match
pub struct Match {
    config: MatchConfig,
    field: Field,
    buttons: Buttons,
    sink: Box<dyn GameOverSink>,
    outcome: Option<Outcome>,
    ticks: u64,
    /// Events from the most recent step
    events: Vec<GameEvent>,
}

impl Match {
    /// Validate the config, generate the field and hand tank 0 the first turn
    pub fn new(
        config: MatchConfig,
        sink: impl GameOverSink + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut field = Field::new(config.width, config.height, &mut rng);
        field.populate(
            config.players as usize,
            config.tanks_per_player as usize,
            &mut rng,
        );
        field.start();
        log::info!(
            "New match with seed {}: {} players x {} tanks on {}x{}",
            seed,
            config.players,
            config.tanks_per_player,
            config.width,
            config.height
        );

        Ok(Self {
            config: MatchConfig {
                seed: Some(seed),
                ..config
            },
            field,
            buttons: Buttons::new(),
            sink: Box::new(sink),
            outcome: None,
            ticks: 0,
            events: Vec::new(),
        })
    }

    /// Config the match was built from, with the seed actually used
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn buttons(&self) -> &Buttons {
        &self.buttons
    }

    /// Input collaborators press and release buttons through this
    pub fn buttons_mut(&mut self) -> &mut Buttons {
        &mut self.buttons
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// The match ended; the caller should stop scheduling steps
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Events raised during the last step
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Advance one tick without drawing
    pub fn advance(&mut self) {
        if self.is_finished() {
            return;
        }

        let controls = self.buttons.snapshot();
        let outcome = tick(&mut self.field, &controls);
        self.ticks += 1;

        self.events = self.field.drain_events();
        if self
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Fired { .. }))
        {
            self.buttons.acknowledge_fire();
        }

        if let Some(outcome) = outcome {
            let message = outcome.message();
            log::info!("Game over after {} ticks: {}", self.ticks, message);
            self.outcome = Some(outcome);
            self.sink.game_over(outcome, &message);
        }
    }

    /// One animation frame: advance, then draw the scene
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.advance();
        self.field.draw(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Button;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn seeded(players: u32, tanks: u32) -> MatchConfig {
        MatchConfig {
            seed: Some(2024),
            ..MatchConfig::new(players, tanks)
        }
    }

    /// Run until the active tank changes or the match ends
    fn play_out_turn(game: &mut Match) {
        let tank = game.field().current_tank_id();
        for _ in 0..2000 {
            game.advance();
            if game.is_finished() || game.field().current_tank_id() != tank {
                return;
            }
        }
        panic!("turn never finished");
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        assert!(matches!(
            Match::new(MatchConfig::new(1, 1), |_: Outcome, _: &str| {}),
            Err(ConfigError::TooFewPlayers)
        ));
    }

    #[test]
    fn test_same_seed_same_match() {
        let a = Match::new(seeded(3, 2), |_: Outcome, _: &str| {}).unwrap();
        let b = Match::new(seeded(3, 2), |_: Outcome, _: &str| {}).unwrap();
        assert_eq!(a.field().terrain(), b.field().terrain());
        let xs = |m: &Match| m.field().tanks().iter().map(|t| t.x).collect::<Vec<_>>();
        assert_eq!(xs(&a), xs(&b));
        assert_eq!(a.field().tanks().len(), 6);
    }

    #[test]
    fn test_held_fire_does_not_carry_to_next_tank() {
        let mut game = Match::new(seeded(2, 1), |_: Outcome, _: &str| {}).unwrap();
        game.buttons_mut().press(Button::Fire);

        game.advance();
        assert!(game.field().current_tank().fired);
        assert!(!game.buttons().snapshot().fire);

        play_out_turn(&mut game);
        // One 60-point self-hit cannot end a fresh match
        assert!(!game.is_finished());
        assert_eq!(game.field().current_tank_id(), 1);
        // Trigger still physically held, but the new tank has not fired
        assert!(game.buttons().is_held(Button::Fire));
        for _ in 0..10 {
            game.advance();
        }
        assert!(!game.field().current_tank().fired);
    }

    #[test]
    fn test_sink_notified_once() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let log = calls.clone();
        let mut game = Match::new(seeded(2, 1), move |outcome: Outcome, message: &str| {
            log.borrow_mut().push((outcome, message.to_string()));
        })
        .unwrap();

        // Everyone fires straight up and lands on themselves until somebody wins
        for _ in 0..200 {
            if game.is_finished() {
                break;
            }
            game.buttons_mut().release(Button::Fire);
            game.buttons_mut().press(Button::Fire);
            play_out_turn(&mut game);
        }

        assert!(game.is_finished());
        let ticks = game.ticks();
        game.advance();
        game.advance();
        assert_eq!(game.ticks(), ticks);

        let calls = calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, calls[0].0.message());
    }
}
