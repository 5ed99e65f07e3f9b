//! The playing field: terrain, every tank, and whose turn it is
//!
//! Tanks are never removed; a destroyed tank keeps its slot so tank ids
//! stay stable for the whole match.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::{GameEvent, Outcome};
use super::tank::Tank;
use super::terrain::Terrain;
use super::tick::Controls;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Field {
    terrain: Terrain,
    tanks: Vec<Tank>,
    /// Number of distinct players (highest player index + 1)
    players: usize,
    current_tank_id: usize,
    /// Events raised since the last drain
    #[serde(skip)]
    events: Vec<GameEvent>,
}

impl Field {
    /// Generate terrain for a `width` × `height` field
    pub fn new<R: Rng>(width: u32, height: u32, rng: &mut R) -> Self {
        Self::with_terrain(Terrain::generate(width, height, rng))
    }

    pub fn with_terrain(terrain: Terrain) -> Self {
        Self {
            terrain,
            tanks: Vec::new(),
            players: 0,
            current_tank_id: 0,
            events: Vec::new(),
        }
    }

    /// Place `tanks_per_player` tanks for each player at random columns,
    /// grouped by player in player order
    pub fn populate<R: Rng>(&mut self, players: usize, tanks_per_player: usize, rng: &mut R) {
        let width = self.terrain.width() as f64;
        for player in 0..players {
            for _ in 0..tanks_per_player {
                let x = (rng.random::<f64>() * width).floor() as f32;
                self.add_tank(Tank::new(x, player));
            }
        }
    }

    pub fn add_tank(&mut self, tank: Tank) {
        self.players = self.players.max(tank.player + 1);
        self.tanks.push(tank);
    }

    /// Hand the first turn to tank 0. Call once, after all tanks are added.
    pub fn start(&mut self) {
        assert!(!self.tanks.is_empty(), "cannot start a field without tanks");
        self.current_tank_id = 0;
        self.begin_turn();
        log::info!(
            "Match started: {} players, {} tanks",
            self.players,
            self.tanks.len()
        );
    }

    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    pub fn tanks(&self) -> &[Tank] {
        &self.tanks
    }

    pub fn tanks_mut(&mut self) -> &mut [Tank] {
        &mut self.tanks
    }

    pub fn player_count(&self) -> usize {
        self.players
    }

    #[inline]
    pub fn height_at(&self, x: f32) -> f32 {
        self.terrain.height_at(x)
    }

    pub fn current_tank_id(&self) -> usize {
        self.current_tank_id
    }

    pub fn current_tank(&self) -> &Tank {
        &self.tanks[self.current_tank_id]
    }

    pub fn current_player(&self) -> usize {
        self.current_tank().player
    }

    /// Take the events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Players with at least one tank standing, in order of first appearance
    pub fn remaining_players(&self) -> Vec<usize> {
        let mut players = Vec::new();
        for tank in self.tanks.iter().filter(|t| !t.destroyed) {
            if !players.contains(&tank.player) {
                players.push(tank.player);
            }
        }
        players
    }

    /// The next player after the current one who still has a tank.
    ///
    /// # Panics
    ///
    /// If no player remains. Game over must be detected before rotating.
    pub fn next_player(&self) -> usize {
        let remaining = self.remaining_players();
        let initial = (self.current_player() + 1) % self.players;
        let mut candidate = initial;

        while !remaining.contains(&candidate) {
            candidate = (candidate + 1) % self.players;
            if candidate == initial {
                panic!("turn rotation found no remaining players");
            }
        }
        candidate
    }

    /// Make the next player's next tank active.
    ///
    /// Once every standing tank of that player has had a turn, the player's
    /// round starts over from its first standing tank.
    ///
    /// # Panics
    ///
    /// If the chosen player has no standing tank.
    pub fn set_next_tank(&mut self) {
        let next_player = self.next_player();
        let is_candidate = |t: &Tank| t.player == next_player && !t.destroyed;

        if self
            .tanks
            .iter()
            .filter(|t| is_candidate(&**t))
            .all(|t| t.has_taken_turn)
        {
            for tank in self.tanks.iter_mut().filter(|t| is_candidate(&**t)) {
                tank.has_taken_turn = false;
            }
        }

        match self
            .tanks
            .iter()
            .position(|t| is_candidate(t) && !t.has_taken_turn)
        {
            Some(id) => self.current_tank_id = id,
            None => panic!("player {} has no tank left to take a turn", next_player),
        }
    }

    /// Outcome of the match, `None` while at least two players have tanks
    pub fn outcome(&self) -> Option<Outcome> {
        let mut remaining = self.tanks.iter().filter(|t| !t.destroyed);
        let first = match remaining.next() {
            Some(tank) => tank.player,
            None => return Some(Outcome::Draw),
        };

        if remaining.all(|t| t.player == first) {
            Some(Outcome::Winner(first))
        } else {
            None
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.outcome().is_some()
    }

    /// Rotate to the next tank once the active tank's shot has resolved
    pub fn handle_events(&mut self) {
        if !self.current_tank().finished_turn() {
            return;
        }

        let id = self.current_tank_id;
        let player = self.current_player();
        self.tanks[id].end_turn();
        self.events.push(GameEvent::TurnEnded { tank: id, player });

        // Nobody to hand over to; update() reports the outcome
        if self.is_game_over() {
            return;
        }

        self.set_next_tank();
        self.begin_turn();
    }

    /// Advance the active tank, or report the outcome if the match is over
    pub fn update(&mut self, controls: &Controls) -> Option<Outcome> {
        if let Some(outcome) = self.outcome() {
            return Some(outcome);
        }

        let id = self.current_tank_id;
        let step = self.tanks[id].update(controls, &self.terrain);

        if step.fired {
            log::debug!("Tank {} fired at {:.2} rad", id, self.tanks[id].barrel_angle);
            self.events.push(GameEvent::Fired { tank: id });
        }
        if let Some(blast) = step.blast {
            log::debug!("Shell landed at ({:.1}, {:.1})", blast.pos.x, blast.pos.y);
            self.events.push(GameEvent::Exploded {
                x: blast.pos.x,
                y: blast.pos.y,
            });
            blast.apply(&mut self.tanks, &self.terrain, &mut self.events);
        }
        None
    }

    fn begin_turn(&mut self) {
        let id = self.current_tank_id;
        self.tanks[id].start_turn();
        let player = self.tanks[id].player;
        log::info!("Turn: tank {} (player {})", id, player);
        self.events.push(GameEvent::TurnStarted { tank: id, player });
    }
}
