//! Button state sampling
//!
//! Tracks which of the five controls are held and hands the simulation a
//! `Controls` snapshot each tick. A fire that the simulation acted on is
//! acknowledged here, so a held trigger does not also fire the next tank.

use serde::{Deserialize, Serialize};

use crate::sim::Controls;

/// The five on-screen controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Button {
    MoveLeft,
    MoveRight,
    AimLeft,
    AimRight,
    Fire,
}

impl Button {
    pub const ALL: [Button; 5] = [
        Button::MoveLeft,
        Button::MoveRight,
        Button::AimLeft,
        Button::AimRight,
        Button::Fire,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Button::MoveLeft => "move-left",
            Button::MoveRight => "move-right",
            Button::AimLeft => "aim-left",
            Button::AimRight => "aim-right",
            Button::Fire => "fire",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Button::ALL.into_iter().find(|b| b.as_str() == s)
    }
}

/// Held state of every button
#[derive(Debug, Clone, Default)]
pub struct Buttons {
    held: Controls,
    /// Fire was consumed and stays off until the button is released
    fire_acknowledged: bool,
}

impl Buttons {
    pub fn new() -> Self {
        Self::default()
    }

    /// Button went down
    pub fn press(&mut self, button: Button) {
        self.set(button, true);
    }

    /// Button went up
    pub fn release(&mut self, button: Button) {
        self.set(button, false);
        if button == Button::Fire {
            self.fire_acknowledged = false;
        }
    }

    /// Replace the held state of every button at once (e.g. a polled frame)
    pub fn set_all(&mut self, held: Controls) {
        if !held.fire {
            self.fire_acknowledged = false;
        }
        self.held = held;
    }

    pub fn is_held(&self, button: Button) -> bool {
        match button {
            Button::MoveLeft => self.held.move_left,
            Button::MoveRight => self.held.move_right,
            Button::AimLeft => self.held.aim_left,
            Button::AimRight => self.held.aim_right,
            Button::Fire => self.held.fire,
        }
    }

    /// Controls as the simulation should see them this tick
    pub fn snapshot(&self) -> Controls {
        Controls {
            fire: self.held.fire && !self.fire_acknowledged,
            ..self.held
        }
    }

    /// The simulation fired; ignore the trigger until it is released
    pub fn acknowledge_fire(&mut self) {
        self.fire_acknowledged = true;
    }

    fn set(&mut self, button: Button, down: bool) {
        match button {
            Button::MoveLeft => self.held.move_left = down,
            Button::MoveRight => self.held.move_right = down,
            Button::AimLeft => self.held.aim_left = down,
            Button::AimRight => self.held.aim_right = down,
            Button::Fire => self.held.fire = down,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reflects_held_buttons() {
        let mut buttons = Buttons::new();
        assert_eq!(buttons.snapshot(), Controls::default());

        buttons.press(Button::MoveLeft);
        buttons.press(Button::AimRight);
        let controls = buttons.snapshot();
        assert!(controls.move_left);
        assert!(controls.aim_right);
        assert!(!controls.fire);

        buttons.release(Button::MoveLeft);
        assert!(!buttons.snapshot().move_left);
    }

    #[test]
    fn test_acknowledged_fire_needs_release() {
        let mut buttons = Buttons::new();
        buttons.press(Button::Fire);
        assert!(buttons.snapshot().fire);

        buttons.acknowledge_fire();
        assert!(!buttons.snapshot().fire);
        assert!(buttons.is_held(Button::Fire));

        buttons.release(Button::Fire);
        buttons.press(Button::Fire);
        assert!(buttons.snapshot().fire);
    }

    #[test]
    fn test_set_all_clears_acknowledgement_on_release() {
        let mut buttons = Buttons::new();
        let fire = Controls {
            fire: true,
            ..Default::default()
        };
        buttons.set_all(fire);
        buttons.acknowledge_fire();
        buttons.set_all(fire);
        assert!(!buttons.snapshot().fire);

        buttons.set_all(Controls::default());
        buttons.set_all(fire);
        assert!(buttons.snapshot().fire);
    }

    #[test]
    fn test_button_names_round_trip() {
        for button in Button::ALL {
            assert_eq!(Button::from_str(button.as_str()), Some(button));
        }
        assert_eq!(Button::from_str("jump"), None);
    }
}
