//! Fixed-step simulation tick
//!
//! One call per animation frame: finish the active turn if it is over,
//! then advance the active tank.

use serde::{Deserialize, Serialize};

use super::field::Field;
use super::state::Outcome;

/// Snapshot of the five controls for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Controls {
    pub move_left: bool,
    pub move_right: bool,
    pub aim_left: bool,
    pub aim_right: bool,
    pub fire: bool,
}

/// Advance the field by one tick. Returns the outcome once the match is over.
pub fn tick(field: &mut Field, controls: &Controls) -> Option<Outcome> {
    field.handle_events();
    field.update(controls)
}
