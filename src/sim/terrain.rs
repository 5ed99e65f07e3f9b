//! Terrain height profile
//!
//! One integer ground height per column. Heights are screen y-coordinates,
//! so a larger value is lower on the field.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{TERRAIN_MARGIN, TERRAIN_STEP_CHANCE};

/// Ground profile for the whole field width
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Terrain {
    heights: Vec<i32>,
}

impl Terrain {
    /// Generate a profile with a bounded random walk.
    ///
    /// The walk starts somewhere in the lower 60% of the field and steps
    /// up or down by one pixel with probability 0.3 each, never leaving
    /// `[TERRAIN_MARGIN, height - TERRAIN_MARGIN]`. Columns are produced
    /// from the right edge toward the left.
    pub fn generate<R: Rng>(width: u32, height: u32, rng: &mut R) -> Self {
        assert!(width > 0, "terrain needs at least one column");
        let height = height as i32;
        let floor = TERRAIN_MARGIN;
        let ceiling = (height - TERRAIN_MARGIN).max(floor);

        let start = (height as f64 * (0.6 * rng.random::<f64>() + 0.4)).floor() as i32;
        let mut level = start.clamp(floor, ceiling);

        let mut heights = Vec::with_capacity(width as usize);
        heights.push(level);
        for _ in 1..width {
            let roll = rng.random::<f64>();
            if roll < TERRAIN_STEP_CHANCE && level < ceiling {
                level += 1;
            } else if roll > 1.0 - TERRAIN_STEP_CHANCE && level > floor {
                level -= 1;
            }
            heights.push(level);
        }
        heights.reverse();

        Self { heights }
    }

    /// Build a terrain from explicit heights (flat test fields, fixtures)
    pub fn from_heights(heights: Vec<i32>) -> Self {
        assert!(!heights.is_empty(), "terrain needs at least one column");
        Self { heights }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.heights.len()
    }

    /// All column heights, left to right
    pub fn heights(&self) -> &[i32] {
        &self.heights
    }

    /// Column index for a real x, clamped to the field (flat beyond both edges)
    #[inline]
    pub fn column(&self, x: f32) -> usize {
        let last = self.heights.len().saturating_sub(1);
        let col = x.floor();
        if col <= 0.0 {
            0
        } else {
            (col as usize).min(last)
        }
    }

    /// Ground y-coordinate under a real x
    #[inline]
    pub fn height_at(&self, x: f32) -> f32 {
        self.heights[self.column(x)] as f32
    }
}
