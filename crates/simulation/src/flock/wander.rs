use bevy::prelude::*;

use crate::config::{
    WANDER_LOOKAHEAD, WANDER_MAX_HOVER, WANDER_MIN_HOVER, WANDER_TURN_RATE, WIND_FORCE_THRESHOLD,
};
use crate::noise_field::NoiseField;
use crate::terrain::TerrainQuery;

/// The single target the whole flock seeks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wander {
    pub heading: f32,
    pub target: Vec3,
}

impl Default for Wander {
    fn default() -> Self {
        Self {
            heading: 0.0,
            target: Vec3::new(WANDER_LOOKAHEAD, WANDER_MAX_HOVER, 0.0),
        }
    }
}

impl Wander {
    /// Turn the heading by a noise-driven amount and re-project the target
    /// `WANDER_LOOKAHEAD` units ahead of `centroid`, hovering above the
    /// ground there.
    pub fn update(
        &mut self,
        noise: &NoiseField,
        elapsed: f64,
        centroid: Vec3,
        terrain: &impl TerrainQuery,
        wind_speed: f32,
    ) -> Vec3 {
        let turn = noise.sample2d(elapsed * 0.1, 0.0) as f32 * WANDER_TURN_RATE;
        if turn.is_finite() {
            self.heading = (self.heading + turn).rem_euclid(std::f32::consts::TAU);
        }
        let x = centroid.x + self.heading.cos() * WANDER_LOOKAHEAD;
        let z = centroid.z + self.heading.sin() * WANDER_LOOKAHEAD;
        let ground = terrain.height_at(x, z);
        self.target = Vec3::new(x, ground + hover_height(elapsed, wind_speed), z);
        self.target
    }
}

/// Height above ground for the wander target: a slow swell between the min
/// and max hover, pushed down in strong wind, never below the minimum.
pub fn hover_height(elapsed: f64, wind_speed: f32) -> f32 {
    let swell = 0.5 + 0.5 * (elapsed as f32 * 0.15).sin();
    let mut hover = WANDER_MIN_HOVER + (WANDER_MAX_HOVER - WANDER_MIN_HOVER) * swell;
    if wind_speed > WIND_FORCE_THRESHOLD {
        hover /= 1.0 + (wind_speed - WIND_FORCE_THRESHOLD);
    }
    hover.max(WANDER_MIN_HOVER)
}
