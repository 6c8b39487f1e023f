//! Rain drops in a box that follows the viewer focus.
//!
//! The pool is allocated once. How many drops are live is driven by the
//! weather's rain intensity, so a storm fading out thins the rain smoothly.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{
    RAIN_BOX_HALF_EXTENT, RAIN_BOX_HEIGHT, RAIN_CAPACITY, RAIN_FALL_SPEED, RAIN_WIND_DRIFT,
};
use crate::terrain::{Terrain, TerrainQuery};
use crate::viewer::Viewer;
use crate::weather::{WeatherParams, WeatherSnapshot};
use crate::EcosystemSet;

#[derive(Resource, Debug, Clone)]
pub struct RainField {
    drops: Vec<Vec3>,
    live: usize,
    rng: ChaCha8Rng,
}

impl RainField {
    /// A full pool scattered through the box around the origin.
    pub fn new(seed: u64) -> Self {
        Self::with_capacity(RAIN_CAPACITY, seed)
    }

    pub fn with_capacity(capacity: usize, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let drops = (0..capacity)
            .map(|_| {
                let mut p = spawn_point(&mut rng, Vec3::ZERO);
                p.y -= rng.gen_range(0.0..RAIN_BOX_HEIGHT);
                p
            })
            .collect();
        Self {
            drops,
            live: 0,
            rng,
        }
    }

    pub fn capacity(&self) -> usize {
        self.drops.len()
    }

    /// Positions of the drops currently falling.
    pub fn live_drops(&self) -> &[Vec3] {
        &self.drops[..self.live]
    }

    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Advance one frame: fall, drift with the wind, respawn at the top of
    /// the box when a drop hits the ground, the floor, or a side.
    pub fn step(&mut self, focus: Vec3, weather: &WeatherParams, terrain: &impl TerrainQuery) {
        let intensity = if weather.rain_intensity.is_finite() {
            weather.rain_intensity.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.live = ((intensity * self.drops.len() as f32).round() as usize).min(self.drops.len());

        let wind = weather.wind_vector();
        let drift = if wind.is_finite() {
            Vec3::new(wind.x, 0.0, wind.z) * RAIN_WIND_DRIFT
        } else {
            Vec3::ZERO
        };
        let fall = Vec3::NEG_Y * RAIN_FALL_SPEED + drift;
        let floor = focus.y - RAIN_BOX_HEIGHT * 0.5;

        for drop in &mut self.drops[..self.live] {
            *drop += fall;
            let outside = (drop.x - focus.x).abs() > RAIN_BOX_HALF_EXTENT
                || (drop.z - focus.z).abs() > RAIN_BOX_HALF_EXTENT;
            let landed = drop.y < floor || drop.y < terrain.height_at(drop.x, drop.z);
            if outside || landed || !drop.is_finite() {
                *drop = spawn_point(&mut self.rng, focus);
            }
        }
    }
}

/// A random point on the top face of the box around `focus`.
fn spawn_point(rng: &mut ChaCha8Rng, focus: Vec3) -> Vec3 {
    Vec3::new(
        focus.x + rng.gen_range(-RAIN_BOX_HALF_EXTENT..RAIN_BOX_HALF_EXTENT),
        focus.y + RAIN_BOX_HEIGHT * 0.5 - rng.gen_range(0.0..RAIN_FALL_SPEED),
        focus.z + rng.gen_range(-RAIN_BOX_HALF_EXTENT..RAIN_BOX_HALF_EXTENT),
    )
}

pub fn step_rain(
    viewer: Res<Viewer>,
    weather: Res<WeatherSnapshot>,
    terrain: Res<Terrain>,
    mut rain: ResMut<RainField>,
) {
    rain.step(viewer.focus, &weather.0, &*terrain);
}

pub struct PrecipitationPlugin;

impl Plugin for PrecipitationPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, step_rain.in_set(EcosystemSet::Simulation));
    }
}
