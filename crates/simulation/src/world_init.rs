// =============================================================================
// World construction: terrain, chunk streamer, flock, weather and rain, all
// built once at startup from `WorldSettings`.
// =============================================================================

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::chunks::ChunkStreamer;
use crate::config::{
    CHUNK_SEGMENTS, DEFAULT_FLOCK_SEED, DEFAULT_RAIN_SEED, DEFAULT_RENDER_DISTANCE,
    DEFAULT_TERRAIN_SEED, FLOCK_SIZE,
};
use crate::flock::Flock;
use crate::precipitation::RainField;
use crate::terrain::Terrain;
use crate::weather::{WeatherController, WeatherMode, WeatherSnapshot};

/// Run-time world settings. Insert before `SimulationPlugin` to override the
/// defaults; missing JSON fields fall back to their default values.
#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    pub terrain_seed: f64,
    /// Chebyshev radius of the active chunk disk.
    pub render_distance: i32,
    /// Grid segments per chunk edge.
    pub chunk_segments: usize,
    pub population: usize,
    pub flock_seed: u64,
    pub rain_seed: u64,
    pub initial_weather: WeatherMode,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            terrain_seed: DEFAULT_TERRAIN_SEED,
            render_distance: DEFAULT_RENDER_DISTANCE,
            chunk_segments: CHUNK_SEGMENTS,
            population: FLOCK_SIZE,
            flock_seed: DEFAULT_FLOCK_SEED,
            rain_seed: DEFAULT_RAIN_SEED,
            initial_weather: WeatherMode::default(),
        }
    }
}

impl WorldSettings {
    /// Clamp out-of-range values into something buildable.
    pub fn sanitized(&self) -> Self {
        let terrain_seed = if self.terrain_seed.is_finite() {
            self.terrain_seed
        } else {
            DEFAULT_TERRAIN_SEED
        };
        Self {
            terrain_seed,
            render_distance: self.render_distance.max(0),
            chunk_segments: self.chunk_segments.max(1),
            ..self.clone()
        }
    }
}

pub fn init_world(mut commands: Commands, settings: Res<WorldSettings>) {
    let requested = settings.clone();
    let settings = requested.sanitized();
    if settings != requested {
        warn!("world settings out of range, using {:?}", settings);
    }

    let terrain = Terrain::new(settings.terrain_seed);
    let flock = Flock::spawn(settings.population, settings.flock_seed, &terrain);
    let weather = WeatherController::new(settings.initial_weather);

    info!(
        "world: seed {}, render distance {}, {} segments/chunk, {} birds, {} weather",
        settings.terrain_seed,
        settings.render_distance,
        settings.chunk_segments,
        flock.len(),
        settings.initial_weather.name()
    );

    commands.insert_resource(WeatherSnapshot(*weather.current()));
    commands.insert_resource(weather);
    commands.insert_resource(flock.aggregate());
    commands.insert_resource(flock);
    commands.insert_resource(ChunkStreamer::new(
        settings.render_distance,
        settings.chunk_segments,
    ));
    commands.insert_resource(RainField::new(settings.rain_seed));
    commands.insert_resource(terrain);
}
