use bevy::prelude::*;

use crate::chunks::ChunkStreamer;
use crate::flock::{Flock, FlockAggregate};
use crate::precipitation::RainField;
use crate::terrain::Terrain;
use crate::test_harness::TestEcosystem;
use crate::weather::{WeatherController, WeatherMode, WeatherSnapshot};
use crate::WorldSettings;

#[test]
fn test_startup_builds_world_from_settings() {
    let eco = TestEcosystem::with_settings(WorldSettings {
        terrain_seed: 9.0,
        render_distance: 0,
        chunk_segments: 4,
        population: 12,
        initial_weather: WeatherMode::Storm,
        ..Default::default()
    });
    assert_eq!(eco.resource::<Terrain>().seed(), 9.0);
    assert_eq!(eco.resource::<Flock>().len(), 12);
    assert_eq!(eco.resource::<ChunkStreamer>().render_distance(), 0);
    assert_eq!(eco.resource::<ChunkStreamer>().len(), 1);
    assert_eq!(
        eco.resource::<WeatherController>().mode(),
        WeatherMode::Storm
    );
    assert_eq!(eco.resource::<WeatherSnapshot>().rain_intensity, 1.0);
}

#[test]
fn test_aggregate_published_after_flock_step() {
    let mut eco = TestEcosystem::new();
    eco.tick(5);
    let published = *eco.resource::<FlockAggregate>();
    assert_eq!(published, eco.resource::<Flock>().aggregate());
    assert!(published.centroid.is_finite());
}

#[test]
fn test_flock_moves_every_frame() {
    let mut eco = TestEcosystem::new();
    let before: Vec<Vec3> = eco
        .resource::<Flock>()
        .agents()
        .iter()
        .map(|a| a.position)
        .collect();
    eco.tick(1);
    for (a, p) in eco.resource::<Flock>().agents().iter().zip(before) {
        let moved = (a.position - p).length();
        assert!(moved > 0.3 && moved < 0.9, "moved {moved}");
    }
}

#[test]
fn test_clear_sky_has_no_rain() {
    let mut eco = TestEcosystem::new();
    eco.tick(10);
    assert_eq!(eco.resource::<RainField>().live_count(), 0);
}

#[test]
fn test_rain_follows_storm_intensity() {
    let mut eco = TestEcosystem::new();
    eco.set_weather(WeatherMode::Storm);
    eco.tick(60);
    let partial = eco.resource::<RainField>().live_count();
    assert!(partial > 0 && partial < 4000, "after 1s: {partial}");
    eco.tick(360);
    let full = eco.resource::<RainField>().live_count();
    assert!(full >= 3990, "after 7s: {full}");
}
