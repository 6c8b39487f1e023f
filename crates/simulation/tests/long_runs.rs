//! Long-running scenarios against the public API: many frames of flight and
//! many chunk crossings, checking the invariants hold the whole way.
//!
//! Run: cargo test -p simulation --test long_runs

use bevy::prelude::Vec3;

use simulation::chunks::{chunk_disk, ChunkCoord, ChunkStreamer};
use simulation::config::{CHUNK_SIZE, FLOCK_SIZE, MAX_SPEED, MIN_SPEED};
use simulation::flock::Flock;
use simulation::terrain::Terrain;
use simulation::weather::{WeatherController, WeatherMode};

const FRAME: f32 = 1.0 / 60.0;

// ---------------------------------------------------------------------------
// Flock
// ---------------------------------------------------------------------------

#[test]
fn test_long_flight_keeps_speed_bounds_through_weather_changes() {
    let terrain = Terrain::new(123.0);
    let mut flock = Flock::spawn(FLOCK_SIZE, 42, &terrain);
    let mut weather = WeatherController::new(WeatherMode::Clear);

    for tick in 0..1200u32 {
        if tick % 300 == 0 {
            weather.set_mode(weather.mode().next());
        }
        weather.advance(FRAME);
        // Chase camera a little behind the flock.
        let agg = flock.aggregate();
        let eye = agg.centroid - agg.mean_velocity.normalize_or_zero() * 20.0 + Vec3::Y * 6.0;
        flock.step(&terrain, weather.current(), eye, f64::from(tick) / 60.0);

        for (i, a) in flock.agents().iter().enumerate() {
            let s = a.speed();
            assert!(
                (MIN_SPEED - 1e-4..=MAX_SPEED + 1e-4).contains(&s),
                "tick {tick}: agent {i} speed {s}"
            );
            assert!(a.is_finite(), "tick {tick}: agent {i} not finite");
        }
    }
}

#[test]
fn test_same_seed_same_flight() {
    let terrain = Terrain::new(5.0);
    let weather = WeatherMode::Clear.preset();
    let mut a = Flock::spawn(30, 99, &terrain);
    let mut b = Flock::spawn(30, 99, &terrain);
    for tick in 0..120u32 {
        let t = f64::from(tick) / 60.0;
        a.step(&terrain, &weather, Vec3::ZERO, t);
        b.step(&terrain, &weather, Vec3::ZERO, t);
    }
    assert_eq!(a.agents(), b.agents());
}

// ---------------------------------------------------------------------------
// Chunk streaming
// ---------------------------------------------------------------------------

#[test]
fn test_long_walk_keeps_chunk_disk() {
    let terrain = Terrain::new(123.0);
    let mut streamer = ChunkStreamer::new(2, 4);
    let mut focus = Vec3::ZERO;

    for step in 0..600 {
        // A wandering walk that crosses chunk edges in every direction.
        let angle = step as f32 * 0.013;
        focus += Vec3::new(angle.cos(), 0.0, (angle * 1.7).sin()) * 37.0;
        streamer.update(focus, &terrain);

        let center = ChunkCoord::containing(focus, CHUNK_SIZE);
        let expected = chunk_disk(center, 2);
        assert_eq!(streamer.active(), &expected, "step {step}");
        assert_eq!(streamer.len(), 25);
        assert!(streamer.chunks().all(|c| expected.contains(&c.coord())));
    }
}

#[test]
fn test_revisited_chunk_regenerates_identically() {
    let terrain = Terrain::new(123.0);
    let mut streamer = ChunkStreamer::new(1, 4);
    streamer.update(Vec3::ZERO, &terrain);
    let coord = ChunkCoord::new(1, 1);
    let first = streamer.chunk(coord).map(|c| (c.heights().to_vec(), c.flora().to_vec()));
    assert!(first.is_some());

    streamer.update(Vec3::new(CHUNK_SIZE * 8.0, 0.0, 0.0), &terrain);
    assert!(streamer.chunk(coord).is_none());

    streamer.update(Vec3::ZERO, &terrain);
    let again = streamer.chunk(coord).map(|c| (c.heights().to_vec(), c.flora().to_vec()));
    assert_eq!(first, again);
}
