//! # TestEcosystem: headless integration test harness
//!
//! Provides a fluent builder that wraps `bevy::app::App` + `SimulationPlugin`
//! for running cross-system tests without a window or renderer. Time advances
//! by a fixed 60 Hz frame per `tick`.

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;

use crate::weather::{SetWeatherMode, WeatherMode};
use crate::{SimulationPlugin, Viewer, WorldSettings};

/// Frame length used by `tick`.
pub const TEST_FRAME: Duration = Duration::from_nanos(16_666_667);

/// A headless Bevy App running `SimulationPlugin` with a manual clock.
pub struct TestEcosystem {
    app: App,
}

impl Default for TestEcosystem {
    fn default() -> Self {
        Self::new()
    }
}

impl TestEcosystem {
    /// Small world: one ring of coarse chunks and a short flock.
    pub fn new() -> Self {
        Self::with_settings(WorldSettings {
            render_distance: 1,
            chunk_segments: 8,
            population: 24,
            ..Default::default()
        })
    }

    /// Build with explicit settings. Runs one update so `Startup` has
    /// inserted the world resources.
    pub fn with_settings(settings: WorldSettings) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(TEST_FRAME));
        // Insert BEFORE SimulationPlugin so init_resource keeps ours.
        app.insert_resource(settings);
        app.add_plugins(SimulationPlugin);
        app.update();
        Self { app }
    }

    /// Run `n` frames of the full schedule.
    pub fn tick(&mut self, n: u32) -> &mut Self {
        for _ in 0..n {
            self.app.update();
        }
        self
    }

    pub fn set_viewer(&mut self, eye: Vec3, focus: Vec3) -> &mut Self {
        *self.app.world_mut().resource_mut::<Viewer>() = Viewer::looking_at(eye, focus);
        self
    }

    /// Queue a weather mode change for the next frame.
    pub fn set_weather(&mut self, mode: WeatherMode) -> &mut Self {
        self.app.world_mut().send_event(SetWeatherMode(mode));
        self
    }

    pub fn resource<R: Resource>(&self) -> &R {
        self.app.world().resource::<R>()
    }

    /// Drain every still-buffered event of type `E`.
    pub fn events<E: Event>(&mut self) -> Vec<E> {
        self.app
            .world_mut()
            .resource_mut::<Events<E>>()
            .drain()
            .collect()
    }

    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }

    pub fn app_mut(&mut self) -> &mut App {
        &mut self.app
    }
}
