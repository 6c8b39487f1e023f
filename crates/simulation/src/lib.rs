use bevy::prelude::*;

pub mod chunks;
pub mod config;
pub mod flock;
pub mod geometry;
pub mod noise_field;
pub mod precipitation;
pub mod simulation_sets;
pub mod terrain;
pub mod viewer;
pub mod weather;
pub mod world_init;

#[cfg(test)]
mod integration_tests;
#[cfg(any(test, feature = "bench"))]
pub mod test_harness;

pub use simulation_sets::EcosystemSet;
pub use viewer::Viewer;
pub use world_init::WorldSettings;

/// The procedural world and its agents, stepped once per frame in `Update`.
///
/// World resources (`Terrain`, `ChunkStreamer`, `Flock`, `RainField`) are
/// created by `init_world` at `Startup` from `WorldSettings`. The caller
/// writes `Viewer` each frame, before `EcosystemSet::Weather`.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewer>()
            .init_resource::<WorldSettings>()
            .configure_sets(
                Update,
                (
                    EcosystemSet::Weather,
                    EcosystemSet::Simulation,
                    EcosystemSet::PostSim,
                )
                    .chain(),
            )
            .add_systems(Startup, world_init::init_world);

        app.add_plugins((
            weather::WeatherPlugin,
            chunks::ChunksPlugin,
            flock::FlockPlugin,
            precipitation::PrecipitationPlugin,
        ));
    }
}
