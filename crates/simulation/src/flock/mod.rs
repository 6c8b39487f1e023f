//! Flocking birds: separation, alignment and cohesion plus seek, camera,
//! terrain, canopy and wind steering, stepped once per frame.
//!
//! The neighbour scan is O(N²), which is fine for the fixed population of
//! 100. A spatial bucket grid would slot in behind `forces::neighbourhood`
//! without changing the force model.

pub mod agent;
pub mod forces;
pub mod orientation;
pub mod simulator;
mod tests_simulator;
pub mod wander;

pub use agent::{clamp_speed, Agent};
pub use simulator::{Flock, FlockAggregate};
pub use wander::Wander;

use bevy::prelude::*;

use crate::terrain::Terrain;
use crate::viewer::Viewer;
use crate::weather::WeatherSnapshot;
use crate::EcosystemSet;

pub fn step_flock(
    time: Res<Time>,
    terrain: Res<Terrain>,
    weather: Res<WeatherSnapshot>,
    viewer: Res<Viewer>,
    mut flock: ResMut<Flock>,
) {
    flock.step(&*terrain, &weather.0, viewer.eye, time.elapsed_secs_f64());
}

pub fn publish_flock_aggregate(flock: Res<Flock>, mut aggregate: ResMut<FlockAggregate>) {
    *aggregate = flock.aggregate();
}

pub struct FlockPlugin;

impl Plugin for FlockPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FlockAggregate>()
            .add_systems(Update, step_flock.in_set(EcosystemSet::Simulation))
            .add_systems(
                Update,
                publish_flock_aggregate.in_set(EcosystemSet::PostSim),
            );
    }
}
