use bevy::prelude::*;
use fastnoise_lite::{FastNoiseLite, NoiseType};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::agent::{clamp_speed, Agent};
use super::forces;
use super::orientation::{bank_angle, flap, look_rotation};
use super::wander::Wander;
use crate::config::{
    ALIGNMENT_WEIGHT, CAMERA_REPULSION_WEIGHT, CANOPY_WEAVE_WEIGHT, COHESION_WEIGHT,
    GROUND_AVOIDANCE_WEIGHT, MAX_SPEED, MIN_SPEED, OBSTACLE_AVOIDANCE_WEIGHT, SEEK_WEIGHT,
    SEPARATION_WEIGHT, WIND_WEIGHT,
};
use crate::noise_field::NoiseField;
use crate::terrain::TerrainQuery;
use crate::weather::WeatherParams;

/// Agents spawn within this radius of the origin.
const SPAWN_RADIUS: f32 = 30.0;
/// Spawn altitude above local ground.
const SPAWN_ALTITUDE: f32 = 10.0;

/// Flock centroid and mean velocity, published for camera-follow consumers.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct FlockAggregate {
    pub centroid: Vec3,
    pub mean_velocity: Vec3,
}

impl FlockAggregate {
    pub fn of(agents: &[Agent]) -> Self {
        if agents.is_empty() {
            return Self::default();
        }
        let n = agents.len() as f32;
        let (pos, vel) = agents
            .iter()
            .fold((Vec3::ZERO, Vec3::ZERO), |(p, v), a| {
                (p + a.position, v + a.velocity)
            });
        Self {
            centroid: pos / n,
            mean_velocity: vel / n,
        }
    }
}

/// Fixed-size bird population stepped once per frame.
///
/// Integration is per frame, not per second: agent speed is in world units
/// per frame, so the flock flies faster at higher frame rates.
#[derive(Resource)]
pub struct Flock {
    agents: Vec<Agent>,
    wander: Wander,
    noise: NoiseField,
    turbulence: FastNoiseLite,
    aggregate: FlockAggregate,
}

impl std::fmt::Debug for Flock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Flock")
            .field("agents", &self.agents.len())
            .field("wander", &self.wander)
            .field("aggregate", &self.aggregate)
            .finish_non_exhaustive()
    }
}

impl Flock {
    /// Scatter `population` agents around the origin, above the terrain,
    /// with random horizontal headings.
    pub fn spawn(population: usize, seed: u64, terrain: &impl TerrainQuery) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let agents = (0..population)
            .map(|_| {
                let angle = rng.gen_range(0.0..std::f32::consts::TAU);
                let radius = rng.gen_range(0.0..SPAWN_RADIUS);
                let (x, z) = (angle.cos() * radius, angle.sin() * radius);
                let y = terrain.height_at(x, z) + SPAWN_ALTITUDE + rng.gen_range(0.0..5.0);
                let heading = rng.gen_range(0.0..std::f32::consts::TAU);
                let speed = rng.gen_range(MIN_SPEED..=MAX_SPEED);
                Agent::new(
                    Vec3::new(x, y, z),
                    Vec3::new(heading.cos(), 0.0, heading.sin()) * speed,
                )
            })
            .collect();
        Self::from_agents(agents, seed)
    }

    /// Build a flock from explicit agents (velocities are clamped into range).
    pub fn from_agents(mut agents: Vec<Agent>, seed: u64) -> Self {
        for a in &mut agents {
            a.velocity = clamp_speed(a.velocity);
            a.rotation = look_rotation(a.velocity);
        }
        let mut turbulence = FastNoiseLite::with_seed(seed as i32);
        turbulence.set_noise_type(Some(NoiseType::OpenSimplex2));
        turbulence.set_frequency(Some(0.5));
        let aggregate = FlockAggregate::of(&agents);
        Self {
            agents,
            wander: Wander::default(),
            noise: NoiseField::new(seed as f64),
            turbulence,
            aggregate,
        }
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn aggregate(&self) -> FlockAggregate {
        self.aggregate
    }

    pub fn wander_target(&self) -> Vec3 {
        self.wander.target
    }

    /// Per-agent transforms for the renderer, in agent order.
    pub fn transforms(&self) -> impl Iterator<Item = Transform> + '_ {
        self.agents.iter().map(Agent::transform)
    }

    /// Sum of the weighted steering forces on `agents[index]`.
    fn steering(
        &self,
        index: usize,
        terrain: &impl TerrainQuery,
        weather: &WeatherParams,
        eye: Vec3,
        elapsed: f64,
    ) -> Vec3 {
        let a = &self.agents[index];
        let hood = forces::neighbourhood(index, &self.agents);
        forces::wind_drift(weather) * WIND_WEIGHT
            + hood.separation * SEPARATION_WEIGHT
            + hood.alignment * ALIGNMENT_WEIGHT
            + hood.cohesion * COHESION_WEIGHT
            + forces::seek(a.position, a.velocity, self.wander.target) * SEEK_WEIGHT
            + forces::camera_repulsion(a.position, a.velocity, eye) * CAMERA_REPULSION_WEIGHT
            + forces::obstacle_avoidance(a.position, a.velocity, terrain)
                * OBSTACLE_AVOIDANCE_WEIGHT
            + forces::ground_avoidance(a.position, terrain) * GROUND_AVOIDANCE_WEIGHT
            + forces::canopy_weave(a.position, a.velocity, terrain, &self.noise, index, elapsed)
                * CANOPY_WEAVE_WEIGHT
    }

    /// Advance one frame.
    ///
    /// Forces for every agent are computed from the state at the start of
    /// the tick; positions are only written once all forces are known.
    pub fn step(
        &mut self,
        terrain: &impl TerrainQuery,
        weather: &WeatherParams,
        eye: Vec3,
        elapsed: f64,
    ) -> FlockAggregate {
        let centroid = FlockAggregate::of(&self.agents).centroid;
        self.wander
            .update(&self.noise, elapsed, centroid, terrain, weather.wind_speed);

        let steering: Vec<Vec3> = (0..self.agents.len())
            .map(|i| self.steering(i, terrain, weather, eye, elapsed))
            .collect();

        let mut sanitised = 0usize;
        for (i, (agent, force)) in self.agents.iter_mut().zip(steering).enumerate() {
            let previous = *agent;
            agent.acceleration = if force.is_finite() { force } else { Vec3::ZERO };
            agent.velocity = clamp_speed(agent.velocity + agent.acceleration);
            agent.position += agent.velocity;

            if !agent.is_finite() || !force.is_finite() {
                sanitised += 1;
                agent.position = [previous.position, centroid]
                    .into_iter()
                    .find(|p| p.is_finite())
                    .unwrap_or(Vec3::ZERO);
                agent.velocity = clamp_speed(previous.velocity);
                agent.acceleration = Vec3::ZERO;
            }

            let heading = look_rotation(agent.velocity);
            agent.bank = bank_angle(heading, agent.acceleration);
            agent.rotation = heading * Quat::from_rotation_z(agent.bank);
            let (phase, wing) = flap(
                agent.flap_phase,
                agent.speed(),
                weather.wind_speed,
                &self.turbulence,
                i,
                elapsed,
            );
            agent.flap_phase = phase;
            agent.wing_angle = wing;

            debug_assert!(agent.is_finite());
        }
        if sanitised > 0 {
            warn!("flock: reset {sanitised} agent(s) with non-finite state");
        }

        self.aggregate = FlockAggregate::of(&self.agents);
        self.aggregate
    }
}
