//! Steering forces.
//!
//! Every function returns a raw force already clamped to `MAX_FORCE`; the
//! simulator applies the weights. Inputs are read-only snapshots, so the
//! result for one agent never depends on another agent's update order.

use bevy::prelude::*;

use super::agent::Agent;
use crate::chunks::in_tree_cluster;
use crate::config::{
    CAMERA_REPULSION_RADIUS, CANOPY_BAND_MAX, CANOPY_BAND_MIN, CANOPY_CLEARANCE, FEELER_ANGLE,
    FEELER_LENGTH, GROUND_CLEARANCE, MAX_FORCE, MAX_SPEED, OBSTACLE_ALTITUDE_MARGIN,
    OBSTACLE_UPWARD_BIAS, PERCEPTION_RADIUS, SEPARATION_RADIUS, WIND_DRIFT_SCALE,
    WIND_FORCE_THRESHOLD,
};
use crate::noise_field::NoiseField;
use crate::terrain::TerrainQuery;
use crate::weather::WeatherParams;

/// Reynolds steering: full speed along `desired` minus current velocity.
/// Zero when `desired` has no direction.
pub fn steer(desired: Vec3, velocity: Vec3) -> Vec3 {
    match desired.try_normalize() {
        Some(dir) => (dir * MAX_SPEED - velocity).clamp_length_max(MAX_FORCE),
        None => Vec3::ZERO,
    }
}

fn limit(force: Vec3) -> Vec3 {
    if force.is_finite() {
        force.clamp_length_max(MAX_FORCE)
    } else {
        Vec3::ZERO
    }
}

/// Separation, alignment and cohesion for one agent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Neighbourhood {
    pub separation: Vec3,
    pub alignment: Vec3,
    pub cohesion: Vec3,
    pub neighbours: usize,
}

/// O(N²) scan of `agents` around `agents[index]`.
pub fn neighbourhood(index: usize, agents: &[Agent]) -> Neighbourhood {
    let me = &agents[index];
    let mut away = Vec3::ZERO;
    let mut close = 0usize;
    let mut velocity_sum = Vec3::ZERO;
    let mut position_sum = Vec3::ZERO;
    let mut neighbours = 0usize;

    for (j, other) in agents.iter().enumerate() {
        if j == index {
            continue;
        }
        let offset = me.position - other.position;
        let d = offset.length();
        if d >= PERCEPTION_RADIUS {
            continue;
        }
        neighbours += 1;
        velocity_sum += other.velocity;
        position_sum += other.position;
        if d < SEPARATION_RADIUS {
            if let Some(dir) = offset.try_normalize() {
                away += dir / d;
                close += 1;
            }
        }
    }

    if neighbours == 0 {
        return Neighbourhood::default();
    }
    let n = neighbours as f32;
    Neighbourhood {
        separation: if close > 0 {
            steer(away / close as f32, me.velocity)
        } else {
            Vec3::ZERO
        },
        alignment: steer(velocity_sum / n, me.velocity),
        cohesion: steer(position_sum / n - me.position, me.velocity),
        neighbours,
    }
}

pub fn seek(position: Vec3, velocity: Vec3, target: Vec3) -> Vec3 {
    steer(target - position, velocity)
}

/// Flee the viewer's eye with a quadratic falloff inside the repulsion radius.
pub fn camera_repulsion(position: Vec3, velocity: Vec3, eye: Vec3) -> Vec3 {
    let offset = position - eye;
    let d = offset.length();
    if d >= CAMERA_REPULSION_RADIUS {
        return Vec3::ZERO;
    }
    let falloff = (1.0 - d / CAMERA_REPULSION_RADIUS).powi(2);
    let away = offset.try_normalize().unwrap_or(Vec3::Z);
    limit(steer(away, velocity) * falloff)
}

/// Drift downwind once wind speed passes the threshold.
pub fn wind_drift(weather: &WeatherParams) -> Vec3 {
    if weather.wind_speed <= WIND_FORCE_THRESHOLD {
        return Vec3::ZERO;
    }
    limit(weather.wind_dir() * (weather.wind_speed - WIND_FORCE_THRESHOLD) * WIND_DRIFT_SCALE)
}

/// Horizontal heading, or `+Z` when flying straight up or down.
fn heading(velocity: Vec3) -> Vec3 {
    Vec3::new(velocity.x, 0.0, velocity.z)
        .try_normalize()
        .unwrap_or(Vec3::Z)
}

/// Three feelers ahead of the agent. When the ground under the centre probe
/// comes within `OBSTACLE_ALTITUDE_MARGIN` of the agent's altitude, veer
/// toward the lower side and climb.
pub fn obstacle_avoidance(position: Vec3, velocity: Vec3, terrain: &impl TerrainQuery) -> Vec3 {
    let forward = heading(velocity);
    let probe = |dir: Vec3| {
        let p = position + dir * FEELER_LENGTH;
        terrain.height_at(p.x, p.z)
    };
    let center = probe(forward);
    if center <= position.y - OBSTACLE_ALTITUDE_MARGIN {
        return Vec3::ZERO;
    }
    let left_dir = Quat::from_rotation_y(FEELER_ANGLE) * forward;
    let right_dir = Quat::from_rotation_y(-FEELER_ANGLE) * forward;
    let side = if probe(left_dir) < probe(right_dir) {
        left_dir
    } else {
        right_dir
    };
    steer(side + Vec3::Y * OBSTACLE_UPWARD_BIAS, velocity)
}

/// Quadratic push straight up when clearance drops below `GROUND_CLEARANCE`.
pub fn ground_avoidance(position: Vec3, terrain: &impl TerrainQuery) -> Vec3 {
    let clearance = position.y - terrain.height_at(position.x, position.z);
    if clearance >= GROUND_CLEARANCE {
        return Vec3::ZERO;
    }
    let push = ((GROUND_CLEARANCE - clearance) / GROUND_CLEARANCE).powi(2);
    limit(Vec3::Y * push)
}

/// Noise-driven sideways dodging while skimming through tree clusters.
pub fn canopy_weave(
    position: Vec3,
    velocity: Vec3,
    terrain: &impl TerrainQuery,
    noise: &NoiseField,
    index: usize,
    elapsed: f64,
) -> Vec3 {
    let ground = terrain.height_at(position.x, position.z);
    let ground_f64 = ground as f64;
    if ground_f64 <= CANOPY_BAND_MIN || ground_f64 >= CANOPY_BAND_MAX {
        return Vec3::ZERO;
    }
    if position.y - ground >= CANOPY_CLEARANCE {
        return Vec3::ZERO;
    }
    if !in_tree_cluster(position.x as f64, position.z as f64) {
        return Vec3::ZERO;
    }
    let left = Vec3::Y.cross(heading(velocity));
    let n = noise.sample2d(elapsed * 0.7 + index as f64 * 1.618, 0.5) as f32;
    limit(left * n * MAX_FORCE * 2.0)
}
