use bevy::prelude::*;

use crate::config::{
    FLORA_ACCEPT_CHANCE, FLORA_ATTEMPT_FACTOR, FLORA_CLEARING_THRESHOLD, FLORA_CLUSTER_FREQUENCY,
    FLORA_PER_CHUNK, LCG_INCREMENT, LCG_MODULUS, LCG_MULTIPLIER, TREELINE, WATER_LEVEL,
};
use crate::geometry::{self, GeometryBuffer, GeometryError};
use crate::terrain::Terrain;

use super::coord::ChunkCoord;

/// One tree instance. Generated once per chunk and never mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flora {
    /// World-space base of the trunk.
    pub position: Vec3,
    /// Non-uniform scale: x/z for canopy width, y for height.
    pub scale: Vec3,
    pub yaw: f32,
    pub tilt_x: f32,
    pub tilt_z: f32,
    pub phase: f32,
}

impl Flora {
    /// Canopy sway angle in radians at `elapsed` seconds for the given wind.
    pub fn sway(&self, elapsed: f64, wind_speed: f32) -> f32 {
        let wind = wind_speed.max(0.0);
        let rate = 1.0 + wind * 0.5;
        let amplitude = 0.02 * (1.0 + wind);
        ((elapsed as f32) * rate + self.phase).sin() * amplitude
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.position,
            rotation: Quat::from_euler(EulerRot::YXZ, self.yaw, self.tilt_x, self.tilt_z),
            scale: self.scale,
        }
    }
}

/// Linear congruential sequence seeded per chunk. Values are in `[0, 1)`.
#[derive(Debug, Clone)]
pub struct FloraRng {
    state: u64,
}

impl FloraRng {
    pub fn new(seed: u64) -> Self {
        Self {
            state: seed % LCG_MODULUS,
        }
    }

    pub fn for_chunk(coord: ChunkCoord) -> Self {
        Self::new(coord.flora_seed(LCG_MODULUS))
    }

    pub fn next_f64(&mut self) -> f64 {
        self.state = (self.state * LCG_MULTIPLIER + LCG_INCREMENT) % LCG_MODULUS;
        self.state as f64 / LCG_MODULUS as f64
    }

    fn range(&mut self, lo: f64, hi: f64) -> f32 {
        (lo + (hi - lo) * self.next_f64()) as f32
    }
}

/// The `sin * cos` clustering field. Below the threshold is a clearing.
/// Shared by flora placement and the flock's canopy weaving.
pub fn in_tree_cluster(x: f64, z: f64) -> bool {
    (x * FLORA_CLUSTER_FREQUENCY).sin() * (z * FLORA_CLUSTER_FREQUENCY).cos()
        >= FLORA_CLEARING_THRESHOLD
}

/// Elevations where trees may grow: above the shore, below the treeline.
pub fn in_flora_band(elevation: f64) -> bool {
    elevation > WATER_LEVEL + 0.5 && elevation < TREELINE
}

/// Rejection-sample up to `FLORA_PER_CHUNK` trees for the chunk centred on
/// `coord`. Same coordinate, same layout.
pub fn place_flora(terrain: &Terrain, coord: ChunkCoord, size: f32) -> Vec<Flora> {
    let max_attempts = (FLORA_PER_CHUNK as f32 * FLORA_ATTEMPT_FACTOR) as usize;
    let center = coord.center(size);
    let mut rng = FloraRng::for_chunk(coord);
    let mut flora = Vec::with_capacity(FLORA_PER_CHUNK);

    for _ in 0..max_attempts {
        let x = center.x as f64 + (rng.next_f64() - 0.5) * size as f64;
        let z = center.z as f64 + (rng.next_f64() - 0.5) * size as f64;
        let elevation = terrain.height(x, z);
        if !in_flora_band(elevation) || !in_tree_cluster(x, z) {
            continue;
        }
        if rng.next_f64() >= FLORA_ACCEPT_CHANCE {
            continue;
        }

        let width = rng.range(0.8, 1.4);
        let height = rng.range(0.8, 1.8);
        flora.push(Flora {
            position: Vec3::new(x as f32, elevation as f32, z as f32),
            scale: Vec3::new(width, height, width * rng.range(0.85, 1.15)),
            yaw: rng.range(0.0, std::f64::consts::TAU),
            tilt_x: rng.range(-0.08, 0.08),
            tilt_z: rng.range(-0.08, 0.08),
            phase: rng.range(0.0, std::f64::consts::TAU),
        });
        if flora.len() >= FLORA_PER_CHUNK {
            break;
        }
    }
    flora
}

const TRUNK_COLOR: [f32; 3] = [0.36, 0.25, 0.15];
const CANOPY_COLOR: [f32; 3] = [0.16, 0.36, 0.14];

/// Unit tree mesh shared by every flora instance: a trunk prism under a
/// canopy pyramid.
pub fn flora_template() -> Result<GeometryBuffer, GeometryError> {
    let trunk = geometry::prism(0.4, 3.0, 0.4).tinted(TRUNK_COLOR);
    let canopy = geometry::pyramid(3.0, 6.0)
        .translated([0.0, 2.0, 0.0])
        .tinted(CANOPY_COLOR);
    geometry::merge(&[trunk, canopy])
}
