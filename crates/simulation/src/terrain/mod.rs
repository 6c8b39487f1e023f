//! Procedural terrain: elevation from layered noise and surface classification.
//!
//! `Terrain` is the single resource every consumer queries. It is built once
//! from the world seed and is immutable afterwards, so the same `(x, z)` gives
//! the same answer to chunk meshing, flora placement and flock probing.

pub mod classifier;
pub mod heightmap;

pub use classifier::{classify_surface, Surface, SurfaceCategory, TerrainClassifier};
pub use heightmap::TerrainHeightmap;

use bevy::prelude::*;

/// Step used for central-difference normals.
const NORMAL_SAMPLE_STEP: f64 = 1.0;

/// A fully derived terrain point. Never stored by the terrain itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainSample {
    pub elevation: f32,
    pub normal_y: f32,
    pub category: SurfaceCategory,
    pub color: Srgba,
}

/// Read-only ground queries used by agents. Implemented by `Terrain`; tests
/// substitute flat or sloped stand-ins.
pub trait TerrainQuery {
    fn height_at(&self, x: f32, z: f32) -> f32;
}

#[derive(Resource, Debug, Clone)]
pub struct Terrain {
    heightmap: TerrainHeightmap,
    classifier: TerrainClassifier,
}

impl Terrain {
    pub fn new(seed: f64) -> Self {
        let heightmap = TerrainHeightmap::new(seed);
        let classifier = TerrainClassifier::new(heightmap.noise().clone());
        Self {
            heightmap,
            classifier,
        }
    }

    pub fn seed(&self) -> f64 {
        self.heightmap.noise().seed()
    }

    #[inline]
    pub fn height(&self, x: f64, z: f64) -> f64 {
        self.heightmap.height(x, z)
    }

    /// Surface at `(x, z)` for a caller-supplied slope.
    pub fn classify(&self, x: f64, z: f64, normal_y: f64) -> Surface {
        self.classifier.classify(x, z, self.height(x, z), normal_y)
    }

    /// Like `classify`, for callers that already sampled the elevation.
    pub fn classify_with_elevation(&self, x: f64, z: f64, elevation: f64, normal_y: f64) -> Surface {
        self.classifier.classify(x, z, elevation, normal_y)
    }

    /// Unit surface normal from central differences of `height`.
    pub fn normal(&self, x: f64, z: f64) -> Vec3 {
        let e = NORMAL_SAMPLE_STEP;
        let dx = self.height(x + e, z) - self.height(x - e, z);
        let dz = self.height(x, z + e) - self.height(x, z - e);
        surface_normal(dx, dz, 2.0 * e)
    }

    pub fn sample(&self, x: f64, z: f64) -> TerrainSample {
        let elevation = self.height(x, z);
        let normal = self.normal(x, z);
        let surface = self.classify_with_elevation(x, z, elevation, normal.y as f64);
        TerrainSample {
            elevation: elevation as f32,
            normal_y: normal.y,
            category: surface.category,
            color: surface.color,
        }
    }
}

impl TerrainQuery for Terrain {
    #[inline]
    fn height_at(&self, x: f32, z: f32) -> f32 {
        self.height(x as f64, z as f64) as f32
    }
}

/// Normal of a height field given the height deltas across `span` in x and z.
pub fn surface_normal(dx: f64, dz: f64, span: f64) -> Vec3 {
    Vec3::new(-dx as f32, span as f32, -dz as f32)
        .try_normalize()
        .unwrap_or(Vec3::Y)
}
