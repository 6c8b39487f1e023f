use std::collections::BTreeSet;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Chunk coordinates beyond this are clamped. Keeps disk arithmetic in range
/// for absurd or non-finite focus positions.
const COORD_LIMIT: f32 = 1.0e9;

/// Integer grid coordinate of a chunk. Chunk `(x, z)` is centred on world
/// `(x * size, z * size)` and spans half a chunk either side.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub const fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// The chunk whose centre is nearest to `focus` in x/z.
    pub fn containing(focus: Vec3, size: f32) -> Self {
        Self {
            x: round_axis(focus.x, size),
            z: round_axis(focus.z, size),
        }
    }

    /// World-space centre of the chunk (y = 0).
    pub fn center(self, size: f32) -> Vec3 {
        Vec3::new(self.x as f32 * size, 0.0, self.z as f32 * size)
    }

    /// Chebyshev distance between two chunk coordinates.
    pub fn chebyshev(self, other: ChunkCoord) -> i32 {
        (self.x - other.x).abs().max((self.z - other.z).abs())
    }

    /// Seed of the chunk's flora sequence.
    pub fn flora_seed(self, modulus: u64) -> u64 {
        let mixed = self.x as i64 * 7919 + self.z as i64 * 104_729;
        mixed.rem_euclid(modulus as i64) as u64
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.z)
    }
}

fn round_axis(v: f32, size: f32) -> i32 {
    let r = (v / size).round();
    if r.is_finite() {
        r.clamp(-COORD_LIMIT, COORD_LIMIT) as i32
    } else {
        0
    }
}

/// Every coordinate within Chebyshev distance `radius` of `center`:
/// `(2R + 1)^2` entries.
pub fn chunk_disk(center: ChunkCoord, radius: i32) -> BTreeSet<ChunkCoord> {
    let radius = radius.max(0);
    let mut set = BTreeSet::new();
    for dz in -radius..=radius {
        for dx in -radius..=radius {
            set.insert(ChunkCoord::new(center.x + dx, center.z + dz));
        }
    }
    set
}
