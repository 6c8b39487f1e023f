use bevy::color::ColorToComponents;

use crate::geometry::GeometryBuffer;
use crate::terrain::{surface_normal, Terrain};

use super::coord::ChunkCoord;
use super::flora::{place_flora, Flora};

/// A generated terrain tile: height grid, surface mesh with per-vertex
/// classifier colours, and the tile's flora layout.
///
/// Only `Chunk::generate` constructs one, and it fills every buffer before
/// returning, so a chunk is never observed half-built.
#[derive(Debug, Clone)]
pub struct Chunk {
    coord: ChunkCoord,
    segments: usize,
    heights: Vec<f32>,
    surface: GeometryBuffer,
    flora: Vec<Flora>,
}

impl Chunk {
    pub fn generate(terrain: &Terrain, coord: ChunkCoord, size: f32, segments: usize) -> Self {
        let segments = segments.max(1);
        let side = segments + 1;
        let step = size as f64 / segments as f64;
        let center = coord.center(size);
        let x0 = center.x as f64 - size as f64 * 0.5;
        let z0 = center.z as f64 - size as f64 * 0.5;

        // Heights with a one-sample apron so edge normals see the neighbouring
        // chunk's ground; shared edges get identical normals on both sides.
        let apron_side = side + 2;
        let mut apron = Vec::with_capacity(apron_side * apron_side);
        for j in 0..apron_side {
            let z = z0 + (j as f64 - 1.0) * step;
            for i in 0..apron_side {
                let x = x0 + (i as f64 - 1.0) * step;
                apron.push(terrain.height(x, z));
            }
        }
        let at = |i: usize, j: usize| apron[j * apron_side + i];

        let mut heights = Vec::with_capacity(side * side);
        let mut surface = GeometryBuffer::with_capacity(side * side, segments * segments * 6);
        for j in 0..side {
            let z = z0 + j as f64 * step;
            for i in 0..side {
                let x = x0 + i as f64 * step;
                let (ai, aj) = (i + 1, j + 1);
                let y = at(ai, aj);
                let dx = at(ai + 1, aj) - at(ai - 1, aj);
                let dz = at(ai, aj + 1) - at(ai, aj - 1);
                let normal = surface_normal(dx, dz, 2.0 * step);
                let color = terrain
                    .classify_with_elevation(x, z, y, normal.y as f64)
                    .color
                    .to_f32_array_no_alpha();

                heights.push(y as f32);
                surface.push_vertex(
                    [
                        (x - center.x as f64) as f32,
                        y as f32,
                        (z - center.z as f64) as f32,
                    ],
                    normal.to_array(),
                    [i as f32 / segments as f32, j as f32 / segments as f32],
                    color,
                );
            }
        }

        for j in 0..segments {
            for i in 0..segments {
                let a = (j * side + i) as u32;
                let b = a + 1;
                let c = a + side as u32;
                let d = c + 1;
                surface.push_triangle(a, c, b);
                surface.push_triangle(b, c, d);
            }
        }
        debug_assert!(surface.validate().is_ok());

        Self {
            coord,
            segments,
            heights,
            surface,
            flora: place_flora(terrain, coord, size),
        }
    }

    pub fn coord(&self) -> ChunkCoord {
        self.coord
    }

    pub fn segments(&self) -> usize {
        self.segments
    }

    /// Row-major `(segments + 1)^2` height grid, z rows of x samples.
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    pub fn height_at_vertex(&self, i: usize, j: usize) -> Option<f32> {
        let side = self.segments + 1;
        if i >= side || j >= side {
            return None;
        }
        self.heights.get(j * side + i).copied()
    }

    /// Surface mesh in chunk-local coordinates (origin at the chunk centre).
    /// Place it with a translation of `coord().center(size)`.
    pub fn surface(&self) -> &GeometryBuffer {
        &self.surface
    }

    /// Tree instances in world coordinates. Unlike `surface`, these are not
    /// offset by the chunk centre.
    pub fn flora(&self) -> &[Flora] {
        &self.flora
    }
}
