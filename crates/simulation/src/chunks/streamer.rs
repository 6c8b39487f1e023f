use std::collections::{BTreeMap, BTreeSet};

use bevy::prelude::*;

use crate::config::{CHUNK_SEGMENTS, CHUNK_SIZE, DEFAULT_RENDER_DISTANCE};
use crate::terrain::Terrain;

use super::chunk::Chunk;
use super::coord::{chunk_disk, ChunkCoord};

/// Result of a streaming update that changed the active set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChunkDelta {
    pub added: Vec<ChunkCoord>,
    pub removed: Vec<ChunkCoord>,
}

/// Keeps the active chunk set equal to the Chebyshev disk of radius
/// `render_distance` around the focus chunk, and owns the generated chunks.
#[derive(Resource, Debug)]
pub struct ChunkStreamer {
    render_distance: i32,
    segments: usize,
    size: f32,
    focus: Option<ChunkCoord>,
    active: BTreeSet<ChunkCoord>,
    chunks: BTreeMap<ChunkCoord, Chunk>,
}

impl Default for ChunkStreamer {
    fn default() -> Self {
        Self::new(DEFAULT_RENDER_DISTANCE, CHUNK_SEGMENTS)
    }
}

impl ChunkStreamer {
    pub fn new(render_distance: i32, segments: usize) -> Self {
        Self {
            render_distance: render_distance.max(0),
            segments: segments.max(1),
            size: CHUNK_SIZE,
            focus: None,
            active: BTreeSet::new(),
            chunks: BTreeMap::new(),
        }
    }

    pub fn render_distance(&self) -> i32 {
        self.render_distance
    }

    pub fn chunk_size(&self) -> f32 {
        self.size
    }

    pub fn focus_chunk(&self) -> Option<ChunkCoord> {
        self.focus
    }

    pub fn active(&self) -> &BTreeSet<ChunkCoord> {
        &self.active
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    pub fn chunk(&self, coord: ChunkCoord) -> Option<&Chunk> {
        self.chunks.get(&coord)
    }

    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Recompute the active disk around `focus`. Returns `None` when the set
    /// is unchanged; otherwise tears down chunks that left the disk and
    /// generates the ones that entered it.
    pub fn update(&mut self, focus: Vec3, terrain: &Terrain) -> Option<ChunkDelta> {
        let center = ChunkCoord::containing(focus, self.size);
        self.focus = Some(center);
        let desired = chunk_disk(center, self.render_distance);
        if desired == self.active {
            return None;
        }

        let removed: Vec<ChunkCoord> = self.active.difference(&desired).copied().collect();
        let added: Vec<ChunkCoord> = desired.difference(&self.active).copied().collect();

        for coord in &removed {
            self.chunks.remove(coord);
        }
        let built: Vec<Chunk> = added
            .iter()
            .map(|&coord| Chunk::generate(terrain, coord, self.size, self.segments))
            .collect();
        for chunk in built {
            self.chunks.insert(chunk.coord(), chunk);
        }
        self.active = desired;

        debug_assert_eq!(self.chunks.len(), self.active.len());
        Some(ChunkDelta { added, removed })
    }

    /// Total flora instances across the active chunks.
    pub fn flora_count(&self) -> usize {
        self.chunks.values().map(|c| c.flora().len()).sum()
    }
}
