//! Chunk streaming: terrain tiles and their flora follow the viewer focus.

pub mod chunk;
pub mod coord;
pub mod flora;
pub mod streamer;
mod tests_flora;

pub use chunk::Chunk;
pub use coord::{chunk_disk, ChunkCoord};
pub use flora::{flora_template, in_flora_band, in_tree_cluster, place_flora, Flora, FloraRng};
pub use streamer::{ChunkDelta, ChunkStreamer};

use bevy::prelude::*;

use crate::terrain::Terrain;
use crate::viewer::Viewer;
use crate::EcosystemSet;

/// Sent once per frame in which the active chunk set changed.
#[derive(Event, Debug, Clone, PartialEq, Eq)]
pub struct ChunkSetChanged {
    pub added: Vec<ChunkCoord>,
    pub removed: Vec<ChunkCoord>,
}

pub fn stream_chunks(
    viewer: Res<Viewer>,
    terrain: Res<Terrain>,
    mut streamer: ResMut<ChunkStreamer>,
    mut changes: EventWriter<ChunkSetChanged>,
) {
    let Some(delta) = streamer.update(viewer.focus, &terrain) else {
        return;
    };
    debug!(
        "chunks around {:?}: +{} -{} ({} active)",
        streamer.focus_chunk(),
        delta.added.len(),
        delta.removed.len(),
        streamer.len()
    );
    changes.send(ChunkSetChanged {
        added: delta.added,
        removed: delta.removed,
    });
}

pub struct ChunksPlugin;

impl Plugin for ChunksPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ChunkSetChanged>().add_systems(
            Update,
            stream_chunks.in_set(EcosystemSet::Simulation),
        );
    }
}
