use bevy::prelude::*;

use crate::chunks::{chunk_disk, ChunkCoord, ChunkSetChanged, ChunkStreamer};
use crate::config::CHUNK_SIZE;
use crate::test_harness::TestEcosystem;

fn active(eco: &TestEcosystem) -> Vec<ChunkCoord> {
    eco.resource::<ChunkStreamer>().active().iter().copied().collect()
}

fn disk(x: i32, z: i32, r: i32) -> Vec<ChunkCoord> {
    chunk_disk(ChunkCoord::new(x, z), r).into_iter().collect()
}

#[test]
fn test_first_frame_announces_initial_disk() {
    let mut eco = TestEcosystem::new();
    let events = eco.events::<ChunkSetChanged>();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].added.len(), 9);
    assert!(events[0].removed.is_empty());
    assert_eq!(active(&eco), disk(0, 0, 1));
}

#[test]
fn test_streaming_follows_viewer_focus() {
    let mut eco = TestEcosystem::new();
    eco.events::<ChunkSetChanged>();

    eco.set_viewer(Vec3::new(CHUNK_SIZE, 60.0, 120.0), Vec3::new(CHUNK_SIZE, 0.0, 0.0));
    eco.tick(1);
    assert_eq!(active(&eco), disk(1, 0, 1));
    let events = eco.events::<ChunkSetChanged>();
    assert_eq!(events.len(), 1);
    let mut added = events[0].added.clone();
    let mut removed = events[0].removed.clone();
    added.sort();
    removed.sort();
    assert_eq!(
        added,
        vec![
            ChunkCoord::new(2, -1),
            ChunkCoord::new(2, 0),
            ChunkCoord::new(2, 1)
        ]
    );
    assert_eq!(
        removed,
        vec![
            ChunkCoord::new(-1, -1),
            ChunkCoord::new(-1, 0),
            ChunkCoord::new(-1, 1)
        ]
    );
}

#[test]
fn test_no_event_while_focus_stays_in_chunk() {
    let mut eco = TestEcosystem::new();
    eco.events::<ChunkSetChanged>();
    // 0.4 of a chunk still rounds to chunk 0.
    eco.set_viewer(Vec3::Y * 60.0, Vec3::new(CHUNK_SIZE * 0.4, 0.0, -CHUNK_SIZE * 0.4));
    eco.tick(3);
    assert!(eco.events::<ChunkSetChanged>().is_empty());
    assert_eq!(active(&eco), disk(0, 0, 1));
}

#[test]
fn test_long_jump_replaces_whole_set() {
    let mut eco = TestEcosystem::new();
    eco.events::<ChunkSetChanged>();
    let far = Vec3::new(CHUNK_SIZE * 10.0, 0.0, CHUNK_SIZE * -7.0);
    eco.set_viewer(far + Vec3::Y * 60.0, far);
    eco.tick(1);
    let events = eco.events::<ChunkSetChanged>();
    assert_eq!(events[0].added.len(), 9);
    assert_eq!(events[0].removed.len(), 9);
    let streamer = eco.resource::<ChunkStreamer>();
    assert_eq!(streamer.focus_chunk(), Some(ChunkCoord::new(10, -7)));
    assert_eq!(streamer.chunks().count(), 9);
}
