//! Per-frame ordering via `SystemSet` phases.
//!
//! Every ecosystem system runs once per rendered frame in `Update`, inside one
//! of these sets:
//!
//! ```text
//! Weather  →  Simulation  →  PostSim
//! ```
//!
//! * **Weather** – Mode changes and the preset lerp. Publishes the frame's
//!   `WeatherSnapshot`, so everything after it reads one consistent value.
//! * **Simulation** – Chunk streaming, flocking and precipitation. These read
//!   the snapshot, the `Viewer` and the `Terrain`, and write only their own
//!   resources.
//! * **PostSim** – Aggregates for outside consumers (flock centroid and mean
//!   velocity). Reads only.
//!
//! The viewer rig that feeds `Viewer` belongs to the caller and should run
//! `.before(EcosystemSet::Weather)`.

use bevy::prelude::*;

/// Configured as a chain: `Weather` → `Simulation` → `PostSim`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum EcosystemSet {
    Weather,
    Simulation,
    PostSim,
}
