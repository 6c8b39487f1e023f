use bevy::prelude::*;

/// Where the viewer is and what it looks at. Written by the caller's camera
/// rig each frame; `focus` drives chunk streaming and the rain box, `eye`
/// drives the flock's camera repulsion.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Viewer {
    pub eye: Vec3,
    pub focus: Vec3,
}

impl Default for Viewer {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, 60.0, 120.0),
            focus: Vec3::ZERO,
        }
    }
}

impl Viewer {
    pub fn looking_at(eye: Vec3, focus: Vec3) -> Self {
        Self { eye, focus }
    }
}
