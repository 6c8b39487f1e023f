use bevy::prelude::*;

use super::orientation::look_rotation;
use crate::config::{MAX_SPEED, MIN_SPEED};

/// One bird. Owned by `Flock`; never created or destroyed after spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Agent {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Sum of weighted steering forces from the latest tick.
    pub acceleration: Vec3,
    /// Heading plus bank.
    pub rotation: Quat,
    /// Roll angle in radians, within `±MAX_BANK_ANGLE`.
    pub bank: f32,
    pub flap_phase: f32,
    /// Current wing angle in radians for the renderer's flap animation.
    pub wing_angle: f32,
}

impl Agent {
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            acceleration: Vec3::ZERO,
            rotation: look_rotation(velocity),
            bank: 0.0,
            flap_phase: 0.0,
            wing_angle: 0.0,
        }
    }

    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.position,
            rotation: self.rotation,
            scale: Vec3::ONE,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite() && self.acceleration.is_finite()
    }
}

/// Rescale `v` so its length is within `[MIN_SPEED, MAX_SPEED]`. A zero or
/// non-finite velocity becomes `(0, 0, MIN_SPEED)`.
pub fn clamp_speed(v: Vec3) -> Vec3 {
    match v.try_normalize() {
        Some(dir) => dir * v.length().clamp(MIN_SPEED, MAX_SPEED),
        None => Vec3::Z * MIN_SPEED,
    }
}
