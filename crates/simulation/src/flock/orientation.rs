use bevy::prelude::*;
use fastnoise_lite::FastNoiseLite;

use crate::config::{
    BANK_GAIN, FLAP_AMPLITUDE, FLAP_RATE, MAX_BANK_ANGLE, WING_JITTER_SCALE,
    WING_JITTER_WIND_THRESHOLD,
};

/// Rotation whose local `-Z` points along `forward` with world up kept up.
/// A zero or non-finite `forward` faces `+Z`.
pub fn look_rotation(forward: Vec3) -> Quat {
    let forward = forward.try_normalize().unwrap_or(Vec3::Z);
    Transform::IDENTITY.looking_to(forward, Dir3::Y).rotation
}

/// Roll from the acceleration component along the agent's local left.
pub fn bank_angle(heading: Quat, acceleration: Vec3) -> f32 {
    let left = heading * Vec3::NEG_X;
    let lateral = acceleration.dot(left);
    if !lateral.is_finite() {
        return 0.0;
    }
    (lateral * BANK_GAIN).clamp(-MAX_BANK_ANGLE, MAX_BANK_ANGLE)
}

/// Advance a wing-flap phase by `speed` and return `(phase, wing_angle)`.
///
/// Above `WING_JITTER_WIND_THRESHOLD` the amplitude picks up turbulence from
/// `turbulence`, sampled per agent so wings don't beat in lockstep.
pub fn flap(
    phase: f32,
    speed: f32,
    wind_speed: f32,
    turbulence: &FastNoiseLite,
    index: usize,
    elapsed: f64,
) -> (f32, f32) {
    let phase = (phase + speed * FLAP_RATE).rem_euclid(std::f32::consts::TAU);
    let mut amplitude = FLAP_AMPLITUDE;
    if wind_speed > WING_JITTER_WIND_THRESHOLD {
        let n = turbulence.get_noise_2d(index as f32 * 31.7, elapsed as f32 * 8.0);
        amplitude *= 1.0 + n * WING_JITTER_SCALE * wind_speed;
    }
    (phase, phase.sin() * amplitude)
}
