use bevy::color::{ColorToComponents, LinearRgba, Mix, Srgba};
use bevy::prelude::*;

use super::types::{WeatherMode, WeatherParams};
use crate::config::WEATHER_LERP_RATE;

/// Owns the live weather state and the selected preset.
///
/// Only the weather systems mutate this. Everything else reads the
/// per-frame `WeatherSnapshot`.
#[derive(Resource, Debug, Clone)]
pub struct WeatherController {
    mode: WeatherMode,
    current: WeatherParams,
}

impl Default for WeatherController {
    fn default() -> Self {
        Self::new(WeatherMode::default())
    }
}

impl WeatherController {
    /// Start settled on `mode`'s preset.
    pub fn new(mode: WeatherMode) -> Self {
        Self {
            mode,
            current: mode.preset(),
        }
    }

    pub fn mode(&self) -> WeatherMode {
        self.mode
    }

    pub fn current(&self) -> &WeatherParams {
        &self.current
    }

    pub fn target(&self) -> WeatherParams {
        self.mode.preset()
    }

    /// Change the target preset. Returns the previous mode when it changed.
    pub fn set_mode(&mut self, mode: WeatherMode) -> Option<WeatherMode> {
        if mode == self.mode {
            return None;
        }
        let old = self.mode;
        self.mode = mode;
        Some(old)
    }

    /// Move the live state toward the target by `delta_secs * WEATHER_LERP_RATE`
    /// (capped at 1, so a long frame snaps rather than overshoots).
    ///
    /// Returns `true` if the wind direction had to be repaired.
    pub fn advance(&mut self, delta_secs: f32) -> bool {
        let t = lerp_factor(delta_secs);
        let target = self.target();
        let c = &mut self.current;

        c.wind_speed = lerp(c.wind_speed, target.wind_speed, t);
        c.rain_intensity = lerp(c.rain_intensity, target.rain_intensity, t);
        c.fog_density = lerp(c.fog_density, target.fog_density, t);
        c.light_intensity = lerp(c.light_intensity, target.light_intensity, t);
        c.cloud_opacity = lerp(c.cloud_opacity, target.cloud_opacity, t);

        c.fog_color = lerp_color(c.fog_color, target.fog_color, t);
        c.sun_color = lerp_color(c.sun_color, target.sun_color, t);
        c.sky_color = lerp_color(c.sky_color, target.sky_color, t);

        // Component-wise lerp shortens a unit vector; renormalise.
        let lerped = c.wind_dir().lerp(target.wind_dir(), t);
        let (dir, repaired) = match lerped.try_normalize() {
            Some(dir) => (dir, false),
            None => (
                target.wind_dir().try_normalize().unwrap_or(Vec3::X),
                !lerped.is_finite(),
            ),
        };
        c.wind_direction = dir.to_array();
        repaired
    }
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

fn lerp_factor(delta_secs: f32) -> f32 {
    if delta_secs.is_finite() {
        (delta_secs * WEATHER_LERP_RATE).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Lerp two sRGB colours in linear space.
pub fn lerp_color(from: [f32; 3], to: [f32; 3], t: f32) -> [f32; 3] {
    let a = LinearRgba::from(Srgba::rgb(from[0], from[1], from[2]));
    let b = LinearRgba::from(Srgba::rgb(to[0], to[1], to[2]));
    Srgba::from(a.mix(&b, t)).to_f32_array_no_alpha()
}

/// Read-only copy of the live weather, published once per frame before any
/// consumer runs.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct WeatherSnapshot(pub WeatherParams);

impl std::ops::Deref for WeatherSnapshot {
    type Target = WeatherParams;

    fn deref(&self) -> &WeatherParams {
        &self.0
    }
}
