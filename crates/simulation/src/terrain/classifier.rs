use bevy::color::{ColorToComponents, Mix, Srgba};
use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::{
    GRASS_LEVEL, MACRO_NOISE_SCALE, MICRO_NOISE_SCALE, ROCK_LEVEL, SAND_LEVEL, WATER_LEVEL,
};
use crate::noise_field::NoiseField;

/// Surface material derived from elevation, slope and colour noise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceCategory {
    DeepWater,
    Shore,
    Rock,
    RockDark,
    Grass,
    GrassDark,
    Snow,
    Sand,
}

/// Category plus per-vertex colour. Meshes take it as
/// `color.to_f32_array_no_alpha()`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Surface {
    pub category: SurfaceCategory,
    pub color: Srgba,
}

pub const SAND: Srgba = Srgba::rgb(0.76, 0.70, 0.50);
pub const SHORE: Srgba = Srgba::rgb(0.68, 0.62, 0.45);
pub const GRASS: Srgba = Srgba::rgb(0.33, 0.50, 0.20);
pub const GRASS_DARK: Srgba = Srgba::rgb(0.22, 0.38, 0.14);
pub const ROCK: Srgba = Srgba::rgb(0.45, 0.43, 0.40);
pub const ROCK_DARK: Srgba = Srgba::rgb(0.32, 0.30, 0.28);
pub const SNOW: Srgba = Srgba::rgb(0.95, 0.96, 0.98);

/// Surfaces with `normal_y` below this are cliffs.
pub const STEEP_NORMAL_Y: f64 = 0.65;
/// Gentle surfaces below this start blending toward rock.
pub const ROCKY_NORMAL_Y: f64 = 0.85;
/// Micro noise modulates brightness by up to this fraction.
const MICRO_BRIGHTNESS: f64 = 0.12;
/// Cliffs start turning white this far above the rock level.
const CLIFF_SNOW_OFFSET: f64 = 15.0;
const CLIFF_SNOW_BAND: f64 = 10.0;
/// Width of the dark-rock to snow band above the rock level.
const SNOW_BAND: f64 = 5.0;
const SNOW_JITTER: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct TerrainClassifier {
    noise: NoiseField,
}

impl TerrainClassifier {
    pub fn new(noise: NoiseField) -> Self {
        Self { noise }
    }

    /// Samples the macro and micro colour noise at `(x, z)` and runs the
    /// cascade. The micro field is offset by half a lattice cell so it is not
    /// pinned to zero on the same grid as the macro field.
    pub fn classify(&self, x: f64, z: f64, elevation: f64, normal_y: f64) -> Surface {
        let macro_n = self
            .noise
            .sample2d(x * MACRO_NOISE_SCALE, z * MACRO_NOISE_SCALE);
        let micro_n = self
            .noise
            .sample2d(x * MICRO_NOISE_SCALE + 0.5, z * MICRO_NOISE_SCALE + 0.5);
        classify_surface(elevation, normal_y, macro_n, micro_n)
    }
}

/// Strict priority cascade: water depth, then shore, then slope, then
/// elevation bands. Slope wins over banding once above the shore.
pub fn classify_surface(y: f64, normal_y: f64, macro_n: f64, micro_n: f64) -> Surface {
    if y < WATER_LEVEL - 1.0 {
        return surface(SurfaceCategory::DeepWater, brighten(SAND, 0.7));
    }
    if y < WATER_LEVEL + 0.5 {
        return surface(SurfaceCategory::Shore, SHORE);
    }

    let brightness = 1.0 + micro_n * MICRO_BRIGHTNESS;

    if normal_y < STEEP_NORMAL_Y {
        let (category, base) = if macro_n > 0.0 {
            (SurfaceCategory::Rock, ROCK)
        } else {
            (SurfaceCategory::RockDark, ROCK_DARK)
        };
        let rock = brighten(base, brightness);
        let snow_line = ROCK_LEVEL + CLIFF_SNOW_OFFSET;
        if y > snow_line {
            let t = ((y - snow_line) / CLIFF_SNOW_BAND).min(1.0);
            let category = if t >= 0.5 {
                SurfaceCategory::Snow
            } else {
                category
            };
            return surface(category, rock.mix(&SNOW, t as f32));
        }
        return surface(category, rock);
    }

    if y < SAND_LEVEL {
        let shore_top = WATER_LEVEL + 0.5;
        let t = ((y - shore_top) / (SAND_LEVEL - shore_top)).clamp(0.0, 1.0);
        let category = if t < 0.5 {
            SurfaceCategory::Sand
        } else {
            SurfaceCategory::Grass
        };
        return surface(category, SAND.mix(&GRASS, t as f32));
    }

    if y < ROCK_LEVEL {
        let (mut category, base) = if macro_n > 0.0 {
            (SurfaceCategory::Grass, GRASS)
        } else {
            (SurfaceCategory::GrassDark, GRASS_DARK)
        };
        let mut color = brighten(base, brightness);
        if y > GRASS_LEVEL {
            // alpine meadows darken toward the rock line
            let t = (y - GRASS_LEVEL) / (ROCK_LEVEL - GRASS_LEVEL) * 0.5;
            color = color.mix(&GRASS_DARK, t as f32);
        }
        if normal_y < ROCKY_NORMAL_Y {
            let t = ((ROCKY_NORMAL_Y - normal_y) / (ROCKY_NORMAL_Y - STEEP_NORMAL_Y)).clamp(0.0, 1.0);
            if t >= 0.5 {
                category = SurfaceCategory::Rock;
            }
            color = color.mix(&ROCK, t as f32);
        }
        return surface(category, color);
    }

    let threshold = ROCK_LEVEL + SNOW_BAND + micro_n * SNOW_JITTER;
    if y > threshold {
        return surface(SurfaceCategory::Snow, brighten(SNOW, brightness));
    }
    let t = ((y - ROCK_LEVEL) / SNOW_BAND).clamp(0.0, 1.0);
    let category = if t >= 0.5 {
        SurfaceCategory::Snow
    } else {
        SurfaceCategory::RockDark
    };
    surface(category, ROCK_DARK.mix(&SNOW, t as f32))
}

fn surface(category: SurfaceCategory, color: Srgba) -> Surface {
    Surface {
        category,
        color: Srgba::from_vec3(color.to_vec3().clamp(Vec3::ZERO, Vec3::ONE)),
    }
}

/// Scales the RGB channels, leaving alpha alone.
fn brighten(color: Srgba, k: f64) -> Srgba {
    Srgba::from_vec3(color.to_vec3() * k as f32)
}
