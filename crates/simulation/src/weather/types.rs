use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Closed set of weather presets the UI can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WeatherMode {
    /// Calm, sunny, no rain.
    #[default]
    Clear,
    /// Overcast, heavy rain, gusting wind.
    Storm,
}

impl WeatherMode {
    pub const ALL: [WeatherMode; 2] = [WeatherMode::Clear, WeatherMode::Storm];

    pub fn preset(self) -> WeatherParams {
        match self {
            WeatherMode::Clear => WeatherParams {
                wind_speed: 0.5,
                wind_direction: [0.8, 0.0, 0.6],
                rain_intensity: 0.0,
                fog_density: 0.002,
                light_intensity: 1.2,
                cloud_opacity: 0.2,
                fog_color: [0.75, 0.85, 0.95],
                sun_color: [1.0, 0.96, 0.88],
                sky_color: [0.45, 0.68, 0.92],
            },
            WeatherMode::Storm => WeatherParams {
                wind_speed: 2.5,
                wind_direction: [-0.6, 0.0, 0.8],
                rain_intensity: 1.0,
                fog_density: 0.012,
                light_intensity: 0.35,
                cloud_opacity: 0.9,
                fog_color: [0.35, 0.38, 0.42],
                sun_color: [0.55, 0.58, 0.65],
                sky_color: [0.22, 0.25, 0.30],
            },
        }
    }

    /// Lower-case name used in settings and logs.
    pub fn name(self) -> &'static str {
        match self {
            WeatherMode::Clear => "clear",
            WeatherMode::Storm => "storm",
        }
    }

    /// Parse a mode name, ignoring case. Accepts a couple of aliases.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "clear" | "calm" | "sunny" => Some(WeatherMode::Clear),
            "storm" | "stormy" | "overcast" => Some(WeatherMode::Storm),
            _ => None,
        }
    }

    /// The other preset; used by the app's weather cycle.
    pub fn next(self) -> Self {
        match self {
            WeatherMode::Clear => WeatherMode::Storm,
            WeatherMode::Storm => WeatherMode::Clear,
        }
    }
}

/// A full bundle of weather parameters. Presets are targets; the live state
/// is the same shape.
///
/// Colours are sRGB triples in `0..=1`. `wind_direction` is a unit vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherParams {
    pub wind_speed: f32,
    pub wind_direction: [f32; 3],
    pub rain_intensity: f32,
    pub fog_density: f32,
    pub light_intensity: f32,
    pub cloud_opacity: f32,
    pub fog_color: [f32; 3],
    pub sun_color: [f32; 3],
    pub sky_color: [f32; 3],
}

impl Default for WeatherParams {
    fn default() -> Self {
        WeatherMode::default().preset()
    }
}

impl WeatherParams {
    pub fn wind_dir(&self) -> Vec3 {
        Vec3::from_array(self.wind_direction)
    }

    /// Wind direction scaled by wind speed.
    pub fn wind_vector(&self) -> Vec3 {
        self.wind_dir() * self.wind_speed
    }

    /// Compass heading the wind blows toward (N, NE, E, ...). North is -z.
    pub fn compass_direction(&self) -> &'static str {
        let d = self.wind_dir();
        let angle = (-d.z).atan2(d.x).rem_euclid(std::f32::consts::TAU);
        // Divide the circle into 8 sectors of PI/4 each, offset by PI/8
        let sector =
            ((angle + std::f32::consts::FRAC_PI_8) / std::f32::consts::FRAC_PI_4) as u32 % 8;
        match sector {
            0 => "E",
            1 => "NE",
            2 => "N",
            3 => "NW",
            4 => "W",
            5 => "SW",
            6 => "S",
            7 => "SE",
            _ => "E",
        }
    }

    pub fn wind_label(&self) -> &'static str {
        if self.wind_speed < 0.3 {
            "Calm"
        } else if self.wind_speed < 1.2 {
            "Breezy"
        } else if self.wind_speed < 2.0 {
            "Windy"
        } else {
            "Gale"
        }
    }
}

/// Select a weather preset. The live state then eases toward it.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetWeatherMode(pub WeatherMode);

/// Fired when the selected preset actually changes.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherModeChanged {
    pub old_mode: WeatherMode,
    pub new_mode: WeatherMode,
}
