//! Run options: a JSON settings file plus a few environment overrides.
//!
//! | Variable               | Meaning                                    |
//! |------------------------|--------------------------------------------|
//! | `CANOPY_SETTINGS`      | Path to a JSON `CanopySettings` file        |
//! | `CANOPY_WEATHER`       | Initial weather (`clear` / `storm`)        |
//! | `CANOPY_WEATHER_CYCLE` | Seconds between weather switches (0 = off) |
//! | `CANOPY_CAMERA`        | Viewer rig (`orbit` / `chase`)             |
//! | `CANOPY_FRAMES`        | Frames to run before exiting               |

use std::str::FromStr;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use simulation::weather::WeatherMode;
use simulation::WorldSettings;

use crate::camera::{RigMode, RigSettings};

pub const DEFAULT_FRAMES: u32 = 1800;

/// Contents of the settings file. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanopySettings {
    pub world: WorldSettings,
    pub rig: RigSettings,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub settings: CanopySettings,
    pub frames: u32,
    /// `None` keeps the initial weather for the whole run.
    pub weather_cycle_secs: Option<f32>,
    /// Problems found while resolving the options. Options are resolved
    /// before logging is up, so `main` reports these once it is.
    pub warnings: Vec<String>,
}

impl RunOptions {
    pub fn log_warnings(&self) {
        for w in &self.warnings {
            warn!("{}", w);
        }
    }
}

/// Decode settings JSON, falling back to defaults with a warning on failure.
pub fn settings_or_warn(source: &str, json: &str, warnings: &mut Vec<String>) -> CanopySettings {
    match serde_json::from_str(json) {
        Ok(settings) => settings,
        Err(e) => {
            warnings.push(format!(
                "settings {}: failed to decode {} bytes, falling back to defaults: {}",
                source,
                json.len(),
                e
            ));
            CanopySettings::default()
        }
    }
}

fn load_settings_file(path: &str, warnings: &mut Vec<String>) -> CanopySettings {
    match std::fs::read_to_string(path) {
        Ok(json) => settings_or_warn(path, &json, warnings),
        Err(e) => {
            warnings.push(format!("settings {}: {}, using defaults", path, e));
            CanopySettings::default()
        }
    }
}

/// Parse an optional variable value, warning when it is present but invalid.
fn parse_or<T: FromStr>(key: &str, value: Option<&str>, default: T, warnings: &mut Vec<String>) -> T {
    let Some(raw) = value else {
        return default;
    };
    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            warnings.push(format!("{}={:?} is not valid, ignoring", key, raw));
            default
        }
    }
}

/// Build run options from a variable lookup. `main` passes `std::env::var`.
pub fn run_options(lookup: impl Fn(&str) -> Option<String>) -> RunOptions {
    let mut warnings = Vec::new();
    let mut settings = lookup("CANOPY_SETTINGS")
        .map(|path| load_settings_file(&path, &mut warnings))
        .unwrap_or_default();

    if let Some(name) = lookup("CANOPY_WEATHER") {
        match WeatherMode::from_name(&name) {
            Some(mode) => settings.world.initial_weather = mode,
            None => warnings.push(format!(
                "CANOPY_WEATHER={:?} is not a weather mode, ignoring",
                name
            )),
        }
    }
    if let Some(name) = lookup("CANOPY_CAMERA") {
        match RigMode::from_name(&name) {
            Some(mode) => settings.rig.mode = mode,
            None => warnings.push(format!(
                "CANOPY_CAMERA={:?} is not a rig mode, ignoring",
                name
            )),
        }
    }

    let frames = parse_or(
        "CANOPY_FRAMES",
        lookup("CANOPY_FRAMES").as_deref(),
        DEFAULT_FRAMES,
        &mut warnings,
    );
    let cycle: f32 = parse_or(
        "CANOPY_WEATHER_CYCLE",
        lookup("CANOPY_WEATHER_CYCLE").as_deref(),
        0.0,
        &mut warnings,
    );
    let weather_cycle_secs = (cycle.is_finite() && cycle > 0.0).then_some(cycle);

    RunOptions {
        settings,
        frames,
        weather_cycle_secs,
        warnings,
    }
}
