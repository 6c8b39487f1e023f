//! Weather module.
//!
//! The live weather eases toward the selected preset every frame and is
//! published as an immutable `WeatherSnapshot` for terrain colouring, the
//! flock and precipitation.

pub mod state;
pub mod systems;
pub mod types;

pub use state::{lerp_color, WeatherController, WeatherSnapshot};
pub use systems::{advance_weather, apply_weather_mode, publish_weather_snapshot};
pub use types::{SetWeatherMode, WeatherMode, WeatherModeChanged, WeatherParams};

use bevy::prelude::*;

use crate::EcosystemSet;

pub struct WeatherPlugin;

impl Plugin for WeatherPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WeatherController>()
            .init_resource::<WeatherSnapshot>()
            .add_event::<SetWeatherMode>()
            .add_event::<WeatherModeChanged>()
            .add_systems(
                Update,
                (apply_weather_mode, advance_weather, publish_weather_snapshot)
                    .chain()
                    .in_set(EcosystemSet::Weather),
            );
    }
}
