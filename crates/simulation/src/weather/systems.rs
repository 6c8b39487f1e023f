use bevy::prelude::*;

use super::state::{WeatherController, WeatherSnapshot};
use super::types::{SetWeatherMode, WeatherModeChanged};

/// Applies the last mode request of the frame.
pub fn apply_weather_mode(
    mut requests: EventReader<SetWeatherMode>,
    mut controller: ResMut<WeatherController>,
    mut changed: EventWriter<WeatherModeChanged>,
) {
    let Some(SetWeatherMode(mode)) = requests.read().last().copied() else {
        return;
    };
    if let Some(old_mode) = controller.set_mode(mode) {
        info!("weather: {} -> {}", old_mode.name(), mode.name());
        changed.send(WeatherModeChanged {
            old_mode,
            new_mode: mode,
        });
    }
}

pub fn advance_weather(time: Res<Time>, mut controller: ResMut<WeatherController>) {
    if controller.advance(time.delta_secs()) {
        warn!("weather: non-finite wind direction reset to preset");
    }
}

pub fn publish_weather_snapshot(
    controller: Res<WeatherController>,
    mut snapshot: ResMut<WeatherSnapshot>,
) {
    snapshot.0 = *controller.current();
}
