use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::core::FrameCount;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use simulation::chunks::{flora_template, ChunkStreamer};
use simulation::flock::FlockAggregate;
use simulation::precipitation::RainField;
use simulation::weather::{SetWeatherMode, WeatherController, WeatherSnapshot};
use simulation::{EcosystemSet, SimulationPlugin};

mod camera;
mod settings;

use camera::ViewerRigPlugin;
use settings::RunOptions;

/// Frames between status lines (5 s at 60 Hz).
const STATUS_INTERVAL: u32 = 300;

fn main() {
    let mut app = App::new();
    app.add_plugins((
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        ))),
        LogPlugin::default(),
    ));

    // LogPlugin has installed the subscriber, so option warnings are visible.
    let options = settings::run_options(|key| std::env::var(key).ok());
    options.log_warnings();

    configure_app(&mut app, &options);
    app.run();
}

fn configure_app(app: &mut App, options: &RunOptions) {
    // Insert BEFORE SimulationPlugin so init_resource keeps ours.
    app.insert_resource(options.settings.world.clone())
        .add_plugins(SimulationPlugin)
        .add_plugins(ViewerRigPlugin {
            settings: options.settings.rig.clone(),
        })
        .insert_resource(RunLimit {
            frames: options.frames,
        })
        .add_systems(Startup, log_flora_template)
        .add_systems(
            Update,
            (log_status, exit_after_frames)
                .chain()
                .after(EcosystemSet::PostSim),
        );

    if let Some(secs) = options.weather_cycle_secs {
        app.insert_resource(WeatherCycle(Timer::from_seconds(secs, TimerMode::Repeating)))
            .add_systems(Update, cycle_weather.before(EcosystemSet::Weather));
    }
}

#[derive(Resource)]
struct RunLimit {
    frames: u32,
}

#[derive(Resource)]
struct WeatherCycle(Timer);

fn cycle_weather(
    time: Res<Time>,
    controller: Res<WeatherController>,
    mut cycle: ResMut<WeatherCycle>,
    mut requests: EventWriter<SetWeatherMode>,
) {
    if cycle.0.tick(time.delta()).just_finished() {
        requests.send(SetWeatherMode(controller.mode().next()));
    }
}

fn log_flora_template() {
    match flora_template() {
        Ok(mesh) => info!(
            "flora template: {} vertices, {} triangles",
            mesh.vertex_count(),
            mesh.triangle_count()
        ),
        Err(e) => warn!("flora template is malformed: {e}"),
    }
}

fn log_status(
    frame: Res<FrameCount>,
    weather: Res<WeatherSnapshot>,
    controller: Res<WeatherController>,
    flock: Res<FlockAggregate>,
    chunks: Res<ChunkStreamer>,
    rain: Res<RainField>,
) {
    if frame.0 % STATUS_INTERVAL != 0 {
        return;
    }
    let c = flock.centroid;
    info!(
        "frame {} | {} ({} {}, wind {:.2}) | flock ({:.1}, {:.1}, {:.1}) | {} chunks, {} flora | {} drops",
        frame.0,
        controller.mode().name(),
        weather.wind_label(),
        weather.compass_direction(),
        weather.wind_speed,
        c.x,
        c.y,
        c.z,
        chunks.len(),
        chunks.flora_count(),
        rain.live_count()
    );
}

fn exit_after_frames(
    frame: Res<FrameCount>,
    limit: Res<RunLimit>,
    mut exit: EventWriter<AppExit>,
) {
    if frame.0 >= limit.frames {
        info!("ran {} frames, exiting", frame.0);
        exit.send(AppExit::Success);
    }
}
