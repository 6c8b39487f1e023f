use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use simulation::flock::FlockAggregate;
use simulation::{EcosystemSet, Viewer};

/// How the viewer moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RigMode {
    /// Circle a fixed focus point.
    #[default]
    Orbit,
    /// Follow the flock from behind.
    Chase,
}

impl RigMode {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "orbit" => Some(RigMode::Orbit),
            "chase" | "follow" => Some(RigMode::Chase),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RigSettings {
    pub mode: RigMode,
    pub orbit_focus: [f32; 3],
    pub orbit_radius: f32,
    pub orbit_height: f32,
    /// Radians per second.
    pub orbit_speed: f32,
    pub chase_distance: f32,
    pub chase_height: f32,
    /// Exponential smoothing rate, per second.
    pub chase_smoothing: f32,
}

impl Default for RigSettings {
    fn default() -> Self {
        Self {
            mode: RigMode::Orbit,
            orbit_focus: [0.0, 0.0, 0.0],
            orbit_radius: 120.0,
            orbit_height: 60.0,
            orbit_speed: 0.1,
            chase_distance: 20.0,
            chase_height: 6.0,
            chase_smoothing: 2.0,
        }
    }
}

/// Viewer rig state. Produces the `Viewer` the simulation consumes.
#[derive(Resource, Debug, Clone)]
pub struct ViewerRig {
    pub settings: RigSettings,
    yaw: f32,
    pose: Option<Viewer>,
}

impl ViewerRig {
    pub fn new(settings: RigSettings) -> Self {
        Self {
            settings,
            yaw: 0.0,
            pose: None,
        }
    }

    fn orbit_pose(&self) -> Viewer {
        let s = &self.settings;
        let focus = Vec3::from_array(s.orbit_focus);
        let offset = Vec3::new(
            s.orbit_radius * self.yaw.sin(),
            s.orbit_height,
            s.orbit_radius * self.yaw.cos(),
        );
        Viewer::looking_at(focus + offset, focus)
    }

    fn chase_target(&self, flock: &FlockAggregate) -> Viewer {
        let s = &self.settings;
        let heading = Vec3::new(flock.mean_velocity.x, 0.0, flock.mean_velocity.z)
            .try_normalize()
            .unwrap_or(Vec3::NEG_Z);
        let eye = flock.centroid - heading * s.chase_distance + Vec3::Y * s.chase_height;
        Viewer::looking_at(eye, flock.centroid)
    }

    /// Move the rig by one frame and return the new viewer pose.
    pub fn advance(&mut self, delta_secs: f32, flock: &FlockAggregate) -> Viewer {
        let dt = if delta_secs.is_finite() {
            delta_secs.max(0.0)
        } else {
            0.0
        };
        let pose = match self.settings.mode {
            RigMode::Orbit => {
                self.yaw = (self.yaw + self.settings.orbit_speed * dt)
                    .rem_euclid(std::f32::consts::TAU);
                self.orbit_pose()
            }
            RigMode::Chase => {
                let target = self.chase_target(flock);
                match self.pose {
                    // First frame snaps onto the flock.
                    None => target,
                    Some(prev) => {
                        let alpha = 1.0 - (-self.settings.chase_smoothing * dt).exp();
                        Viewer::looking_at(
                            prev.eye.lerp(target.eye, alpha),
                            prev.focus.lerp(target.focus, alpha),
                        )
                    }
                }
            }
        };
        self.pose = Some(pose);
        pose
    }
}

/// Writes `Viewer` before any ecosystem system reads it.
pub fn drive_viewer(
    time: Res<Time>,
    flock: Res<FlockAggregate>,
    mut rig: ResMut<ViewerRig>,
    mut viewer: ResMut<Viewer>,
) {
    *viewer = rig.advance(time.delta_secs(), &flock);
}

pub struct ViewerRigPlugin {
    pub settings: RigSettings,
}

impl Plugin for ViewerRigPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ViewerRig::new(self.settings.clone()))
            .add_systems(Update, drive_viewer.before(EcosystemSet::Weather));
    }
}
