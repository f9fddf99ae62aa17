//! Configurator camera: focus transitions on selection and orbit controls.

mod focus;
mod orbit;

use bevy::prelude::*;

use crate::scene::ConfiguratorSet;

pub use focus::{focus_camera_system, CameraFocus};
pub use orbit::{orbit_camera_system, orbit_offset, OrbitCamera};

/// Marks the camera driven by picking, focus and orbit.
#[derive(Component, Debug, Default)]
pub struct ConfiguratorCamera;

pub fn focus_camera_plugin(app: &mut App) {
    app.init_resource::<CameraFocus>()
        .add_systems(Update, focus_camera_system.after(ConfiguratorSet::Apply));
}

pub fn orbit_camera_plugin(app: &mut App) {
    app.add_systems(
        Update,
        orbit_camera_system
            .after(ConfiguratorSet::Apply)
            .before(focus_camera_system),
    );
}
