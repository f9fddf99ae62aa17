//! Camera focus transition: eases the camera to a part's viewpoint.

use bevy::prelude::*;

use crate::camera::ConfiguratorCamera;

#[derive(Clone, Copy, Debug, PartialEq)]
struct FocusTransition {
    /// Captured from the camera on the first tick after `focus`.
    from: Option<Vec3>,
    target: Vec3,
    look_at: Vec3,
    duration: f32,
    elapsed: f32,
}

/// At most one transition runs; a new `focus` replaces the running one.
#[derive(Resource, Debug, Default)]
pub struct CameraFocus {
    active: Option<FocusTransition>,
    pivot: Option<Vec3>,
}

impl CameraFocus {
    /// Starts a transition that moves the camera to `target`.
    ///
    /// Unlike a plain "move to a point" call this takes a second point,
    /// `look_at`. The camera faces `look_at` (the part's focus point) on
    /// every tick and after arrival. It never faces `target`, since a camera
    /// sitting at `target` has no direction toward it. `look_at` also
    /// becomes the orbit pivot. The start position is not passed in. It is
    /// read from the camera on the next tick.
    pub fn focus(&mut self, target: Vec3, look_at: Vec3, duration_secs: f32) {
        self.active = Some(FocusTransition {
            from: None,
            target,
            look_at,
            duration: duration_secs,
            elapsed: 0.0,
        });
        self.pivot = Some(look_at);
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Point the camera looks at after the last focus.
    pub fn pivot(&self) -> Option<Vec3> {
        self.pivot
    }

    /// Steps the running transition by `dt` seconds starting from `current`.
    /// Returns the new camera position and the point to look at, or `None`
    /// when nothing is running.
    pub fn advance(&mut self, current: Vec3, dt: f32) -> Option<(Vec3, Vec3)> {
        let transition = self.active.as_mut()?;
        let from = *transition.from.get_or_insert(current);
        transition.elapsed += dt.max(0.0);

        let progress = if transition.duration <= 0.0 {
            1.0
        } else {
            (transition.elapsed / transition.duration).clamp(0.0, 1.0)
        };
        let eased = progress * progress * (3.0 - 2.0 * progress);
        let position = from.lerp(transition.target, eased);
        let look_at = transition.look_at;

        if progress >= 1.0 {
            self.active = None;
        }
        Some((position, look_at))
    }
}

pub fn focus_camera_system(
    time: Res<Time>,
    mut focus: ResMut<CameraFocus>,
    mut cameras: Query<&mut Transform, With<ConfiguratorCamera>>,
) {
    let Ok(mut transform) = cameras.get_single_mut() else {
        return;
    };
    if let Some((position, look_at)) = focus.advance(transform.translation, time.delta_secs()) {
        transform.translation = position;
        transform.look_at(look_at, Vec3::Y);
    }
}
