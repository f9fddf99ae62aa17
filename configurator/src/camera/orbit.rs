//! Orbit controls: right-drag to rotate around the focus point, wheel to zoom.

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::camera::focus::CameraFocus;
use crate::camera::ConfiguratorCamera;
use crate::scene::PointerCapture;

const MAX_PITCH: f32 = 1.45;

#[derive(Component, Clone, Debug)]
pub struct OrbitCamera {
    pub pivot: Vec3,
    pub rotate_sensitivity: f32,
    pub zoom_sensitivity: f32,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Fraction of the velocity lost per frame.
    pub damping: f32,
    velocity: Vec2,
    zoom_velocity: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            pivot: Vec3::ZERO,
            rotate_sensitivity: 0.005,
            zoom_sensitivity: 0.1,
            min_radius: 2.0,
            max_radius: 30.0,
            damping: 0.25,
            velocity: Vec2::ZERO,
            zoom_velocity: 0.0,
        }
    }
}

/// Rotates `offset` (camera minus pivot) by yaw/pitch deltas and scales it by
/// `zoom`, keeping pitch away from the poles and radius within limits.
pub fn orbit_offset(offset: Vec3, yaw_delta: f32, pitch_delta: f32, zoom: f32, radius_limits: (f32, f32)) -> Vec3 {
    let radius = offset.length().max(f32::EPSILON);
    let yaw = offset.x.atan2(offset.z) - yaw_delta;
    let pitch = ((offset.y / radius).clamp(-1.0, 1.0).asin() + pitch_delta).clamp(-MAX_PITCH, MAX_PITCH);
    let radius = (radius * (1.0 - zoom)).clamp(radius_limits.0, radius_limits.1);
    Vec3::new(
        radius * pitch.cos() * yaw.sin(),
        radius * pitch.sin(),
        radius * pitch.cos() * yaw.cos(),
    )
}

pub fn orbit_camera_system(
    mouse: Res<ButtonInput<MouseButton>>,
    mut motion: EventReader<MouseMotion>,
    mut wheel: EventReader<MouseWheel>,
    capture: Res<PointerCapture>,
    focus: Res<CameraFocus>,
    mut cameras: Query<(&mut Transform, &mut OrbitCamera), With<ConfiguratorCamera>>,
) {
    let Ok((mut transform, mut orbit)) = cameras.get_single_mut() else {
        return;
    };

    if focus.is_active() {
        motion.clear();
        wheel.clear();
        orbit.velocity = Vec2::ZERO;
        orbit.zoom_velocity = 0.0;
        return;
    }
    if let Some(pivot) = focus.pivot() {
        orbit.pivot = pivot;
    }

    let dragging = mouse.pressed(MouseButton::Right) && !capture.over_ui;
    let drag: Vec2 = motion.read().map(|m| m.delta).sum();
    if dragging {
        let rotate_sensitivity = orbit.rotate_sensitivity;
        orbit.velocity += drag * rotate_sensitivity;
    }
    let scroll: f32 = wheel
        .read()
        .map(|w| match w.unit {
            MouseScrollUnit::Line => w.y,
            MouseScrollUnit::Pixel => w.y / 100.0,
        })
        .sum();
    if !capture.over_ui {
        orbit.zoom_velocity += scroll * orbit.zoom_sensitivity;
    }

    if orbit.velocity.length_squared() < 1e-8 && orbit.zoom_velocity.abs() < 1e-4 {
        return;
    }

    let offset = orbit_offset(
        transform.translation - orbit.pivot,
        orbit.velocity.x,
        orbit.velocity.y,
        orbit.zoom_velocity.clamp(-0.5, 0.5),
        (orbit.min_radius, orbit.max_radius),
    );
    transform.translation = orbit.pivot + offset;
    let pivot = orbit.pivot;
    transform.look_at(pivot, Vec3::Y);

    let keep = 1.0 - orbit.damping;
    orbit.velocity *= keep;
    orbit.zoom_velocity *= keep;
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: (f32, f32) = (2.0, 30.0);

    #[test]
    fn zero_input_keeps_offset() {
        let offset = Vec3::new(0.0, 3.0, 10.0);
        let out = orbit_offset(offset, 0.0, 0.0, 0.0, LIMITS);
        assert!((out - offset).length() < 1e-4);
    }

    #[test]
    fn yaw_preserves_radius_and_height() {
        let offset = Vec3::new(0.0, 3.0, 10.0);
        let out = orbit_offset(offset, std::f32::consts::FRAC_PI_2, 0.0, 0.0, LIMITS);
        assert!((out.length() - offset.length()).abs() < 1e-4);
        assert!((out.y - 3.0).abs() < 1e-4);
        assert!(out.z.abs() < 1e-3);
    }

    #[test]
    fn pitch_is_clamped_short_of_the_pole() {
        let out = orbit_offset(Vec3::new(0.0, 0.0, 10.0), 0.0, 10.0, 0.0, LIMITS);
        assert!(out.y < 10.0);
        assert!(out.z > 0.0);
    }

    #[test]
    fn zoom_is_clamped_to_radius_limits() {
        let near = orbit_offset(Vec3::new(0.0, 0.0, 3.0), 0.0, 0.0, 0.9, LIMITS);
        assert!((near.length() - LIMITS.0).abs() < 1e-4);
        let far = orbit_offset(Vec3::new(0.0, 0.0, 25.0), 0.0, 0.0, -1.0, LIMITS);
        assert!((far.length() - LIMITS.1).abs() < 1e-4);
    }
}
