//! Free-flight camera controller for exploring a terrain tile.
//!
//! Hold the right mouse button to look around, WASD to move, Space/Ctrl to
//! rise and sink, Shift to boost. The scroll wheel scales the base speed.

use bevy::ecs::message::MessageReader;
use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy_egui::input::{egui_wants_any_keyboard_input, egui_wants_any_pointer_input};

/// Minimum base speed in mesh units per second.
pub const MIN_SPEED: f32 = 5.0;
/// Maximum base speed in mesh units per second.
pub const MAX_SPEED: f32 = 2_000.0;

/// Plugin for free-flight camera controls.
pub struct CameraControllerPlugin;

impl Plugin for CameraControllerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>().add_systems(
            Update,
            (
                adjust_speed_with_scroll.run_if(not(egui_wants_any_pointer_input)),
                camera_look.run_if(not(egui_wants_any_pointer_input)),
                camera_movement.run_if(not(egui_wants_any_keyboard_input)),
            )
                .chain(),
        );
    }
}

/// Settings for camera movement.
#[derive(Resource)]
pub struct CameraSettings {
    /// Base movement speed in mesh units per second.
    pub base_speed: f32,
    /// Speed multiplier when boost key is held.
    pub boost_multiplier: f32,
    /// Mouse sensitivity for look rotation.
    pub mouse_sensitivity: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            base_speed: 100.0,
            boost_multiplier: 5.0,
            mouse_sensitivity: 0.003,
        }
    }
}

/// Marker component for the camera entity that should be controlled.
#[derive(Component, Default)]
pub struct FlightCamera;

/// Place the camera so a mesh spanning `min..max` is in view.
///
/// The camera sits south of the tile and above its highest point, looking at
/// the tile centre.
#[must_use]
pub fn framing_transform(min: glam::Vec3, max: glam::Vec3) -> Transform {
    let min = Vec3::from_array(min.to_array());
    let max = Vec3::from_array(max.to_array());

    let center = (min + max) / 2.0;
    let span = (max.x - min.x).max(max.z - min.z).max(1.0);
    let eye = Vec3::new(center.x, max.y + span * 0.5, max.z + span * 0.6);

    Transform::from_translation(eye).looking_at(center, Vec3::Y)
}

/// Adjust speed with mouse scroll wheel.
#[allow(clippy::needless_pass_by_value)]
fn adjust_speed_with_scroll(
    mut scroll_events: MessageReader<MouseWheel>,
    mut settings: ResMut<CameraSettings>,
) {
    for event in scroll_events.read() {
        // Adjust speed logarithmically for smooth scaling.
        let scroll = event.y;
        if scroll != 0.0 {
            let factor = 1.1_f32.powf(scroll);
            settings.base_speed = (settings.base_speed * factor).clamp(MIN_SPEED, MAX_SPEED);
        }
    }
}

/// Rotate while the right mouse button is held.
#[allow(clippy::needless_pass_by_value)]
fn camera_look(
    mouse: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    settings: Res<CameraSettings>,
    mut query: Query<&mut Transform, With<FlightCamera>>,
) {
    let mut delta = Vec2::ZERO;
    for event in mouse_motion.read() {
        delta += event.delta;
    }

    if delta == Vec2::ZERO || !mouse.pressed(MouseButton::Right) {
        return;
    }

    for mut transform in &mut query {
        let (yaw, pitch, _) = transform.rotation.to_euler(EulerRot::YXZ);
        let yaw = yaw - delta.x * settings.mouse_sensitivity;
        // Prevent looking straight up or down.
        let pitch = (pitch - delta.y * settings.mouse_sensitivity).clamp(-1.54, 1.54);
        transform.rotation = Quat::from_euler(EulerRot::YXZ, yaw, pitch, 0.0);
    }
}

/// Handle WASD + Space/Ctrl movement with shift boost.
#[allow(clippy::needless_pass_by_value)]
fn camera_movement(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    settings: Res<CameraSettings>,
    mut query: Query<&mut Transform, With<FlightCamera>>,
) {
    for mut transform in &mut query {
        let mut speed = settings.base_speed;
        if keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight) {
            speed *= settings.boost_multiplier;
        }

        let forward = *transform.forward();
        let right = *transform.right();

        let mut movement = Vec3::ZERO;

        // Forward/backward.
        if keyboard.pressed(KeyCode::KeyW) {
            movement += forward;
        }
        if keyboard.pressed(KeyCode::KeyS) {
            movement -= forward;
        }

        // Strafe left/right.
        if keyboard.pressed(KeyCode::KeyA) {
            movement -= right;
        }
        if keyboard.pressed(KeyCode::KeyD) {
            movement += right;
        }

        // Ascend/descend.
        if keyboard.pressed(KeyCode::Space) {
            movement += Vec3::Y;
        }
        if keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::ControlRight) {
            movement -= Vec3::Y;
        }

        if movement != Vec3::ZERO {
            transform.translation += movement.normalize() * speed * time.delta_secs();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn framing_looks_at_tile_centre() {
        let transform = framing_transform(glam::Vec3::new(0.0, -1.0, 0.0), glam::Vec3::new(511.0, 40.0, 511.0));
        let center = Vec3::new(255.5, 19.5, 255.5);

        assert!(transform.translation.y > 40.0);
        assert!(transform.translation.z > 511.0);
        let towards = (center - transform.translation).normalize();
        assert!(transform.forward().dot(towards) > 0.999);
    }
}
