use bevy::prelude::*;
use bevy_camera_sequencer_core::camera::{NoiseChannel, TargetCamera};

/// A camera the [`CameraBrain`](crate::brain::CameraBrain) can show.
///
/// Virtual cameras don't render. The brain picks the live one by priority and copies its pose
/// and lens onto the real camera.
#[derive(Component, Reflect, Debug, Clone, PartialEq)]
#[reflect(Component)]
pub struct VirtualCamera {
    pub position: Vec3,
    pub rotation: Quat,
    /// Vertical field of view, in degrees
    pub field_of_view: f32,
    pub priority: i32,
    pub look_at: Option<Entity>,
    pub noise: Option<NoiseChannel>,
}

impl Default for VirtualCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            field_of_view: 60.,
            priority: 10,
            look_at: None,
            noise: Some(NoiseChannel::default()),
        }
    }
}

impl VirtualCamera {
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            position: transform.translation,
            rotation: transform.rotation,
            ..default()
        }
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_field_of_view(mut self, field_of_view: f32) -> Self {
        self.field_of_view = field_of_view;
        self
    }

    /// Removes the noise channel, so shake states can't run on this camera
    pub fn without_noise(mut self) -> Self {
        self.noise = None;
        self
    }
}

impl TargetCamera for VirtualCamera {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: Quat) {
        self.rotation = rotation;
    }

    fn field_of_view(&self) -> f32 {
        self.field_of_view
    }

    fn set_field_of_view(&mut self, field_of_view: f32) {
        self.field_of_view = field_of_view;
    }

    fn look_at(&self) -> Option<Entity> {
        self.look_at
    }

    fn set_look_at(&mut self, target: Option<Entity>) {
        self.look_at = target;
    }

    fn priority(&self) -> i32 {
        self.priority
    }

    fn set_priority(&mut self, priority: i32) {
        self.priority = priority;
    }

    fn noise_channel_mut(&mut self) -> Option<&mut NoiseChannel> {
        self.noise.as_mut()
    }
}
