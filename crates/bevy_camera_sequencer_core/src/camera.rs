//! Contracts between the sequencer and the camera framework it drives.
//!
//! The sequencer never owns a camera. It reads and writes cameras through a [`CameraRig`],
//! which also spawns and destroys the temporary behaviour camera and reports whether the
//! camera brain is still blending between cameras.

use bevy::{ecs::entity::Entity, prelude::*};

/// Position and orientation of a camera
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Shape of the procedural noise a camera's noise channel produces
#[derive(Reflect, Debug, Clone, PartialEq)]
pub struct NoiseProfile {
    pub name: String,
    /// Maximum position offset along each local axis at unit amplitude gain
    pub position_amplitude: Vec3,
    /// Maximum rotation (radians, as YXZ euler angles) at unit amplitude gain
    pub rotation_amplitude: Vec3,
    /// Base noise frequency, scaled by the channel's frequency gain
    pub frequency: f32,
}

impl NoiseProfile {
    pub fn light() -> Self {
        Self {
            name: "light".into(),
            position_amplitude: Vec3::new(0.1, 0.1, 0.05),
            rotation_amplitude: Vec3::new(0.01, 0.01, 0.02),
            frequency: 20.,
        }
    }

    pub fn medium() -> Self {
        Self {
            name: "medium".into(),
            position_amplitude: Vec3::new(0.3, 0.3, 0.15),
            rotation_amplitude: Vec3::new(0.03, 0.03, 0.05),
            frequency: 15.,
        }
    }

    pub fn heavy() -> Self {
        Self {
            name: "heavy".into(),
            position_amplitude: Vec3::new(0.6, 0.6, 0.3),
            rotation_amplitude: Vec3::new(0.05, 0.05, 0.08),
            frequency: 12.,
        }
    }
}

/// Procedural noise settings attached to a camera. Zero gains or no profile means no noise.
#[derive(Reflect, Debug, Clone, Default, PartialEq)]
pub struct NoiseChannel {
    pub amplitude_gain: f32,
    pub frequency_gain: f32,
    pub profile: Option<NoiseProfile>,
}

impl NoiseChannel {
    pub fn is_silent(&self) -> bool {
        self.profile.is_none() || self.amplitude_gain == 0. || self.frequency_gain == 0.
    }

    pub fn clear(&mut self) {
        self.amplitude_gain = 0.;
        self.frequency_gain = 0.;
        self.profile = None;
    }
}

/// A virtual camera the sequencer can move around.
///
/// Field of view is in degrees. Priority decides which camera the brain shows: the highest
/// priority camera is live.
pub trait TargetCamera {
    fn position(&self) -> Vec3;
    fn set_position(&mut self, position: Vec3);

    fn rotation(&self) -> Quat;
    fn set_rotation(&mut self, rotation: Quat);

    fn field_of_view(&self) -> f32;
    fn set_field_of_view(&mut self, field_of_view: f32);

    fn look_at(&self) -> Option<Entity>;
    fn set_look_at(&mut self, target: Option<Entity>);

    fn priority(&self) -> i32;
    fn set_priority(&mut self, priority: i32);

    fn noise_channel_mut(&mut self) -> Option<&mut NoiseChannel>;

    fn pose(&self) -> CameraPose {
        CameraPose {
            position: self.position(),
            rotation: self.rotation(),
        }
    }

    fn set_pose(&mut self, pose: CameraPose) {
        self.set_position(pose.position);
        self.set_rotation(pose.rotation);
    }
}

/// Reports whether a camera brain is in the middle of blending between two cameras
pub trait BlendSignal {
    fn is_blend_in_progress(&self, brain: Entity) -> bool;
}

/// Everything a state machine needs from the world around it
pub trait CameraRig: BlendSignal {
    type Camera: TargetCamera;

    fn camera_mut(&mut self, camera: Entity) -> Option<&mut Self::Camera>;

    /// World position of an entity used as a look-at or focus target
    fn focus_position(&self, target: Entity) -> Option<Vec3>;

    /// Spawns a copy of `original`, sharing its pose and lens. Returns `None` if `original`
    /// is not a camera.
    fn instantiate_camera(&mut self, original: Entity) -> Option<Entity>;

    fn destroy_camera(&mut self, camera: Entity);
}
