//! Picks the live virtual camera and drives the real camera with it.

use bevy::{math::curve::Curve, math::curve::easing::EaseFunction, prelude::*};
use bevy_camera_sequencer_core::{
    camera::{CameraPose, NoiseChannel},
    interpolation::{curve::Easing, linear::InterpolateLinear},
};
use noise::{NoiseFn, Perlin};

use crate::camera::VirtualCamera;

/// What the brain shows for one frame
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct CameraSnapshot {
    pub pose: CameraPose,
    pub field_of_view: f32,
}

impl CameraSnapshot {
    pub fn of(camera: &VirtualCamera) -> Self {
        Self {
            pose: CameraPose {
                position: camera.position,
                rotation: camera.rotation,
            },
            field_of_view: camera.field_of_view,
        }
    }
}

impl InterpolateLinear for CameraSnapshot {
    fn interpolate_linear(&self, other: &Self, f: f32) -> Self {
        Self {
            pose: self.pose.interpolate_linear(&other.pose, f),
            field_of_view: self.field_of_view.interpolate_linear(&other.field_of_view, f),
        }
    }
}

#[derive(Reflect, Debug, Clone, PartialEq)]
pub struct CameraBlend {
    /// Output of the brain when the blend started
    pub from: CameraSnapshot,
    pub elapsed: f32,
    pub duration: f32,
}

/// Add next to a [`Camera3d`] to have it follow the highest priority [`VirtualCamera`].
///
/// Switching live camera blends from the last output to the new camera over
/// `blend_duration` seconds. Equal priorities keep the current live camera.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct CameraBrain {
    pub blend_duration: f32,
    pub blend_easing: Easing,
    pub noise_seed: u32,

    live_camera: Option<Entity>,
    blend: Option<CameraBlend>,
    last_output: Option<CameraSnapshot>,
    noise_time: f32,
    #[reflect(ignore)]
    noise: Option<Perlin>,
}

impl Default for CameraBrain {
    fn default() -> Self {
        Self {
            blend_duration: 1.,
            blend_easing: Easing::CubicInOut,
            noise_seed: 0,
            live_camera: None,
            blend: None,
            last_output: None,
            noise_time: 0.,
            noise: None,
        }
    }
}

impl CameraBrain {
    pub fn with_blend_duration(mut self, blend_duration: f32) -> Self {
        self.blend_duration = blend_duration;
        self
    }

    pub fn live_camera(&self) -> Option<Entity> {
        self.live_camera
    }

    pub fn active_blend(&self) -> Option<&CameraBlend> {
        self.blend.as_ref()
    }

    pub fn is_blend_in_progress(&self) -> bool {
        self.blend.is_some()
    }

    /// Picks the live camera among `candidates`, advances the blend and returns what should be
    /// shown, noise included. Returns `None` when there is no camera to show.
    pub fn update<'a>(
        &mut self,
        delta: f32,
        candidates: impl IntoIterator<Item = (Entity, &'a VirtualCamera)>,
    ) -> Option<CameraSnapshot> {
        let mut best: Option<(Entity, &VirtualCamera)> = None;
        for (entity, camera) in candidates {
            let replace = match best {
                None => true,
                Some((best_entity, best_camera)) => {
                    camera.priority > best_camera.priority
                        || (camera.priority == best_camera.priority
                            && Some(entity) == self.live_camera
                            && Some(best_entity) != self.live_camera)
                }
            };
            if replace {
                best = Some((entity, camera));
            }
        }
        let (entity, camera) = best?;

        if self.live_camera != Some(entity) {
            debug!("Camera brain switching to {entity:?}");
            self.blend = match self.last_output {
                Some(from) if self.live_camera.is_some() && self.blend_duration > 0. => {
                    Some(CameraBlend {
                        from,
                        elapsed: 0.,
                        duration: self.blend_duration,
                    })
                }
                _ => None,
            };
            self.live_camera = Some(entity);
        } else if let Some(blend) = &mut self.blend {
            blend.elapsed += delta;
            if blend.elapsed >= blend.duration {
                self.blend = None;
            }
        }

        let target = CameraSnapshot::of(camera);
        let output = match &self.blend {
            Some(blend) => {
                let weight = EaseFunction::from(self.blend_easing)
                    .sample_clamped(blend.elapsed / blend.duration);
                blend.from.interpolate_linear(&target, weight)
            }
            None => target,
        };
        self.last_output = Some(output);

        self.noise_time += delta;
        Some(match &camera.noise {
            Some(channel) if !channel.is_silent() => self.apply_noise(output, channel),
            _ => output,
        })
    }

    /// Offsets the snapshot in camera-local space
    fn apply_noise(&mut self, snapshot: CameraSnapshot, channel: &NoiseChannel) -> CameraSnapshot {
        let Some(profile) = &channel.profile else {
            return snapshot;
        };
        let t = (self.noise_time * profile.frequency * channel.frequency_gain) as f64;
        let seed = self.noise_seed;
        let perlin = self.noise.get_or_insert_with(|| Perlin::new(seed));
        let sample =
            |axis: u32| perlin.get([t, axis as f64 * 17.31]) as f32 * channel.amplitude_gain;

        let offset = Vec3::new(sample(0), sample(1), sample(2)) * profile.position_amplitude;
        let angles = Vec3::new(sample(3), sample(4), sample(5)) * profile.rotation_amplitude;
        let rotation = Quat::from_euler(EulerRot::YXZ, angles.y, angles.x, angles.z);

        CameraSnapshot {
            pose: CameraPose {
                position: snapshot.pose.position + snapshot.pose.rotation * offset,
                rotation: snapshot.pose.rotation * rotation,
            },
            field_of_view: snapshot.field_of_view,
        }
    }
}

/// Copies each brain's output onto its own [`Transform`] and perspective [`Projection`]
pub fn update_camera_brains(
    time: Res<Time>,
    mut brains: Query<(&mut CameraBrain, &mut Transform, Option<&mut Projection>)>,
    cameras: Query<(Entity, &VirtualCamera)>,
) {
    for (mut brain, mut transform, projection) in &mut brains {
        let Some(snapshot) = brain.update(time.delta_secs(), &cameras) else {
            continue;
        };
        transform.translation = snapshot.pose.position;
        transform.rotation = snapshot.pose.rotation;
        if let Some(mut projection) = projection
            && let Projection::Perspective(perspective) = projection.as_mut()
        {
            perspective.fov = snapshot.field_of_view.to_radians();
        }
    }
}

#[cfg(test)]
mod tests {
    use bevy_camera_sequencer_core::camera::NoiseProfile;

    use super::*;

    fn entities() -> (Entity, Entity) {
        let mut world = World::new();
        (world.spawn_empty().id(), world.spawn_empty().id())
    }

    fn camera_at(x: f32, priority: i32) -> VirtualCamera {
        VirtualCamera {
            position: Vec3::new(x, 0., 0.),
            priority,
            ..default()
        }
    }

    #[test]
    fn highest_priority_camera_goes_live_without_blend() {
        let (a, b) = entities();
        let low = camera_at(0., 10);
        let high = camera_at(1., 11);
        let mut brain = CameraBrain::default();

        let output = brain.update(0.1, [(a, &low), (b, &high)]).unwrap();
        assert_eq!(brain.live_camera(), Some(b));
        assert!(!brain.is_blend_in_progress());
        assert_eq!(output.pose.position, Vec3::X);
    }

    #[test]
    fn ties_keep_the_live_camera() {
        let (a, b) = entities();
        let first = camera_at(0., 10);
        let second = camera_at(1., 10);
        let mut brain = CameraBrain::default();

        brain.update(0.1, [(a, &first)]);
        brain.update(0.1, [(b, &second), (a, &first)]);
        assert_eq!(brain.live_camera(), Some(a));
        assert!(!brain.is_blend_in_progress());
    }

    #[test]
    fn switching_cameras_blends_until_duration_elapses() {
        let (a, b) = entities();
        let original = camera_at(0., 10);
        let behaviour = camera_at(10., 11);
        let mut brain = CameraBrain {
            blend_easing: Easing::Linear,
            ..default()
        }
        .with_blend_duration(1.);

        brain.update(0.1, [(a, &original)]);
        let output = brain.update(0.1, [(a, &original), (b, &behaviour)]).unwrap();
        assert!(brain.is_blend_in_progress());
        assert_eq!(output.pose.position, Vec3::ZERO);

        let output = brain.update(0.5, [(a, &original), (b, &behaviour)]).unwrap();
        assert!((output.pose.position.x - 5.).abs() < 1e-4);

        brain.update(0.5, [(a, &original), (b, &behaviour)]);
        assert!(!brain.is_blend_in_progress());
    }

    #[test]
    fn silent_noise_leaves_the_pose_alone() {
        let (a, _) = entities();
        let camera = camera_at(3., 10);
        let mut brain = CameraBrain::default();
        let output = brain.update(0.3, [(a, &camera)]).unwrap();
        assert_eq!(output, CameraSnapshot::of(&camera));
    }

    #[test]
    fn noise_stays_within_the_profile_amplitude() {
        let (a, _) = entities();
        let mut camera = camera_at(0., 10);
        camera.noise = Some(NoiseChannel {
            amplitude_gain: 1.,
            frequency_gain: 1.,
            profile: Some(NoiseProfile::heavy()),
        });
        let mut brain = CameraBrain::default();
        let mut moved = false;
        for _ in 0..20 {
            let output = brain.update(0.013, [(a, &camera)]).unwrap();
            let offset = output.pose.position;
            moved |= offset != Vec3::ZERO;
            assert!(offset.abs().cmple(NoiseProfile::heavy().position_amplitude * 1.05).all());
        }
        assert!(moved);
    }
}
