use bevy::prelude::*;
use bevy_camera_sequencer_core::camera::{BlendSignal, CameraRig};

use crate::{brain::CameraBrain, camera::VirtualCamera};

/// Name given to the cameras spawned for exclusive states
pub const BEHAVIOUR_CAMERA_NAME: &str = "Behaviour Camera";

/// Lets a state machine drive [`VirtualCamera`]s living in a [`World`]
pub struct WorldCameraRig<'w> {
    world: &'w mut World,
}

impl<'w> WorldCameraRig<'w> {
    pub fn new(world: &'w mut World) -> Self {
        Self { world }
    }
}

impl BlendSignal for WorldCameraRig<'_> {
    fn is_blend_in_progress(&self, brain: Entity) -> bool {
        self.world
            .get::<CameraBrain>(brain)
            .is_some_and(CameraBrain::is_blend_in_progress)
    }
}

impl CameraRig for WorldCameraRig<'_> {
    type Camera = VirtualCamera;

    fn camera_mut(&mut self, camera: Entity) -> Option<&mut VirtualCamera> {
        self.world
            .get_mut::<VirtualCamera>(camera)
            .map(Mut::into_inner)
    }

    /// Root entities report their local transform, which is already up to date this frame.
    /// Children fall back to the last propagated global transform.
    fn focus_position(&self, target: Entity) -> Option<Vec3> {
        if self.world.get::<ChildOf>(target).is_none()
            && let Some(transform) = self.world.get::<Transform>(target)
        {
            return Some(transform.translation);
        }
        self.world
            .get::<GlobalTransform>(target)
            .map(GlobalTransform::translation)
    }

    fn instantiate_camera(&mut self, original: Entity) -> Option<Entity> {
        let mut camera = self.world.get::<VirtualCamera>(original)?.clone();
        if let Some(noise) = &mut camera.noise {
            noise.clear();
        }
        Some(
            self.world
                .spawn((camera, Name::new(BEHAVIOUR_CAMERA_NAME)))
                .id(),
        )
    }

    fn destroy_camera(&mut self, camera: Entity) {
        self.world.despawn(camera);
    }
}

#[cfg(test)]
mod tests {
    use bevy_camera_sequencer_core::camera::{NoiseChannel, NoiseProfile, TargetCamera};

    use super::*;

    #[test]
    fn instantiated_camera_copies_the_original_without_its_noise() {
        let mut world = World::new();
        let original = world
            .spawn(VirtualCamera {
                position: Vec3::new(1., 2., 3.),
                field_of_view: 45.,
                noise: Some(NoiseChannel {
                    amplitude_gain: 1.,
                    frequency_gain: 1.,
                    profile: Some(NoiseProfile::light()),
                }),
                ..default()
            })
            .id();

        let mut rig = WorldCameraRig::new(&mut world);
        let clone = rig.instantiate_camera(original).unwrap();
        let camera = rig.camera_mut(clone).unwrap();
        assert_eq!(camera.position(), Vec3::new(1., 2., 3.));
        assert_eq!(camera.field_of_view(), 45.);
        assert!(camera.noise_channel_mut().unwrap().is_silent());

        rig.destroy_camera(clone);
        assert!(rig.camera_mut(clone).is_none());
        assert_eq!(
            world.get::<Name>(original),
            None,
            "the original keeps its own components"
        );
    }

    #[test]
    fn focus_position_reads_root_transforms() {
        let mut world = World::new();
        let target = world.spawn(Transform::from_xyz(4., 0., 2.)).id();
        let rig = WorldCameraRig::new(&mut world);
        assert_eq!(rig.focus_position(target), Some(Vec3::new(4., 0., 2.)));
    }

    #[test]
    fn blend_signal_reads_the_brain() {
        let mut world = World::new();
        let brain = world.spawn(CameraBrain::default()).id();
        let rig = WorldCameraRig::new(&mut world);
        assert!(!rig.is_blend_in_progress(brain));
        assert!(!rig.is_blend_in_progress(Entity::PLACEHOLDER));
    }
}
