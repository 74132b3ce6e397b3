//! In-memory rig used by the unit tests.

use std::collections::HashMap;

use bevy::{ecs::entity::Entity, prelude::*};

use crate::camera::{BlendSignal, CameraRig, NoiseChannel, TargetCamera};

#[derive(Debug, Clone)]
pub struct TestCamera {
    pub position: Vec3,
    pub rotation: Quat,
    pub field_of_view: f32,
    pub look_at: Option<Entity>,
    pub priority: i32,
    pub noise: Option<NoiseChannel>,
}

impl Default for TestCamera {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            field_of_view: 60.,
            look_at: None,
            priority: 10,
            noise: Some(NoiseChannel::default()),
        }
    }
}

impl TargetCamera for TestCamera {
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

#[derive(Default)]
pub struct TestRig {
    world: World,
    pub cameras: HashMap<Entity, TestCamera>,
    pub focus: HashMap<Entity, Vec3>,
    pub blending: bool,
    pub instantiated: Vec<Entity>,
    pub destroyed: Vec<Entity>,
}

impl TestRig {
    pub fn add_camera(&mut self, camera: TestCamera) -> Entity {
        let entity = self.world.spawn_empty().id();
        self.cameras.insert(entity, camera);
        entity
    }

    pub fn add_focus(&mut self, position: Vec3) -> Entity {
        let entity = self.world.spawn_empty().id();
        self.focus.insert(entity, position);
        entity
    }

    pub fn entity(&mut self) -> Entity {
        self.world.spawn_empty().id()
    }

    pub fn camera(&self, camera: Entity) -> &TestCamera {
        &self.cameras[&camera]
    }
}

impl BlendSignal for TestRig {
    fn is_blend_in_progress(&self, _brain: Entity) -> bool {
        self.blending
    }
}

impl CameraRig for TestRig {
    type Camera = TestCamera;

    fn camera_mut(&mut self, camera: Entity) -> Option<&mut TestCamera> {
        self.cameras.get_mut(&camera)
    }

    fn focus_position(&self, target: Entity) -> Option<Vec3> {
        self.focus.get(&target).copied()
    }

    fn instantiate_camera(&mut self, original: Entity) -> Option<Entity> {
        let clone = self.cameras.get(&original)?.clone();
        let entity = self.add_camera(clone);
        self.instantiated.push(entity);
        Some(entity)
    }

    fn destroy_camera(&mut self, camera: Entity) {
        self.cameras.remove(&camera);
        self.destroyed.push(camera);
    }
}

pub fn assert_approx(actual: f32, expected: f32) {
    assert!(
        (actual - expected).abs() < 1e-4,
        "expected {expected}, got {actual}"
    );
}

pub fn assert_vec_approx(actual: Vec3, expected: Vec3) {
    assert!(
        actual.abs_diff_eq(expected, 1e-4),
        "expected {expected}, got {actual}"
    );
}
