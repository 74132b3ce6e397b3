//! Camera sequences loaded from `*.camseq.ron` files.
//!
//! A sequence is a template: it holds every state with its settings and path, but refers to
//! focus targets by name. [`CameraSequence::instantiate`] resolves those names and builds a
//! [`StateMachine`] for a concrete camera and brain.

pub mod loader;
pub mod serial;

use std::sync::Arc;

use bevy::{asset::Asset, ecs::entity::Entity, reflect::TypePath};

use self::serial::CameraSequenceSerial;
use crate::{
    errors::SequenceInstantiationError,
    path::{CameraPath, WaypointPath},
    state::CameraState,
    state_machine::StateMachine,
};

#[derive(Debug, Clone)]
struct StateTemplate {
    state: CameraState,
    focus_target: Option<String>,
}

#[derive(Asset, TypePath, Debug, Clone)]
pub struct CameraSequence {
    switch_state_duration: f32,
    templates: Vec<StateTemplate>,
}

impl From<CameraSequenceSerial> for CameraSequence {
    fn from(value: CameraSequenceSerial) -> Self {
        let templates = value
            .states
            .into_iter()
            .map(|serial| {
                let mut state = CameraState::new(serial.name.clone(), serial.kind)
                    .with_settings(serial.settings());
                if let Some(path) = &serial.path {
                    let path: Arc<dyn CameraPath> = Arc::new(WaypointPath::from(path));
                    state = state.with_shared_path(path);
                }
                StateTemplate {
                    state,
                    focus_target: serial.focus_target,
                }
            })
            .collect();

        Self {
            switch_state_duration: value.switch_state_duration,
            templates,
        }
    }
}

impl CameraSequence {
    pub fn switch_state_duration(&self) -> f32 {
        self.switch_state_duration
    }

    pub fn state_names(&self) -> impl Iterator<Item = &str> {
        self.templates.iter().map(|template| template.state.name())
    }

    /// Builds a state machine for `original_camera`. `resolve` maps focus target names to
    /// entities. Paths are shared with the sequence, not copied.
    pub fn instantiate(
        &self,
        original_camera: Entity,
        brain: Entity,
        mut resolve: impl FnMut(&str) -> Option<Entity>,
    ) -> Result<StateMachine, SequenceInstantiationError> {
        let mut states = Vec::with_capacity(self.templates.len());
        for template in &self.templates {
            let mut state = template.state.clone();
            if let Some(name) = &template.focus_target {
                let target = resolve(name).ok_or_else(|| {
                    SequenceInstantiationError::UnresolvedFocusTarget {
                        state: state.name().to_string(),
                        name: name.clone(),
                    }
                })?;
                state.settings_mut().focus_target = Some(target);
            }
            states.push(state);
        }

        Ok(StateMachine::new(
            original_camera,
            brain,
            self.switch_state_duration,
            states,
        )?)
    }
}
