//! Coordinates a set of named camera states around one designer-authored camera.
//!
//! Exclusive states (dolly path, clash zoom and auto pan) never touch the original camera. The
//! first one to start spawns a behaviour camera one priority above the original, so the camera
//! brain blends over to it. When an exclusive state completes, the behaviour camera drops below
//! the original, the machine waits for the brain to blend back and then destroys it.
//!
//! Shake states run alongside whatever else is going on and only touch the noise channel of
//! the camera they were started on.

mod revert;

pub use revert::BLEND_SETTLE_TIME;

use bevy::{
    ecs::entity::Entity,
    log::{debug, error, warn},
};
use indexmap::IndexMap;

use self::revert::RevertWatcher;
use crate::{
    camera::{CameraRig, TargetCamera},
    errors::{SequencerError, SequencerResult},
    state::{CameraState, CameraStateKind, Outcome, process::Progress},
};

pub const DEFAULT_SWITCH_DURATION: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Entered,
    Exited,
}

/// Lifecycle event queued by the machine until the caller drains it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateNotification {
    pub state: String,
    pub kind: NotificationKind,
}

#[derive(Debug, Clone)]
pub struct StateMachine {
    original_camera: Entity,
    brain: Entity,
    switch_duration: f32,
    states: IndexMap<String, CameraState>,

    behaviour_camera: Option<Entity>,
    active_state: Option<usize>,
    revert: Option<RevertWatcher>,
    notifications: Vec<StateNotification>,
}

impl StateMachine {
    /// Builds a machine driving `original_camera`, watching `brain` for blends. State names
    /// must be unique.
    pub fn new(
        original_camera: Entity,
        brain: Entity,
        switch_duration: f32,
        states: impl IntoIterator<Item = CameraState>,
    ) -> SequencerResult<Self> {
        let mut registry = IndexMap::new();
        for state in states {
            if registry.contains_key(state.name()) {
                let error = SequencerError::DuplicateState(state.name().to_string());
                error!("{error}");
                return Err(error);
            }
            registry.insert(state.name().to_string(), state);
        }

        Ok(Self {
            original_camera,
            brain,
            switch_duration,
            states: registry,
            behaviour_camera: None,
            active_state: None,
            revert: None,
            notifications: Vec::new(),
        })
    }

    pub fn original_camera(&self) -> Entity {
        self.original_camera
    }

    pub fn brain(&self) -> Entity {
        self.brain
    }

    pub fn switch_duration(&self) -> f32 {
        self.switch_duration
    }

    pub fn set_switch_duration(&mut self, switch_duration: f32) {
        self.switch_duration = switch_duration;
    }

    /// The camera exclusive states drive, if one is currently spawned
    pub fn behaviour_camera(&self) -> Option<Entity> {
        self.behaviour_camera
    }

    /// Camera a state starting now would drive
    pub fn target_camera(&self) -> Entity {
        self.behaviour_camera.unwrap_or(self.original_camera)
    }

    pub fn state(&self, name: &str) -> Option<&CameraState> {
        self.states.get(name)
    }

    pub fn state_mut(&mut self, name: &str) -> Option<&mut CameraState> {
        self.states.get_mut(name)
    }

    pub fn states(&self) -> impl Iterator<Item = &CameraState> {
        self.states.values()
    }

    pub fn active_state(&self) -> Option<&CameraState> {
        self.active_state.and_then(|index| self.states.get_index(index).map(|(_, s)| s))
    }

    /// Overrides which state the machine considers active. `None` clears it.
    pub fn set_active_state(&mut self, name: Option<&str>) -> SequencerResult<()> {
        self.active_state = match name {
            Some(name) => Some(self.index_of(name)?),
            None => None,
        };
        Ok(())
    }

    /// Whether the machine is waiting for the brain to blend back to the original camera
    pub fn is_reverting(&self) -> bool {
        self.revert.is_some()
    }

    /// Lifecycle events queued since the last drain, oldest first
    pub fn drain_notifications(&mut self) -> impl Iterator<Item = StateNotification> + '_ {
        self.notifications.drain(..)
    }

    /// Starts the named state. Starting a state that is already active does nothing.
    ///
    /// Configuration problems are logged and returned, and leave the machine and every camera
    /// as they were.
    pub fn begin_state<R: CameraRig>(&mut self, name: &str, rig: &mut R) -> SequencerResult<()> {
        let result = self.try_begin_state(name, rig);
        if let Err(error) = &result {
            error!("{error}");
        }
        result
    }

    fn try_begin_state<R: CameraRig>(&mut self, name: &str, rig: &mut R) -> SequencerResult<()> {
        let index = self.index_of(name)?;
        if self.states[index].is_active() {
            return Ok(());
        }

        match self.states[index].kind() {
            CameraStateKind::Original => {
                let camera = self.target_camera();
                self.states[index].begin(camera, rig)?;
                self.notify(index, NotificationKind::Entered);
                self.states[index].end(rig);
                self.notify(index, NotificationKind::Exited);
            }
            CameraStateKind::Shake => {
                let camera = self.target_camera();
                self.states[index].validate(rig, camera)?;
                self.states[index].begin(camera, rig)?;
                self.notify(index, NotificationKind::Entered);
            }
            CameraStateKind::DollyPath | CameraStateKind::ClashZoom | CameraStateKind::AutoPan => {
                self.states[index].validate(rig, self.target_camera())?;
                let camera = self.claim_behaviour_camera(rig)?;
                if self.active_state.is_some() {
                    self.switch_active_state(rig);
                }
                self.states[index].begin(camera, rig)?;
                self.active_state = Some(index);
                self.notify(index, NotificationKind::Entered);
            }
        }
        Ok(())
    }

    /// Returns the behaviour camera, spawning it if needed. A revert in progress is called off
    /// and the camera is raised above the original again.
    fn claim_behaviour_camera<R: CameraRig>(&mut self, rig: &mut R) -> SequencerResult<Entity> {
        let original = self.original_camera;
        let priority = rig
            .camera_mut(original)
            .ok_or(SequencerError::MissingCamera(original))?
            .priority()
            + 1;

        if let Some(camera) = self.behaviour_camera
            && let Some(behaviour) = rig.camera_mut(camera)
        {
            if self.revert.take().is_some() {
                debug!("Reclaiming behaviour camera {camera:?} from revert");
                behaviour.set_priority(priority);
            }
            return Ok(camera);
        }

        let camera = rig
            .instantiate_camera(original)
            .ok_or(SequencerError::MissingCamera(original))?;
        if let Some(behaviour) = rig.camera_mut(camera) {
            behaviour.set_priority(priority);
        }
        debug!("Spawned behaviour camera {camera:?} at priority {priority}");
        self.behaviour_camera = Some(camera);
        self.revert = None;
        Ok(camera)
    }

    /// Ends the active state after it completed and starts blending back to the original
    /// camera. Does nothing when no state is active.
    pub fn end_state<R: CameraRig>(&mut self, rig: &mut R) {
        if let Some(index) = self.active_state {
            self.exit_index(index, true, rig);
            if self.active_state.is_none() {
                self.begin_revert(rig);
            }
        }
    }

    /// Ends the named state. With `execute_exit_event` the state also stops being the active
    /// one and an exit notification is queued.
    pub fn exit_state<R: CameraRig>(
        &mut self,
        name: &str,
        execute_exit_event: bool,
        rig: &mut R,
    ) -> SequencerResult<()> {
        let index = self.index_of(name)?;
        self.exit_index(index, execute_exit_event, rig);
        Ok(())
    }

    fn exit_index<R: CameraRig>(&mut self, index: usize, execute_exit_event: bool, rig: &mut R) {
        self.states[index].end(rig);
        if execute_exit_event {
            if self.active_state == Some(index) {
                self.active_state = None;
            }
            self.notify(index, NotificationKind::Exited);
        }
    }

    /// Interrupts the active state so another one can take over. No exit notification is
    /// queued and the active state is left for the caller to replace.
    pub fn switch_active_state<R: CameraRig>(&mut self, rig: &mut R) {
        if let Some(index) = self.active_state {
            self.revert = None;
            debug!("Interrupting camera state {:?}", self.states[index].name());
            self.exit_index(index, false, rig);
        }
    }

    fn begin_revert<R: CameraRig>(&mut self, rig: &mut R) {
        let Some(camera) = self.behaviour_camera else {
            return;
        };
        if self.revert.is_some() {
            return;
        }

        match rig.camera_mut(self.original_camera).map(|c| c.priority()) {
            Some(original) => {
                if let Some(behaviour) = rig.camera_mut(camera) {
                    behaviour.set_priority(original - 1);
                }
            }
            None => warn!(
                "Original camera {:?} is gone, reverting without blending",
                self.original_camera
            ),
        }
        debug!("Reverting to original camera {:?}", self.original_camera);
        self.revert = Some(RevertWatcher::new());
    }

    /// Advances every running state and the revert by `delta` seconds
    pub fn tick<R: CameraRig>(&mut self, delta: f32, rig: &mut R) {
        for index in 0..self.states.len() {
            let outcome = self.states[index].step(rig, delta, self.switch_duration);
            if outcome != Outcome::Completed {
                continue;
            }

            if self.states[index].kind() == CameraStateKind::Shake {
                self.exit_index(index, true, rig);
            } else if self.active_state == Some(index) {
                self.end_state(rig);
            } else {
                self.exit_index(index, true, rig);
                if self.active_state.is_none() {
                    self.begin_revert(rig);
                }
            }
        }

        if let Some(revert) = &mut self.revert
            && revert.step(delta, &*rig, self.brain) == Progress::Finished
        {
            self.revert = None;
            if let Some(camera) = self.behaviour_camera.take() {
                debug!("Destroying behaviour camera {camera:?}");
                rig.destroy_camera(camera);
            }
        }
    }

    fn index_of(&self, name: &str) -> SequencerResult<usize> {
        self.states
            .get_index_of(name)
            .ok_or_else(|| SequencerError::UnknownState(name.to_string()))
    }

    fn notify(&mut self, index: usize, kind: NotificationKind) {
        let state = self.states[index].name().to_string();
        debug!("Camera state {state:?} {kind:?}");
        self.notifications.push(StateNotification { state, kind });
    }
}
