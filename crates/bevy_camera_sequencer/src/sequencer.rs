use std::collections::VecDeque;

use bevy::prelude::*;
use bevy_camera_sequencer_core::{
    camera::CameraRig,
    sequence::CameraSequence,
    state_machine::{StateMachine, StateNotification},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequencerRequest {
    Begin(String),
    /// End the active state and blend back to the original camera
    End,
}

/// Runs a camera [`StateMachine`] on the world's virtual cameras.
///
/// Requests are queued and handled at the start of the next sequencer update, before the
/// running states advance.
#[derive(Component, Debug, Clone)]
pub struct CameraSequencer {
    machine: StateMachine,
    requests: VecDeque<SequencerRequest>,
}

impl CameraSequencer {
    pub fn new(machine: StateMachine) -> Self {
        Self {
            machine,
            requests: VecDeque::new(),
        }
    }

    pub fn machine(&self) -> &StateMachine {
        &self.machine
    }

    pub fn machine_mut(&mut self) -> &mut StateMachine {
        &mut self.machine
    }

    pub fn request(&mut self, state: impl Into<String>) {
        self.requests.push_back(SequencerRequest::Begin(state.into()));
    }

    pub fn request_end(&mut self) {
        self.requests.push_back(SequencerRequest::End);
    }

    pub fn pending_requests(&self) -> impl Iterator<Item = &SequencerRequest> {
        self.requests.iter()
    }

    /// Handles queued requests, then advances the machine by `delta` seconds
    pub fn process<R: CameraRig>(&mut self, delta: f32, rig: &mut R) -> Vec<StateNotification> {
        while let Some(request) = self.requests.pop_front() {
            match request {
                // Failures are logged by the machine and leave it untouched.
                SequencerRequest::Begin(state) => {
                    let _ = self.machine.begin_state(&state, rig);
                }
                SequencerRequest::End => self.machine.end_state(rig),
            }
        }
        self.machine.tick(delta, rig);
        self.machine.drain_notifications().collect()
    }
}

/// Builds a [`CameraSequencer`] on this entity once the sequence asset is loaded. Focus
/// targets are looked up by [`Name`].
#[derive(Component, Debug, Clone)]
pub struct CameraSequenceSource {
    pub sequence: Handle<CameraSequence>,
    pub original_camera: Entity,
    pub brain: Entity,
}

/// Added instead of a [`CameraSequencer`] when a sequence could not be instantiated
#[derive(Component, Debug, Clone, Default)]
pub struct CameraSequenceFailed;
