use bevy::prelude::*;

/// Written when a camera state of a [`CameraSequencer`](crate::sequencer::CameraSequencer)
/// begins
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct CameraStateEntered {
    pub sequencer: Entity,
    pub state: String,
}

/// Written when a camera state finishes. Interrupted states don't write this.
#[derive(Message, Debug, Clone, PartialEq, Eq)]
pub struct CameraStateExited {
    pub sequencer: Entity,
    pub state: String,
}
