use bevy::ecs::entity::Entity;
use thiserror::Error;

/// Configuration problems found when a state machine is built or a camera state is started.
///
/// None of these are fatal: the operation that produced the error is aborted before it touches
/// any camera or machine state, so the caller can fix the configuration and try again.
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SequencerError {
    #[error("No state found with the name: {0}")]
    UnknownState(String),
    #[error("State name {0:?} is used by more than one state")]
    DuplicateState(String),
    #[error("Focus object is not assigned for state {0:?}")]
    MissingFocusTarget(String),
    #[error("State {0:?} has no path to travel")]
    MissingPath(String),
    #[error("The path of state {state:?} needs at least 2 waypoints, found {found}")]
    InsufficientWaypoints { state: String, found: usize },
    #[error("State {0:?} can only be used with looped paths")]
    PathNotLooped(String),
    #[error("Camera speed of state {state:?} must be positive, got {speed}")]
    NonPositiveSpeed { state: String, speed: f32 },
    #[error("No noise channel found on the target camera of state {0:?}")]
    MissingNoiseChannel(String),
    #[error("Camera {0:?} is not available")]
    MissingCamera(Entity),
}

pub type SequencerResult<T> = Result<T, SequencerError>;
