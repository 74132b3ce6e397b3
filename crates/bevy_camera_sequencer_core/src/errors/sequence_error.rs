use thiserror::Error;

use super::SequencerError;

/// Errors produced while turning a loaded camera sequence into a running state machine
#[non_exhaustive]
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SequenceInstantiationError {
    #[error("No entity named {name:?} for the focus target of state {state:?}")]
    UnresolvedFocusTarget { state: String, name: String },
    #[error("Camera sequence is inconsistent: {0}")]
    Sequencer(#[from] SequencerError),
}
