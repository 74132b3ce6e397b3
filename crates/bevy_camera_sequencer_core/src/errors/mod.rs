mod asset_loader_error;
mod sequence_error;
mod sequencer_error;

pub use asset_loader_error::*;
pub use sequence_error::*;
pub use sequencer_error::*;
