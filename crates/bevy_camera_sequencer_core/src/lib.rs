pub mod camera;
pub mod errors;
pub mod interpolation;
pub mod path;
pub mod sequence;
pub mod state;
pub mod state_machine;

#[cfg(test)]
mod testing;

pub mod prelude {
    pub use super::camera::*;
    pub use super::errors::*;
    pub use super::interpolation::{curve::*, linear::*, look::look_rotation};
    pub use super::path::*;
    pub use super::sequence::{
        CameraSequence,
        loader::CameraSequenceLoader,
        serial::{CameraSequenceSerial, CameraStateSerial, NoiseProfileSerial, WaypointPathSerial},
    };
    pub use super::state::{CameraState, CameraStateKind, CameraStateSettings, ZoomDirection};
    pub use super::state_machine::{
        BLEND_SETTLE_TIME, DEFAULT_SWITCH_DURATION, NotificationKind, StateMachine,
        StateNotification,
    };
}
