//! # Bevy Camera Sequencer
//!
//! **Bevy Camera Sequencer** runs scripted camera behaviours on top of a priority-based virtual
//! camera setup for [Bevy](https://bevyengine.org/).
//!
//! ## Introduction
//!
//! A scene has one designer-authored [`VirtualCamera`], the *original camera*, and a
//! [`CameraBrain`] on the real [`Camera3d`](bevy::prelude::Camera3d). The brain shows whichever
//! virtual camera has the highest priority and blends when that changes.
//!
//! A [`CameraSequencer`] owns a [`StateMachine`] of named camera states:
//! - `DollyPath` moves along a path once, facing its focus target or along the path.
//! - `ClashZoom` moves next to its focus target and eases the field of view in.
//! - `AutoPan` circles a looped path a number of times while turning toward its target.
//! - `Shake` drives the noise channel of the current camera for a while, on top of anything
//!   else that is running.
//! - `Original` does nothing and marks a return to the designer's camera.
//!
//! The first three are exclusive: starting one interrupts the one running. They never move the
//! original camera. Instead a behaviour camera is spawned one priority above it, and once the
//! behaviour completes that camera drops below the original, waits for the brain to blend back
//! and is despawned.
//!
//! Sequences can be written in `*.camseq.ron` files. Focus targets refer to entities by
//! [`Name`](bevy::prelude::Name):
//! ```ron
//! (
//!     switch_state_duration: 0.5,
//!     states: [
//!         (
//!             name: "intro",
//!             kind: DollyPath,
//!             camera_speed: 4.0,
//!             path: Some((waypoints: [(0.0, 2.0, 10.0), (10.0, 2.0, 0.0)])),
//!         ),
//!         (
//!             name: "clash",
//!             kind: ClashZoom,
//!             focus_target: Some("Boss"),
//!             zoom_direction: South,
//!             zoom_curve: Ease(CubicOut),
//!             duration: 1.5,
//!         ),
//!         (name: "rumble", kind: Shake, noise_profile: Some(Heavy), duration: 0.4),
//!     ],
//! )
//! ```
//! Spawn a [`CameraSequenceSource`] with the loaded handle. Once the asset is ready it is
//! replaced by a [`CameraSequencer`], and states can be requested by name:
//! ```ignore
//!     sequencer.request("intro");
//! ```
//! Progress is reported through the [`CameraStateEntered`] and [`CameraStateExited`] messages.
//!
//! [`StateMachine`]: bevy_camera_sequencer_core::state_machine::StateMachine

pub mod brain;
pub mod camera;
pub mod messages;
pub mod plugin;
pub mod rig;
pub mod sequencer;
pub mod systems;

pub use brain::CameraBrain;
pub use camera::VirtualCamera;
pub use messages::{CameraStateEntered, CameraStateExited};
pub use sequencer::{CameraSequenceSource, CameraSequencer};

pub mod prelude {
    pub use bevy_camera_sequencer_core::prelude::*;

    pub use super::brain::{CameraBrain, CameraSnapshot};
    pub use super::camera::VirtualCamera;
    pub use super::messages::{CameraStateEntered, CameraStateExited};
    pub use super::plugin::{CameraSequencerPlugin, CameraSequencerSet};
    pub use super::rig::WorldCameraRig;
    pub use super::sequencer::{
        CameraSequenceFailed, CameraSequenceSource, CameraSequencer, SequencerRequest,
    };
}
