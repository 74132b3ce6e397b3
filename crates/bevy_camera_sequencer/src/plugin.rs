use bevy::{
    app::{App, Plugin, PostUpdate, PreUpdate},
    asset::AssetApp,
    ecs::schedule::{IntoScheduleConfigs, SystemSet},
    transform::TransformSystems,
};
use bevy_camera_sequencer_core::{
    camera::{CameraPose, NoiseChannel, NoiseProfile},
    interpolation::curve::{CurveKey, Easing, ZoomCurve},
    path::WaypointPath,
    sequence::{CameraSequence, loader::CameraSequenceLoader},
    state::{CameraStateKind, CameraStateSettings, ZoomDirection},
};

use crate::{
    brain::{CameraBlend, CameraBrain, CameraSnapshot, update_camera_brains},
    camera::VirtualCamera,
    messages::{CameraStateEntered, CameraStateExited},
    systems::{drive_camera_sequencers, instantiate_camera_sequences},
};

/// Adds camera sequencing to an app
#[derive(Default)]
pub struct CameraSequencerPlugin;

#[derive(Clone, Debug, Copy, PartialEq, Eq, Hash, SystemSet)]
pub enum CameraSequencerSet {
    /// Camera sequencers handle their requests and move the virtual cameras
    Sequence,
    /// Camera brains pick the live virtual camera and update the real cameras
    Brain,
}

impl Plugin for CameraSequencerPlugin {
    fn build(&self, app: &mut App) {
        self.register_assets(app);
        self.register_types(app);

        app.add_message::<CameraStateEntered>()
            .add_message::<CameraStateExited>();

        app.configure_sets(
            PostUpdate,
            (CameraSequencerSet::Sequence, CameraSequencerSet::Brain)
                .chain()
                .before(TransformSystems::Propagate),
        );

        app.add_systems(PreUpdate, instantiate_camera_sequences);
        app.add_systems(
            PostUpdate,
            (
                drive_camera_sequencers.in_set(CameraSequencerSet::Sequence),
                update_camera_brains.in_set(CameraSequencerSet::Brain),
            ),
        );
    }
}

impl CameraSequencerPlugin {
    /// Registers asset types and their loaders
    fn register_assets(&self, app: &mut App) {
        app.init_asset::<CameraSequence>()
            .init_asset_loader::<CameraSequenceLoader>();
    }

    fn register_types(&self, app: &mut App) {
        app //
            .register_type::<VirtualCamera>()
            .register_type::<CameraBrain>()
            .register_type::<CameraSnapshot>()
            .register_type::<CameraBlend>()
            .register_type::<CameraPose>()
            .register_type::<NoiseChannel>()
            .register_type::<NoiseProfile>()
            .register_type::<CameraStateKind>()
            .register_type::<CameraStateSettings>()
            .register_type::<ZoomDirection>()
            .register_type::<ZoomCurve>()
            .register_type::<CurveKey>()
            .register_type::<Easing>()
            .register_type::<WaypointPath>();
    }
}
