pub(crate) mod process;

use std::sync::Arc;

use bevy::{ecs::entity::Entity, prelude::*};
use serde::{Deserialize, Serialize};

use self::process::{Aim, ClashZoom, PathTravel, Process, Progress, ShakeTimer, Steering, Tick};
use crate::{
    camera::{CameraRig, NoiseProfile, TargetCamera},
    errors::{SequencerError, SequencerResult},
    interpolation::{curve::ZoomCurve, look::look_rotation},
    path::CameraPath,
};

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CameraStateKind {
    #[default]
    Original,
    DollyPath,
    ClashZoom,
    Shake,
    AutoPan,
}

impl CameraStateKind {
    /// Whether starting this kind of state ends the one currently running
    pub fn is_exclusive(self) -> bool {
        matches!(
            self,
            CameraStateKind::DollyPath | CameraStateKind::ClashZoom | CameraStateKind::AutoPan
        )
    }
}

/// Side of the focus target the clash zoom approaches from
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ZoomDirection {
    #[default]
    North,
    South,
    East,
    West,
}

impl ZoomDirection {
    /// Where the camera stands before zooming. North and South keep the target's height and
    /// depth and sit on `x = 0`; East and West keep its width and height and sit on `z = 0`.
    pub fn approach_position(self, target: Vec3, distance: f32) -> Vec3 {
        match self {
            ZoomDirection::North => Vec3::new(0., target.y, target.z - distance),
            ZoomDirection::South => Vec3::new(0., target.y, target.z + distance),
            ZoomDirection::East => Vec3::new(target.x + distance, target.y, 0.),
            ZoomDirection::West => Vec3::new(target.x - distance, target.y, 0.),
        }
    }
}

/// Designer-facing parameters of a camera state.
///
/// Every kind shares the same set of fields and only reads the ones it needs.
#[derive(Reflect, Debug, Clone, PartialEq)]
pub struct CameraStateSettings {
    pub camera_speed: f32,
    pub duration: f32,
    pub focus_target: Option<Entity>,
    pub shake_amplitude: f32,
    pub shake_frequency: f32,
    pub noise_profile: Option<NoiseProfile>,
    pub cycles: u32,
    pub zoom_target_fov: f32,
    pub zoom_distance_from_target: f32,
    pub zoom_direction: ZoomDirection,
    pub zoom_curve: ZoomCurve,
}

impl Default for CameraStateSettings {
    fn default() -> Self {
        Self {
            camera_speed: 1.,
            duration: 1.,
            focus_target: None,
            shake_amplitude: 1.,
            shake_frequency: 1.,
            noise_profile: None,
            cycles: 1,
            zoom_target_fov: 30.,
            zoom_distance_from_target: 5.,
            zoom_direction: ZoomDirection::default(),
            zoom_curve: ZoomCurve::default(),
        }
    }
}

/// Result of advancing a camera state by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Outcome {
    Idle,
    Running,
    Completed,
}

/// A named camera behaviour owned by a [`StateMachine`](crate::state_machine::StateMachine)
#[derive(Debug, Clone)]
pub struct CameraState {
    name: String,
    kind: CameraStateKind,
    settings: CameraStateSettings,
    path: Option<Arc<dyn CameraPath>>,

    active: bool,
    target_camera: Option<Entity>,
    initial_fov: Option<f32>,
    process: Option<Process>,
}

impl CameraState {
    pub fn new(name: impl Into<String>, kind: CameraStateKind) -> Self {
        Self {
            name: name.into(),
            kind,
            settings: CameraStateSettings::default(),
            path: None,
            active: false,
            target_camera: None,
            initial_fov: None,
            process: None,
        }
    }

    pub fn with_settings(mut self, settings: CameraStateSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_path(self, path: impl CameraPath + 'static) -> Self {
        self.with_shared_path(Arc::new(path))
    }

    pub fn with_shared_path(mut self, path: Arc<dyn CameraPath>) -> Self {
        self.path = Some(path);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> CameraStateKind {
        self.kind
    }

    pub fn settings(&self) -> &CameraStateSettings {
        &self.settings
    }

    /// Changes to the settings apply the next time the state begins
    pub fn settings_mut(&mut self) -> &mut CameraStateSettings {
        &mut self.settings
    }

    pub fn path(&self) -> Option<&Arc<dyn CameraPath>> {
        self.path.as_ref()
    }

    pub fn set_path(&mut self, path: Option<Arc<dyn CameraPath>>) {
        self.path = path;
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether a time-driven process is still running for this state
    pub fn is_running(&self) -> bool {
        self.process.is_some()
    }

    /// Camera this state drove the last time it began
    pub fn target_camera(&self) -> Option<Entity> {
        self.target_camera
    }

    /// Checks that the state can begin on `camera` without touching anything
    pub(crate) fn validate<R: CameraRig>(
        &self,
        rig: &mut R,
        camera: Entity,
    ) -> SequencerResult<()> {
        match self.kind {
            CameraStateKind::Original => Ok(()),
            CameraStateKind::DollyPath => {
                let path = self.required_path()?;
                if path.waypoint_count() < 2 {
                    return Err(SequencerError::InsufficientWaypoints {
                        state: self.name.clone(),
                        found: path.waypoint_count(),
                    });
                }
                self.positive_speed()
            }
            CameraStateKind::ClashZoom => self.resolved_focus(rig).map(|_| ()),
            CameraStateKind::Shake => {
                let camera = rig
                    .camera_mut(camera)
                    .ok_or(SequencerError::MissingCamera(camera))?;
                match camera.noise_channel_mut() {
                    Some(_) => Ok(()),
                    None => Err(SequencerError::MissingNoiseChannel(self.name.clone())),
                }
            }
            CameraStateKind::AutoPan => {
                if !self.required_path()?.is_looped() {
                    return Err(SequencerError::PathNotLooped(self.name.clone()));
                }
                self.resolved_focus(rig)?;
                self.positive_speed()
            }
        }
    }

    fn required_path(&self) -> SequencerResult<&Arc<dyn CameraPath>> {
        self.path
            .as_ref()
            .ok_or_else(|| SequencerError::MissingPath(self.name.clone()))
    }

    fn required_focus(&self) -> SequencerResult<Entity> {
        self.settings
            .focus_target
            .ok_or_else(|| SequencerError::MissingFocusTarget(self.name.clone()))
    }

    /// A focus target the rig can place in the world
    fn resolved_focus<R: CameraRig>(&self, rig: &R) -> SequencerResult<Vec3> {
        let focus = self.required_focus()?;
        rig.focus_position(focus)
            .ok_or_else(|| SequencerError::MissingFocusTarget(self.name.clone()))
    }

    fn positive_speed(&self) -> SequencerResult<()> {
        if self.settings.camera_speed > 0. {
            Ok(())
        } else {
            Err(SequencerError::NonPositiveSpeed {
                state: self.name.clone(),
                speed: self.settings.camera_speed,
            })
        }
    }

    /// Marks the state active on `camera` and starts its process. Assumes [`Self::validate`]
    /// passed and that the machine already handled exclusivity.
    pub(crate) fn begin<R: CameraRig>(
        &mut self,
        camera: Entity,
        rig: &mut R,
    ) -> SequencerResult<()> {
        let focus_target = self.settings.focus_target;
        let focus_position = match self.kind {
            CameraStateKind::ClashZoom => Some(self.resolved_focus(rig)?),
            _ => None,
        };
        let target = rig
            .camera_mut(camera)
            .ok_or(SequencerError::MissingCamera(camera))?;

        self.active = true;
        self.target_camera = Some(camera);

        self.process = match self.kind {
            CameraStateKind::Original => None,
            CameraStateKind::DollyPath => {
                target.set_look_at(focus_target);
                let path = self.required_path()?.clone();
                let heading = look_rotation(path.tangent_at(0.));
                Some(Process::PathTravel(PathTravel::new(
                    path,
                    Steering::Dolly,
                    heading.map_or(Aim::Free, Aim::Fixed),
                    1,
                    self.settings.camera_speed,
                )))
            }
            CameraStateKind::ClashZoom => {
                let focus = self.required_focus()?;
                target.set_look_at(Some(focus));
                let initial_fov = target.field_of_view();
                self.initial_fov = Some(initial_fov);
                let approach = self.settings.zoom_direction.approach_position(
                    focus_position.unwrap_or_default(),
                    self.settings.zoom_distance_from_target,
                );
                Some(Process::ClashZoom(ClashZoom::new(
                    approach,
                    focus,
                    initial_fov,
                    self.settings.zoom_target_fov,
                    self.settings.duration,
                    self.settings.zoom_curve.clone(),
                )))
            }
            CameraStateKind::Shake => {
                if let Some(channel) = target.noise_channel_mut() {
                    channel.amplitude_gain = self.settings.shake_amplitude;
                    channel.frequency_gain = self.settings.shake_frequency;
                    channel.profile = self.settings.noise_profile.clone();
                }
                Some(Process::Shake(ShakeTimer::new(self.settings.duration)))
            }
            CameraStateKind::AutoPan => {
                let focus = self.required_focus()?;
                target.set_look_at(Some(focus));
                Some(Process::PathTravel(PathTravel::new(
                    self.required_path()?.clone(),
                    Steering::Pan {
                        camera_speed: self.settings.camera_speed,
                    },
                    Aim::Target(focus),
                    self.settings.cycles,
                    self.settings.camera_speed,
                )))
            }
        };
        Ok(())
    }

    pub(crate) fn step<R: CameraRig>(
        &mut self,
        rig: &mut R,
        delta: f32,
        switch_duration: f32,
    ) -> Outcome {
        let (Some(process), Some(camera)) = (&mut self.process, self.target_camera) else {
            return Outcome::Idle;
        };
        let mut tick = Tick {
            rig,
            camera,
            delta,
            switch_duration,
        };
        match process.step(&mut tick) {
            Progress::Running => Outcome::Running,
            Progress::Finished => {
                self.process = None;
                Outcome::Completed
            }
        }
    }

    /// Stops the running process and undoes what the state changed on its camera
    pub(crate) fn end<R: CameraRig>(&mut self, rig: &mut R) {
        self.process = None;
        let camera = self.target_camera.and_then(|camera| rig.camera_mut(camera));
        match self.kind {
            CameraStateKind::ClashZoom => {
                if let (Some(camera), Some(fov)) = (camera, self.initial_fov.take()) {
                    camera.set_field_of_view(fov);
                }
            }
            CameraStateKind::Shake => {
                if let Some(channel) = camera.and_then(|camera| camera.noise_channel_mut()) {
                    channel.clear();
                }
            }
            CameraStateKind::Original
            | CameraStateKind::DollyPath
            | CameraStateKind::AutoPan => {}
        }
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        camera::NoiseChannel,
        path::WaypointPath,
        testing::{TestCamera, TestRig, assert_approx, assert_vec_approx},
    };

    #[test]
    fn approach_positions_follow_the_fixed_lookup() {
        let target = Vec3::new(1., 2., 3.);
        assert_eq!(
            ZoomDirection::North.approach_position(target, 5.),
            Vec3::new(0., 2., -2.)
        );
        assert_eq!(
            ZoomDirection::South.approach_position(target, 5.),
            Vec3::new(0., 2., 8.)
        );
        assert_eq!(
            ZoomDirection::East.approach_position(target, 5.),
            Vec3::new(6., 2., 0.)
        );
        assert_eq!(
            ZoomDirection::West.approach_position(target, 5.),
            Vec3::new(-4., 2., 0.)
        );
    }

    #[test]
    fn dolly_needs_two_waypoints() {
        let mut rig = TestRig::default();
        let camera = rig.add_camera(TestCamera::default());
        let state = CameraState::new("intro", CameraStateKind::DollyPath)
            .with_path(WaypointPath::new(vec![Vec3::ZERO], false));
        assert_eq!(
            state.validate(&mut rig, camera),
            Err(SequencerError::InsufficientWaypoints {
                state: "intro".into(),
                found: 1
            })
        );

        let state = CameraState::new("intro", CameraStateKind::DollyPath);
        assert_eq!(
            state.validate(&mut rig, camera),
            Err(SequencerError::MissingPath("intro".into()))
        );
    }

    #[test]
    fn auto_pan_checks_loop_before_focus() {
        let mut rig = TestRig::default();
        let camera = rig.add_camera(TestCamera::default());
        let open = WaypointPath::new(vec![Vec3::ZERO, Vec3::X], false);
        let state = CameraState::new("pan", CameraStateKind::AutoPan).with_path(open);
        assert_eq!(
            state.validate(&mut rig, camera),
            Err(SequencerError::PathNotLooped("pan".into()))
        );

        let looped = WaypointPath::new(vec![Vec3::ZERO, Vec3::X, Vec3::Z], true);
        let state = CameraState::new("pan", CameraStateKind::AutoPan).with_path(looped);
        assert_eq!(
            state.validate(&mut rig, camera),
            Err(SequencerError::MissingFocusTarget("pan".into()))
        );
    }

    #[test]
    fn shake_needs_a_noise_channel() {
        let mut rig = TestRig::default();
        let camera = rig.add_camera(TestCamera {
            noise: None,
            ..default()
        });
        let state = CameraState::new("rumble", CameraStateKind::Shake);
        assert_eq!(
            state.validate(&mut rig, camera),
            Err(SequencerError::MissingNoiseChannel("rumble".into()))
        );
    }

    #[test]
    fn ending_a_clash_zoom_restores_the_field_of_view() {
        let mut rig = TestRig::default();
        let camera = rig.add_camera(TestCamera::default());
        let focus = rig.add_focus(Vec3::new(0., 0., 10.));
        let mut state = CameraState::new("clash", CameraStateKind::ClashZoom).with_settings(
            CameraStateSettings {
                focus_target: Some(focus),
                duration: 1.,
                ..default()
            },
        );
        state.begin(camera, &mut rig).unwrap();
        assert_eq!(rig.camera(camera).look_at, Some(focus));

        // Approach takes one step at a zero switch duration, then the zoom starts.
        state.step(&mut rig, 0.5, 0.);
        state.step(&mut rig, 0.5, 0.);
        assert_approx(rig.camera(camera).field_of_view, 45.);
        assert_vec_approx(rig.camera(camera).position, Vec3::new(0., 0., 5.));

        state.end(&mut rig);
        assert!(!state.is_active());
        assert!(!state.is_running());
        assert_approx(rig.camera(camera).field_of_view, 60.);
    }

    #[test]
    fn shake_sets_and_clears_the_noise_channel() {
        let mut rig = TestRig::default();
        let camera = rig.add_camera(TestCamera::default());
        let mut state = CameraState::new("rumble", CameraStateKind::Shake).with_settings(
            CameraStateSettings {
                duration: 1.,
                shake_amplitude: 2.,
                shake_frequency: 3.,
                noise_profile: Some(NoiseProfile::medium()),
                ..default()
            },
        );
        state.begin(camera, &mut rig).unwrap();
        let channel = rig.camera(camera).noise.clone().unwrap();
        assert_eq!(channel.amplitude_gain, 2.);
        assert_eq!(channel.frequency_gain, 3.);
        assert_eq!(channel.profile, Some(NoiseProfile::medium()));

        assert_eq!(state.step(&mut rig, 0.5, 0.5), Outcome::Running);
        assert_eq!(state.step(&mut rig, 0.5, 0.5), Outcome::Completed);
        state.end(&mut rig);
        assert!(rig.camera(camera).noise.as_ref().unwrap().is_silent());
        assert_eq!(rig.camera(camera).noise, Some(NoiseChannel::default()));
    }
}
