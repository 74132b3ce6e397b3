use bevy::math::Vec3;
use serde::{Deserialize, Serialize};

use crate::{
    camera::NoiseProfile,
    interpolation::curve::ZoomCurve,
    path::{CameraPath, WaypointPath},
    state::{CameraStateKind, CameraStateSettings, ZoomDirection},
    state_machine::DEFAULT_SWITCH_DURATION,
};

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CameraSequenceSerial {
    #[serde(default = "default_switch_state_duration")]
    pub switch_state_duration: f32,
    pub states: Vec<CameraStateSerial>,
}

fn default_switch_state_duration() -> f32 {
    DEFAULT_SWITCH_DURATION
}

/// One camera state as written in a sequence file. Fields a state kind doesn't read may be left
/// out; they take the same defaults as [`CameraStateSettings`].
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct CameraStateSerial {
    pub name: String,
    pub kind: CameraStateKind,
    pub camera_speed: f32,
    pub duration: f32,
    /// `Name` of the entity to focus on
    pub focus_target: Option<String>,
    pub shake_amplitude: f32,
    pub shake_frequency: f32,
    pub noise_profile: Option<NoiseProfileSerial>,
    pub cycles: u32,
    pub zoom_target_fov: f32,
    pub zoom_distance_from_target: f32,
    pub zoom_direction: ZoomDirection,
    pub zoom_curve: ZoomCurve,
    pub path: Option<WaypointPathSerial>,
}

impl Default for CameraStateSerial {
    fn default() -> Self {
        let settings = CameraStateSettings::default();
        Self {
            name: String::new(),
            kind: CameraStateKind::default(),
            camera_speed: settings.camera_speed,
            duration: settings.duration,
            focus_target: None,
            shake_amplitude: settings.shake_amplitude,
            shake_frequency: settings.shake_frequency,
            noise_profile: None,
            cycles: settings.cycles,
            zoom_target_fov: settings.zoom_target_fov,
            zoom_distance_from_target: settings.zoom_distance_from_target,
            zoom_direction: settings.zoom_direction,
            zoom_curve: settings.zoom_curve,
            path: None,
        }
    }
}

impl CameraStateSerial {
    /// Settings without a focus target, which is only known once names are resolved
    pub fn settings(&self) -> CameraStateSettings {
        CameraStateSettings {
            camera_speed: self.camera_speed,
            duration: self.duration,
            focus_target: None,
            shake_amplitude: self.shake_amplitude,
            shake_frequency: self.shake_frequency,
            noise_profile: self.noise_profile.as_ref().map(NoiseProfile::from),
            cycles: self.cycles,
            zoom_target_fov: self.zoom_target_fov,
            zoom_distance_from_target: self.zoom_distance_from_target,
            zoom_direction: self.zoom_direction,
            zoom_curve: self.zoom_curve.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct WaypointPathSerial {
    pub waypoints: Vec<[f32; 3]>,
    #[serde(default)]
    pub looped: bool,
}

impl From<&WaypointPathSerial> for WaypointPath {
    fn from(value: &WaypointPathSerial) -> Self {
        WaypointPath::new(
            value.waypoints.iter().copied().map(Vec3::from_array).collect(),
            value.looped,
        )
    }
}

impl From<&WaypointPath> for WaypointPathSerial {
    fn from(value: &WaypointPath) -> Self {
        Self {
            waypoints: value.waypoints().iter().map(Vec3::to_array).collect(),
            looped: value.is_looped(),
        }
    }
}

/// Either one of the built-in noise presets or a fully specified profile
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum NoiseProfileSerial {
    Light,
    Medium,
    Heavy,
    Custom {
        name: String,
        position_amplitude: [f32; 3],
        rotation_amplitude: [f32; 3],
        frequency: f32,
    },
}

impl From<&NoiseProfileSerial> for NoiseProfile {
    fn from(value: &NoiseProfileSerial) -> Self {
        match value {
            NoiseProfileSerial::Light => NoiseProfile::light(),
            NoiseProfileSerial::Medium => NoiseProfile::medium(),
            NoiseProfileSerial::Heavy => NoiseProfile::heavy(),
            NoiseProfileSerial::Custom {
                name,
                position_amplitude,
                rotation_amplitude,
                frequency,
            } => NoiseProfile {
                name: name.clone(),
                position_amplitude: Vec3::from_array(*position_amplitude),
                rotation_amplitude: Vec3::from_array(*rotation_amplitude),
                frequency: *frequency,
            },
        }
    }
}

impl From<&NoiseProfile> for NoiseProfileSerial {
    fn from(value: &NoiseProfile) -> Self {
        Self::Custom {
            name: value.name.clone(),
            position_amplitude: value.position_amplitude.to_array(),
            rotation_amplitude: value.rotation_amplitude.to_array(),
            frequency: value.frequency,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::CameraStateKind;

    #[test]
    fn sequences_written_back_to_ron_read_the_same() {
        let path = WaypointPath::new(vec![Vec3::ZERO, Vec3::X, Vec3::Z], true);
        let profile = NoiseProfile {
            name: "handheld".into(),
            ..NoiseProfile::light()
        };
        let sequence = CameraSequenceSerial {
            switch_state_duration: 0.25,
            states: vec![
                CameraStateSerial {
                    name: "pan".into(),
                    kind: CameraStateKind::AutoPan,
                    focus_target: Some("Boss".into()),
                    cycles: 3,
                    path: Some(WaypointPathSerial::from(&path)),
                    ..Default::default()
                },
                CameraStateSerial {
                    name: "rumble".into(),
                    kind: CameraStateKind::Shake,
                    noise_profile: Some(NoiseProfileSerial::from(&profile)),
                    ..Default::default()
                },
            ],
        };

        let text = ron::ser::to_string(&sequence).unwrap();
        let read: CameraSequenceSerial = ron::de::from_str(&text).unwrap();
        assert_eq!(read, sequence);

        let looped = WaypointPath::from(read.states[0].path.as_ref().unwrap());
        assert_eq!(looped.waypoints(), path.waypoints());
        assert!(looped.is_looped());
        assert_eq!(read.states[1].settings().noise_profile, Some(profile));
    }
}
