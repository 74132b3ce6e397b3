use bevy::{
    math::curve::{Curve, easing::EaseFunction},
    reflect::Reflect,
};
use serde::{Deserialize, Serialize};

/// Named easing presets a zoom curve can use
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Easing {
    #[default]
    Linear,
    QuadraticIn,
    QuadraticOut,
    QuadraticInOut,
    CubicIn,
    CubicOut,
    CubicInOut,
    SineIn,
    SineOut,
    SineInOut,
}

impl From<Easing> for EaseFunction {
    fn from(value: Easing) -> Self {
        match value {
            Easing::Linear => EaseFunction::Linear,
            Easing::QuadraticIn => EaseFunction::QuadraticIn,
            Easing::QuadraticOut => EaseFunction::QuadraticOut,
            Easing::QuadraticInOut => EaseFunction::QuadraticInOut,
            Easing::CubicIn => EaseFunction::CubicIn,
            Easing::CubicOut => EaseFunction::CubicOut,
            Easing::CubicInOut => EaseFunction::CubicInOut,
            Easing::SineIn => EaseFunction::SineIn,
            Easing::SineOut => EaseFunction::SineOut,
            Easing::SineInOut => EaseFunction::SineInOut,
        }
    }
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub time: f32,
    pub value: f32,
}

impl CurveKey {
    pub fn new(time: f32, value: f32) -> Self {
        Self { time, value }
    }
}

/// Maps normalized time to a blend weight.
///
/// Keyframe curves interpolate linearly between keys and hold the first and last value outside
/// of the keyed range. A curve with no keys evaluates to zero. Keys are kept sorted by time
/// when built with [`ZoomCurve::from_keys`] or deserialized.
#[derive(Reflect, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "ZoomCurveSerial", into = "ZoomCurveSerial")]
pub enum ZoomCurve {
    Ease(Easing),
    Keyframes(Vec<CurveKey>),
}

#[derive(Serialize, Deserialize)]
#[serde(rename = "ZoomCurve")]
enum ZoomCurveSerial {
    Ease(Easing),
    Keyframes(Vec<CurveKey>),
}

impl From<ZoomCurveSerial> for ZoomCurve {
    fn from(value: ZoomCurveSerial) -> Self {
        match value {
            ZoomCurveSerial::Ease(easing) => Self::Ease(easing),
            ZoomCurveSerial::Keyframes(keys) => Self::from_keys(keys),
        }
    }
}

impl From<ZoomCurve> for ZoomCurveSerial {
    fn from(value: ZoomCurve) -> Self {
        match value {
            ZoomCurve::Ease(easing) => Self::Ease(easing),
            ZoomCurve::Keyframes(keys) => Self::Keyframes(keys),
        }
    }
}

impl Default for ZoomCurve {
    fn default() -> Self {
        Self::Ease(Easing::Linear)
    }
}

impl ZoomCurve {
    /// Builds a keyframe curve, sorting the keys by time
    pub fn from_keys(mut keys: Vec<CurveKey>) -> Self {
        keys.sort_by(|a, b| a.time.total_cmp(&b.time));
        Self::Keyframes(keys)
    }

    pub fn evaluate(&self, t: f32) -> f32 {
        let t = t.clamp(0., 1.);
        match self {
            ZoomCurve::Ease(easing) => EaseFunction::from(*easing).sample_clamped(t),
            ZoomCurve::Keyframes(keys) => sample_keys(keys, t),
        }
    }
}

fn sample_keys(keys: &[CurveKey], t: f32) -> f32 {
    let (Some(first), Some(last)) = (keys.first(), keys.last()) else {
        return 0.;
    };
    if t <= first.time {
        return first.value;
    }
    if t >= last.time {
        return last.value;
    }

    let next = keys.partition_point(|key| key.time <= t);
    let (a, b) = (keys[next - 1], keys[next]);
    let span = b.time - a.time;
    if span <= f32::EPSILON {
        return b.value;
    }
    a.value + (b.value - a.value) * ((t - a.time) / span)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_presets_hit_endpoints() {
        for easing in [Easing::Linear, Easing::QuadraticInOut, Easing::SineIn] {
            let curve = ZoomCurve::Ease(easing);
            assert!(curve.evaluate(0.).abs() < 1e-6);
            assert!((curve.evaluate(1.) - 1.).abs() < 1e-6);
        }
    }

    #[test]
    fn evaluation_clamps_input() {
        let curve = ZoomCurve::default();
        assert_eq!(curve.evaluate(-2.), 0.);
        assert_eq!(curve.evaluate(3.), 1.);
    }

    #[test]
    fn keyframes_interpolate_between_neighbours() {
        let curve = ZoomCurve::from_keys(vec![
            CurveKey::new(1., 1.),
            CurveKey::new(0., 0.),
            CurveKey::new(0.5, 0.8),
        ]);

        assert!((curve.evaluate(0.25) - 0.4).abs() < 1e-6);
        assert!((curve.evaluate(0.75) - 0.9).abs() < 1e-6);
        assert_eq!(curve.evaluate(0.5), 0.8);
    }

    #[test]
    fn keyframes_hold_outside_range() {
        let curve = ZoomCurve::from_keys(vec![CurveKey::new(0.2, 0.3), CurveKey::new(0.6, 0.9)]);
        assert_eq!(curve.evaluate(0.1), 0.3);
        assert_eq!(curve.evaluate(0.9), 0.9);
    }

    #[test]
    fn deserialized_keyframes_are_sorted() {
        let curve: ZoomCurve =
            ron::de::from_str("Keyframes([(time: 1.0, value: 1.0), (time: 0.0, value: 0.0)])")
                .unwrap();
        assert_eq!(
            curve,
            ZoomCurve::Keyframes(vec![CurveKey::new(0., 0.), CurveKey::new(1., 1.)])
        );
        assert!((curve.evaluate(0.5) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn empty_curve_is_zero() {
        assert_eq!(ZoomCurve::Keyframes(vec![]).evaluate(0.7), 0.);
    }
}
