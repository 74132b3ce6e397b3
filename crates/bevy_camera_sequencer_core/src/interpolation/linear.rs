use bevy::prelude::*;

use crate::camera::CameraPose;

pub trait InterpolateLinear {
    fn interpolate_linear(&self, other: &Self, f: f32) -> Self;
}

impl InterpolateLinear for f32 {
    fn interpolate_linear(&self, other: &Self, f: f32) -> Self {
        self + (other - self) * f
    }
}

impl InterpolateLinear for Vec3 {
    fn interpolate_linear(&self, other: &Self, f: f32) -> Self {
        self.lerp(*other, f)
    }
}

impl InterpolateLinear for Quat {
    fn interpolate_linear(&self, other: &Self, f: f32) -> Self {
        self.slerp(*other, f)
    }
}

impl InterpolateLinear for CameraPose {
    fn interpolate_linear(&self, other: &Self, f: f32) -> Self {
        CameraPose {
            position: self.position.interpolate_linear(&other.position, f),
            rotation: self.rotation.interpolate_linear(&other.rotation, f),
        }
    }
}

/// Same as [`InterpolateLinear::interpolate_linear`], with the factor clamped to `[0, 1]`.
pub fn interpolate_clamped<T: InterpolateLinear>(from: &T, to: &T, f: f32) -> T {
    from.interpolate_linear(to, f.clamp(0., 1.))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_interpolation_does_not_overshoot() {
        assert_eq!(interpolate_clamped(&60., &30., 1.5), 30.);
        assert_eq!(interpolate_clamped(&60., &30., -0.5), 60.);
        assert_eq!(interpolate_clamped(&60., &30., 0.5), 45.);
    }

    #[test]
    fn pose_interpolation_blends_both_channels() {
        let from = CameraPose {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        };
        let to = CameraPose {
            position: Vec3::new(2., 0., 0.),
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
        };

        let half = from.interpolate_linear(&to, 0.5);

        assert!(half.position.abs_diff_eq(Vec3::new(1., 0., 0.), 1e-6));
        assert!(
            half.rotation
                .abs_diff_eq(Quat::from_rotation_y(std::f32::consts::FRAC_PI_4), 1e-5)
        );
    }
}
