use bevy::prelude::*;

/// Rotation of a camera facing `forward`, with +Y as up.
///
/// Cameras look down their local -Z axis. Returns `None` when `forward` has no usable direction.
pub fn look_rotation(forward: Vec3) -> Option<Quat> {
    let direction = Dir3::new(forward).ok()?;
    Some(Transform::IDENTITY.looking_to(direction, Dir3::Y).rotation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn looks_down_negative_z_by_default() {
        let rotation = look_rotation(Vec3::NEG_Z).unwrap();
        assert!(rotation.abs_diff_eq(Quat::IDENTITY, 1e-6));
    }

    #[test]
    fn forward_axis_matches_requested_direction() {
        let rotation = look_rotation(Vec3::new(3., 0., 0.)).unwrap();
        assert!((rotation * Vec3::NEG_Z).abs_diff_eq(Vec3::X, 1e-5));
    }

    #[test]
    fn zero_direction_has_no_rotation() {
        assert_eq!(look_rotation(Vec3::ZERO), None);
    }
}
