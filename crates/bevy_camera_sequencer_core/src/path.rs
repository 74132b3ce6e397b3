use std::fmt::Debug;

use bevy::prelude::*;

/// A path a camera can travel, parametrised by distance along it
pub trait CameraPath: Send + Sync + Debug {
    fn position_at(&self, distance: f32) -> Vec3;

    /// Unit direction of travel at `distance`. May be zero on degenerate paths.
    fn tangent_at(&self, distance: f32) -> Vec3;

    fn path_length(&self) -> f32;

    fn waypoint_count(&self) -> usize;

    fn is_looped(&self) -> bool;
}

/// Piecewise linear path through a list of waypoints.
///
/// Distances past the ends are clamped on open paths and wrapped on looped ones. A looped path
/// has an extra segment from the last waypoint back to the first.
#[derive(Reflect, Debug, Clone, Default, PartialEq)]
pub struct WaypointPath {
    waypoints: Vec<Vec3>,
    looped: bool,
    /// Arc length at the end of each segment
    segment_ends: Vec<f32>,
}

impl WaypointPath {
    pub fn new(waypoints: Vec<Vec3>, looped: bool) -> Self {
        let mut path = Self {
            waypoints,
            looped,
            segment_ends: vec![],
        };
        path.segment_ends = path
            .segments()
            .scan(0., |total, (a, b)| {
                *total += a.distance(b);
                Some(*total)
            })
            .collect();
        path
    }

    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    fn segments(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        let closing = match (self.looped, self.waypoints.first(), self.waypoints.last()) {
            (true, Some(first), Some(last)) if self.waypoints.len() > 1 => Some((*last, *first)),
            _ => None,
        };
        self.waypoints
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .chain(closing)
    }

    fn normalize_distance(&self, distance: f32) -> f32 {
        let length = self.path_length();
        if self.looped && length > 0. {
            distance.rem_euclid(length)
        } else {
            distance.clamp(0., length)
        }
    }

    /// Segment containing `distance` together with the fraction travelled along it
    fn locate(&self, distance: f32) -> Option<((Vec3, Vec3), f32)> {
        let distance = self.normalize_distance(distance);
        let index = self
            .segment_ends
            .partition_point(|end| *end < distance)
            .min(self.segment_ends.len().checked_sub(1)?);
        let segment = self.segments().nth(index)?;
        let start = if index == 0 {
            0.
        } else {
            self.segment_ends[index - 1]
        };
        let span = self.segment_ends[index] - start;
        let fraction = if span > 0. {
            (distance - start) / span
        } else {
            0.
        };
        Some((segment, fraction))
    }
}

impl CameraPath for WaypointPath {
    fn position_at(&self, distance: f32) -> Vec3 {
        match self.locate(distance) {
            Some(((a, b), fraction)) => a.lerp(b, fraction),
            None => self.waypoints.first().copied().unwrap_or(Vec3::ZERO),
        }
    }

    fn tangent_at(&self, distance: f32) -> Vec3 {
        self.locate(distance)
            .map(|((a, b), _)| (b - a).normalize_or_zero())
            .unwrap_or(Vec3::ZERO)
    }

    fn path_length(&self) -> f32 {
        self.segment_ends.last().copied().unwrap_or(0.)
    }

    fn waypoint_count(&self) -> usize {
        self.waypoints.len()
    }

    fn is_looped(&self) -> bool {
        self.looped
    }
}
