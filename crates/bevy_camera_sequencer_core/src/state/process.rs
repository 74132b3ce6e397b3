//! Time-driven camera processes.
//!
//! Each process is a small state machine advanced once per frame. A step runs each loop body at
//! most once and then yields. When a phase runs out, the next phase starts within the same step.

use std::sync::Arc;

use bevy::{ecs::entity::Entity, log::warn, prelude::*};

use crate::{
    camera::{CameraPose, CameraRig, TargetCamera},
    interpolation::{curve::ZoomCurve, linear::interpolate_clamped, look::look_rotation},
    path::CameraPath,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Progress {
    Running,
    Finished,
}

/// Everything a process sees during one step
pub(crate) struct Tick<'a, R> {
    pub rig: &'a mut R,
    pub camera: Entity,
    pub delta: f32,
    pub switch_duration: f32,
}

/// Waits a fixed amount of time. Always yields at least once.
#[derive(Debug, Clone)]
pub(crate) struct Hold {
    remaining: f32,
    armed: bool,
}

impl Hold {
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration,
            armed: false,
        }
    }

    pub fn step(&mut self, delta: f32) -> Progress {
        if !self.armed {
            self.armed = true;
            return Progress::Running;
        }
        self.remaining -= delta;
        if self.remaining > 0. {
            Progress::Running
        } else {
            Progress::Finished
        }
    }
}

/// Where the camera faces while it moves into place
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Aim {
    /// Keep facing a focus target
    Target(Entity),
    /// Turn toward a fixed rotation
    Fixed(Quat),
    Free,
}

/// Moves the camera from wherever it is to a destination over the switch duration
#[derive(Debug, Clone)]
pub(crate) struct SmoothMove {
    destination: Vec3,
    aim: Aim,
    start: Option<CameraPose>,
    elapsed: f32,
}

impl SmoothMove {
    pub fn new(destination: Vec3, aim: Aim) -> Self {
        Self {
            destination,
            aim,
            start: None,
            elapsed: 0.,
        }
    }

    pub fn step<R: CameraRig>(&mut self, tick: &mut Tick<R>) -> Progress {
        let focus = match self.aim {
            Aim::Target(target) => tick.rig.focus_position(target),
            _ => None,
        };
        let Some(camera) = tick.rig.camera_mut(tick.camera) else {
            return Progress::Finished;
        };
        let start = *self.start.get_or_insert_with(|| camera.pose());

        if self.elapsed < tick.switch_duration {
            self.elapsed += tick.delta;
            let t = self.elapsed / tick.switch_duration;

            camera.set_position(interpolate_clamped(&start.position, &self.destination, t));
            let aim_rotation = match (self.aim, focus) {
                (Aim::Target(_), Some(focus)) => look_rotation(focus - camera.position()),
                (Aim::Fixed(rotation), _) => Some(rotation),
                _ => None,
            };
            if let Some(rotation) = aim_rotation {
                camera.set_rotation(interpolate_clamped(&start.rotation, &rotation, t));
            }
            return Progress::Running;
        }

        camera.set_position(self.destination);
        let final_rotation = match (self.aim, focus) {
            (Aim::Target(_), Some(focus)) => look_rotation(focus - self.destination),
            (Aim::Fixed(rotation), _) => Some(rotation),
            _ => None,
        };
        if let Some(rotation) = final_rotation {
            camera.set_rotation(rotation);
        }
        Progress::Finished
    }
}

/// How the camera is oriented while it travels along a path
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Steering {
    /// Face the camera's look-at target if it has one, else face along the path
    Dolly,
    /// Turn toward the look-at target at a rate scaled by camera speed
    Pan { camera_speed: f32 },
}

/// Repeated laps along a path at constant speed
#[derive(Debug, Clone)]
pub(crate) struct Traversal {
    cycles: u32,
    current_cycle: u32,
    elapsed: f32,
    cycle_duration: f32,
}

impl Traversal {
    pub fn new(cycles: u32, cycle_duration: f32) -> Self {
        Self {
            cycles,
            current_cycle: 0,
            elapsed: 0.,
            cycle_duration,
        }
    }

    /// Returns the distance along the path for this step, or `None` once every lap is done
    pub fn advance(&mut self, delta: f32, path_length: f32) -> Option<f32> {
        while self.current_cycle < self.cycles {
            if self.elapsed < self.cycle_duration {
                self.elapsed += delta;
                return Some(self.elapsed / self.cycle_duration * path_length);
            }
            self.current_cycle += 1;
            self.elapsed = 0.;
        }
        None
    }
}

#[derive(Debug, Clone)]
pub(crate) enum TravelPhase {
    Approach(SmoothMove),
    Traverse(Traversal),
}

/// Moves onto a path and travels it. Drives both the dolly path and the auto pan states.
#[derive(Debug, Clone)]
pub(crate) struct PathTravel {
    path: Arc<dyn CameraPath>,
    steering: Steering,
    cycles: u32,
    cycle_duration: f32,
    phase: TravelPhase,
}

impl PathTravel {
    pub fn new(
        path: Arc<dyn CameraPath>,
        steering: Steering,
        approach: Aim,
        cycles: u32,
        camera_speed: f32,
    ) -> Self {
        let destination = path.position_at(0.);
        let cycle_duration = path.path_length() / camera_speed;
        Self {
            path,
            steering,
            cycles,
            cycle_duration,
            phase: TravelPhase::Approach(SmoothMove::new(destination, approach)),
        }
    }

    pub fn step<R: CameraRig>(&mut self, tick: &mut Tick<R>) -> Progress {
        loop {
            match &mut self.phase {
                TravelPhase::Approach(approach) => {
                    if approach.step(tick) == Progress::Running {
                        return Progress::Running;
                    }
                    self.phase =
                        TravelPhase::Traverse(Traversal::new(self.cycles, self.cycle_duration));
                }
                TravelPhase::Traverse(traversal) => {
                    let Some(distance) = traversal.advance(tick.delta, self.path.path_length())
                    else {
                        return Progress::Finished;
                    };
                    self.place(tick, distance);
                    return Progress::Running;
                }
            }
        }
    }

    fn place<R: CameraRig>(&self, tick: &mut Tick<R>, distance: f32) {
        let position = self.path.position_at(distance);
        let focus = tick
            .rig
            .camera_mut(tick.camera)
            .and_then(|camera| camera.look_at())
            .and_then(|target| tick.rig.focus_position(target));
        let Some(camera) = tick.rig.camera_mut(tick.camera) else {
            return;
        };
        camera.set_position(position);

        match self.steering {
            Steering::Dolly => {
                let heading = match focus {
                    Some(focus) => look_rotation(focus - position),
                    None => look_rotation(self.path.tangent_at(distance)),
                };
                if let Some(rotation) = heading {
                    camera.set_rotation(rotation);
                }
            }
            Steering::Pan { camera_speed } => {
                if let Some(rotation) = focus.and_then(|focus| look_rotation(focus - position)) {
                    let rate = tick.delta * camera_speed;
                    camera.set_rotation(interpolate_clamped(&camera.rotation(), &rotation, rate));
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum ZoomPhase {
    Approach(SmoothMove),
    Zoom { elapsed: f32, started: bool },
    Hold(Hold),
}

/// Moves to the approach position, eases the field of view, then holds
#[derive(Debug, Clone)]
pub(crate) struct ClashZoom {
    initial_fov: f32,
    target_fov: f32,
    duration: f32,
    curve: ZoomCurve,
    phase: ZoomPhase,
}

impl ClashZoom {
    pub fn new(
        approach: Vec3,
        target: Entity,
        initial_fov: f32,
        target_fov: f32,
        duration: f32,
        curve: ZoomCurve,
    ) -> Self {
        Self {
            initial_fov,
            target_fov,
            duration,
            curve,
            phase: ZoomPhase::Approach(SmoothMove::new(approach, Aim::Target(target))),
        }
    }

    pub fn step<R: CameraRig>(&mut self, tick: &mut Tick<R>) -> Progress {
        loop {
            match &mut self.phase {
                ZoomPhase::Approach(approach) => {
                    if approach.step(tick) == Progress::Running {
                        return Progress::Running;
                    }
                    self.phase = ZoomPhase::Zoom {
                        elapsed: 0.,
                        started: false,
                    };
                }
                ZoomPhase::Zoom { elapsed, started } => {
                    if *started {
                        *elapsed += tick.delta;
                    }
                    *started = true;

                    let Some(camera) = tick.rig.camera_mut(tick.camera) else {
                        return Progress::Finished;
                    };
                    if *elapsed < self.duration {
                        let weight = self.curve.evaluate(*elapsed / self.duration);
                        camera.set_field_of_view(interpolate_clamped(
                            &self.initial_fov,
                            &self.target_fov,
                            weight,
                        ));
                        return Progress::Running;
                    }
                    camera.set_field_of_view(self.target_fov);
                    // The zoomed-in framing is held for another full duration.
                    self.phase = ZoomPhase::Hold(Hold::new(self.duration));
                }
                ZoomPhase::Hold(hold) => return hold.step(tick.delta),
            }
        }
    }
}

/// Keeps a shake running for its duration
#[derive(Debug, Clone)]
pub(crate) struct ShakeTimer {
    elapsed: f32,
    duration: f32,
}

impl ShakeTimer {
    pub fn new(duration: f32) -> Self {
        Self {
            elapsed: 0.,
            duration,
        }
    }

    pub fn step(&mut self, delta: f32) -> Progress {
        self.elapsed += delta;
        if self.elapsed < self.duration {
            Progress::Running
        } else {
            Progress::Finished
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Process {
    PathTravel(PathTravel),
    ClashZoom(ClashZoom),
    Shake(ShakeTimer),
}

impl Process {
    pub fn step<R: CameraRig>(&mut self, tick: &mut Tick<R>) -> Progress {
        if tick.rig.camera_mut(tick.camera).is_none() {
            warn!(
                "Camera {:?} disappeared while a camera state was running",
                tick.camera
            );
            return Progress::Finished;
        }
        match self {
            Process::PathTravel(travel) => travel.step(tick),
            Process::ClashZoom(zoom) => zoom.step(tick),
            Process::Shake(timer) => timer.step(tick.delta),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hold_yields_before_counting() {
        let mut hold = Hold::new(1.);
        assert_eq!(hold.step(5.), Progress::Running);
        assert_eq!(hold.step(0.5), Progress::Running);
        assert_eq!(hold.step(0.5), Progress::Finished);
    }

    #[test]
    fn zero_hold_still_yields_once() {
        let mut hold = Hold::new(0.);
        assert_eq!(hold.step(0.1), Progress::Running);
        assert_eq!(hold.step(0.1), Progress::Finished);
    }

    #[test]
    fn traversal_runs_each_lap_to_its_end() {
        let mut traversal = Traversal::new(2, 1.);
        let distances: Vec<_> = std::iter::from_fn(|| traversal.advance(0.5, 10.)).collect();
        assert_eq!(distances, vec![5., 10., 5., 10.]);
    }

    #[test]
    fn traversal_without_cycles_finishes_immediately() {
        let mut traversal = Traversal::new(0, 1.);
        assert_eq!(traversal.advance(0.5, 10.), None);
    }

    #[test]
    fn shake_timer_stops_at_duration() {
        let mut timer = ShakeTimer::new(1.);
        assert_eq!(timer.step(0.5), Progress::Running);
        assert_eq!(timer.step(0.5), Progress::Finished);
    }
}
