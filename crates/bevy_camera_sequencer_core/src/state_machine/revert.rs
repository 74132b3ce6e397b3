use bevy::ecs::entity::Entity;

use crate::{
    camera::BlendSignal,
    state::process::{Hold, Progress},
};

/// Time given to the camera brain to notice the priority change before the blend is polled
pub const BLEND_SETTLE_TIME: f32 = 0.1;

/// Waits for the camera brain to finish blending back to the original camera
#[derive(Debug, Clone)]
pub(crate) enum RevertWatcher {
    Settling(Hold),
    Polling,
}

impl RevertWatcher {
    pub fn new() -> Self {
        RevertWatcher::Settling(Hold::new(BLEND_SETTLE_TIME))
    }

    pub fn step(&mut self, delta: f32, signal: &impl BlendSignal, brain: Entity) -> Progress {
        loop {
            match self {
                RevertWatcher::Settling(hold) => {
                    if hold.step(delta) == Progress::Running {
                        return Progress::Running;
                    }
                    *self = RevertWatcher::Polling;
                }
                RevertWatcher::Polling => {
                    return if signal.is_blend_in_progress(brain) {
                        Progress::Running
                    } else {
                        Progress::Finished
                    };
                }
            }
        }
    }
}
