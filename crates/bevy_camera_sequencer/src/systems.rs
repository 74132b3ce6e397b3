use bevy::prelude::*;
use bevy_camera_sequencer_core::{sequence::CameraSequence, state_machine::NotificationKind};

use crate::{
    messages::{CameraStateEntered, CameraStateExited},
    rig::WorldCameraRig,
    sequencer::{CameraSequenceFailed, CameraSequenceSource, CameraSequencer},
};

/// Advances every [`CameraSequencer`] and writes its lifecycle messages.
///
/// Exclusive because state machines spawn and despawn behaviour cameras as they go.
pub fn drive_camera_sequencers(world: &mut World) {
    let delta = world.resource::<Time>().delta_secs();
    let sequencers: Vec<Entity> = world
        .query_filtered::<Entity, With<CameraSequencer>>()
        .iter(world)
        .collect();

    for entity in sequencers {
        let Some(mut sequencer) = world.entity_mut(entity).take::<CameraSequencer>() else {
            continue;
        };
        let notifications = sequencer.process(delta, &mut WorldCameraRig::new(world));
        world.entity_mut(entity).insert(sequencer);

        for notification in notifications {
            let state = notification.state;
            match notification.kind {
                NotificationKind::Entered => {
                    world.write_message(CameraStateEntered {
                        sequencer: entity,
                        state,
                    });
                }
                NotificationKind::Exited => {
                    world.write_message(CameraStateExited {
                        sequencer: entity,
                        state,
                    });
                }
            }
        }
    }
}

pub fn instantiate_camera_sequences(
    mut commands: Commands,
    sources: Query<
        (Entity, &CameraSequenceSource),
        (Without<CameraSequencer>, Without<CameraSequenceFailed>),
    >,
    sequences: Res<Assets<CameraSequence>>,
    names: Query<(Entity, &Name)>,
) {
    for (entity, source) in &sources {
        let Some(sequence) = sequences.get(&source.sequence) else {
            continue;
        };
        let resolve = |target: &str| {
            names
                .iter()
                .find(|(_, name)| name.as_str() == target)
                .map(|(entity, _)| entity)
        };

        match sequence.instantiate(source.original_camera, source.brain, resolve) {
            Ok(machine) => {
                commands.entity(entity).insert(CameraSequencer::new(machine));
            }
            Err(error) => {
                warn!("Could not instantiate camera sequence on {entity:?}: {error}");
                commands.entity(entity).insert(CameraSequenceFailed);
            }
        }
    }
}
