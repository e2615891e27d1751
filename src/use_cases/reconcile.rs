// Reconciliation engine: folds one parsed snapshot into the entity registry.

use std::collections::HashSet;
use std::time::Instant;

use rand::Rng;

use crate::domain::entities::{BoxEntity, BoxRecord, RobotAction, RobotActionRecord, RobotEntity, Snapshot};
use crate::domain::geometry::Vec3;
use crate::domain::registry::EntityRegistry;
use crate::domain::tuning::{MotionTuning, SceneTuning};
use crate::systems::steering;
use crate::use_cases::{attachment, motion};

/// Applies a snapshot in three passes: boxes, robot actions, then
/// deactivation of boxes absent from the snapshot's combined active-id set.
///
/// The box pass runs first so a grab in the robot pass can find boxes that
/// were created this cycle.
pub fn reconcile(
    registry: &mut EntityRegistry,
    snapshot: &Snapshot,
    scene: &SceneTuning,
    motion_tuning: &MotionTuning,
    rng: &mut impl Rng,
    now: Instant,
) {
    let mut active_box_ids = HashSet::new();

    apply_box_positions(registry, &snapshot.boxes, &mut active_box_ids, scene);
    apply_robot_actions(
        registry,
        &snapshot.robot_actions,
        &mut active_box_ids,
        scene,
        motion_tuning,
        rng,
        now,
    );
    deactivate_missing_boxes(registry, &active_box_ids);
}

fn apply_box_positions(
    registry: &mut EntityRegistry,
    records: &[BoxRecord],
    active_box_ids: &mut HashSet<u64>,
    scene: &SceneTuning,
) {
    for record in records {
        active_box_ids.insert(record.id);

        let entity = registry.insert_box(BoxEntity::new(record.id, record.position));
        // Undo any deactivation from a previous cycle.
        entity.active = true;

        // A carried box's position belongs to its robot, not the server's
        // last reported at-rest coordinates.
        if entity.is_carried() {
            continue;
        }

        entity.num_boxes = record.num_boxes;
        entity.scale_y = record.num_boxes as f32 * scene.box_height;
        entity.position = record.position;
        if record.stacked {
            // Stacked boxes render as one column centered on the ground.
            entity.position.y = entity.scale_y / 2.0;
        }
    }
}

fn apply_robot_actions(
    registry: &mut EntityRegistry,
    records: &[RobotActionRecord],
    active_box_ids: &mut HashSet<u64>,
    scene: &SceneTuning,
    motion_tuning: &MotionTuning,
    rng: &mut impl Rng,
    now: Instant,
) {
    for record in records {
        // A carried box can drop out of box_positions entirely; referencing it
        // here keeps it from being deactivated below.
        if let Some(box_id) = record.box_id {
            active_box_ids.insert(box_id);
        }

        if !registry.contains_robot(record.id) {
            let velocity = steering::random_velocity(rng, motion_tuning);
            registry.insert_robot(RobotEntity::new(
                record.id,
                record.position,
                record.direction.normalized(),
                velocity,
            ));
        }

        if let Some(robot) = registry.robot_mut(record.id) {
            // Facing snaps to the reported direction; only position interpolates.
            let facing = record.direction.normalized();
            if facing != Vec3::ZERO {
                robot.facing = facing;
            }
            motion::issue_target(robot, record.position, now);
        }

        match record.action {
            RobotAction::Grab => {
                if let Some(box_id) = record.box_id {
                    // Unknown box ids are tolerated; the box may simply not
                    // have appeared in any box pass yet.
                    attachment::attach(registry, box_id, record.id, scene);
                }
            }
            RobotAction::Stack => {
                attachment::detach_all_from(registry, record.id);
            }
            // Position and facing were already applied above.
            RobotAction::Move | RobotAction::TurnRandom | RobotAction::Other => {}
        }
    }
}

fn deactivate_missing_boxes(registry: &mut EntityRegistry, active_box_ids: &HashSet<u64>) {
    for entity in registry.boxes_mut() {
        if !active_box_ids.contains(&entity.id) {
            entity.active = false;
            entity.carried_by = None;
        }
    }
}
