// Carry relationships: a box attached to a robot derives its position from
// the robot's transform instead of server-reported coordinates.

use crate::domain::geometry::Vec3;
use crate::domain::registry::EntityRegistry;
use crate::domain::tuning::SceneTuning;

/// Attaches the box to the robot. Returns false (and changes nothing) when
/// either entity is unknown; a grab naming an uncreated box is a silent no-op.
pub fn attach(
    registry: &mut EntityRegistry,
    box_id: u64,
    robot_id: u64,
    tuning: &SceneTuning,
) -> bool {
    let Some(robot_position) = registry.robot(robot_id).map(|r| r.position) else {
        return false;
    };
    let Some(entity) = registry.box_entity_mut(box_id) else {
        return false;
    };

    // Attaching implicitly breaks any prior carry relationship for this box.
    entity.carried_by = Some(robot_id);
    entity.position = carried_position(robot_position, tuning);
    true
}

/// Detaches and deactivates every box the robot currently carries, leaving
/// each at its last rendered position. This is the stack action's effect.
pub fn detach_all_from(registry: &mut EntityRegistry, robot_id: u64) -> usize {
    let mut detached = 0;
    for entity in registry.boxes_mut() {
        if entity.carried_by == Some(robot_id) {
            entity.carried_by = None;
            entity.active = false;
            detached += 1;
        }
    }
    detached
}

/// Moves every carried box to its robot's current position plus the fixed
/// vertical carry offset. Runs once per tick, after motion stepping.
pub fn sync_carried(registry: &mut EntityRegistry, tuning: &SceneTuning) {
    let robot_positions: Vec<(u64, Vec3)> =
        registry.robots().map(|r| (r.id, r.position)).collect();

    for entity in registry.boxes_mut() {
        let Some(robot_id) = entity.carried_by else {
            continue;
        };
        if let Some((_, position)) = robot_positions.iter().find(|(id, _)| *id == robot_id) {
            entity.position = carried_position(*position, tuning);
        }
    }
}

fn carried_position(robot_position: Vec3, tuning: &SceneTuning) -> Vec3 {
    robot_position + Vec3::new(0.0, tuning.carry_offset(), 0.0)
}
