// The entity registry owns all locally tracked robots and boxes.

use std::collections::HashMap;

use crate::domain::entities::{BoxEntity, RobotEntity};
use crate::domain::geometry::{self, Vec3};
use crate::domain::ports::ObstacleQuery;

// Boxes render with a unit footprint; only the vertical scale varies.
const BOX_HALF_EXTENT: f32 = 0.5;

/// Authoritative mapping from stable server ids to local entity state.
///
/// Robot and box ids are independent namespaces. The registry is mutated only
/// by reconciliation and by the scene loop's motion ticks, never concurrently.
#[derive(Debug, Default)]
pub struct EntityRegistry {
    robots: HashMap<u64, RobotEntity>,
    boxes: HashMap<u64, BoxEntity>,
}

impl EntityRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn robot(&self, id: u64) -> Option<&RobotEntity> {
        self.robots.get(&id)
    }

    pub fn robot_mut(&mut self, id: u64) -> Option<&mut RobotEntity> {
        self.robots.get_mut(&id)
    }

    pub fn insert_robot(&mut self, robot: RobotEntity) -> &mut RobotEntity {
        self.robots.entry(robot.id).or_insert(robot)
    }

    pub fn contains_robot(&self, id: u64) -> bool {
        self.robots.contains_key(&id)
    }

    pub fn robots(&self) -> impl Iterator<Item = &RobotEntity> {
        self.robots.values()
    }

    pub fn robots_mut(&mut self) -> impl Iterator<Item = &mut RobotEntity> {
        self.robots.values_mut()
    }

    pub fn box_entity(&self, id: u64) -> Option<&BoxEntity> {
        self.boxes.get(&id)
    }

    pub fn box_entity_mut(&mut self, id: u64) -> Option<&mut BoxEntity> {
        self.boxes.get_mut(&id)
    }

    pub fn insert_box(&mut self, entity: BoxEntity) -> &mut BoxEntity {
        self.boxes.entry(entity.id).or_insert(entity)
    }

    pub fn boxes(&self) -> impl Iterator<Item = &BoxEntity> {
        self.boxes.values()
    }

    pub fn boxes_mut(&mut self) -> impl Iterator<Item = &mut BoxEntity> {
        self.boxes.values_mut()
    }

    /// Captures the obstacle set for one motion tick.
    ///
    /// Carried boxes move with their robots and inactive boxes are hidden, so
    /// neither blocks robot movement.
    pub fn obstacle_snapshot(&self) -> BoxObstacles {
        let footprints = self
            .boxes
            .values()
            .filter(|b| b.active && !b.is_carried())
            .map(|b| (b.id, b.position))
            .collect();
        BoxObstacles { footprints }
    }
}

/// Immutable bounding-volume view of box obstacles, valid for one tick.
#[derive(Debug, Clone)]
pub struct BoxObstacles {
    footprints: Vec<(u64, Vec3)>,
}

impl ObstacleQuery for BoxObstacles {
    fn first_box_hit(&self, from: Vec3, to: Vec3) -> Option<u64> {
        self.footprints
            .iter()
            .find(|(_, center)| {
                geometry::segment_intersects_rect_xz(
                    from,
                    to,
                    *center,
                    BOX_HALF_EXTENT,
                    BOX_HALF_EXTENT,
                )
            })
            .map(|(id, _)| *id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn obstacle_snapshot_skips_carried_and_inactive_boxes() {
        let mut registry = EntityRegistry::new();
        registry.insert_box(BoxEntity::new(1, Vec3::ground(0.0, 0.0)));

        let carried = registry.insert_box(BoxEntity::new(2, Vec3::ground(5.0, 0.0)));
        carried.carried_by = Some(7);

        let inactive = registry.insert_box(BoxEntity::new(3, Vec3::ground(-5.0, 0.0)));
        inactive.active = false;

        let obstacles = registry.obstacle_snapshot();

        let from = Vec3::ground(-10.0, 0.0);
        let to = Vec3::ground(10.0, 0.0);
        // Only box 1 remains in the obstacle set on that line.
        assert_eq!(obstacles.first_box_hit(from, to), Some(1));
        assert_eq!(
            obstacles.first_box_hit(Vec3::ground(4.0, 0.0), Vec3::ground(6.0, 0.0)),
            None
        );
    }
}
