// Scene output consumed at the rendering boundary.

use crate::domain::registry::EntityRegistry;

/// Per-tick view of the tracked scene, published for the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneUpdate {
    pub tick: u64,
    pub robots: Vec<RobotSceneState>,
    pub boxes: Vec<BoxSceneState>,
}

/// Current transform of one robot: position plus ground-plane facing.
#[derive(Debug, Clone, PartialEq)]
pub struct RobotSceneState {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub facing_x: f32,
    pub facing_z: f32,
}

/// Current transform and visibility of one box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxSceneState {
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub scale_y: f32,
    pub active: bool,
    pub carried_by: Option<u64>,
}

impl SceneUpdate {
    /// Captures the registry's current transforms, sorted by id so consumers
    /// and tests see a stable order.
    pub fn capture(tick: u64, registry: &EntityRegistry) -> Self {
        let mut robots: Vec<RobotSceneState> = registry
            .robots()
            .map(|r| RobotSceneState {
                id: r.id,
                x: r.position.x,
                y: r.position.y,
                z: r.position.z,
                facing_x: r.facing.x,
                facing_z: r.facing.z,
            })
            .collect();
        robots.sort_by_key(|r| r.id);

        let mut boxes: Vec<BoxSceneState> = registry
            .boxes()
            .map(|b| BoxSceneState {
                id: b.id,
                x: b.position.x,
                y: b.position.y,
                z: b.position.z,
                scale_y: b.scale_y,
                active: b.active,
                carried_by: b.carried_by,
            })
            .collect();
        boxes.sort_by_key(|b| b.id);

        Self {
            tick,
            robots,
            boxes,
        }
    }
}
