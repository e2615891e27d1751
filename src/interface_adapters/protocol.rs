// Wire DTOs for the simulation state endpoint and their domain conversions.

use serde::Deserialize;

use crate::domain::entities::{BoxRecord, RobotAction, RobotActionRecord, Snapshot};
use crate::domain::geometry::Vec3;

/// Top-level state document served by the simulation endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct StateDocumentDto {
    pub box_positions: Vec<BoxPositionDto>,
    pub robot_actions: Vec<RobotActionDto>,
}

/// One box entry; `position` is an [x, z] ground-plane pair.
#[derive(Debug, Clone, Deserialize)]
pub struct BoxPositionDto {
    pub id: u64,
    pub position: [f32; 2],
    pub action: String,
    pub num_boxes: u32,
}

/// One robot entry; `box_id` is present only for grab/stack cycles.
#[derive(Debug, Clone, Deserialize)]
pub struct RobotActionDto {
    pub id: u64,
    pub position: [f32; 2],
    pub direction: [f32; 2],
    pub action: String,
    #[serde(default)]
    pub box_id: Option<u64>,
}

const STACKED_ACTION: &str = "stacked";

impl From<BoxPositionDto> for BoxRecord {
    fn from(dto: BoxPositionDto) -> Self {
        Self {
            id: dto.id,
            position: Vec3::ground(dto.position[0], dto.position[1]),
            stacked: dto.action == STACKED_ACTION,
            num_boxes: dto.num_boxes,
        }
    }
}

// Unknown action strings map to Other and apply no extra effect downstream.
fn parse_robot_action(raw: &str) -> RobotAction {
    match raw {
        "move" => RobotAction::Move,
        "turn random" => RobotAction::TurnRandom,
        "grab" => RobotAction::Grab,
        "stack" => RobotAction::Stack,
        _ => RobotAction::Other,
    }
}

impl From<RobotActionDto> for RobotActionRecord {
    fn from(dto: RobotActionDto) -> Self {
        Self {
            id: dto.id,
            position: Vec3::ground(dto.position[0], dto.position[1]),
            direction: Vec3::ground(dto.direction[0], dto.direction[1]),
            action: parse_robot_action(&dto.action),
            box_id: dto.box_id,
        }
    }
}

impl From<StateDocumentDto> for Snapshot {
    fn from(dto: StateDocumentDto) -> Self {
        Self {
            boxes: dto.box_positions.into_iter().map(BoxRecord::from).collect(),
            robot_actions: dto
                .robot_actions
                .into_iter()
                .map(RobotActionRecord::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_a_full_state_document() {
        let body = r#"{
            "box_positions": [
                {"id": 1, "position": [0.0, 0.0], "action": "idle", "num_boxes": 1},
                {"id": 2, "position": [2.5, -1.0], "action": "stacked", "num_boxes": 3}
            ],
            "robot_actions": [
                {"id": 5, "position": [3.0, 4.0], "direction": [1.0, 0.0], "action": "grab", "box_id": 1},
                {"id": 6, "position": [0.0, 1.0], "direction": [0.0, -1.0], "action": "turn random", "box_id": null}
            ]
        }"#;

        let doc: StateDocumentDto = serde_json::from_str(body).expect("document should decode");
        let snapshot = Snapshot::from(doc);

        assert_eq!(snapshot.boxes.len(), 2);
        assert!(!snapshot.boxes[0].stacked);
        assert!(snapshot.boxes[1].stacked);
        assert_eq!(snapshot.boxes[1].num_boxes, 3);
        assert!(snapshot.boxes[1].position.approx_eq(Vec3::ground(2.5, -1.0)));

        assert_eq!(snapshot.robot_actions.len(), 2);
        assert_eq!(snapshot.robot_actions[0].action, RobotAction::Grab);
        assert_eq!(snapshot.robot_actions[0].box_id, Some(1));
        assert_eq!(snapshot.robot_actions[1].action, RobotAction::TurnRandom);
        assert_eq!(snapshot.robot_actions[1].box_id, None);
    }

    #[test]
    fn missing_box_id_decodes_as_none() {
        let body = r#"{
            "box_positions": [],
            "robot_actions": [
                {"id": 5, "position": [0.0, 0.0], "direction": [1.0, 0.0], "action": "move"}
            ]
        }"#;

        let doc: StateDocumentDto = serde_json::from_str(body).expect("document should decode");
        assert_eq!(doc.robot_actions[0].box_id, None);
    }

    #[test]
    fn unknown_action_strings_decode_to_other() {
        assert_eq!(parse_robot_action("dance"), RobotAction::Other);
        assert_eq!(parse_robot_action(""), RobotAction::Other);
    }

    #[test]
    fn missing_required_field_fails_to_decode() {
        let body = r#"{
            "box_positions": [{"id": 1, "position": [0.0, 0.0], "action": "idle"}],
            "robot_actions": []
        }"#;

        assert!(serde_json::from_str::<StateDocumentDto>(body).is_err());
    }

    #[test]
    fn wrong_typed_field_fails_to_decode() {
        let body = r#"{
            "box_positions": [
                {"id": "one", "position": [0.0, 0.0], "action": "idle", "num_boxes": 1}
            ],
            "robot_actions": []
        }"#;

        assert!(serde_json::from_str::<StateDocumentDto>(body).is_err());
    }
}
