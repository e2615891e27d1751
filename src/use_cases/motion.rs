// Per-robot motion control: journey issuance and per-tick stepping.

use std::time::Instant;

use rand::Rng;
use tracing::trace;

use crate::domain::entities::{MotionJourney, RobotEntity};
use crate::domain::geometry::Vec3;
use crate::domain::ports::ObstacleQuery;
use crate::domain::tuning::MotionTuning;
use crate::systems::steering::{self, JourneyStep};

/// Points the robot at a new target, superseding any in-flight journey.
///
/// The replaced journey is simply dropped; only the latest target is ever
/// pursued, so two journeys can never race to move the same robot.
pub fn issue_target(robot: &mut RobotEntity, target: Vec3, now: Instant) {
    robot.journey = Some(MotionJourney::new(robot.position, target, now));
}

/// Advances the robot's journey by one render tick.
///
/// A clear path commits the interpolated position. An obstructed path leaves
/// the robot in place for this tick, resamples its velocity, and restarts the
/// journey from the current position toward the unchanged target.
pub fn tick_robot(
    robot: &mut RobotEntity,
    now: Instant,
    obstacles: &impl ObstacleQuery,
    rng: &mut impl Rng,
    tuning: &MotionTuning,
) {
    let Some(journey) = robot.journey else {
        return;
    };

    match steering::advance(&journey, robot.position, robot.velocity.length(), now, obstacles) {
        JourneyStep::Moved(position) => {
            robot.position = position;
        }
        JourneyStep::Blocked { box_id } => {
            trace!(robot_id = robot.id, box_id, "path blocked; redirecting");
            robot.velocity = steering::random_velocity(rng, tuning);
            robot.journey = Some(MotionJourney::new(robot.position, journey.target, now));
        }
        JourneyStep::Arrived => {
            robot.position = journey.target;
            robot.last_confirmed = journey.target;
            robot.journey = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use std::time::Duration;

    struct OpenField;

    impl ObstacleQuery for OpenField {
        fn first_box_hit(&self, _from: Vec3, _to: Vec3) -> Option<u64> {
            None
        }
    }

    struct Wall;

    impl ObstacleQuery for Wall {
        fn first_box_hit(&self, _from: Vec3, _to: Vec3) -> Option<u64> {
            Some(99)
        }
    }

    fn robot_at(position: Vec3) -> RobotEntity {
        RobotEntity::new(1, position, Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0))
    }

    #[test]
    fn when_a_new_target_is_issued_then_the_previous_journey_is_superseded() {
        let now = Instant::now();
        let mut robot = robot_at(Vec3::ground(0.0, 0.0));

        issue_target(&mut robot, Vec3::ground(10.0, 0.0), now);
        issue_target(&mut robot, Vec3::ground(0.0, 7.0), now);

        let journey = robot.journey.expect("journey should be active");
        assert!(journey.target.approx_eq(Vec3::ground(0.0, 7.0)));
        assert!(journey.start.approx_eq(robot.position));
    }

    #[test]
    fn when_path_is_clear_then_robot_advances_toward_target() {
        let started = Instant::now();
        let mut robot = robot_at(Vec3::ground(0.0, 0.0));
        issue_target(&mut robot, Vec3::ground(10.0, 0.0), started);

        let mut rng = SmallRng::seed_from_u64(1);
        let tuning = MotionTuning::default();
        tick_robot(
            &mut robot,
            started + Duration::from_secs(1),
            &OpenField,
            &mut rng,
            &tuning,
        );

        // Speed 2.0 for one second over a 10 unit journey.
        assert!(robot.position.approx_eq(Vec3::ground(2.0, 0.0)));
        assert!(robot.journey.is_some());
    }

    #[test]
    fn when_blocked_then_position_is_unchanged_and_velocity_is_resampled() {
        let started = Instant::now();
        let start_position = Vec3::ground(1.0, 1.0);
        let mut robot = robot_at(start_position);
        let old_velocity = robot.velocity;
        issue_target(&mut robot, Vec3::ground(10.0, 1.0), started);

        let now = started + Duration::from_secs(1);
        let mut rng = SmallRng::seed_from_u64(2);
        let tuning = MotionTuning::default();
        tick_robot(&mut robot, now, &Wall, &mut rng, &tuning);

        // No forward progress on the blocked tick.
        assert!(robot.position.approx_eq(start_position));
        assert_ne!(robot.velocity, old_velocity);

        let speed = robot.velocity.length();
        assert!(speed >= tuning.min_speed && speed <= tuning.max_speed);

        // The journey restarted from the current position toward the same target.
        let journey = robot.journey.expect("journey should remain active");
        assert!(journey.start.approx_eq(start_position));
        assert!(journey.target.approx_eq(Vec3::ground(10.0, 1.0)));
        assert_eq!(journey.started_at, now);
    }

    #[test]
    fn when_journey_completes_then_last_confirmed_position_is_recorded() {
        let started = Instant::now();
        let mut robot = robot_at(Vec3::ground(0.0, 0.0));
        let target = Vec3::ground(1.0, 0.0);
        issue_target(&mut robot, target, started);

        let mut rng = SmallRng::seed_from_u64(3);
        let tuning = MotionTuning::default();
        // Far more time than the journey needs; arrival clamps to the target.
        tick_robot(
            &mut robot,
            started + Duration::from_secs(30),
            &OpenField,
            &mut rng,
            &tuning,
        );

        assert!(robot.position.approx_eq(target));
        assert!(robot.last_confirmed.approx_eq(target));
        assert!(robot.journey.is_none());
    }

    #[test]
    fn when_robot_has_no_journey_then_tick_is_a_no_op() {
        let mut robot = robot_at(Vec3::ground(4.0, 4.0));
        let before = robot.position;

        let mut rng = SmallRng::seed_from_u64(4);
        tick_robot(
            &mut robot,
            Instant::now(),
            &OpenField,
            &mut rng,
            &MotionTuning::default(),
        );

        assert!(robot.position.approx_eq(before));
    }
}
