// Pure interpolation and local-avoidance math for one motion tick.

use std::f32::consts::TAU;
use std::time::Instant;

use rand::Rng;

use crate::domain::entities::MotionJourney;
use crate::domain::geometry::{POSITION_EPSILON, Vec3};
use crate::domain::ports::ObstacleQuery;
use crate::domain::tuning::MotionTuning;

/// Outcome of advancing one journey by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JourneyStep {
    /// No obstacle in the way; commit this position.
    Moved(Vec3),
    /// An obstacle crosses the path; do not move this tick, redirect instead.
    Blocked { box_id: u64 },
    /// The candidate reached the target; the journey is over.
    Arrived,
}

/// Computes where the robot should be `now`, based on elapsed time and the
/// magnitude of its commanded velocity, and checks the path for obstacles.
///
/// Progress is linear between the journey's start and target. Time that
/// overshoots the journey clamps to the target rather than extrapolating.
pub fn advance(
    journey: &MotionJourney,
    current: Vec3,
    speed: f32,
    now: Instant,
    obstacles: &impl ObstacleQuery,
) -> JourneyStep {
    let journey_length = journey.length();
    if journey_length <= POSITION_EPSILON {
        return JourneyStep::Arrived;
    }

    let covered = now.duration_since(journey.started_at).as_secs_f32() * speed;
    let fraction = covered / journey_length;
    let candidate = Vec3::lerp(journey.start, journey.target, fraction);

    if let Some(box_id) = obstacles.first_box_hit(current, candidate) {
        return JourneyStep::Blocked { box_id };
    }

    if candidate.approx_eq(journey.target) {
        JourneyStep::Arrived
    } else {
        JourneyStep::Moved(candidate)
    }
}

/// Samples a fresh commanded velocity: speed uniform in
/// `[min_speed, max_speed]`, direction uniform on the ground-plane unit circle.
pub fn random_velocity(rng: &mut impl Rng, tuning: &MotionTuning) -> Vec3 {
    let speed = rng.gen_range(tuning.min_speed..=tuning.max_speed);
    let angle = rng.gen_range(0.0..TAU);
    Vec3::new(angle.cos(), 0.0, angle.sin()) * speed
}
