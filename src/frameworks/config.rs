use std::{env, time::Duration};

use crate::domain::tuning::{MotionTuning, SceneTuning};

// Runtime/polling configuration (not scene tuning defaults).

pub fn sim_base_url() -> String {
    env::var("SIM_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:8585".to_string())
}

pub fn poll_interval() -> Duration {
    env_millis("SIM_POLL_INTERVAL_MS", 1000)
}

pub fn fetch_timeout() -> Duration {
    env_millis("SIM_FETCH_TIMEOUT_MS", 1500)
}

/// Motion tuning with optional env overrides on top of the defaults.
pub fn motion_tuning() -> MotionTuning {
    let defaults = MotionTuning::default();
    MotionTuning {
        min_speed: env_f32("SIM_MIN_SPEED", defaults.min_speed),
        max_speed: env_f32("SIM_MAX_SPEED", defaults.max_speed),
    }
}

/// Scene geometry tuning with optional env overrides on top of the defaults.
pub fn scene_tuning() -> SceneTuning {
    let defaults = SceneTuning::default();
    SceneTuning {
        box_height: env_f32("SIM_BOX_HEIGHT", defaults.box_height),
        robot_height: env_f32("SIM_ROBOT_HEIGHT", defaults.robot_height),
        grab_height: env_f32("SIM_GRAB_HEIGHT", defaults.grab_height),
    }
}

fn env_millis(name: &str, default_millis: u64) -> Duration {
    let millis = env::var(name)
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(default_millis);
    Duration::from_millis(millis)
}

fn env_f32(name: &str, default: f32) -> f32 {
    env::var(name)
        .ok()
        .and_then(|value| value.parse::<f32>().ok())
        .unwrap_or(default)
}

pub const SNAPSHOT_CHANNEL_CAPACITY: usize = 8;
pub const SCENE_BROADCAST_CAPACITY: usize = 128;

pub const TICK_INTERVAL: Duration = Duration::from_millis(1000 / 60);
