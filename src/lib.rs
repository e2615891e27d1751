pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod systems;
pub mod use_cases;

pub use frameworks::config::sim_base_url;
pub use frameworks::runtime::{ViewerSettings, run_with_config, start};
