pub mod domain;
pub mod frameworks;
pub mod interface_adapters;
pub mod use_cases;

pub use frameworks::config::tick_interval;
pub use frameworks::runtime::run_with_config;
