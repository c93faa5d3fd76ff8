use std::{env, time::Duration};

// Runtime constants (not gameplay tuning).

/// Fixed simulation period; 40 ms targets 25 ticks per second.
pub fn tick_interval() -> Duration {
    let millis = env::var("SKYDUEL_TICK_MS")
        .ok()
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(40);
    Duration::from_millis(millis)
}

/// Seed for the match RNG; random when unset so every run differs.
pub fn rng_seed() -> u64 {
    env::var("SKYDUEL_SEED")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or_else(rand::random)
}

/// Whether the scripted demo pilot drives the input table.
pub fn demo_enabled() -> bool {
    matches!(env::var("SKYDUEL_DEMO").as_deref(), Ok("1") | Ok("true"))
}

/// Optional path for recording frames as JSON lines.
pub fn record_path() -> Option<String> {
    env::var("SKYDUEL_RECORD").ok().filter(|p| !p.is_empty())
}

pub const CONTROL_CHANNEL_CAPACITY: usize = 64;
