// Adapter layer: input capture and render-side sinks.

pub mod input;
pub mod pilot;
pub mod renderer;

pub use input::InputTable;
pub use renderer::{Renderer, TraceRenderer};
