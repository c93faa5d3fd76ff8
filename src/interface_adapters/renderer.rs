// Render-side sink for frames and terrain scars.

use crate::domain::state::Mark;
use crate::domain::terrain::Terrain;
use crate::use_cases::snapshot::Frame;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use tracing::{debug, trace};

/// Consumer of per-tick frames. Rendering is best effort: the simulator
/// drops a frame whose render fails and keeps ticking.
pub trait Renderer {
    fn render(&mut self, terrain: &Terrain, frame: &Frame) -> io::Result<()>;

    /// Registers a permanent scar on the land where something died against
    /// it. Marks outside the land or over water are ignored.
    fn register_object_mark(&mut self, terrain: &Terrain, mark: Mark);
}

/// Renderer that reports frames through `tracing` and optionally records
/// them as JSON lines for offline playback.
pub struct TraceRenderer {
    marks: Vec<Mark>,
    record: Option<BufWriter<File>>,
}

impl TraceRenderer {
    pub fn new() -> TraceRenderer {
        TraceRenderer {
            marks: Vec::new(),
            record: None,
        }
    }

    /// Adds a JSON-lines frame recording at the given path.
    pub fn with_record(path: &str) -> io::Result<TraceRenderer> {
        let file = File::create(path)?;
        Ok(TraceRenderer {
            marks: Vec::new(),
            record: Some(BufWriter::new(file)),
        })
    }

    /// Scars accepted so far, in registration order.
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }
}

impl Default for TraceRenderer {
    fn default() -> TraceRenderer {
        TraceRenderer::new()
    }
}

impl Renderer for TraceRenderer {
    fn render(&mut self, _terrain: &Terrain, frame: &Frame) -> io::Result<()> {
        trace!(
            tick = frame.tick,
            phase = ?frame.phase,
            entities = frame.entities.len(),
            shield_0 = frame.players[0].shield,
            shield_1 = frame.players[1].shield,
            "frame"
        );
        if let Some(record) = &mut self.record {
            serde_json::to_writer(&mut *record, frame)?;
            record.write_all(b"\n")?;
        }
        Ok(())
    }

    fn register_object_mark(&mut self, terrain: &Terrain, mark: Mark) {
        let size = terrain.size() as f32;
        if mark.x < 0.0 || mark.y < 0.0 || mark.x >= size || mark.y >= size {
            debug!(x = mark.x, y = mark.y, "mark outside the land, skipped");
            return;
        }
        // Water swallows impacts without a trace.
        if terrain.height_at(mark.x, mark.y) <= 0.0 {
            debug!(x = mark.x, y = mark.y, "mark over water, skipped");
            return;
        }
        debug!(x = mark.x, y = mark.y, radius = mark.radius, "land scarred");
        self.marks.push(mark);
    }
}
