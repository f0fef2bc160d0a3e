use tracing::{debug, info};

use crate::input::EventSource;
use crate::rendering::{Renderer, TileAdapter};

use super::{Simulation, TickPacer, TickReport};

/// Totals for one run of the loop
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct RunSummary {
    pub frames: u64,
    pub generations: u64,
    pub alive: usize,
}

/// Driver alternates drawing and ticking on one thread.
///
/// Each iteration: check for close, draw the committed grid, pump window
/// events, run one full tick, sleep out the tick budget. A close request is
/// only acted on at the top of an iteration, so the grid is always fully
/// committed when the loop exits.
pub struct Driver {
    simulation: Simulation,
    adapter: TileAdapter,
    pacer: TickPacer,
    frames: u64,
}

impl Driver {
    pub fn new(simulation: Simulation, adapter: TileAdapter, pacer: TickPacer) -> Self {
        Self {
            simulation,
            adapter,
            pacer,
            frames: 0,
        }
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Draw the committed grid and present it. Returns the number of quads drawn.
    pub fn render_frame<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> usize {
        let drawn = self.adapter.draw(self.simulation.grid(), renderer);
        renderer.swap_buffers();
        self.frames += 1;
        drawn
    }

    /// Run one tick, then wait out the rest of the tick budget
    pub fn advance(&mut self) -> TickReport {
        let report = self.simulation.tick();
        info!(generation = report.generation, alive = report.alive, "alives: {}", report.alive);
        let slept = self.pacer.wait();
        debug!(slept_ms = slept.as_secs_f64() * 1000.0, "tick paced");
        report
    }

    /// Loop until the event source asks to close
    pub fn run<W, R>(&mut self, window: &mut W, renderer: &mut R) -> RunSummary
    where
        W: EventSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let generation_at_start = self.simulation.generation();
        while !window.should_close() {
            self.render_frame(renderer);
            window.poll_events();
            self.advance();
        }
        let summary = self.summary_since(generation_at_start);
        info!(frames = summary.frames, generations = summary.generations, "finished");
        summary
    }

    /// Totals for generations committed after `generation_at_start`
    pub fn summary_since(&self, generation_at_start: u64) -> RunSummary {
        RunSummary {
            frames: self.frames,
            generations: self.simulation.generation() - generation_at_start,
            alive: self.simulation.alive_count(),
        }
    }
}
