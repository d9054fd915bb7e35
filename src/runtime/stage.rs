use glam::Vec3;

use crate::foundation::error::SphereResult;
use crate::grid::config::DisplayConfig;
use crate::grid::map::SphereMap;
use crate::pixel::buffer::FrameBuffer;
use crate::pixel::color::LinearRgb;
use crate::pixel::pipeline::Pipeline;
use crate::pool::arena::Arena;
use crate::runtime::clock::TickClock;

/// Per-tick scratch arenas shared by all effects of a stage.
///
/// Reset exactly once per tick, before any shape is rasterized; contents
/// never survive into the next tick.
pub struct FrameArenas {
    /// Scratch directions/positions.
    pub vectors: Arena<Vec3>,
    /// Scratch color records.
    pub colors: Arena<LinearRgb>,
}

impl FrameArenas {
    fn new() -> Self {
        Self {
            vectors: Arena::with_capacity(256),
            colors: Arena::with_capacity(64),
        }
    }

    fn reset(&mut self) {
        self.vectors.reset();
        self.colors.reset();
    }
}

/// Everything an effect sees during one tick.
pub struct FrameCtx<'a> {
    /// The display's coordinate mapping.
    pub grid: &'a SphereMap,
    /// The pipeline owning the shared buffer.
    pub pipeline: &'a mut Pipeline,
    /// Tick-scoped scratch.
    pub scratch: &'a mut FrameArenas,
    /// Completed ticks before this one.
    pub tick: u64,
}

/// A visual effect driven by the stage.
///
/// Called once per tick; builds shapes and rasterizes them through the
/// context's pipeline. Effects own no rendering resource the core needs.
pub trait Effect {
    /// Draw this effect's contribution for the current tick.
    fn draw_frame(&mut self, frame: &mut FrameCtx<'_>);
}

/// Owns the grid, pipeline, scratch arenas and tick clock, and runs the
/// per-tick protocol.
///
/// Single-threaded and frame-synchronous: a tick runs to completion before
/// anything reads the buffer, and the buffer has exactly one writer per
/// tick. Presentation may run at its own cadence by reading
/// [`Stage::buffer`] between calls to [`Stage::advance`].
pub struct Stage {
    grid: SphereMap,
    pipeline: Pipeline,
    scratch: FrameArenas,
    clock: TickClock,
    tick: u64,
}

impl Stage {
    /// Build a stage for a display, ticking every `tick_interval` seconds.
    pub fn new(config: DisplayConfig, tick_interval: f32) -> SphereResult<Self> {
        Ok(Self {
            grid: SphereMap::new(config)?,
            pipeline: Pipeline::new(config),
            scratch: FrameArenas::new(),
            clock: TickClock::new(tick_interval, 5)?,
            tick: 0,
        })
    }

    /// Feed wall-clock time and run the owed ticks; returns how many ran.
    #[tracing::instrument(level = "debug", skip(self, effects))]
    pub fn advance(&mut self, dt: f32, effects: &mut [&mut dyn Effect]) -> u32 {
        let ticks = self.clock.advance(dt);
        for _ in 0..ticks {
            self.run_tick(effects);
        }
        ticks
    }

    /// Run exactly one tick regardless of the clock.
    pub fn run_tick(&mut self, effects: &mut [&mut dyn Effect]) {
        self.scratch.reset();
        let mut ctx = FrameCtx {
            grid: &self.grid,
            pipeline: &mut self.pipeline,
            scratch: &mut self.scratch,
            tick: self.tick,
        };
        for effect in effects.iter_mut() {
            effect.draw_frame(&mut ctx);
        }
        self.tick += 1;
    }

    /// The display's coordinate mapping.
    pub fn grid(&self) -> &SphereMap {
        &self.grid
    }

    /// The pipeline owning the shared buffer.
    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Mutable pipeline access for the driving code (clearing between ticks).
    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.pipeline
    }

    /// The last completed tick's pixels.
    pub fn buffer(&self) -> &FrameBuffer {
        self.pipeline.buffer()
    }

    /// Completed tick count.
    pub fn tick(&self) -> u64 {
        self.tick
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/stage.rs"]
mod tests;
