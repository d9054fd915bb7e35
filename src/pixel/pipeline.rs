use crate::grid::config::DisplayConfig;
use crate::pixel::blend::{BlendMode, blend};
use crate::pixel::buffer::FrameBuffer;
use crate::pixel::color::LinearRgb;

/// Where rasterized fragments land.
///
/// The rasterizer plots through this seam and knows nothing about buffers,
/// trails or presentation. `age` is 0 for freshly drawn fragments; replayed
/// trail fragments carry their tick age.
pub trait PixelSink {
    /// Composite one fragment at pixel `(x, y)`.
    fn plot(&mut self, x: u32, y: u32, color: LinearRgb, age: f32, alpha: f32, mode: BlendMode);
}

/// Owns the shared frame buffer and composites fragments into it.
///
/// One pipeline has exactly one writer per tick; presentation reads the
/// buffer between ticks, never mid-tick.
pub struct Pipeline {
    buffer: FrameBuffer,
    blend: BlendMode,
}

impl Pipeline {
    /// Build a pipeline with a cleared buffer and `Over` as default blend.
    pub fn new(config: DisplayConfig) -> Self {
        Self { buffer: FrameBuffer::new(config), blend: BlendMode::Over }
    }

    /// Replace the default blend mode.
    pub fn with_blend(mut self, mode: BlendMode) -> Self {
        self.blend = mode;
        self
    }

    /// Default blend mode for callers that do not pick one per draw.
    pub fn default_blend(&self) -> BlendMode {
        self.blend
    }

    /// The buffer being composited into.
    pub fn buffer(&self) -> &FrameBuffer {
        &self.buffer
    }

    /// Mutable buffer access for owners (clearing, direct writes).
    pub fn buffer_mut(&mut self) -> &mut FrameBuffer {
        &mut self.buffer
    }

    /// Zero the buffer; typically called by the driving effect once per tick.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }
}

impl PixelSink for Pipeline {
    fn plot(&mut self, x: u32, y: u32, color: LinearRgb, _age: f32, alpha: f32, mode: BlendMode) {
        if alpha <= 0.0 || y >= self.buffer.height() {
            return;
        }
        let x = x % self.buffer.width();
        let dst = self.buffer.get(x, y);
        self.buffer.set(x, y, blend(mode, dst, color, alpha));
    }
}

/// A fragment remembered by a [`TrailPipeline`].
#[derive(Clone, Copy, Debug)]
pub struct TrailFragment {
    /// Pixel column.
    pub x: u32,
    /// Pixel row.
    pub y: u32,
    /// Color as originally plotted.
    pub color: LinearRgb,
    /// Alpha as originally plotted (coverage included).
    pub alpha: f32,
    /// Whole ticks since the fragment was plotted.
    pub age: f32,
}

/// A pipeline that remembers what it plotted and can re-render it later at
/// reduced intensity: decaying trails without re-rasterizing history.
///
/// The owning effect drives the trail protocol once per tick -- never the
/// rasterizer: [`TrailPipeline::decay`] ages and culls the history, then
/// [`TrailPipeline::trail`] replays it into the freshly cleared buffer
/// before the tick's new shapes are drawn.
pub struct TrailPipeline {
    inner: Pipeline,
    fragments: Vec<TrailFragment>,
    max_age: f32,
    replay_blend: BlendMode,
}

impl TrailPipeline {
    /// Wrap a pipeline; fragments older than `max_age` ticks are dropped.
    pub fn new(inner: Pipeline, max_age: f32) -> Self {
        Self {
            inner,
            fragments: Vec::new(),
            max_age: max_age.max(0.0),
            replay_blend: BlendMode::Add,
        }
    }

    /// Blend mode used when replaying history (default `Add`).
    pub fn with_replay_blend(mut self, mode: BlendMode) -> Self {
        self.replay_blend = mode;
        self
    }

    /// Age every remembered fragment by one tick and drop the expired.
    pub fn decay(&mut self) {
        let max_age = self.max_age;
        for f in &mut self.fragments {
            f.age += 1.0;
        }
        self.fragments.retain(|f| f.age <= max_age);
    }

    /// Replay remembered fragments through `shade` at `alpha` intensity.
    pub fn trail(&mut self, shade: impl Fn(&TrailFragment) -> LinearRgb, alpha: f32) {
        let inner = &mut self.inner;
        let mode = self.replay_blend;
        for f in &self.fragments {
            inner.plot(f.x, f.y, shade(f), f.age, f.alpha * alpha, mode);
        }
    }

    /// Fragments currently remembered, oldest first.
    pub fn fragments(&self) -> &[TrailFragment] {
        &self.fragments
    }

    /// The wrapped pipeline.
    pub fn pipeline(&self) -> &Pipeline {
        &self.inner
    }

    /// Mutable access to the wrapped pipeline.
    pub fn pipeline_mut(&mut self) -> &mut Pipeline {
        &mut self.inner
    }
}

impl PixelSink for TrailPipeline {
    fn plot(&mut self, x: u32, y: u32, color: LinearRgb, age: f32, alpha: f32, mode: BlendMode) {
        if age == 0.0 {
            self.fragments.push(TrailFragment { x, y, color, alpha, age });
        }
        self.inner.plot(x, y, color, age, alpha, mode);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/pipeline.rs"]
mod tests;
