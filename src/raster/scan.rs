use glam::Vec3;

use crate::grid::map::SphereMap;
use crate::pixel::blend::BlendMode;
use crate::pixel::color::LinearRgb;
use crate::pixel::pipeline::PixelSink;
use crate::raster::coverage::coverage;
use crate::shape::bounds::RowBounds;
use crate::shape::sample::Sample;
use crate::shape::{RenderStyle, Shape};

/// Per-call rasterization options.
pub struct RasterOptions<'a> {
    /// Blend policy handed to the sink per fragment.
    pub blend: BlendMode,
    /// Base alpha multiplied into every fragment's coverage.
    pub alpha: f32,
    /// Age stamp forwarded to the sink (0 for freshly drawn fragments).
    pub age: f32,
    /// Debug side-channel: called for every candidate pixel before the
    /// distance test, pass or fail. Not part of coverage logic.
    pub probe: Option<&'a mut dyn FnMut(u32, u32)>,
}

impl Default for RasterOptions<'_> {
    fn default() -> Self {
        Self {
            blend: BlendMode::Over,
            alpha: 1.0,
            age: 0.0,
            probe: None,
        }
    }
}

/// Scanline-rasterize one shape through a shader into a pixel sink.
///
/// Rows come from the shape's vertical bounds clamped to the grid; columns
/// from its per-row bounds, wrapping mod the display width. Each candidate
/// pixel is sampled once through a single reused [`Sample`] record, coverage
/// is derived from the signed distance, and surviving fragments are shaded
/// and plotted. The loop allocates nothing.
///
/// The shader must not retain `point` or the sample reference past the call;
/// both are scratch.
#[tracing::instrument(level = "trace", skip_all)]
pub fn rasterize<'a, F>(
    sink: &'a mut dyn PixelSink,
    grid: &'a SphereMap,
    shape: &'a Shape,
    shader: F,
    options: RasterOptions<'a>,
) where
    F: FnMut(Vec3, &Sample) -> LinearRgb,
{
    let Some((y0, y1)) = shape.rows(grid) else {
        return;
    };
    let y1 = y1.min(grid.height() - 1);
    let width = grid.width();

    let mut scan = Scan {
        sink,
        grid,
        shape,
        shader,
        sample: Sample::new(),
        style: shape.style(),
        pixel_width: grid.pixel_width(),
        blend: options.blend,
        alpha: options.alpha,
        age: options.age,
        probe: options.probe,
    };

    for y in y0..=y1 {
        match shape.row_bounds(grid, y) {
            RowBounds::Empty => {}
            RowBounds::Full => {
                for x in 0..width {
                    scan.pixel(x, y);
                }
            }
            RowBounds::Spans(set) => {
                for span in set.spans() {
                    for i in 0..span.len {
                        scan.pixel((span.start + i) % width, y);
                    }
                }
            }
        }
    }
}

struct Scan<'a, F> {
    sink: &'a mut dyn PixelSink,
    grid: &'a SphereMap,
    shape: &'a Shape,
    shader: F,
    sample: Sample,
    style: RenderStyle,
    pixel_width: f32,
    blend: BlendMode,
    alpha: f32,
    age: f32,
    probe: Option<&'a mut dyn FnMut(u32, u32)>,
}

impl<F> Scan<'_, F>
where
    F: FnMut(Vec3, &Sample) -> LinearRgb,
{
    fn pixel(&mut self, x: u32, y: u32) {
        if let Some(probe) = self.probe.as_mut() {
            probe(x, y);
        }
        let dir = self.grid.dir(x, y);
        self.sample.reset();
        self.shape.distance(dir, &mut self.sample);
        let cov = coverage(self.style, self.sample.distance, self.pixel_width);
        if cov <= 0.0 {
            return;
        }
        let color = (self.shader)(dir, &self.sample);
        self.sink.plot(x, y, color, self.age, self.alpha * cov, self.blend);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/scan.rs"]
mod tests;
