use crate::pixel::color::LinearRgb;

/// Compositing policy applied when a fragment lands on a pixel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum BlendMode {
    /// Overwrite with the coverage-scaled source; independent of the
    /// destination, so re-plotting is idempotent.
    Replace,
    /// Source-over: `out = dst * (1 - a) + src * a`.
    Over,
    /// Per-channel addition of the coverage-scaled source.
    Add,
    /// Per-channel maximum against the coverage-scaled source.
    Max,
    /// Additive mix rescaled so the result's magnitude equals the larger of
    /// the two inputs: overlapping bright strokes blend instead of washing
    /// out to white.
    OverMax,
}

/// Apply `mode` to one pixel. `alpha` is clamped to `[0, 1]`.
pub fn blend(mode: BlendMode, dst: LinearRgb, src: LinearRgb, alpha: f32) -> LinearRgb {
    let alpha = alpha.clamp(0.0, 1.0);
    match mode {
        BlendMode::Replace => src.scale(alpha),
        BlendMode::Over => dst.lerp(src, alpha),
        BlendMode::Add => dst.add(src.scale(alpha)),
        BlendMode::Max => dst.max(src.scale(alpha)),
        BlendMode::OverMax => {
            let scaled = src.scale(alpha);
            let target = dst.magnitude().max(scaled.magnitude());
            let sum = dst.add(scaled);
            let len = sum.magnitude();
            if len < 1e-6 { sum } else { sum.scale(target / len) }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/blend.rs"]
mod tests;
