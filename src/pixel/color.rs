/// Linear-light RGB color, three floats, unclamped.
///
/// Values stay in linear light through the whole pipeline; clamping and
/// gamma encoding happen only at the display boundary
/// (see [`crate::pixel::export`]).
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LinearRgb {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
}

impl LinearRgb {
    /// All channels zero.
    pub const BLACK: Self = Self { r: 0.0, g: 0.0, b: 0.0 };
    /// All channels one.
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    /// Build from channels.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Gray with all channels equal to `v`.
    pub const fn splat(v: f32) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Channel-wise scale.
    pub fn scale(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }

    /// Channel-wise sum.
    pub fn add(self, o: Self) -> Self {
        Self::new(self.r + o.r, self.g + o.g, self.b + o.b)
    }

    /// Channel-wise maximum.
    pub fn max(self, o: Self) -> Self {
        Self::new(self.r.max(o.r), self.g.max(o.g), self.b.max(o.b))
    }

    /// Linear interpolation toward `o`.
    pub fn lerp(self, o: Self, t: f32) -> Self {
        self.scale(1.0 - t).add(o.scale(t))
    }

    /// Euclidean magnitude of the channel vector.
    pub fn magnitude(self) -> f32 {
        (self.r * self.r + self.g * self.g + self.b * self.b).sqrt()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pixel/color.rs"]
mod tests;
