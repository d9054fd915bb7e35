use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::foundation::error::SphereResult;
use crate::foundation::math::{acos_clamped, wrap_tau};
use crate::grid::config::DisplayConfig;

/// Pixel <-> unit-sphere-direction mapping for a fixed display.
///
/// Pixel `(x, y)` maps to angles `theta = x * TAU / W` (azimuth, wraps across
/// x) and `phi = y * PI / (H - 1)` (polar angle from the north pole, clamped
/// at the poles). The y axis is the pole axis:
///
/// ```text
/// dir = (sin(phi) * sin(theta), cos(phi), sin(phi) * cos(theta))
/// ```
///
/// Directions for every pixel are precomputed at construction so the
/// rasterizer's hot loop is a table lookup.
pub struct SphereMap {
    config: DisplayConfig,
    dirs: Vec<Vec3>,
    row_pitch: f32,
    col_pitch: f32,
}

impl SphereMap {
    /// Build the map and its per-pixel direction table.
    pub fn new(config: DisplayConfig) -> SphereResult<Self> {
        let w = config.width as usize;
        let h = config.height as usize;
        let row_pitch = PI / (config.height - 1) as f32;
        let col_pitch = TAU / config.width as f32;

        let mut dirs = Vec::with_capacity(w * h);
        for y in 0..h {
            let phi = y as f32 * row_pitch;
            let (sin_phi, cos_phi) = phi.sin_cos();
            for x in 0..w {
                let theta = x as f32 * col_pitch;
                let (sin_theta, cos_theta) = theta.sin_cos();
                dirs.push(Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta));
            }
        }

        Ok(Self { config, dirs, row_pitch, col_pitch })
    }

    /// The display configuration this map was built for.
    pub fn config(&self) -> DisplayConfig {
        self.config
    }

    /// Pixel columns.
    pub fn width(&self) -> u32 {
        self.config.width
    }

    /// Pixel rows.
    pub fn height(&self) -> u32 {
        self.config.height
    }

    /// Angular distance between adjacent rows, `PI / (H - 1)`.
    pub fn row_pitch(&self) -> f32 {
        self.row_pitch
    }

    /// Angular distance between adjacent columns at the equator, `TAU / W`.
    pub fn col_pitch(&self) -> f32 {
        self.col_pitch
    }

    /// Angular width of one pixel, used as the anti-aliasing ramp width.
    pub fn pixel_width(&self) -> f32 {
        self.col_pitch.max(self.row_pitch)
    }

    /// Polar angle of a row.
    pub fn row_phi(&self, y: u32) -> f32 {
        y.min(self.config.height - 1) as f32 * self.row_pitch
    }

    /// Precomputed unit direction for a pixel. `x` is wrapped, `y` clamped.
    pub fn dir(&self, x: u32, y: u32) -> Vec3 {
        let x = x % self.config.width;
        let y = y.min(self.config.height - 1);
        self.dirs[(y * self.config.width + x) as usize]
    }

    /// Compute the unit direction for a pixel without the table.
    pub fn pixel_to_dir(&self, x: u32, y: u32) -> Vec3 {
        let phi = self.row_phi(y);
        let theta = (x % self.config.width) as f32 * self.col_pitch;
        let (sin_phi, cos_phi) = phi.sin_cos();
        let (sin_theta, cos_theta) = theta.sin_cos();
        Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
    }

    /// Map a direction back to the nearest pixel.
    ///
    /// The inverse of [`SphereMap::pixel_to_dir`] up to rounding: theta is
    /// recovered with `atan2` and wrapped, phi with a clamped `acos`.
    pub fn dir_to_pixel(&self, dir: Vec3) -> (u32, u32) {
        let phi = acos_clamped(dir.y);
        let theta = wrap_tau(dir.x.atan2(dir.z));

        let y = (phi / self.row_pitch).round() as u32;
        let x = (theta / self.col_pitch).round() as u32 % self.config.width;
        (x, y.min(self.config.height - 1))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/map.rs"]
mod tests;
