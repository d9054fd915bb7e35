use glam::Vec3;

use crate::grid::map::SphereMap;
use crate::shape::bounds::RowBounds;
use crate::shape::ring::Ring;
use crate::shape::sample::Sample;

/// Per-azimuth shift applied to a [`DistortedRing`]'s target angle.
///
/// The input is the azimuth around the ring axis in radians, `(-PI, PI]`.
/// The returned shift must stay within the declared maximum; larger values
/// render correctly near the stroke but may be culled by the bounds.
pub type AzimuthShift = Box<dyn Fn(f32) -> f32 + Send + Sync>;

/// A ring whose target angle is perturbed per azimuth by a caller closure.
///
/// Wobbling circles, petal fringes and hand-drawn-looking strokes come from
/// here. Bounds are the underlying ring's, widened by the declared maximum
/// distortion to stay conservative.
pub struct DistortedRing {
    ring: Ring,
    shift: AzimuthShift,
    max_shift: f32,
}

impl DistortedRing {
    /// Wrap `ring` with a shift closure bounded by `max_shift` radians.
    pub fn new(ring: Ring, shift: AzimuthShift, max_shift: f32) -> Self {
        Self { ring, shift, max_shift: max_shift.abs() }
    }

    /// Stroke half-width of the underlying ring.
    pub fn thickness(&self) -> f32 {
        self.ring.thickness()
    }

    pub(crate) fn distance(&self, p: Vec3, out: &mut Sample) {
        let az = self.ring.basis().azimuth(p);
        let target = self.ring.target() + (self.shift)(az);
        self.ring.distance_at(p, target, out);
    }

    pub(crate) fn rows(&self, grid: &SphereMap) -> Option<(u32, u32)> {
        self.ring.rows_padded(grid, self.max_shift)
    }

    pub(crate) fn row_bounds(&self, grid: &SphereMap, y: u32) -> RowBounds {
        self.ring.row_bounds_padded(grid, y, self.max_shift)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/distort.rs"]
mod tests;
