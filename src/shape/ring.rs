use std::f32::consts::FRAC_PI_2;

use glam::Vec3;

use crate::foundation::math::{DEGENERATE_SQ, acos_clamped, asin_clamped, wrap_tau};
use crate::grid::basis::Basis;
use crate::grid::map::SphereMap;
use crate::shape::bounds::{RowBounds, band_row_bounds, band_rows};
use crate::shape::sample::Sample;

/// Cosine threshold past which the small-angle linearization is abandoned
/// for an exact `acos`.
const COS_SINGULAR: f32 = 0.999;
/// Sine-of-target threshold below which the ring sits on its own axis pole
/// and the linearization is never valid.
const SIN_SINGULAR: f32 = 1e-2;

/// A circle of constant angular distance from an axis, with stroke thickness.
///
/// The angular radius is given in `[0, 2]` quarter-turn units: `1.0` is the
/// great circle, values above `1.0` fold to the antipodal cap (radius `2 - r`
/// around the negated axis). Distance is `|angle_from_axis - target| -
/// thickness`, so the stroke centre reports `-thickness` and the stroke
/// edges report zero.
///
/// Optional half-space clips and a polar-angle restriction cut the circle
/// into arcs; [`Ring::segment`] uses both to draw great-circle line segments.
pub struct Ring {
    basis: Basis,
    target: f32,
    thickness: f32,
    cos_target: f32,
    sin_target: f32,
    inv_sin_target: f32,
    exact: bool,
    clips: [Vec3; 2],
    clip_count: u8,
    phi_range: Option<(f32, f32)>,
}

impl Ring {
    /// Build a ring around `axis` with angular radius `radius` in `[0, 2]`
    /// quarter turns and stroke half-width `thickness` radians.
    ///
    /// Returns `None` for a degenerate axis.
    pub fn new(axis: Vec3, radius: f32, thickness: f32) -> Option<Self> {
        let mut radius = radius.clamp(0.0, 2.0);
        let mut axis = axis;
        if radius > 1.0 {
            // Antipodal fold: a 1.3-turn ring is a 0.7-turn ring seen from
            // the far pole.
            radius = 2.0 - radius;
            axis = -axis;
        }
        let basis = Basis::around(axis)?;
        let target = radius * FRAC_PI_2;
        let sin_target = target.sin();
        let exact = sin_target < SIN_SINGULAR;
        Some(Self {
            basis,
            target,
            thickness: thickness.max(0.0),
            cos_target: target.cos(),
            sin_target,
            inv_sin_target: if exact { 0.0 } else { 1.0 / sin_target },
            exact,
            clips: [Vec3::ZERO; 2],
            clip_count: 0,
            phi_range: None,
        })
    }

    /// A great-circle arc from `a` to `b` (the short way), rendered as a
    /// stroked line segment.
    ///
    /// Returns `None` when the endpoints are parallel or degenerate.
    pub fn segment(a: Vec3, b: Vec3, thickness: f32) -> Option<Self> {
        let axis = a.cross(b);
        if axis.length_squared() < DEGENERATE_SQ {
            return None;
        }
        let axis = axis.normalize();
        let ring = Self::new(axis, 1.0, thickness)?;
        Some(ring.with_clip(axis.cross(a)).with_clip(b.cross(axis)))
    }

    /// Add a half-space clip: only points with `dot(p, normal) >= 0` remain.
    ///
    /// At most two clips are kept; further ones are ignored. A degenerate
    /// normal is ignored.
    pub fn with_clip(mut self, normal: Vec3) -> Self {
        if normal.length_squared() < DEGENERATE_SQ || self.clip_count as usize >= self.clips.len() {
            return self;
        }
        self.clips[self.clip_count as usize] = normal.normalize();
        self.clip_count += 1;
        self
    }

    /// Restrict the ring to polar angles in `lo..=hi`.
    pub fn with_phi_range(mut self, lo: f32, hi: f32) -> Self {
        self.phi_range = Some((lo.min(hi), lo.max(hi)));
        self
    }

    /// Stroke half-width in radians.
    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Angle of `p` from the ring axis.
    ///
    /// Linearized around the target angle with the precomputed
    /// `1 / sin(target)` away from the singular cones; exact `acos` when the
    /// target sits on the axis or the point is near either pole of the frame.
    fn angle_from_axis(&self, p: Vec3) -> f32 {
        let c = self.basis.v.dot(p).clamp(-1.0, 1.0);
        if self.exact || c.abs() > COS_SINGULAR {
            acos_clamped(c)
        } else {
            self.target + (self.cos_target - c) * self.inv_sin_target
        }
    }

    pub(crate) fn distance_at(&self, p: Vec3, target: f32, out: &mut Sample) {
        let ang = self.angle_from_axis(p);
        let mut d = (ang - target).abs() - self.thickness;
        for clip in &self.clips[..self.clip_count as usize] {
            d = d.max(-asin_clamped(p.dot(*clip)));
        }
        if let Some((lo, hi)) = self.phi_range {
            let phi = acos_clamped(p.y);
            d = d.max(lo - phi).max(phi - hi);
        }
        out.distance = d;
        out.t = wrap_tau(self.basis.azimuth(p)) / std::f32::consts::TAU;
    }

    pub(crate) fn distance(&self, p: Vec3, out: &mut Sample) {
        self.distance_at(p, self.target, out);
    }

    /// Target polar angle of the stroke centre within the ring frame.
    pub(crate) fn target(&self) -> f32 {
        self.target
    }

    pub(crate) fn basis(&self) -> &Basis {
        &self.basis
    }

    /// Conservative angular band covered by the stroke plus `spread` margin.
    ///
    /// The accept test runs in cosine space wherever the linearization is
    /// active, so the band is the union of the angular window and the
    /// linearized cosine window; near the axis the latter is wider.
    fn band_angles(&self, spread: f32) -> (f32, f32) {
        let lin_inner = acos_clamped(self.cos_target + spread * self.sin_target);
        let lin_outer = acos_clamped(self.cos_target - spread * self.sin_target);
        let a0 = (self.target - spread).min(lin_inner);
        let a1 = (self.target + spread).max(lin_outer);
        (a0, a1)
    }

    pub(crate) fn rows_padded(&self, grid: &SphereMap, extra: f32) -> Option<(u32, u32)> {
        let pad = grid.pixel_width() + extra;
        let (a0, a1) = self.band_angles(self.thickness + pad);
        let (y0, y1) = band_rows(grid, self.basis.v, a0, a1)?;
        match self.phi_range {
            Some((lo, hi)) => {
                let pitch = grid.row_pitch();
                let r0 = (((lo - pad) / pitch).floor().max(0.0)) as u32;
                let r1 = (((hi + pad) / pitch).ceil().max(0.0) as u32).min(grid.height() - 1);
                let y0 = y0.max(r0);
                let y1 = y1.min(r1);
                if y0 > y1 { None } else { Some((y0, y1)) }
            }
            None => Some((y0, y1)),
        }
    }

    pub(crate) fn rows(&self, grid: &SphereMap) -> Option<(u32, u32)> {
        self.rows_padded(grid, 0.0)
    }

    pub(crate) fn row_bounds_padded(&self, grid: &SphereMap, y: u32, extra: f32) -> RowBounds {
        let pad = grid.pixel_width() + extra;
        let (a0, a1) = self.band_angles(self.thickness + pad);
        band_row_bounds(grid, self.basis.v, a0, a1, y)
    }

    pub(crate) fn row_bounds(&self, grid: &SphereMap, y: u32) -> RowBounds {
        self.row_bounds_padded(grid, y, 0.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/ring.rs"]
mod tests;
