use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::foundation::math::{acos_clamped, wrap_tau};
use crate::grid::basis::Basis;
use crate::grid::map::SphereMap;
use crate::shape::bounds::{RowBounds, band_row_bounds, band_rows};
use crate::shape::sample::Sample;

/// Fold an azimuth into its nearest sector, returning the local offset in
/// `(-sector/2, sector/2]`. Sector centres sit on the edge midpoints.
fn fold_sector(az: f32, sector: f32) -> f32 {
    let mut a = az.rem_euclid(sector);
    if a > sector * 0.5 {
        a -= sector;
    }
    a
}

/// A regular N-gon on the sphere, evaluated analytically per sector.
///
/// Distance is the per-sector apothem form `rho * cos(local_az) - apothem`
/// with `rho` the polar angle from the axis and `local_az` folded into the
/// nearest `TAU / sides` sector. Solid; negative inside.
pub struct SphericalPolygon {
    basis: Basis,
    radius: f32,
    apothem: f32,
    sector: f32,
}

impl SphericalPolygon {
    /// Build a regular polygon with `sides >= 3` and circumradius `radius`
    /// radians (polar angle of the vertices).
    pub fn new(axis: Vec3, sides: u32, radius: f32) -> Option<Self> {
        if sides < 3 {
            return None;
        }
        let basis = Basis::around(axis)?;
        let radius = radius.clamp(1e-3, PI - 1e-3);
        let sector = TAU / sides as f32;
        Some(Self {
            basis,
            radius,
            apothem: radius * (sector * 0.5).cos(),
            sector,
        })
    }

    pub(crate) fn distance(&self, p: Vec3, out: &mut Sample) {
        let rho = acos_clamped(self.basis.v.dot(p));
        let az = self.basis.azimuth(p);
        let a = fold_sector(az, self.sector);
        out.distance = rho * a.cos() - self.apothem;
        out.t = wrap_tau(az) / TAU;
    }

    pub(crate) fn rows(&self, grid: &SphereMap) -> Option<(u32, u32)> {
        band_rows(grid, self.basis.v, -1.0, self.radius + 2.0 * grid.pixel_width())
    }

    pub(crate) fn row_bounds(&self, grid: &SphereMap, y: u32) -> RowBounds {
        band_row_bounds(grid, self.basis.v, -1.0, self.radius + 2.0 * grid.pixel_width(), y)
    }
}

/// A regular star: alternating outer and inner vertices.
///
/// One outer/inner vertex pair and one edge are computed at construction and
/// reused across every spike by sector folding and mirroring.
pub struct Star {
    basis: Basis,
    outer: f32,
    sector: f32,
    tip: Vec2,
    notch: Vec2,
}

impl Star {
    /// Build a star with `spikes >= 2`, tip polar angle `outer` and notch
    /// polar angle `inner` (both radians, `inner < outer`).
    pub fn new(axis: Vec3, spikes: u32, outer: f32, inner: f32) -> Option<Self> {
        if spikes < 2 {
            return None;
        }
        let basis = Basis::around(axis)?;
        let outer = outer.clamp(1e-3, PI - 1e-3);
        let inner = inner.clamp(1e-3, outer);
        let sector = TAU / spikes as f32;
        let half = sector * 0.5;
        Some(Self {
            basis,
            outer,
            sector,
            tip: Vec2::new(outer, 0.0),
            notch: Vec2::new(inner * half.cos(), inner * half.sin()),
        })
    }

    pub(crate) fn distance(&self, p: Vec3, out: &mut Sample) {
        let rho = acos_clamped(self.basis.v.dot(p));
        let az = self.basis.azimuth(p);
        // Mirror into the half-sector holding one tip-to-notch edge.
        let a = fold_sector(az, self.sector).abs();
        let q = Vec2::new(rho * a.cos(), rho * a.sin());

        let e = self.notch - self.tip;
        let h = ((q - self.tip).dot(e) / e.length_squared()).clamp(0.0, 1.0);
        let closest = self.tip + e * h;
        let dist = (q - closest).length();
        let side = e.x * (q.y - self.tip.y) - e.y * (q.x - self.tip.x);
        out.distance = if side > 0.0 { -dist } else { dist };
        out.t = wrap_tau(az) / TAU;
    }

    pub(crate) fn rows(&self, grid: &SphereMap) -> Option<(u32, u32)> {
        band_rows(grid, self.basis.v, -1.0, self.outer + 2.0 * grid.pixel_width())
    }

    pub(crate) fn row_bounds(&self, grid: &SphereMap, y: u32) -> RowBounds {
        band_row_bounds(grid, self.basis.v, -1.0, self.outer + 2.0 * grid.pixel_width(), y)
    }
}

/// A flower: the regular polygon's polar antipode.
///
/// Built as the complement of an N-gon of circumradius `PI - radius` around
/// the negated axis, which turns the polygon's straight edges into petals
/// bulging outward between the vertices.
pub struct Flower {
    basis: Basis,
    apothem: f32,
    sector: f32,
    max_rho: f32,
}

impl Flower {
    /// Build a flower with `petals >= 3` and vertex polar angle `radius`
    /// radians; petal tips reach further out than `radius`.
    pub fn new(axis: Vec3, petals: u32, radius: f32) -> Option<Self> {
        if petals < 3 {
            return None;
        }
        let basis = Basis::around(axis)?;
        let radius = radius.clamp(1e-3, PI - 1e-3);
        let sector = TAU / petals as f32;
        let apothem = (PI - radius) * (sector * 0.5).cos();
        Some(Self {
            basis,
            apothem,
            sector,
            max_rho: PI - apothem,
        })
    }

    pub(crate) fn distance(&self, p: Vec3, out: &mut Sample) {
        let rho = acos_clamped(self.basis.v.dot(p));
        let az = self.basis.azimuth(p);
        let a = fold_sector(az, self.sector);
        // Negated antipodal polygon distance: apothem measured from PI - radius.
        out.distance = self.apothem - (PI - rho) * a.cos();
        out.t = wrap_tau(az) / TAU;
    }

    pub(crate) fn rows(&self, grid: &SphereMap) -> Option<(u32, u32)> {
        band_rows(grid, self.basis.v, -1.0, self.max_rho + 2.0 * grid.pixel_width())
    }

    pub(crate) fn row_bounds(&self, grid: &SphereMap, y: u32) -> RowBounds {
        band_row_bounds(grid, self.basis.v, -1.0, self.max_rho + 2.0 * grid.pixel_width(), y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/polygon.rs"]
mod tests;
