use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

use crate::foundation::error::{SphereError, SphereResult};
use crate::foundation::math::{DEGENERATE_SQ, acos_clamped, wrap_tau};
use crate::grid::basis::Basis;
use crate::grid::map::SphereMap;
use crate::shape::bounds::{RowBounds, Span};
use crate::shape::sample::{Bary, FAR, Sample};

/// Maximum angular radius of a face: every vertex must lie within this many
/// radians of the normalized centroid. The gnomonic projection degrades
/// toward the hemisphere boundary, so oversized faces are rejected outright
/// instead of silently rendering wrong.
pub const MAX_VERTEX_SPREAD: f32 = 1.2;

/// Support floor for the gnomonic projection: points whose dot with the face
/// normal falls below this are reported as far away.
const MIN_SUPPORT: f32 = 0.2;

/// An arbitrary spherical polygon over shared vertices.
///
/// Vertices are projected once into the tangent plane of their normalized
/// centroid (gnomonic projection: divide by the dot with the plane normal);
/// the point-in-polygon test and point-to-edge distances then run entirely
/// in 2D. Projected distances approximate angular units; the error is
/// acceptable for faces within [`MAX_VERTEX_SPREAD`] of their centroid.
///
/// Interior points additionally carry barycentric weights against the
/// `(0, i, i+1)` triangle fan for color interpolation.
pub struct Face {
    verts: Vec<Vec3>,
    ids: Vec<u32>,
    normal: Vec3,
    e1: Vec3,
    e2: Vec3,
    pts: Vec<Vec2>,
    face_id: u32,
    phi_lo: f32,
    phi_hi: f32,
    /// Azimuth window as (center, half-width); `None` scans the whole band.
    band: Option<(f32, f32)>,
}

impl Face {
    /// Build a standalone face from its vertex directions, in order.
    pub fn new(vertices: Vec<Vec3>) -> SphereResult<Self> {
        let ids = (0..vertices.len() as u32).collect();
        Self::build(vertices, ids, 0)
    }

    /// Build a face over a mesh's shared vertex list.
    pub(crate) fn from_mesh(all: &[Vec3], ids: &[u32], face_id: u32) -> SphereResult<Self> {
        let mut verts = Vec::with_capacity(ids.len());
        for &i in ids {
            let v = all.get(i as usize).copied().ok_or_else(|| {
                SphereError::geometry(format!("face references missing vertex {i}"))
            })?;
            verts.push(v);
        }
        Self::build(verts, ids.to_vec(), face_id)
    }

    fn build(mut verts: Vec<Vec3>, ids: Vec<u32>, face_id: u32) -> SphereResult<Self> {
        if verts.len() < 3 {
            return Err(SphereError::geometry("face needs at least 3 vertices"));
        }
        for v in &mut verts {
            if v.length_squared() < DEGENERATE_SQ {
                return Err(SphereError::geometry("face has a zero-length vertex"));
            }
            *v = v.normalize();
        }
        let centroid: Vec3 = verts.iter().sum();
        if centroid.length_squared() < DEGENERATE_SQ {
            return Err(SphereError::geometry("face vertices cancel out"));
        }
        let normal = centroid.normalize();

        let max_spread_cos = MAX_VERTEX_SPREAD.cos();
        for v in &verts {
            if v.dot(normal) < max_spread_cos {
                return Err(SphereError::geometry(format!(
                    "face vertex further than {MAX_VERTEX_SPREAD} rad from centroid"
                )));
            }
        }

        // Basis::around never fails on a unit normal.
        let frame = Basis::around(normal)
            .ok_or_else(|| SphereError::geometry("face normal is degenerate"))?;
        let (e1, e2) = (frame.w, frame.u);

        let pts = verts
            .iter()
            .map(|v| {
                let q3 = *v / v.dot(normal);
                Vec2::new(q3.dot(e1), q3.dot(e2))
            })
            .collect();

        let (phi_lo, phi_hi, band) = Self::compute_bounds(&verts, normal);

        Ok(Self { verts, ids, normal, e1, e2, pts, face_id, phi_lo, phi_hi, band })
    }

    /// Polar and azimuthal extents of the boundary, once at construction.
    ///
    /// Vertices alone are not enough: a great-circle edge can bulge further
    /// poleward than either endpoint, and a face can wind around a pole
    /// entirely. Both cases are handled here.
    fn compute_bounds(verts: &[Vec3], normal: Vec3) -> (f32, f32, Option<(f32, f32)>) {
        let n = verts.len();
        let mut phi_lo = f32::INFINITY;
        let mut phi_hi: f32 = 0.0;
        for v in verts {
            let phi = acos_clamped(v.y);
            phi_lo = phi_lo.min(phi);
            phi_hi = phi_hi.max(phi);
        }

        let theta_c = verts_theta(normal);
        let mut rel_lo: f32 = 0.0;
        let mut rel_hi: f32 = 0.0;
        let mut winding: f32 = 0.0;

        for i in 0..n {
            let a = verts[i];
            let b = verts[(i + 1) % n];
            let g = a.cross(b);
            if g.length_squared() < DEGENERATE_SQ {
                continue;
            }
            let g = g.normalize();

            // Poleward bulge: the edge's great circle peaks at the point
            // maximizing |y|; include it when it lies on the arc.
            let t = Vec3::Y - g * g.y;
            if t.length_squared() > DEGENERATE_SQ {
                let t = t.normalize();
                for cand in [t, -t] {
                    if within_arc(a, b, g, cand) {
                        let phi = acos_clamped(cand.y);
                        phi_lo = phi_lo.min(phi);
                        phi_hi = phi_hi.max(phi);
                    }
                }
            }

            // Longitude sweeps monotonically along any non-meridian arc;
            // the sweep direction is the sign of g.y.
            let ra = rel_theta(verts_theta(a), theta_c);
            let step = if g.y >= 0.0 {
                let d = wrap_tau(verts_theta(b) - verts_theta(a));
                rel_lo = rel_lo.min(ra);
                rel_hi = rel_hi.max(ra + d);
                d
            } else {
                let d = wrap_tau(verts_theta(a) - verts_theta(b));
                rel_lo = rel_lo.min(ra - d);
                rel_hi = rel_hi.max(ra);
                -d
            };
            winding += step;
        }

        // A nonzero net winding means the boundary encircles a pole; pin the
        // row range to that pole and scan whole rows.
        if winding.abs() > 1.0 {
            if normal.y >= 0.0 {
                phi_lo = 0.0;
            } else {
                phi_hi = PI;
            }
            return (phi_lo, phi_hi, None);
        }
        if rel_hi - rel_lo >= TAU {
            return (phi_lo, phi_hi, None);
        }
        let center = theta_c + (rel_lo + rel_hi) * 0.5;
        let half = (rel_hi - rel_lo) * 0.5;
        (phi_lo, phi_hi, Some((center, half)))
    }

    /// Directions of this face's vertices.
    pub fn vertices(&self) -> &[Vec3] {
        &self.verts
    }

    pub(crate) fn distance(&self, p: Vec3, out: &mut Sample) {
        let s = p.dot(self.normal);
        if s < MIN_SUPPORT {
            out.distance = FAR;
            return;
        }
        let q3 = p / s;
        let q = Vec2::new(q3.dot(self.e1), q3.dot(self.e2));

        let n = self.pts.len();
        let mut inside = false;
        let mut best = f32::INFINITY;
        for i in 0..n {
            let a = self.pts[i];
            let b = self.pts[(i + 1) % n];
            if (a.y > q.y) != (b.y > q.y) {
                let x_at = a.x + (q.y - a.y) / (b.y - a.y) * (b.x - a.x);
                if q.x < x_at {
                    inside = !inside;
                }
            }
            let e = b - a;
            let len_sq = e.length_squared();
            let h = if len_sq > 0.0 { ((q - a).dot(e) / len_sq).clamp(0.0, 1.0) } else { 0.0 };
            best = best.min((q - (a + e * h)).length());
        }

        out.distance = if inside { -best } else { best };
        out.t = wrap_tau(q.y.atan2(q.x)) / TAU;
        out.face = Some(self.face_id);
        if inside {
            out.bary = self.fan_bary(q);
        }
    }

    /// Barycentric weights of `q` against the first fan triangle containing it.
    fn fan_bary(&self, q: Vec2) -> Option<Bary> {
        let p0 = self.pts[0];
        for i in 1..self.pts.len() - 1 {
            let p1 = self.pts[i];
            let p2 = self.pts[i + 1];
            let den = (p1 - p0).perp_dot(p2 - p0);
            if den.abs() < 1e-12 {
                continue;
            }
            let w1 = (q - p0).perp_dot(p2 - p0) / den;
            let w2 = (p1 - p0).perp_dot(q - p0) / den;
            let w0 = 1.0 - w1 - w2;
            let eps = -1e-4;
            if w0 >= eps && w1 >= eps && w2 >= eps {
                return Some(Bary {
                    weights: [w0, w1, w2],
                    tri: [self.ids[0], self.ids[i], self.ids[i + 1]],
                });
            }
        }
        None
    }

    pub(crate) fn rows(&self, grid: &SphereMap) -> Option<(u32, u32)> {
        let pad = 2.0 * grid.pixel_width();
        let pitch = grid.row_pitch();
        let y0 = ((self.phi_lo - pad) / pitch).floor().max(0.0) as u32;
        let y1 = (((self.phi_hi + pad) / pitch).ceil().max(0.0) as u32).min(grid.height() - 1);
        Some((y0, y1))
    }

    pub(crate) fn row_bounds(&self, grid: &SphereMap, _y: u32) -> RowBounds {
        match self.band {
            None => RowBounds::Full,
            Some((center, half)) => RowBounds::from_window(Span::from_window(
                grid.width(),
                grid.col_pitch(),
                center,
                half + 2.0 * grid.pixel_width(),
            )),
        }
    }

    /// Smallest cap around the centroid normal covering the whole face.
    ///
    /// The farthest point from the normal lies on the boundary (or at an
    /// enclosed pole), so candidates are the vertices, each edge arc's
    /// farthest point, and the pole for winding faces.
    pub(crate) fn bounding_cap(&self) -> (Vec3, f32) {
        let n = self.verts.len();
        let mut min_dot: f32 = 1.0;
        for v in &self.verts {
            min_dot = min_dot.min(v.dot(self.normal));
        }
        for i in 0..n {
            let a = self.verts[i];
            let b = self.verts[(i + 1) % n];
            let g = a.cross(b);
            if g.length_squared() < DEGENERATE_SQ {
                continue;
            }
            let g = g.normalize();
            let tangential = self.normal - g * g.dot(self.normal);
            if tangential.length_squared() < DEGENERATE_SQ {
                continue;
            }
            let far = -tangential.normalize();
            if within_arc(a, b, g, far) {
                min_dot = min_dot.min(far.dot(self.normal));
            }
        }
        if self.band.is_none() {
            let pole = Vec3::new(0.0, if self.normal.y >= 0.0 { 1.0 } else { -1.0 }, 0.0);
            min_dot = min_dot.min(pole.dot(self.normal));
        }
        (self.normal, acos_clamped(min_dot))
    }

    pub(crate) fn phi_range(&self) -> (f32, f32) {
        (self.phi_lo, self.phi_hi)
    }

    pub(crate) fn band(&self) -> Option<(f32, f32)> {
        self.band
    }
}

fn verts_theta(v: Vec3) -> f32 {
    wrap_tau(v.x.atan2(v.z))
}

/// Offset of `theta` from `center`, wrapped into `(-PI, PI]`.
fn rel_theta(theta: f32, center: f32) -> f32 {
    let mut d = (theta - center).rem_euclid(TAU);
    if d > PI {
        d -= TAU;
    }
    d
}

/// Whether `t` lies on the minor arc from `a` to `b` on the great circle
/// with normal `g`.
fn within_arc(a: Vec3, b: Vec3, g: Vec3, t: Vec3) -> bool {
    let eps = -1e-6;
    a.cross(t).dot(g) >= eps && t.cross(b).dot(g) >= eps
}

#[cfg(test)]
#[path = "../../tests/unit/shape/face.rs"]
mod tests;
