//! Analytic shape primitives defined directly in angular coordinates.
//!
//! Every shape answers the same three questions: which rows it can touch
//! ([`Shape::rows`]), which columns of one row it can touch
//! ([`Shape::row_bounds`]), and its signed angular distance at a direction
//! ([`Shape::distance`]). The rasterizer never sees anything else.

pub mod bounds;
mod boolean;
pub mod distort;
pub mod face;
pub mod mesh;
pub mod polygon;
pub mod ring;
pub mod sample;

use std::f32::consts::TAU;

use glam::Vec3;

use crate::foundation::error::SphereResult;
use crate::grid::basis::Basis;
use crate::grid::map::SphereMap;
use crate::shape::bounds::RowBounds;
use crate::shape::distort::{AzimuthShift, DistortedRing};
use crate::shape::face::Face;
use crate::shape::mesh::Mesh;
use crate::shape::polygon::{Flower, SphericalPolygon, Star};
use crate::shape::ring::Ring;
use crate::shape::sample::{FAR, Sample};

/// How the rasterizer derives coverage from a shape's distance field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RenderStyle {
    /// Filled region; a half-pixel ramp anti-aliases the zero crossing.
    Solid,
    /// Stroke of the given half-width; coverage ramps from the stroke
    /// centre out to the declared thickness.
    Stroked(f32),
}

/// The closed set of renderable shapes.
///
/// Degenerate construction inputs (zero axes, parallel segment endpoints)
/// yield [`Shape::Empty`], which contributes nothing, rather than an error:
/// a vanishing shape is a normal frame of an animation, not a bug.
///
/// Boolean combinators own their children; shapes are immutable once built
/// and are intended to be constructed once per draw call.
pub enum Shape {
    /// Contributes nothing; the result of degenerate construction input.
    Empty,
    /// Stroked circle at constant angle from an axis.
    Ring(Ring),
    /// Ring with a per-azimuth target perturbation.
    Distorted(DistortedRing),
    /// Regular N-gon evaluated analytically per sector.
    Polygon(SphericalPolygon),
    /// Regular star via one folded tip-to-notch edge.
    Star(Star),
    /// Polygon's polar antipode; petals bulge between vertices.
    Flower(Flower),
    /// Arbitrary spherical polygon via tangent-plane projection.
    Face(Face),
    /// Face collection with accelerated point lookup.
    Mesh(Mesh),
    /// Pointwise minimum of two children.
    Union(Box<Shape>, Box<Shape>),
    /// Pointwise maximum of two children.
    Intersection(Box<Shape>, Box<Shape>),
    /// Left child with the right child carved out.
    Subtract(Box<Shape>, Box<Shape>),
}

impl Shape {
    /// Stroked ring around `axis`; radius in `[0, 2]` quarter turns,
    /// thickness in radians.
    pub fn ring(axis: Vec3, radius: f32, thickness: f32) -> Self {
        match Ring::new(axis, radius, thickness) {
            Some(r) => Self::Ring(r),
            None => degenerate("ring axis"),
        }
    }

    /// Great-circle line segment from `a` to `b`, stroked.
    pub fn segment(a: Vec3, b: Vec3, thickness: f32) -> Self {
        match Ring::segment(a, b, thickness) {
            Some(r) => Self::Ring(r),
            None => degenerate("segment endpoints"),
        }
    }

    /// Regular polygon; `radius` is the vertex polar angle in radians.
    pub fn polygon(axis: Vec3, sides: u32, radius: f32) -> Self {
        match SphericalPolygon::new(axis, sides, radius) {
            Some(s) => Self::Polygon(s),
            None => degenerate("polygon input"),
        }
    }

    /// Regular star with tip and notch polar angles in radians.
    pub fn star(axis: Vec3, spikes: u32, outer: f32, inner: f32) -> Self {
        match Star::new(axis, spikes, outer, inner) {
            Some(s) => Self::Star(s),
            None => degenerate("star input"),
        }
    }

    /// Flower with petal-notch polar angle `radius` in radians.
    pub fn flower(axis: Vec3, petals: u32, radius: f32) -> Self {
        match Flower::new(axis, petals, radius) {
            Some(f) => Self::Flower(f),
            None => degenerate("flower input"),
        }
    }

    /// Regular polygon realized by sampling vertices and delegating to a
    /// [`Face`]; carries barycentric attribution, unlike [`Shape::polygon`].
    pub fn planar_polygon(axis: Vec3, sides: u32, radius: f32) -> SphereResult<Self> {
        let basis = match Basis::around(axis) {
            Some(b) => b,
            None => return Ok(degenerate("planar polygon axis")),
        };
        let sector = TAU / sides.max(3) as f32;
        let (sin_r, cos_r) = radius.sin_cos();
        let verts: Vec<Vec3> = (0..sides.max(3))
            .map(|i| {
                let az = (i as f32 + 0.5) * sector;
                let (sin_az, cos_az) = az.sin_cos();
                basis.v * cos_r + (basis.u * sin_az + basis.w * cos_az) * sin_r
            })
            .collect();
        Ok(Self::Face(Face::new(verts)?))
    }

    /// Union: covered where either child is.
    pub fn union(self, other: Self) -> Self {
        Self::Union(Box::new(self), Box::new(other))
    }

    /// Intersection: covered where both children are.
    pub fn intersect(self, other: Self) -> Self {
        Self::Intersection(Box::new(self), Box::new(other))
    }

    /// Subtraction: covered where `self` is and `other` is not.
    pub fn subtract(self, other: Self) -> Self {
        Self::Subtract(Box::new(self), Box::new(other))
    }

    /// Coverage style the rasterizer should use. Combinators follow their
    /// left branch.
    pub fn style(&self) -> RenderStyle {
        match self {
            Self::Ring(r) => RenderStyle::Stroked(r.thickness()),
            Self::Distorted(d) => RenderStyle::Stroked(d.thickness()),
            Self::Union(a, _) | Self::Intersection(a, _) | Self::Subtract(a, _) => a.style(),
            _ => RenderStyle::Solid,
        }
    }

    /// Conservative range of rows the shape can touch, or `None` when it
    /// touches none.
    pub fn rows(&self, grid: &SphereMap) -> Option<(u32, u32)> {
        match self {
            Self::Empty => None,
            Self::Ring(s) => s.rows(grid),
            Self::Distorted(s) => s.rows(grid),
            Self::Polygon(s) => s.rows(grid),
            Self::Star(s) => s.rows(grid),
            Self::Flower(s) => s.rows(grid),
            Self::Face(s) => s.rows(grid),
            Self::Mesh(s) => s.rows(grid),
            Self::Union(a, b) => match (a.rows(grid), b.rows(grid)) {
                (Some((a0, a1)), Some((b0, b1))) => Some((a0.min(b0), a1.max(b1))),
                (r, None) | (None, r) => r,
            },
            Self::Intersection(a, b) => {
                let (a0, a1) = a.rows(grid)?;
                let (b0, b1) = b.rows(grid)?;
                let lo = a0.max(b0);
                let hi = a1.min(b1);
                if lo > hi { None } else { Some((lo, hi)) }
            }
            Self::Subtract(a, _) => a.rows(grid),
        }
    }

    /// Conservative column bounds for one row.
    pub fn row_bounds(&self, grid: &SphereMap, y: u32) -> RowBounds {
        match self {
            Self::Empty => RowBounds::Empty,
            Self::Ring(s) => s.row_bounds(grid, y),
            Self::Distorted(s) => s.row_bounds(grid, y),
            Self::Polygon(s) => s.row_bounds(grid, y),
            Self::Star(s) => s.row_bounds(grid, y),
            Self::Flower(s) => s.row_bounds(grid, y),
            Self::Face(s) => s.row_bounds(grid, y),
            Self::Mesh(s) => s.row_bounds(grid, y),
            Self::Union(a, b) => {
                a.row_bounds(grid, y).union(&b.row_bounds(grid, y), grid.width())
            }
            Self::Intersection(a, b) => {
                a.row_bounds(grid, y).intersect(&b.row_bounds(grid, y), grid.width())
            }
            Self::Subtract(a, _) => a.row_bounds(grid, y),
        }
    }

    /// Signed angular distance at direction `p`, written into `out`.
    ///
    /// `out` is a caller-owned scratch record, valid only until the next
    /// call; copy fields out to keep them. Every call fully redefines the
    /// record (the mesh face hint is the one field that survives).
    pub fn distance(&self, p: Vec3, out: &mut Sample) {
        out.reset();
        match self {
            Self::Empty => out.distance = FAR,
            Self::Ring(s) => s.distance(p, out),
            Self::Distorted(s) => s.distance(p, out),
            Self::Polygon(s) => s.distance(p, out),
            Self::Star(s) => s.distance(p, out),
            Self::Flower(s) => s.distance(p, out),
            Self::Face(s) => s.distance(p, out),
            Self::Mesh(s) => s.distance(p, out),
            Self::Union(a, b) => boolean::union_distance(a, b, p, out),
            Self::Intersection(a, b) => boolean::intersection_distance(a, b, p, out),
            Self::Subtract(a, b) => boolean::subtract_distance(a, b, p, out),
        }
    }

    /// Ring wrapped with a per-azimuth distortion closure.
    pub fn distorted(ring: Ring, shift: AzimuthShift, max_shift: f32) -> Self {
        Self::Distorted(DistortedRing::new(ring, shift, max_shift))
    }
}

impl From<Ring> for Shape {
    fn from(r: Ring) -> Self {
        Self::Ring(r)
    }
}

impl From<Face> for Shape {
    fn from(f: Face) -> Self {
        Self::Face(f)
    }
}

impl From<Mesh> for Shape {
    fn from(m: Mesh) -> Self {
        Self::Mesh(m)
    }
}

fn degenerate(what: &str) -> Shape {
    tracing::trace!(what, "degenerate shape input, dropping contribution");
    Shape::Empty
}

#[cfg(test)]
#[path = "../tests/unit/shape/combinators.rs"]
mod tests;
