use std::f32::consts::TAU;

use glam::Vec3;

use crate::foundation::error::{SphereError, SphereResult};
use crate::grid::map::SphereMap;
use crate::shape::bounds::{RowBounds, Span};
use crate::shape::face::Face;
use crate::shape::sample::{FAR, Sample};

/// Angular padding added to every face's bounding cap so near-miss pixels
/// (the anti-aliasing fringe) still resolve to their face.
const CAP_PAD: f32 = 0.02;

/// Box tolerance for point lookups.
const BOX_EPS: f32 = 1e-4;

/// Faces per leaf before the tree splits.
const LEAF_SIZE: usize = 4;

/// Fixed traversal stack depth; a median-split tree over `2^31` faces stays
/// far below this.
const STACK_DEPTH: usize = 64;

#[derive(Clone, Copy, Debug)]
struct Node {
    lo: Vec3,
    hi: Vec3,
    /// Child node indices for interior nodes.
    left: u32,
    right: u32,
    /// Face range into `order` for leaves; `len == 0` marks interior nodes.
    start: u32,
    len: u32,
}

/// A collection of [`Face`]s over a shared vertex list.
///
/// Built once per topology and reused read-only. Point lookups go through a
/// bounding-volume tree over per-face direction boxes; the most recently hit
/// face travels in the [`Sample`] scratch so spatially coherent scans skip
/// the tree entirely.
pub struct Mesh {
    faces: Vec<Face>,
    nodes: Vec<Node>,
    order: Vec<u32>,
    phi_lo: f32,
    phi_hi: f32,
    band: Option<(f32, f32)>,
}

impl Mesh {
    /// Build a mesh from vertex directions and per-face index loops.
    pub fn new(vertices: Vec<Vec3>, face_indices: &[Vec<u32>]) -> SphereResult<Self> {
        if face_indices.is_empty() {
            return Err(SphereError::geometry("mesh has no faces"));
        }
        let mut faces = Vec::with_capacity(face_indices.len());
        for (i, ids) in face_indices.iter().enumerate() {
            faces.push(Face::from_mesh(&vertices, ids, i as u32)?);
        }

        let boxes: Vec<(Vec3, Vec3)> = faces
            .iter()
            .map(|f| {
                let (normal, radius) = f.bounding_cap();
                cap_aabb(normal, radius + CAP_PAD)
            })
            .collect();

        let mut order: Vec<u32> = (0..faces.len() as u32).collect();
        let mut nodes = Vec::with_capacity(2 * faces.len());
        build_node(&boxes, &mut order, 0, faces.len(), &mut nodes);

        let (phi_lo, phi_hi, band) = aggregate_bounds(&faces);

        Ok(Self { faces, nodes, order, phi_lo, phi_hi, band })
    }

    /// The mesh's faces, in construction order.
    pub fn faces(&self) -> &[Face] {
        &self.faces
    }

    pub(crate) fn distance(&self, p: Vec3, out: &mut Sample) {
        // Coherent scans usually land on the same face as the last pixel.
        if let Some(hint) = out.face_hint {
            if let Some(face) = self.faces.get(hint as usize) {
                let mut probe = Sample::new();
                face.distance(p, &mut probe);
                if probe.distance < 0.0 {
                    write_winner(out, &probe, hint);
                    return;
                }
            }
        }

        let mut best = Sample::new();
        let mut best_face = None;
        let mut stack = [0u32; STACK_DEPTH];
        let mut top = 0;
        if !self.nodes.is_empty() {
            stack[0] = 0;
            top = 1;
        }
        let mut probe = Sample::new();
        'search: while top > 0 {
            top -= 1;
            let node = &self.nodes[stack[top] as usize];
            if !box_contains(node.lo, node.hi, p) {
                continue;
            }
            if node.len == 0 {
                if top + 2 <= STACK_DEPTH {
                    stack[top] = node.left;
                    stack[top + 1] = node.right;
                    top += 2;
                }
                continue;
            }
            for &fi in &self.order[node.start as usize..(node.start + node.len) as usize] {
                probe.reset();
                self.faces[fi as usize].distance(p, &mut probe);
                if probe.distance < best.distance {
                    best = probe;
                    best_face = Some(fi);
                    if best.distance < 0.0 {
                        break 'search;
                    }
                }
            }
        }

        match best_face {
            Some(fi) if best.distance < FAR => {
                let inside = best.distance < 0.0;
                write_winner(out, &best, fi);
                if inside {
                    out.face_hint = Some(fi);
                }
            }
            _ => {
                out.distance = FAR;
            }
        }
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
}

fn write_winner(out: &mut Sample, won: &Sample, face: u32) {
    out.distance = won.distance;
    out.t = won.t;
    out.bary = won.bary;
    out.face = Some(face);
}

fn box_contains(lo: Vec3, hi: Vec3, p: Vec3) -> bool {
    p.x >= lo.x - BOX_EPS
        && p.x <= hi.x + BOX_EPS
        && p.y >= lo.y - BOX_EPS
        && p.y <= hi.y + BOX_EPS
        && p.z >= lo.z - BOX_EPS
        && p.z <= hi.z + BOX_EPS
}

/// Exact axis-aligned box of the spherical cap around `normal` with angular
/// radius `a_max`.
///
/// Per axis, the extremes of `n_i cos(t) ± sqrt(1 - n_i^2) sin(t)` over
/// `t in [0, a_max]` are either at the endpoints or saturate at `+-1` when
/// the stationary angle falls inside the range.
fn cap_aabb(normal: Vec3, a_max: f32) -> (Vec3, Vec3) {
    let a_max = a_max.clamp(0.0, std::f32::consts::PI);
    let (sin_a, cos_a) = a_max.sin_cos();
    let mut lo = Vec3::ZERO;
    let mut hi = Vec3::ZERO;
    for i in 0..3 {
        let a = normal[i];
        let b = (1.0 - a * a).max(0.0).sqrt();
        let mut mx = a.max(a * cos_a + b * sin_a);
        let mut mn = a.min(a * cos_a - b * sin_a);
        let phase = b.atan2(a);
        if phase <= a_max {
            mx = 1.0;
        }
        if std::f32::consts::PI - phase <= a_max {
            mn = -1.0;
        }
        lo[i] = mn;
        hi[i] = mx;
    }
    (lo, hi)
}

/// Median-split build over face boxes; returns the new node's index.
fn build_node(
    boxes: &[(Vec3, Vec3)],
    order: &mut [u32],
    start: usize,
    len: usize,
    nodes: &mut Vec<Node>,
) -> u32 {
    let mut lo = Vec3::splat(f32::INFINITY);
    let mut hi = Vec3::splat(f32::NEG_INFINITY);
    for &fi in &order[start..start + len] {
        let b = boxes[fi as usize];
        lo = lo.min(b.0);
        hi = hi.max(b.1);
    }

    let index = nodes.len() as u32;
    if len <= LEAF_SIZE {
        nodes.push(Node { lo, hi, left: 0, right: 0, start: start as u32, len: len as u32 });
        return index;
    }

    let extent = hi - lo;
    let axis = if extent.x >= extent.y && extent.x >= extent.z {
        0
    } else if extent.y >= extent.z {
        1
    } else {
        2
    };
    let mid = len / 2;
    order[start..start + len].select_nth_unstable_by(mid, |&a, &b| {
        let ca = boxes[a as usize].0[axis] + boxes[a as usize].1[axis];
        let cb = boxes[b as usize].0[axis] + boxes[b as usize].1[axis];
        ca.partial_cmp(&cb).unwrap_or(std::cmp::Ordering::Equal)
    });

    nodes.push(Node { lo, hi, left: 0, right: 0, start: 0, len: 0 });
    let left = build_node(boxes, order, start, mid, nodes);
    let right = build_node(boxes, order, start + mid, len - mid, nodes);
    nodes[index as usize].left = left;
    nodes[index as usize].right = right;
    index
}

fn aggregate_bounds(faces: &[Face]) -> (f32, f32, Option<(f32, f32)>) {
    let mut phi_lo = f32::INFINITY;
    let mut phi_hi: f32 = 0.0;
    let mut band: Option<(f32, f32)> = None;
    let mut first_center = None;
    let mut rel_lo: f32 = 0.0;
    let mut rel_hi: f32 = 0.0;
    let mut full = false;

    for face in faces {
        let (lo, hi) = face.phi_range();
        phi_lo = phi_lo.min(lo);
        phi_hi = phi_hi.max(hi);
        match face.band() {
            None => full = true,
            Some((center, half)) => {
                let base = *first_center.get_or_insert(center);
                let mut rel = (center - base).rem_euclid(TAU);
                if rel > std::f32::consts::PI {
                    rel -= TAU;
                }
                rel_lo = rel_lo.min(rel - half);
                rel_hi = rel_hi.max(rel + half);
            }
        }
    }

    if !full && rel_hi - rel_lo < TAU {
        if let Some(base) = first_center {
            band = Some((base + (rel_lo + rel_hi) * 0.5, (rel_hi - rel_lo) * 0.5));
        }
    }
    (phi_lo, phi_hi, band)
}

#[cfg(test)]
#[path = "../../tests/unit/shape/mesh.rs"]
mod tests;
