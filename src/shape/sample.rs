/// Large finite distance reported by shapes for "no contribution" points.
///
/// Finite so SDF min/max algebra stays well-behaved in combinators.
pub(crate) const FAR: f32 = 1.0e3;

/// Barycentric attribution for a point inside a face.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bary {
    /// Weights over the fan triangle, summing to 1.
    pub weights: [f32; 3],
    /// Vertex indices of the fan triangle `(0, i, i+1)` in mesh order.
    pub tri: [u32; 3],
}

/// Result record written by [`crate::Shape::distance`].
///
/// One `Sample` is reused for every pixel of a rasterization call; the
/// record is only valid until the next `distance` call writes over it.
/// Callers needing the values past that point must copy them out.
#[derive(Clone, Copy, Debug)]
pub struct Sample {
    /// Signed angular distance; negative inside.
    pub distance: f32,
    /// Parametric position along the shape (azimuth / perimeter progress),
    /// in `[0, 1)`.
    pub t: f32,
    /// Barycentric weights and fan-triangle vertex ids (Face/Mesh only).
    pub bary: Option<Bary>,
    /// Index of the face that produced the sample (Face/Mesh only).
    pub face: Option<u32>,
    /// Most-recently-hit face, carried across pixels so coherent scans skip
    /// the mesh lookup. Survives [`Sample::reset`].
    pub(crate) face_hint: Option<u32>,
}

impl Sample {
    /// A fresh sample reporting no contribution.
    pub fn new() -> Self {
        Self {
            distance: FAR,
            t: 0.0,
            bary: None,
            face: None,
            face_hint: None,
        }
    }

    /// Clear per-pixel fields, keeping the face hint.
    pub(crate) fn reset(&mut self) {
        self.distance = FAR;
        self.t = 0.0;
        self.bary = None;
        self.face = None;
    }
}

impl Default for Sample {
    fn default() -> Self {
        Self::new()
    }
}
