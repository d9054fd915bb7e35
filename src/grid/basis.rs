use glam::Vec3;

use crate::foundation::math::DEGENERATE_SQ;

/// Right-handed orthonormal frame `{u, v, w}` anchored to a shape's polar
/// axis `v`.
///
/// `u` and `w` span the plane normal to the axis and are used to measure
/// azimuth around it: `azimuth(p) = atan2(p . u, p . w)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Basis {
    /// First tangential direction.
    pub u: Vec3,
    /// The polar axis.
    pub v: Vec3,
    /// Second tangential direction.
    pub w: Vec3,
}

/// Reference direction used to orient `w` when building a frame.
const DEFAULT_REF: Vec3 = Vec3::Y;
/// Fallback reference for axes parallel to [`DEFAULT_REF`].
const FALLBACK_REF: Vec3 = Vec3::Z;

impl Basis {
    /// Build a frame around `axis` (normalized internally).
    ///
    /// Returns `None` for near-zero axes. When the axis is parallel to the
    /// default reference the fallback reference keeps the cross products
    /// non-degenerate.
    pub fn around(axis: Vec3) -> Option<Self> {
        if axis.length_squared() < DEGENERATE_SQ {
            return None;
        }
        let v = axis.normalize();

        let mut u = DEFAULT_REF.cross(v);
        if u.length_squared() < DEGENERATE_SQ {
            u = FALLBACK_REF.cross(v);
        }
        let u = u.normalize();
        let w = u.cross(v);
        Some(Self { u, v, w })
    }

    /// Azimuth of `p` around the axis, in `(-PI, PI]`.
    pub fn azimuth(&self, p: Vec3) -> f32 {
        p.dot(self.u).atan2(p.dot(self.w))
    }

    /// The frame with its polar axis negated (u flipped to stay right-handed).
    pub fn flipped(&self) -> Self {
        Self { u: -self.u, v: -self.v, w: self.w }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/basis.rs"]
mod tests;
