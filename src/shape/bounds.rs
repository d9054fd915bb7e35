//! Latitude/longitude interval math with pole and wraparound handling.
//!
//! Shapes report conservative pixel bounds through these types: a vertical
//! row range plus, per row, zero, one or a few wrapping column spans. All
//! operations here err toward scanning more pixels, never fewer; whenever an
//! exact conservative bound is unclear the answer degrades to
//! [`RowBounds::Full`].

use std::f32::consts::PI;

use glam::Vec3;

use crate::foundation::math::{NEAR_AXIS, acos_clamped, fold_polar};
use crate::grid::map::SphereMap;

/// Maximum number of spans a row can carry before degrading to a full scan.
pub(crate) const MAX_SPANS: usize = 4;

/// A contiguous run of pixel columns, wrapping mod the display width.
///
/// Covers columns `start, start+1, ..., start+len-1`, each taken mod W.
/// `start` is always in `[0, W)` and `len` in `[1, W]`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Span {
    /// First column, in `[0, W)`.
    pub start: u32,
    /// Number of columns covered.
    pub len: u32,
}

impl Span {
    /// Conservative span for the azimuth window `center +- half_width`,
    /// padded by one pixel column on each side.
    ///
    /// Returns `None` when the padded window covers the whole circle.
    pub(crate) fn from_window(width: u32, col_pitch: f32, center: f32, half_width: f32) -> Option<Self> {
        let lo = ((center - half_width) / col_pitch).floor() as i64 - 1;
        let hi = ((center + half_width) / col_pitch).ceil() as i64 + 1;
        let len = hi - lo + 1;
        if len >= width as i64 {
            return None;
        }
        let start = lo.rem_euclid(width as i64) as u32;
        Some(Self { start, len: len as u32 })
    }

    /// Whether column `x` falls inside this span.
    pub fn contains(&self, x: u32, width: u32) -> bool {
        (x + width - self.start) % width < self.len
    }
}

/// A fixed-capacity set of disjoint spans for one scanline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpanSet {
    spans: [Span; MAX_SPANS],
    len: u8,
}

const EMPTY_SPAN: Span = Span { start: 0, len: 0 };

impl SpanSet {
    pub(crate) fn new() -> Self {
        Self { spans: [EMPTY_SPAN; MAX_SPANS], len: 0 }
    }

    /// Push a span; `false` means the set is at capacity.
    pub(crate) fn push(&mut self, span: Span) -> bool {
        if (self.len as usize) < MAX_SPANS {
            self.spans[self.len as usize] = span;
            self.len += 1;
            true
        } else {
            false
        }
    }

    /// The spans currently held.
    pub fn spans(&self) -> &[Span] {
        &self.spans[..self.len as usize]
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Column bounds a shape reports for one scanline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowBounds {
    /// The shape cannot touch this row.
    Empty,
    /// Scan every column; reported near poles and axis singularities.
    Full,
    /// Scan only the listed wrapping spans.
    Spans(SpanSet),
}

impl RowBounds {
    /// Bounds holding a single span.
    pub(crate) fn single(span: Span) -> Self {
        let mut set = SpanSet::new();
        set.push(span);
        Self::Spans(set)
    }

    /// Bounds from an optional window span (`None` meaning the whole row).
    pub(crate) fn from_window(span: Option<Span>) -> Self {
        match span {
            Some(s) => Self::single(s),
            None => Self::Full,
        }
    }

    /// Whether column `x` would be scanned under these bounds.
    pub fn contains(&self, x: u32, width: u32) -> bool {
        match self {
            Self::Empty => false,
            Self::Full => true,
            Self::Spans(set) => set.spans().iter().any(|s| s.contains(x, width)),
        }
    }

    /// Union of two row bounds (used by [`crate::Shape`] unions).
    pub(crate) fn union(&self, other: &Self, width: u32) -> Self {
        match (self, other) {
            (Self::Full, _) | (_, Self::Full) => Self::Full,
            (Self::Empty, b) => *b,
            (a, Self::Empty) => *a,
            (Self::Spans(a), Self::Spans(b)) => {
                let mut all = [EMPTY_SPAN; MAX_SPANS * 2];
                let mut n = 0;
                for s in a.spans().iter().chain(b.spans()) {
                    all[n] = *s;
                    n += 1;
                }
                merge_spans(&mut all[..n], width)
            }
        }
    }

    /// Intersection of two row bounds (used by intersections and clips).
    ///
    /// When the exact result would not fit the span capacity, the left
    /// operand is returned unchanged; it is a superset of the intersection.
    pub(crate) fn intersect(&self, other: &Self, width: u32) -> Self {
        match (self, other) {
            (Self::Empty, _) | (_, Self::Empty) => Self::Empty,
            (Self::Full, b) => *b,
            (a, Self::Full) => *a,
            (Self::Spans(a), Self::Spans(b)) => {
                let mut out = SpanSet::new();
                for sa in a.spans() {
                    for sb in b.spans() {
                        let (pieces, count) = span_intersect(*sa, *sb, width);
                        for piece in &pieces[..count] {
                            if !out.push(*piece) {
                                return Self::Spans(*a);
                            }
                        }
                    }
                }
                if out.is_empty() { Self::Empty } else { Self::Spans(out) }
            }
        }
    }
}

/// Merge possibly-overlapping spans into disjoint ones.
///
/// Degrades to `Full` when the merged set would exceed capacity or cover the
/// whole row. The scratch slice is reordered in place.
fn merge_spans(spans: &mut [Span], width: u32) -> RowBounds {
    if spans.is_empty() {
        return RowBounds::Empty;
    }
    let total: u32 = spans.iter().map(|s| s.len).sum();
    if total >= width {
        return RowBounds::Full;
    }
    spans.sort_unstable_by_key(|s| s.start);

    let mut merged = [EMPTY_SPAN; MAX_SPANS * 2];
    let mut n = 0;
    for s in spans.iter() {
        if n > 0 {
            let last = &mut merged[n - 1];
            if s.start <= last.start + last.len {
                last.len = last.len.max(s.start + s.len - last.start);
                continue;
            }
        }
        merged[n] = *s;
        n += 1;
    }

    // The last span may wrap past W back into the leading ones.
    while n > 1 {
        let last = merged[n - 1];
        let end = last.start + last.len;
        if end < width || end - width < merged[0].start {
            break;
        }
        let first = merged[0];
        let combined = first.start + first.len + width - last.start;
        if combined >= width {
            return RowBounds::Full;
        }
        let absorbed = Span { start: last.start, len: combined.max(last.len) };
        merged.copy_within(1..n - 1, 0);
        merged[n - 2] = absorbed;
        n -= 1;
    }

    if n > MAX_SPANS {
        return RowBounds::Full;
    }
    let mut set = SpanSet::new();
    for s in &merged[..n] {
        set.push(*s);
    }
    RowBounds::Spans(set)
}

/// Circular intersection of two spans: at most two pieces.
fn span_intersect(a: Span, b: Span, width: u32) -> ([Span; 2], usize) {
    let mut pieces = [EMPTY_SPAN; 2];
    let mut count = 0;
    let (a0, a1) = (a.start as i64, (a.start + a.len) as i64);
    let w = width as i64;
    for k in -1..=1i64 {
        let b0 = b.start as i64 + k * w;
        let b1 = b0 + b.len as i64;
        let lo = a0.max(b0);
        let hi = a1.min(b1);
        if hi > lo && count < 2 {
            pieces[count] = Span {
                start: lo.rem_euclid(w) as u32,
                len: (hi - lo) as u32,
            };
            count += 1;
        }
    }
    (pieces, count)
}

/// Conservative row range of the angular band `a0..a1` around `axis`.
///
/// `a0 <= 0` means a solid cap. The polar angles of the band edges are
/// reflected through the poles with `acos(cos(x))`; a pole that falls inside
/// the band pins the corresponding end of the range.
pub(crate) fn band_rows(grid: &SphereMap, axis: Vec3, a0: f32, a1: f32) -> Option<(u32, u32)> {
    let a1 = a1.min(PI);
    if a1 <= 0.0 {
        return None;
    }
    let a0 = a0.max(0.0);
    let pa = acos_clamped(axis.y);

    let mut lo = f32::INFINITY;
    let mut hi: f32 = 0.0;
    for a in [a0, a1] {
        for signed in [pa - a, pa + a] {
            let phi = fold_polar(signed);
            lo = lo.min(phi);
            hi = hi.max(phi);
        }
    }
    if (a0..=a1).contains(&pa) {
        lo = 0.0;
    }
    if (a0..=a1).contains(&(PI - pa)) {
        hi = PI;
    }

    let pitch = grid.row_pitch();
    let y0 = (lo / pitch).floor().max(0.0) as u32;
    let y1 = ((hi / pitch).ceil() as u32).min(grid.height() - 1);
    Some((y0, y1))
}

/// Column bounds of the angular band `a0..a1` around `axis` on row `y`.
///
/// Solves the cap-window equation `cos(theta - psi) = (cos A - ny cos phi) / R`
/// for the inner and outer band edges. A band row is one azimuth window
/// (disc chord), two windows (annulus), the whole row, or nothing. Rows where
/// `R` collapses (axis nearly polar, or the row at a pole) scan fully.
pub(crate) fn band_row_bounds(grid: &SphereMap, axis: Vec3, a0: f32, a1: f32, y: u32) -> RowBounds {
    let a1 = a1.min(PI);
    if a1 <= 0.0 {
        return RowBounds::Empty;
    }
    let phi = grid.row_phi(y);
    let (sin_phi, cos_phi) = phi.sin_cos();
    let r = sin_phi * (axis.x * axis.x + axis.z * axis.z).sqrt();
    if r < NEAR_AXIS {
        return RowBounds::Full;
    }
    let psi = axis.x.atan2(axis.z);
    let q = |a: f32| (a.cos() - axis.y * cos_phi) / r;

    let q_outer = q(a1);
    if q_outer > 1.0 {
        return RowBounds::Empty;
    }

    // Inner cap window: empty when the band has no hole.
    let q_inner = if a0 > 0.0 { q(a0) } else { 2.0 };

    let width = grid.width();
    let pitch = grid.col_pitch();
    if q_outer < -1.0 {
        // Whole row inside the outer cone.
        if q_inner > 1.0 {
            return RowBounds::Full;
        }
        if q_inner < -1.0 {
            // Whole row inside the hole.
            return RowBounds::Empty;
        }
        let w_inner = q_inner.acos();
        return RowBounds::from_window(Span::from_window(width, pitch, psi + PI, PI - w_inner));
    }

    let w_outer = q_outer.acos();
    if q_inner > 1.0 {
        return RowBounds::from_window(Span::from_window(width, pitch, psi, w_outer));
    }
    let w_inner = q_inner.clamp(-1.0, 1.0).acos();
    let hw = (w_outer - w_inner) * 0.5;
    let mid = (w_outer + w_inner) * 0.5;
    let left = Span::from_window(width, pitch, psi - mid, hw);
    let right = Span::from_window(width, pitch, psi + mid, hw);
    match (left, right) {
        (Some(l), Some(r2)) => {
            let mut set = SpanSet::new();
            set.push(l);
            set.push(r2);
            RowBounds::Spans(set)
        }
        _ => RowBounds::Full,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/shape/bounds.rs"]
mod tests;
