use super::*;

use crate::grid::config::DisplayConfig;

const W: u32 = 96;

fn grid() -> SphereMap {
    SphereMap::new(DisplayConfig::new(W, 20).unwrap()).unwrap()
}

fn spans(bounds: &RowBounds) -> Vec<Span> {
    match bounds {
        RowBounds::Spans(set) => set.spans().to_vec(),
        other => panic!("expected spans, got {other:?}"),
    }
}

#[test]
fn span_contains_wraps() {
    let s = Span { start: 94, len: 5 };
    for x in [94, 95, 0, 1, 2] {
        assert!(s.contains(x, W), "{x} should be inside");
    }
    for x in [3, 50, 93] {
        assert!(!s.contains(x, W), "{x} should be outside");
    }
}

#[test]
fn window_span_carries_one_column_margin() {
    let g = grid();
    let s = Span::from_window(W, g.col_pitch(), 0.0, 0.01).unwrap();
    assert!(s.contains(0, W));
    assert!(s.contains(1, W));
    assert!(s.contains(W - 1, W));
}

#[test]
fn wide_window_degrades_to_full() {
    let g = grid();
    assert!(Span::from_window(W, g.col_pitch(), 1.0, 3.2).is_none());
}

#[test]
fn union_merges_overlapping_spans() {
    let a = RowBounds::single(Span { start: 10, len: 5 });
    let b = RowBounds::single(Span { start: 12, len: 6 });
    let merged = spans(&a.union(&b, W));
    assert_eq!(merged, vec![Span { start: 10, len: 8 }]);
}

#[test]
fn union_absorbs_wrap_overlap() {
    let a = RowBounds::single(Span { start: 90, len: 10 });
    let b = RowBounds::single(Span { start: 2, len: 4 });
    let merged = spans(&a.union(&b, W));
    assert_eq!(merged, vec![Span { start: 90, len: 12 }]);
}

#[test]
fn union_of_disjoint_spans_keeps_both() {
    let a = RowBounds::single(Span { start: 5, len: 4 });
    let b = RowBounds::single(Span { start: 40, len: 4 });
    assert_eq!(spans(&a.union(&b, W)).len(), 2);
}

#[test]
fn union_covering_whole_row_is_full() {
    let a = RowBounds::single(Span { start: 0, len: 50 });
    let b = RowBounds::single(Span { start: 48, len: 48 });
    assert_eq!(a.union(&b, W), RowBounds::Full);
}

#[test]
fn union_with_full_and_empty() {
    let a = RowBounds::single(Span { start: 0, len: 3 });
    assert_eq!(a.union(&RowBounds::Full, W), RowBounds::Full);
    assert_eq!(a.union(&RowBounds::Empty, W), a);
}

#[test]
fn intersect_plain_overlap() {
    let a = RowBounds::single(Span { start: 10, len: 10 });
    let b = RowBounds::single(Span { start: 15, len: 10 });
    assert_eq!(spans(&a.intersect(&b, W)), vec![Span { start: 15, len: 5 }]);
}

#[test]
fn intersect_across_wrap() {
    let a = RowBounds::single(Span { start: 90, len: 10 });
    let b = RowBounds::single(Span { start: 0, len: 4 });
    assert_eq!(spans(&a.intersect(&b, W)), vec![Span { start: 0, len: 4 }]);
}

#[test]
fn intersect_disjoint_is_empty() {
    let a = RowBounds::single(Span { start: 0, len: 4 });
    let b = RowBounds::single(Span { start: 50, len: 4 });
    assert_eq!(a.intersect(&b, W), RowBounds::Empty);
}

#[test]
fn band_rows_pins_pole_inside_band() {
    let g = grid();
    // Axis on the equator; the band 1.4..1.65 sweeps over the north pole.
    let (y0, _) = band_rows(&g, Vec3::X, 1.4, 1.65).unwrap();
    assert_eq!(y0, 0);
}

#[test]
fn band_row_bounds_near_polar_axis_is_full() {
    let g = grid();
    assert_eq!(band_row_bounds(&g, Vec3::Y, 0.3, 0.6, 10), RowBounds::Full);
}

#[test]
fn band_row_bounds_annulus_gives_two_windows() {
    let g = grid();
    // Axis Z, equator row: band 0.3..0.6 crosses the row on both sides of
    // theta = 0, leaving a hole in the middle.
    let bounds = band_row_bounds(&g, Vec3::Z, 0.3, 0.6, 10);
    let s = spans(&bounds);
    assert_eq!(s.len(), 2);
    let x_in = (0.45 / g.col_pitch()).round() as u32;
    assert!(bounds.contains(x_in, W));
    assert!(!bounds.contains(0, W), "hole centre should be culled");
    assert!(!bounds.contains(48, W), "far side should be culled");
}

#[test]
fn band_row_bounds_off_band_row_is_empty() {
    let g = grid();
    // Small cap around Z cannot touch rows near the poles.
    assert_eq!(band_row_bounds(&g, Vec3::Z, -1.0, 0.3, 1), RowBounds::Empty);
}
