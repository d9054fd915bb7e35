use super::*;

const PW: f32 = 0.06;

#[test]
fn solid_coverage_saturates_outside_the_ramp() {
    assert_eq!(coverage(RenderStyle::Solid, -PW, PW), 1.0);
    assert_eq!(coverage(RenderStyle::Solid, -2.0 * PW, PW), 1.0);
    assert_eq!(coverage(RenderStyle::Solid, PW, PW), 0.0);
    assert_eq!(coverage(RenderStyle::Solid, 2.0 * PW, PW), 0.0);
}

#[test]
fn solid_coverage_is_half_on_the_boundary() {
    assert!((coverage(RenderStyle::Solid, 0.0, PW) - 0.5).abs() < 1e-6);
}

#[test]
fn solid_coverage_is_monotonically_non_increasing_and_continuous() {
    let steps = 400;
    let mut prev = f32::INFINITY;
    for i in 0..=steps {
        let d = -2.0 * PW + (4.0 * PW) * (i as f32 / steps as f32);
        let c = coverage(RenderStyle::Solid, d, PW);
        assert!((0.0..=1.0).contains(&c));
        assert!(c <= prev + 1e-6, "coverage increased at d = {d}");
        if prev.is_finite() {
            assert!((prev - c) < 0.05, "coverage jumped at d = {d}");
        }
        prev = c;
    }
}

#[test]
fn solid_coverage_has_flat_ends() {
    let eps = 1e-3 * PW;
    assert!(1.0 - coverage(RenderStyle::Solid, -PW + eps, PW) < 1e-4);
    assert!(coverage(RenderStyle::Solid, PW - eps, PW) < 1e-4);
}

#[test]
fn stroked_coverage_peaks_at_the_stroke_centre() {
    let th = 0.2;
    // Distance -th is the stroke centre; distance 0 the declared edge.
    assert_eq!(coverage(RenderStyle::Stroked(th), -th, PW), 1.0);
    assert_eq!(coverage(RenderStyle::Stroked(th), 0.0, PW), 0.0);
    let mid = coverage(RenderStyle::Stroked(th), -th * 0.5, PW);
    assert!(mid > 0.0 && mid < 1.0);
}

#[test]
fn sub_pixel_strokes_widen_to_a_pixel() {
    let th = PW / 10.0;
    // A pixel centre half a pixel off the stroke would read zero without
    // widening; with it, the stroke still lights up.
    let c = coverage(RenderStyle::Stroked(th), 0.5 * PW - th, PW);
    assert!(c > 0.1, "thin stroke vanished: {c}");
}
