use super::*;

use crate::grid::config::DisplayConfig;

fn grid() -> SphereMap {
    SphereMap::new(DisplayConfig::new(96, 20).unwrap()).unwrap()
}

/// Direction at polar angle `rho` / azimuth `az` within `basis`.
fn at(basis: &Basis, rho: f32, az: f32) -> Vec3 {
    let (sin_rho, cos_rho) = rho.sin_cos();
    let (sin_az, cos_az) = az.sin_cos();
    basis.v * cos_rho + (basis.u * sin_az + basis.w * cos_az) * sin_rho
}

#[test]
fn sign_convention_on_great_circle() {
    let ring = Ring::new(Vec3::Z, 1.0, 0.1).unwrap();
    let basis = Basis::around(Vec3::Z).unwrap();
    let mut s = Sample::new();

    // On the stroke centre: distance == -thickness.
    ring.distance(at(&basis, std::f32::consts::FRAC_PI_2, 0.7), &mut s);
    assert!((s.distance + 0.1).abs() < 1e-3, "centre: {}", s.distance);

    // On either stroke edge: distance == 0.
    for rho in [std::f32::consts::FRAC_PI_2 - 0.1, std::f32::consts::FRAC_PI_2 + 0.1] {
        ring.distance(at(&basis, rho, 0.7), &mut s);
        assert!(s.distance.abs() < 1e-3, "edge at {rho}: {}", s.distance);
    }

    // Far off the stroke: clearly positive.
    ring.distance(at(&basis, 0.3, 0.7), &mut s);
    assert!(s.distance > 0.5);
}

#[test]
fn linearized_distance_tracks_acos_near_stroke() {
    let ring = Ring::new(Vec3::Z, 0.5, 0.05).unwrap();
    let basis = Basis::around(Vec3::Z).unwrap();
    let target = 0.5 * std::f32::consts::FRAC_PI_2;
    let mut s = Sample::new();
    for offset in [-0.06f32, -0.02, 0.0, 0.02, 0.06] {
        ring.distance(at(&basis, target + offset, 1.3), &mut s);
        let expect = offset.abs() - 0.05;
        assert!(
            (s.distance - expect).abs() < 0.01,
            "offset {offset}: got {} want {expect}",
            s.distance
        );
    }
}

#[test]
fn antipodal_radius_folds() {
    let folded = Ring::new(Vec3::Z, 1.4, 0.1).unwrap();
    let direct = Ring::new(-Vec3::Z, 0.6, 0.1).unwrap();
    let mut a = Sample::new();
    let mut b = Sample::new();
    for p in [Vec3::X, Vec3::new(0.5, 0.5, -0.7).normalize(), Vec3::NEG_Z] {
        folded.distance(p, &mut a);
        direct.distance(p, &mut b);
        assert!((a.distance - b.distance).abs() < 1e-5);
    }
}

#[test]
fn zero_radius_pole_ring_scans_pole_row_fully() {
    let g = grid();
    let ring = Ring::new(Vec3::Y, 0.0, 0.1).unwrap();
    let (y0, y1) = ring.rows(&g).unwrap();
    assert_eq!(y0, 0, "vertical bounds must include the pole row");
    assert!(y1 >= y0);
    assert_eq!(ring.row_bounds(&g, 0), RowBounds::Full);
}

#[test]
fn azimuth_parameter_covers_the_circle() {
    let ring = Ring::new(Vec3::Z, 1.0, 0.1).unwrap();
    let basis = Basis::around(Vec3::Z).unwrap();
    let mut s = Sample::new();
    let mut seen = [false; 4];
    for k in 0..16 {
        let az = k as f32 / 16.0 * std::f32::consts::TAU - std::f32::consts::PI;
        ring.distance(at(&basis, std::f32::consts::FRAC_PI_2, az), &mut s);
        assert!((0.0..1.0).contains(&s.t));
        seen[(s.t * 4.0) as usize % 4] = true;
    }
    assert_eq!(seen, [true; 4], "t should sweep all quadrants");
}

#[test]
fn segment_covers_arc_and_clips_beyond_endpoints() {
    let a = Vec3::X;
    let b = Vec3::Z;
    let seg = Ring::segment(a, b, 0.05).unwrap();
    let mut s = Sample::new();

    let mid = (a + b).normalize();
    seg.distance(mid, &mut s);
    assert!((s.distance + 0.05).abs() < 1e-3, "midpoint on stroke centre");

    seg.distance(a, &mut s);
    assert!(s.distance <= 1e-3, "endpoint still on the arc");

    // Diametrically opposite the arc: far outside.
    seg.distance(-mid, &mut s);
    assert!(s.distance > 0.5);
}

#[test]
fn degenerate_segment_is_rejected() {
    assert!(Ring::segment(Vec3::X, Vec3::X, 0.1).is_none());
    assert!(Ring::segment(Vec3::X, -Vec3::X, 0.1).is_none());
}

#[test]
fn phi_range_restriction_cuts_the_ring() {
    let ring = Ring::new(Vec3::X, 1.0, 0.1)
        .unwrap()
        .with_phi_range(0.0, std::f32::consts::FRAC_PI_2);
    let mut s = Sample::new();
    ring.distance(Vec3::Y, &mut s);
    assert!(s.distance < 0.0, "northern point survives");
    ring.distance(Vec3::NEG_Y, &mut s);
    assert!(s.distance > 1.0, "southern point is cut away");
}

#[test]
fn row_bounds_cull_but_never_lose_stroke_pixels() {
    let g = grid();
    let ring = Ring::new(Vec3::new(0.4, 0.7, -0.2), 0.8, 0.12).unwrap();
    let (y0, y1) = ring.rows(&g).unwrap();
    let mut s = Sample::new();
    for y in 0..g.height() {
        for x in 0..g.width() {
            ring.distance(g.dir(x, y), &mut s);
            if s.distance < 0.0 {
                assert!((y0..=y1).contains(&y), "row {y} lost");
                assert!(
                    ring.row_bounds(&g, y).contains(x, g.width()),
                    "column {x} lost on row {y}"
                );
            }
        }
    }
}
