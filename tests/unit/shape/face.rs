use super::*;

use crate::grid::config::DisplayConfig;

fn grid() -> SphereMap {
    SphereMap::new(DisplayConfig::new(96, 20).unwrap()).unwrap()
}

fn dir(phi: f32, theta: f32) -> Vec3 {
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta)
}

fn triangle() -> Face {
    Face::new(vec![dir(0.8, 0.0), dir(0.8, 0.6), dir(0.4, 0.3)]).unwrap()
}

#[test]
fn centroid_is_inside_with_unit_barycentrics() {
    let face = triangle();
    let centroid = (dir(0.8, 0.0) + dir(0.8, 0.6) + dir(0.4, 0.3)).normalize();
    let mut s = Sample::new();
    face.distance(centroid, &mut s);
    assert!(s.distance < 0.0, "centroid must be inside: {}", s.distance);
    assert_eq!(s.face, Some(0));

    let bary = s.bary.expect("interior point carries barycentrics");
    let sum: f32 = bary.weights.iter().sum();
    assert!((sum - 1.0).abs() < 1e-4);
    assert_eq!(bary.tri, [0, 1, 2]);
    for w in bary.weights {
        assert!(w >= 0.0 && w <= 1.0);
    }
}

#[test]
fn outside_points_report_positive_distance() {
    let face = triangle();
    let mut s = Sample::new();
    face.distance(dir(1.2, 0.3), &mut s);
    assert!(s.distance > 0.0);
    assert!(s.bary.is_none());

    // Behind the tangent plane: no contribution at all.
    face.distance(dir(0.8, 0.3 + std::f32::consts::PI), &mut s);
    assert!(s.distance > 10.0);
}

#[test]
fn vertices_lie_on_the_boundary() {
    let face = triangle();
    let mut s = Sample::new();
    for v in [dir(0.8, 0.0), dir(0.8, 0.6), dir(0.4, 0.3)] {
        face.distance(v, &mut s);
        assert!(s.distance.abs() < 1e-3, "vertex distance {}", s.distance);
    }
}

#[test]
fn quad_fan_selects_the_containing_triangle() {
    let face = Face::new(vec![
        dir(0.9, 0.0),
        dir(0.9, 0.5),
        dir(0.5, 0.5),
        dir(0.5, 0.0),
    ])
    .unwrap();
    let mut s = Sample::new();

    // Near vertex 1: the (0, 1, 2) fan triangle wins.
    face.distance(dir(0.85, 0.45), &mut s);
    assert!(s.distance < 0.0);
    assert_eq!(s.bary.unwrap().tri, [0, 1, 2]);

    // Near vertex 3: the (0, 2, 3) fan triangle wins.
    face.distance(dir(0.55, 0.05), &mut s);
    assert!(s.distance < 0.0);
    assert_eq!(s.bary.unwrap().tri, [0, 2, 3]);
}

#[test]
fn oversized_faces_are_rejected() {
    let err = Face::new(vec![dir(1.5, 0.0), dir(1.5, 2.8), dir(0.1, 1.4)]);
    assert!(err.is_err());
}

#[test]
fn degenerate_faces_are_rejected() {
    assert!(Face::new(vec![dir(0.5, 0.0), dir(0.5, 0.3)]).is_err());
    assert!(Face::new(vec![Vec3::ZERO, dir(0.5, 0.3), dir(0.5, 0.6)]).is_err());
}

#[test]
fn edge_arcs_bulge_past_their_endpoints_in_phi() {
    // Two vertices on the same parallel, far apart in theta: the connecting
    // great-circle arc passes closer to the pole than either endpoint.
    let face = Face::new(vec![dir(1.0, 0.0), dir(1.0, 2.0), dir(0.9, 1.0)]).unwrap();
    let (phi_lo, _) = face.phi_range();
    assert!(phi_lo < 0.75, "bulge not captured: phi_lo = {phi_lo}");
}

#[test]
fn pole_winding_face_scans_full_rows_from_the_pole() {
    let face = Face::new(vec![
        dir(0.5, 0.0),
        dir(0.5, 2.094),
        dir(0.5, 4.189),
    ])
    .unwrap();
    let g = grid();
    let (y0, _) = face.rows(&g).unwrap();
    assert_eq!(y0, 0);
    assert_eq!(face.row_bounds(&g, 1), RowBounds::Full);

    let mut s = Sample::new();
    face.distance(Vec3::Y, &mut s);
    assert!(s.distance < 0.0, "pole must be inside: {}", s.distance);
}

#[test]
fn bounds_never_lose_interior_pixels() {
    let g = grid();
    let face = triangle();
    let (y0, y1) = face.rows(&g).unwrap();
    let mut s = Sample::new();
    for y in 0..g.height() {
        for x in 0..g.width() {
            face.distance(g.dir(x, y), &mut s);
            if s.distance < 0.0 {
                assert!((y0..=y1).contains(&y), "row {y} lost");
                assert!(
                    face.row_bounds(&g, y).contains(x, g.width()),
                    "column {x} lost on row {y}"
                );
            }
        }
    }
}
