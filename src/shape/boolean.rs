//! Signed-distance boolean algebra: min for union, max for intersection,
//! max-against-negation for subtraction. Attributes (parametric t,
//! barycentrics, face index) follow the winning branch.

use glam::Vec3;

use crate::shape::Shape;
use crate::shape::sample::Sample;

pub(crate) fn union_distance(a: &Shape, b: &Shape, p: Vec3, out: &mut Sample) {
    a.distance(p, out);
    let mut other = Sample::new();
    b.distance(p, &mut other);
    if other.distance < out.distance {
        copy_winner(out, &other);
    }
}

pub(crate) fn intersection_distance(a: &Shape, b: &Shape, p: Vec3, out: &mut Sample) {
    a.distance(p, out);
    let mut other = Sample::new();
    b.distance(p, &mut other);
    if other.distance > out.distance {
        copy_winner(out, &other);
    }
}

pub(crate) fn subtract_distance(a: &Shape, b: &Shape, p: Vec3, out: &mut Sample) {
    a.distance(p, out);
    let mut other = Sample::new();
    b.distance(p, &mut other);
    if -other.distance > out.distance {
        other.distance = -other.distance;
        copy_winner(out, &other);
    }
}

fn copy_winner(out: &mut Sample, won: &Sample) {
    out.distance = won.distance;
    out.t = won.t;
    out.bary = won.bary;
    out.face = won.face;
}
