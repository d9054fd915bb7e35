use std::f32::consts::TAU;

/// `acos` with the argument clamped into its domain.
///
/// Dot products of unit vectors routinely land a few ulps outside [-1, 1];
/// clamping before the inverse trig call is the rule everywhere in this crate.
pub(crate) fn acos_clamped(x: f32) -> f32 {
    x.clamp(-1.0, 1.0).acos()
}

/// `asin` with the argument clamped into its domain.
pub(crate) fn asin_clamped(x: f32) -> f32 {
    x.clamp(-1.0, 1.0).asin()
}

/// Fold an arbitrary angle into [0, PI] the way `acos(cos(x))` does.
///
/// Used for polar-angle reflection through the poles: 1.2*PI folds to 0.8*PI.
pub(crate) fn fold_polar(x: f32) -> f32 {
    acos_clamped(x.cos())
}

/// Wrap an angle into [0, TAU).
pub(crate) fn wrap_tau(x: f32) -> f32 {
    let r = x.rem_euclid(TAU);
    if r >= TAU { 0.0 } else { r }
}

/// Quintic smootherstep kernel `6t^5 - 15t^4 + 10t^3` on clamped t.
///
/// Zero first derivative at both ends, so anti-aliased edges show neither a
/// hard cutoff nor ringing.
pub(crate) fn smootherstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Squared-length threshold below which geometry counts as degenerate.
pub(crate) const DEGENERATE_SQ: f32 = 1e-12;

/// Threshold on azimuthal radius / sine terms below which row-bound math
/// degrades to a full-row scan instead of dividing by near-zero.
pub(crate) const NEAR_AXIS: f32 = 1e-2;
