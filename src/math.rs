//! Angle and float helpers.
//!
//! Surface angles are expressed in degrees in the range `[0, 360)`, measured
//! relative to the controller's reference orientation. These helpers handle
//! range tests on that wrapped domain, plus epsilon comparisons for ground
//! velocities that carry floating-point residue from the host's integrator.

/// Tolerance for treating a float as zero.
///
/// Small enough that any intentional ground speed clears it, large enough to
/// absorb accumulated f32 error after many fixed-update ticks.
pub const EPSILON: f32 = 1e-4;

/// Check whether `value` is zero within [`EPSILON`].
#[inline]
pub fn approx_zero(value: f32) -> bool {
    value.abs() < EPSILON
}

/// Wrap an angle in degrees into `[0, 360)`.
///
/// Negative inputs wrap upward, so `-90.0` becomes `270.0`.
#[inline]
pub fn wrap_angle_deg(angle: f32) -> f32 {
    let wrapped = angle % 360.0;
    if wrapped < 0.0 {
        wrapped + 360.0
    } else {
        wrapped
    }
}

/// Test whether a wrapped angle lies in the half-open range `[min, max)`.
///
/// All three arguments are wrapped into `[0, 360)` first. Ranges may cross
/// the 0° seam (`min > max` after wrapping); a range whose wrapped endpoints
/// coincide covers the full circle.
pub fn angle_in_range_deg(angle: f32, min: f32, max: f32) -> bool {
    let angle = wrap_angle_deg(angle);
    let min = wrap_angle_deg(min);
    let max = wrap_angle_deg(max);

    if min < max {
        angle >= min && angle < max
    } else if min > max {
        angle >= min || angle < max
    } else {
        true
    }
}
