//! Angle arithmetic shared by the blending shaders.

use std::f64::consts::{PI, TAU};

/// Signed difference `to - from`, taken along the short arc.
pub fn shortest_delta(from: f64, to: f64) -> f64 {
    let delta = to - from;
    if delta.abs() > PI {
        delta - delta.signum() * TAU
    } else {
        delta
    }
}

/// Blend from `a` (t = 0) to `b` (t = 1) along the short arc.
pub fn lerp_angle(a: f64, b: f64, t: f64) -> f64 {
    a + shortest_delta(a, b) * t
}

/// Sharpen a wave in [-1,1] towards a square wave.
///
/// Sharpness at or below 1 leaves the wave untouched.
pub fn shape_wave(wave: f64, sharpness: f64) -> f64 {
    if sharpness > 1.0 {
        wave.signum() * wave.abs().powf(1.0 / sharpness)
    } else {
        wave
    }
}

/// Map [-1,1] onto a [0,1] blend factor
#[inline]
pub fn blend_factor(wave: f64) -> f64 {
    (wave + 1.0) / 2.0
}

/// Mean direction of a set of angles
pub fn circular_mean(angles: &[f64]) -> f64 {
    let (s, c) = angles
        .iter()
        .fold((0.0, 0.0), |(s, c), a| (s + a.sin(), c + a.cos()));
    s.atan2(c)
}

/// Wrap into [0, 2π)
pub fn wrap(angle: f64) -> f64 {
    let w = angle.rem_euclid(TAU);
    if w >= TAU { 0.0 } else { w }
}
