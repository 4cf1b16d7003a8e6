//! Built-in tunables shared by the pipeline and the shader catalog.

use std::f64::consts::PI;

/// Distance (mm) under which a point counts as sitting on the center.
pub const CENTER_THRESHOLD: f64 = 0.001;

/// Added to squared-distance denominators in field shaders.
pub const FIELD_EPSILON: f64 = 0.01;

/// Smallest magnitude used in place of a zero divisor.
pub const MIN_DIVISOR: f64 = 1e-9;

/// Golden angle, π(3 − √5).
pub fn golden_angle() -> f64 {
    PI * (3.0 - 5.0_f64.sqrt())
}

/// Primes mixed into the macro-pixel hash.
pub const MACRO_PIXEL_PRIMES: (i64, i64) = (7919, 104729);

/// Primes mixed into the crystal lattice hash.
pub const LATTICE_PRIMES: (i64, i64) = (73856093, 19349663);

/// Height-to-width ratio of a tetragonal cell.
pub const TETRAGONAL_ASPECT: f64 = 2.0;

/// Offset keeping grid indices positive before taking parity.
pub const GRID_BIAS: f64 = 100.0;
