//! Shader catalog
//!
//! Each shader is its own type that knows how to:
//! - Declare its parameters
//! - Bind itself from resolved parameter values
//! - Map one point's polar/cartesian data to an angle in radians
//!
//! The [`Shader`] enum dispatches statically over every built-in shader; the
//! [`Custom`] variant carries closures registered at startup.

pub mod angle;
mod discrete;
mod field;
mod noise;
mod radial;
mod registry;
mod zones;

use std::fmt;
use std::sync::Arc;

use enum_dispatch::enum_dispatch;
use glam::{DVec2, dvec2};

use crate::param::{BoundParams, ParamBuilder};

pub use discrete::{BinaryGrid, CrystalStructure, Lattice, MacroPixel, PixelSector, QuadrantDirector};
pub use field::{
    ElectricField, GradientField, HyperbolicField, MagneticDipole, VectorFieldFlow, Vortex,
};
pub use noise::{
    ChaoticAttractor, ChaoticRotation, FractalNoise, MoirePattern, PerlinRotation, Random,
    Turbulence, WaveInterference,
};
pub use radial::{
    FibonacciRotation, Fixed, Flower, HarmonicResonance, KaleidoscopicReflection,
    LissajousRotation, LogarithmicSpiral, Pinwheel, PulsarRotation, QuantumSpin, Radial,
    RadialCircle, RadialOffset, RadialPerpendicular, RadialSymmetry, RadialWave,
    SpiralGalaxy, SpiralRotation, WormholeTwist,
};
pub use registry::{Registry, ShaderEntry};
pub use zones::{ConcentricZones, LateralWave, Ripple, ThresholdAngle};

/// Per-point inputs handed to every shader
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderArgs<'a> {
    /// atan2 of the offset from the center, plus the global radial offset
    pub radial_angle: f64,
    /// Distance from the center over the largest distance in the set, in [0,1]
    pub radius: f64,
    /// Signed x offset, normalized by the largest distance
    pub dx: f64,
    /// Signed y offset, normalized by the largest distance
    pub dy: f64,
    pub label: &'a str,
}

impl ShaderArgs<'_> {
    /// Normalized offset as a vector
    #[inline]
    pub fn offset(&self) -> DVec2 {
        dvec2(self.dx, self.dy)
    }
}

/// The single capability every shader provides
#[enum_dispatch]
pub trait Evaluate {
    /// Output angle in radians; any real value, the pipeline wraps it.
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64;

    /// Same inputs always give the same angle
    fn is_deterministic(&self) -> bool {
        true
    }
}

/// A built-in shader's catalog metadata and binding
pub trait Catalog: Sized + Into<Shader> {
    const NAME: &'static str;
    const DESCRIPTION: Option<&'static str>;

    /// Parameter declarations, in display order
    fn params() -> Vec<ParamBuilder>;

    /// Build from values already resolved against [`Catalog::params`]
    fn bind(params: &BoundParams) -> Self;
}

/// A shader bound to concrete parameter values
#[enum_dispatch(Evaluate)]
#[derive(Debug, Clone)]
pub enum Shader {
    Radial,
    RadialOffset,
    RadialCircle,
    RadialPerpendicular,
    Fixed,
    SpiralRotation,
    FibonacciRotation,
    RadialWave,
    HarmonicResonance,
    Flower,
    Pinwheel,
    LogarithmicSpiral,
    WormholeTwist,
    PulsarRotation,
    QuantumSpin,
    RadialSymmetry,
    SpiralGalaxy,
    KaleidoscopicReflection,
    LissajousRotation,
    Vortex,
    MagneticDipole,
    ElectricField,
    GradientField,
    HyperbolicField,
    VectorFieldFlow,
    ThresholdAngle,
    ConcentricZones,
    Ripple,
    LateralWave,
    MoirePattern,
    FractalNoise,
    PerlinRotation,
    Turbulence,
    WaveInterference,
    ChaoticRotation,
    ChaoticAttractor,
    QuadrantDirector,
    BinaryGrid,
    PixelSector,
    MacroPixel,
    CrystalStructure,
    Random,
    Custom,
}

/// Signature of closures registered through [`Registry::register_fn`]
pub type ShaderFn = dyn Fn(&ShaderArgs<'_>, &BoundParams) -> f64 + Send + Sync;

/// A closure-backed shader together with its bound values
#[derive(Clone)]
pub struct Custom {
    name: Arc<str>,
    f: Arc<ShaderFn>,
    params: BoundParams,
}

impl Custom {
    pub(crate) fn new(name: Arc<str>, f: Arc<ShaderFn>, params: BoundParams) -> Self {
        Self { name, f, params }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for Custom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom")
            .field("name", &self.name)
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl Evaluate for Custom {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        (self.f)(args, &self.params)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Shader args for a point at normalized offset (dx, dy)
    pub fn args_at(dx: f64, dy: f64) -> ShaderArgs<'static> {
        ShaderArgs {
            radial_angle: dy.atan2(dx),
            radius: dx.hypot(dy).min(1.0),
            dx,
            dy,
            label: "T",
        }
    }

    /// Shader args for a given polar position
    pub fn polar(radial_angle: f64, radius: f64) -> ShaderArgs<'static> {
        ShaderArgs {
            radial_angle,
            radius,
            dx: radius * radial_angle.cos(),
            dy: radius * radial_angle.sin(),
            label: "T",
        }
    }

    pub fn defaults<S: Catalog>() -> S {
        let params: Vec<_> = S::params()
            .into_iter()
            .map(|p| p.build().expect("catalog parameter"))
            .collect();
        S::bind(&BoundParams::defaults(&params))
    }

    pub fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }
}
