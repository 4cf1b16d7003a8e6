//! Organic variation from sums of fixed-frequency sines.
//!
//! None of these is real gradient noise: every term is an explicit sine or
//! cosine product so the output stays reproducible. [`Random`] is the one
//! exception and draws a fresh angle per point.

use std::f64::consts::TAU;

use glam::{DVec2, dvec2};
use rand::Rng;

use crate::errors::RegistryError;
use crate::param::{BoundParams, ParamBuilder, integer, number};

use super::field::position;
use super::{Catalog, Evaluate, Registry, ShaderArgs};

pub(super) fn register_all(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register::<MoirePattern>()?;
    registry.register::<FractalNoise>()?;
    registry.register::<PerlinRotation>()?;
    registry.register::<Turbulence>()?;
    registry.register::<WaveInterference>()?;
    registry.register::<ChaoticRotation>()?;
    registry.register::<ChaoticAttractor>()?;
    registry.register::<Random>()?;
    Ok(())
}

/// Two circular patterns beating against each other
#[derive(Debug, Clone, Copy)]
pub struct MoirePattern {
    pub frequency1: f64,
    pub frequency2: f64,
    pub amplitude: f64,
}

impl Catalog for MoirePattern {
    const NAME: &'static str = "moire_pattern";
    const DESCRIPTION: Option<&'static str> =
        Some("Moiré interference from two overlaid circular patterns.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            number("frequency1", 10.0)
                .describe("Frequency of the first circular pattern.")
                .range(1.0, 50.0)
                .step(0.5),
            number("frequency2", 11.0)
                .describe("Frequency of the second circular pattern.")
                .range(1.0, 50.0)
                .step(0.5),
            number("amplitude", 0.3)
                .describe("Strength of the interference.")
                .range(0.0, 1.0)
                .step(0.05),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            frequency1: p.number("frequency1"),
            frequency2: p.number("frequency2"),
            amplitude: p.number("amplitude"),
        }
    }
}

impl Evaluate for MoirePattern {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let r = args.radius;
        args.radial_angle + self.amplitude * (r * self.frequency1).sin() * (r * self.frequency2).sin()
    }
}

/// Octaves of crossed sines, normalized onto the full circle
#[derive(Debug, Clone, Copy)]
pub struct FractalNoise {
    pub scale: f64,
    pub octaves: i64,
    pub persistence: f64,
}

impl Catalog for FractalNoise {
    const NAME: &'static str = "fractal_noise";
    const DESCRIPTION: Option<&'static str> =
        Some("Organic, fractal-like patterns from layered noise.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            number("scale", 3.0)
                .describe("Scale of the noise pattern.")
                .range(0.1, 10.0)
                .step(0.1),
            integer("octaves", 3)
                .describe("Number of noise layers to combine.")
                .range(1.0, 8.0)
                .step(1.0),
            number("persistence", 0.5)
                .describe("How much each octave contributes relative to the previous one.")
                .range(0.1, 0.9)
                .step(0.05),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            scale: p.number("scale"),
            octaves: p.integer("octaves").max(1),
            persistence: p.number("persistence"),
        }
    }
}

impl Evaluate for FractalNoise {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let (mut value, mut total) = (0.0, 0.0);
        let (mut amplitude, mut frequency) = (1.0, 1.0);
        for _ in 0..self.octaves {
            let nx = (args.dx * frequency * self.scale + args.dy * 0.7).sin();
            let ny = (args.dy * frequency * self.scale + args.dx * 0.7).sin();
            value += amplitude * nx * ny;
            total += amplitude;
            amplitude *= self.persistence;
            frequency *= 2.0;
        }
        (value / total + 1.0) / 2.0 * TAU
    }
}

/// Four weighted sine layers added to the radial angle
#[derive(Debug, Clone, Copy)]
pub struct PerlinRotation {
    pub scale: f64,
    pub amplitude: f64,
}

impl Catalog for PerlinRotation {
    const NAME: &'static str = "perlin_rotation";
    const DESCRIPTION: Option<&'static str> =
        Some("Perlin-like noise for organic angular variation.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            number("scale", 2.0)
                .describe("Scale of the noise pattern.")
                .range(0.1, 10.0)
                .step(0.1),
            number("amplitude", 1.5)
                .describe("Amplitude of the angular variation.")
                .range(0.0, 3.0)
                .step(0.1),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            scale: p.number("scale"),
            amplitude: p.number("amplitude"),
        }
    }
}

impl Evaluate for PerlinRotation {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let (dx, dy, s) = (args.dx, args.dy, self.scale);
        let noise = (dx * s + dy * 1.3).sin() * 0.5
            + (dx * s * 2.1 + dy * 0.9).sin() * 0.25
            + (dx * 0.7 + dy * s * 1.7).sin() * 0.125
            + (dx * 2.3 + dy * s * 2.9).sin() * 0.0625;
        args.radial_angle + noise * self.amplitude
    }
}

/// Three sine/cosine products at fixed frequency ratios
#[derive(Debug, Clone, Copy)]
pub struct Turbulence {
    pub scale: f64,
    pub strength: f64,
}

impl Catalog for Turbulence {
    const NAME: &'static str = "turbulence";
    const DESCRIPTION: Option<&'static str> =
        Some("Turbulent, fluid-like flow with swirling patterns.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            number("scale", 0.01)
                .describe("Scale of the turbulence pattern.")
                .range(0.001, 0.1)
                .step(0.001),
            number("strength", 2.0)
                .describe("Strength of the turbulence.")
                .range(0.1, 5.0)
                .step(0.1),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            scale: p.number("scale"),
            strength: p.number("strength"),
        }
    }
}

impl Evaluate for Turbulence {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let x = args.dx * self.scale;
        let y = args.dy * self.scale;
        let n1 = (x * 1.7).sin() * (y * 2.3).cos();
        let n2 = (x * 3.7 + 0.5).sin() * (y * 1.9 + 0.4).cos();
        let n3 = (x * 5.1 + 1.1).sin() * (y * 4.3 + 1.3).cos();
        args.radial_angle + (n1 + n2 * 0.5 + n3 * 0.25) * self.strength
    }
}

/// Circular waves from two sources, summed
#[derive(Debug, Clone, Copy)]
pub struct WaveInterference {
    pub source1: DVec2,
    pub source2: DVec2,
    pub frequency: f64,
}

impl Catalog for WaveInterference {
    const NAME: &'static str = "wave_interference";
    const DESCRIPTION: Option<&'static str> =
        Some("Interference of waves emanating from two points.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            position("source1_x", 0.3, "X position of the first wave source (-1 to 1)."),
            position("source1_y", 0.3, "Y position of the first wave source (-1 to 1)."),
            position("source2_x", -0.3, "X position of the second wave source (-1 to 1)."),
            position("source2_y", -0.3, "Y position of the second wave source (-1 to 1)."),
            number("frequency", 10.0)
                .describe("Wave frequency.")
                .range(1.0, 30.0)
                .step(0.5),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            source1: dvec2(p.number("source1_x"), p.number("source1_y")),
            source2: dvec2(p.number("source2_x"), p.number("source2_y")),
            frequency: p.number("frequency"),
        }
    }
}

impl Evaluate for WaveInterference {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let p = args.offset();
        let d1 = p.distance(self.source1);
        let d2 = p.distance(self.source2);
        args.radial_angle + (d1 * self.frequency).sin() + (d2 * self.frequency).sin()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChaoticRotation {
    pub radius_factor: f64,
    pub dx_factor: f64,
}

impl Catalog for ChaoticRotation {
    const NAME: &'static str = "chaotic_rotation";
    const DESCRIPTION: Option<&'static str> = Some(
        "Chaotic rotation from sine and cosine modulations of the radial angle.",
    );

    fn params() -> Vec<ParamBuilder> {
        vec![
            number("radius_factor", 0.5)
                .describe("Influence of the radial distance on the sine term.")
                .min(0.0)
                .step(0.01),
            number("dx_factor", 0.3)
                .describe("Influence of the horizontal offset on the cosine term.")
                .min(0.0)
                .step(0.01),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            radius_factor: p.number("radius_factor"),
            dx_factor: p.number("dx_factor"),
        }
    }
}

impl Evaluate for ChaoticRotation {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        args.radial_angle
            + (args.radius * self.radius_factor).sin()
            + (args.dx * self.dx_factor).cos()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ChaoticAttractor {
    pub dy_scale: f64,
    pub dx_scale: f64,
    pub product_factor: f64,
}

impl Catalog for ChaoticAttractor {
    const NAME: &'static str = "chaotic_attractor";
    const DESCRIPTION: Option<&'static str> = Some(
        "Attractor-like swirl from a skewed atan2 plus a sine of the offset product.",
    );

    fn params() -> Vec<ParamBuilder> {
        vec![
            number("dy_scale", 1.3)
                .describe("Scaling of the vertical offset inside atan2.")
                .min(0.0)
                .step(0.1),
            number("dx_scale", 0.7)
                .describe("Scaling of the horizontal offset inside atan2.")
                .min(0.0)
                .step(0.1),
            number("product_factor", 0.05)
                .describe("Scaling of dx·dy inside the sine term.")
                .min(0.0)
                .step(0.01),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            dy_scale: p.number("dy_scale"),
            dx_scale: p.number("dx_scale"),
            product_factor: p.number("product_factor"),
        }
    }
}

impl Evaluate for ChaoticAttractor {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        (args.dy * self.dy_scale).atan2(args.dx * self.dx_scale)
            + (args.dx * args.dy * self.product_factor).sin()
    }
}

/// Uniform angle in [0, 2π), drawn fresh for every point
#[derive(Debug, Clone, Copy, Default)]
pub struct Random;

impl Catalog for Random {
    const NAME: &'static str = "random";
    const DESCRIPTION: Option<&'static str> = None;

    fn params() -> Vec<ParamBuilder> {
        Vec::new()
    }

    fn bind(_: &BoundParams) -> Self {
        Self
    }
}

impl Evaluate for Random {
    fn evaluate(&self, _: &ShaderArgs<'_>) -> f64 {
        rand::rng().random_range(0.0..TAU)
    }

    fn is_deterministic(&self) -> bool {
        false
    }
}
