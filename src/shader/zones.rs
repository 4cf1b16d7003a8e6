//! Two-angle shaders: each point takes one of two angles, or a blend of both.
//!
//! All blends go through [`lerp_angle`], so the transition always takes the
//! short way around the circle.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::errors::RegistryError;
use crate::param::{BoundParams, ParamBuilder, angle, integer, number, percent};

use super::angle::{blend_factor, lerp_angle, shape_wave};
use super::{Catalog, Evaluate, Registry, ShaderArgs};

pub(super) fn register_all(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register::<ThresholdAngle>()?;
    registry.register::<ConcentricZones>()?;
    registry.register::<Ripple>()?;
    registry.register::<LateralWave>()?;
    Ok(())
}

fn angle_pair() -> [ParamBuilder; 2] {
    [
        angle("angle1", 0.0)
            .describe("First angle.")
            .range(0.0, TAU)
            .step(PI / 180.0),
        angle("angle2", FRAC_PI_2)
            .describe("Second angle.")
            .range(0.0, TAU)
            .step(PI / 180.0),
    ]
}

fn crossfade_param() -> ParamBuilder {
    percent("crossfade", 0.0)
        .describe("Width of the blend band around each boundary, in normalized radius. 0 switches hard.")
        .step(0.01)
}

/// Blend factor across a band of `width` centered on `boundary`
fn band_factor(value: f64, boundary: f64, width: f64) -> f64 {
    ((value - (boundary - width / 2.0)) / width).clamp(0.0, 1.0)
}

/// angle1 inside a radius threshold, angle2 outside
#[derive(Debug, Clone, Copy)]
pub struct ThresholdAngle {
    pub threshold: f64,
    pub angle1: f64,
    pub angle2: f64,
    pub crossfade: f64,
}

impl Catalog for ThresholdAngle {
    const NAME: &'static str = "threshold_angle";
    const DESCRIPTION: Option<&'static str> =
        Some("One angle inside a radius threshold and another outside, with an optional crossfade.");

    fn params() -> Vec<ParamBuilder> {
        let [angle1, angle2] = angle_pair();
        vec![
            percent("threshold", 0.5)
                .describe("Normalized radius where the angle switches.")
                .step(0.01),
            angle1,
            angle2,
            crossfade_param(),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            threshold: p.number("threshold"),
            angle1: p.number("angle1"),
            angle2: p.number("angle2"),
            crossfade: p.number("crossfade"),
        }
    }
}

impl Evaluate for ThresholdAngle {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        if self.crossfade > 0.0 {
            let t = band_factor(args.radius, self.threshold, self.crossfade);
            return lerp_angle(self.angle1, self.angle2, t);
        }
        if args.radius < self.threshold {
            self.angle1
        } else {
            self.angle2
        }
    }
}

/// Rings of equal width alternating between two angles
#[derive(Debug, Clone, Copy)]
pub struct ConcentricZones {
    pub zones: i64,
    pub angle1: f64,
    pub angle2: f64,
    pub crossfade: f64,
}

impl Catalog for ConcentricZones {
    const NAME: &'static str = "concentric_zones";
    const DESCRIPTION: Option<&'static str> =
        Some("Concentric rings of equal width alternating between two angles.");

    fn params() -> Vec<ParamBuilder> {
        let [angle1, angle2] = angle_pair();
        vec![
            integer("zones", 3)
                .describe("Number of rings from the center to the outermost point.")
                .range(1.0, 32.0)
                .step(1.0),
            angle1,
            angle2,
            crossfade_param(),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            zones: p.integer("zones").max(1),
            angle1: p.number("angle1"),
            angle2: p.number("angle2"),
            crossfade: p.number("crossfade"),
        }
    }
}

impl ConcentricZones {
    fn zone_angle(&self, zone: i64) -> f64 {
        if zone % 2 == 0 { self.angle1 } else { self.angle2 }
    }
}

impl Evaluate for ConcentricZones {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let n = self.zones as f64;
        if self.crossfade > 0.0 && self.zones > 1 {
            let k = ((args.radius * n).round() as i64).clamp(1, self.zones - 1);
            let boundary = k as f64 / n;
            if (args.radius - boundary).abs() < self.crossfade / 2.0 {
                let t = band_factor(args.radius, boundary, self.crossfade);
                return lerp_angle(self.zone_angle(k - 1), self.zone_angle(k), t);
            }
        }
        let zone = ((args.radius * n).floor() as i64).clamp(0, self.zones - 1);
        self.zone_angle(zone)
    }
}

/// Shared wave → blended angle step of [`Ripple`] and [`LateralWave`]
fn wave_blend(phase: f64, sharpness: f64, angle1: f64, angle2: f64) -> f64 {
    let wave = shape_wave(phase.sin(), sharpness);
    lerp_angle(angle1, angle2, blend_factor(wave))
}

fn sharpness_param() -> ParamBuilder {
    number("sharpness", 1.0)
        .describe("Above 1 the blend snaps toward a square wave.")
        .range(1.0, 20.0)
        .step(0.5)
}

/// Circular waves spreading from the center
#[derive(Debug, Clone, Copy)]
pub struct Ripple {
    pub frequency: f64,
    pub phase: f64,
    pub angle1: f64,
    pub angle2: f64,
    pub sharpness: f64,
}

impl Catalog for Ripple {
    const NAME: &'static str = "ripple";
    const DESCRIPTION: Option<&'static str> =
        Some("Circular waves from the center blend between two angles.");

    fn params() -> Vec<ParamBuilder> {
        let [angle1, angle2] = angle_pair();
        vec![
            number("frequency", 3.0)
                .describe("Wave cycles between the center and the outermost point.")
                .min(0.0)
                .step(0.5),
            angle("phase", 0.0)
                .describe("Phase of the wave.")
                .step(PI / 180.0),
            angle1,
            angle2,
            sharpness_param(),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            frequency: p.number("frequency"),
            phase: p.number("phase"),
            angle1: p.number("angle1"),
            angle2: p.number("angle2"),
            sharpness: p.number("sharpness"),
        }
    }
}

impl Evaluate for Ripple {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let phase = args.radius * self.frequency * TAU + self.phase;
        wave_blend(phase, self.sharpness, self.angle1, self.angle2)
    }
}

/// Straight wavefronts travelling along a direction
#[derive(Debug, Clone, Copy)]
pub struct LateralWave {
    pub direction: f64,
    pub frequency: f64,
    pub phase: f64,
    pub angle1: f64,
    pub angle2: f64,
    pub sharpness: f64,
}

impl Catalog for LateralWave {
    const NAME: &'static str = "lateral_wave";
    const DESCRIPTION: Option<&'static str> =
        Some("Straight wavefronts crossing the board blend between two angles.");

    fn params() -> Vec<ParamBuilder> {
        let [angle1, angle2] = angle_pair();
        vec![
            angle("direction", 0.0)
                .describe("Direction the wave travels in.")
                .step(PI / 180.0),
            number("frequency", 2.0)
                .describe("Wave cycles across the board.")
                .min(0.0)
                .step(0.5),
            angle("phase", 0.0)
                .describe("Phase of the wave.")
                .step(PI / 180.0),
            angle1,
            angle2,
            sharpness_param(),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            direction: p.number("direction"),
            frequency: p.number("frequency"),
            phase: p.number("phase"),
            angle1: p.number("angle1"),
            angle2: p.number("angle2"),
            sharpness: p.number("sharpness"),
        }
    }
}

impl Evaluate for LateralWave {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        // position along the travel direction, in [-1, 1]
        let along = args.dx * self.direction.cos() + args.dy * self.direction.sin();
        let phase = along * self.frequency * PI + self.phase;
        wave_blend(phase, self.sharpness, self.angle1, self.angle2)
    }
}
