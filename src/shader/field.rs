//! Vector-field shaders: the angle is the direction of a synthetic field.
//!
//! Squared distances in denominators carry [`FIELD_EPSILON`] so a point sitting
//! on a source yields a large but finite field.

use std::f64::consts::TAU;

use glam::{DVec2, dvec2};

use crate::defaults::FIELD_EPSILON;
use crate::errors::RegistryError;
use crate::param::{BoundParams, ParamBuilder, angle, boolean, integer, number, percent};

use super::{Catalog, Evaluate, Registry, ShaderArgs};

pub(super) fn register_all(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register::<Vortex>()?;
    registry.register::<MagneticDipole>()?;
    registry.register::<ElectricField>()?;
    registry.register::<GradientField>()?;
    registry.register::<HyperbolicField>()?;
    registry.register::<VectorFieldFlow>()?;
    Ok(())
}

pub(super) fn position(name: &str, default: f64, text: &str) -> ParamBuilder {
    number(name, default).describe(text).range(-1.0, 1.0).step(0.05)
}

/// Swirl that tightens toward the center
#[derive(Debug, Clone, Copy)]
pub struct Vortex {
    pub intensity: f64,
    pub falloff: f64,
}

impl Catalog for Vortex {
    const NAME: &'static str = "vortex";
    const DESCRIPTION: Option<&'static str> =
        Some("Swirling vortex whose twist is strongest near the center.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            number("intensity", 2.0)
                .describe("Strength of the swirl at the center.")
                .range(0.1, 10.0)
                .step(0.1),
            number("falloff", 1.5)
                .describe("How quickly the swirl fades with distance.")
                .range(0.1, 5.0)
                .step(0.1),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            intensity: p.number("intensity"),
            falloff: p.number("falloff"),
        }
    }
}

impl Evaluate for Vortex {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        args.radial_angle + self.intensity / (args.radius.powf(self.falloff) + FIELD_EPSILON)
    }
}

/// Field of a magnetic dipole at the center
#[derive(Debug, Clone, Copy)]
pub struct MagneticDipole {
    pub t: f64,
    pub scale: f64,
    pub exponent1: f64,
    pub exponent2: f64,
}

impl Catalog for MagneticDipole {
    const NAME: &'static str = "magnetic_dipole";
    const DESCRIPTION: Option<&'static str> =
        Some("Direction of a magnetic dipole field centered on the board.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            angle("t", 0.0).describe("Orientation of the dipole moment."),
            number("scale", 3.0)
                .describe("Weight of the directional term of the field.")
                .min(0.0)
                .step(0.1),
            number("exponent1", 2.5)
                .describe("Falloff exponent of the directional term.")
                .min(0.0)
                .step(0.1),
            number("exponent2", 1.5)
                .describe("Falloff exponent of the direct term.")
                .min(0.0)
                .step(0.1),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            t: p.number("t"),
            scale: p.number("scale"),
            exponent1: p.number("exponent1"),
            exponent2: p.number("exponent2"),
        }
    }
}

impl Evaluate for MagneticDipole {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let m = DVec2::from_angle(self.t);
        let r = args.offset();
        let r_sq = r.length_squared() + FIELD_EPSILON;
        let along = m.dot(r);
        let b = r * (self.scale * along / r_sq.powf(self.exponent1)) - m / r_sq.powf(self.exponent2);
        b.y.atan2(b.x)
    }
}

/// Field of two point charges
#[derive(Debug, Clone, Copy)]
pub struct ElectricField {
    pub charge1: DVec2,
    pub charge1_value: f64,
    pub charge2: DVec2,
    pub charge2_value: f64,
}

impl Catalog for ElectricField {
    const NAME: &'static str = "electric_field";
    const DESCRIPTION: Option<&'static str> =
        Some("Direction of the electric field produced by two point charges.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            position("charge1_x", 0.3, "X position of the first charge (-1 to 1)."),
            position("charge1_y", 0.3, "Y position of the first charge (-1 to 1)."),
            number("charge1_value", 1.0)
                .describe("Signed strength of the first charge.")
                .range(-3.0, 3.0)
                .step(0.1),
            position("charge2_x", -0.3, "X position of the second charge (-1 to 1)."),
            position("charge2_y", -0.3, "Y position of the second charge (-1 to 1)."),
            number("charge2_value", -1.0)
                .describe("Signed strength of the second charge.")
                .range(-3.0, 3.0)
                .step(0.1),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            charge1: dvec2(p.number("charge1_x"), p.number("charge1_y")),
            charge1_value: p.number("charge1_value"),
            charge2: dvec2(p.number("charge2_x"), p.number("charge2_y")),
            charge2_value: p.number("charge2_value"),
        }
    }
}

fn coulomb(at: DVec2, charge: DVec2, value: f64) -> DVec2 {
    let rel = at - charge;
    let r_sq = rel.length_squared() + FIELD_EPSILON;
    rel * (value / (r_sq * r_sq.sqrt()))
}

impl Evaluate for ElectricField {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let p = args.offset();
        let e = coulomb(p, self.charge1, self.charge1_value)
            + coulomb(p, self.charge2, self.charge2_value);
        e.y.atan2(e.x)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GradientField {
    pub gradient_x: f64,
    pub gradient_y: f64,
}

impl Catalog for GradientField {
    const NAME: &'static str = "gradient_field";
    const DESCRIPTION: Option<&'static str> =
        Some("Angle of the offset after scaling each axis by its own gradient.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            number("gradient_x", 1.0)
                .describe("Gradient along x.")
                .range(-10.0, 10.0)
                .step(0.1),
            number("gradient_y", 1.0)
                .describe("Gradient along y.")
                .range(-10.0, 10.0)
                .step(0.1),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            gradient_x: p.number("gradient_x"),
            gradient_y: p.number("gradient_y"),
        }
    }
}

impl Evaluate for GradientField {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        (args.dy * self.gradient_y).atan2(args.dx * self.gradient_x)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct HyperbolicField {
    pub curvature: f64,
}

impl Catalog for HyperbolicField {
    const NAME: &'static str = "hyperbolic_field";
    const DESCRIPTION: Option<&'static str> =
        Some("Hyperbolic field lines with adjustable curvature.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            number("curvature", 0.5)
                .describe("Curvature of the hyperbolas.")
                .range(0.1, 3.0)
                .step(0.1),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            curvature: p.number("curvature"),
        }
    }
}

impl Evaluate for HyperbolicField {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let (x, y) = (args.dx, args.dy);
        (2.0 * x * y).atan2(self.curvature * (x * x - y * y))
    }
}

/// Superposed vortices placed evenly on a ring around the center
#[derive(Debug, Clone, Copy)]
pub struct VectorFieldFlow {
    pub vortex_count: i64,
    pub ring_radius: f64,
    pub strength: f64,
    pub divergence: f64,
    pub alternate: bool,
}

impl Catalog for VectorFieldFlow {
    const NAME: &'static str = "vector_field_flow";
    const DESCRIPTION: Option<&'static str> =
        Some("Flow field of several vortices arranged on a ring, each with a rotational and a divergent part.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            integer("vortex_count", 3)
                .describe("Number of vortices on the ring.")
                .range(1.0, 12.0)
                .step(1.0),
            percent("ring_radius", 0.5).describe("Normalized radius of the vortex ring."),
            number("strength", 1.0)
                .describe("Weight of the rotational part of each vortex.")
                .range(-5.0, 5.0)
                .step(0.1),
            number("divergence", 0.2)
                .describe("Weight of the outward (or inward, if negative) part.")
                .range(-5.0, 5.0)
                .step(0.1),
            boolean("alternate", true).describe("Alternate the spin of neighbouring vortices."),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            vortex_count: p.integer("vortex_count").max(1),
            ring_radius: p.number("ring_radius"),
            strength: p.number("strength"),
            divergence: p.number("divergence"),
            alternate: p.flag("alternate"),
        }
    }
}

impl VectorFieldFlow {
    fn centers(&self) -> impl Iterator<Item = (DVec2, f64)> + '_ {
        let step = TAU / self.vortex_count as f64;
        (0..self.vortex_count).map(move |i| {
            let center = DVec2::from_angle(i as f64 * step) * self.ring_radius;
            let spin = if self.alternate && i % 2 == 1 { -1.0 } else { 1.0 };
            (center, spin)
        })
    }
}

impl Evaluate for VectorFieldFlow {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let p = args.offset();
        let flow: DVec2 = self
            .centers()
            .map(|(center, spin)| {
                let rel = p - center;
                let d_sq = rel.length_squared() + FIELD_EPSILON;
                (rel.perp() * (spin * self.strength) + rel * self.divergence) / d_sq
            })
            .sum();
        if flow == DVec2::ZERO {
            return args.radial_angle;
        }
        flow.y.atan2(flow.x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shader::testing::{args_at, assert_close, defaults};
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn vortex_is_finite_at_center() {
        let v = defaults::<Vortex>();
        let at_center = v.evaluate(&args_at(0.0, 0.0));
        assert_close(at_center, 2.0 / FIELD_EPSILON);
        assert_close(v.evaluate(&args_at(1.0, 0.0)), 2.0 / 1.01);
    }

    #[test]
    fn dipole_on_axis_points_along_moment() {
        let d = defaults::<MagneticDipole>();
        // on the moment axis the field is parallel to it
        let a = d.evaluate(&args_at(0.5, 0.0));
        assert_close(a, 0.0);
        assert!(d.evaluate(&args_at(0.0, 0.0)).is_finite());
    }

    #[test]
    fn electric_field_between_opposite_charges() {
        let e = ElectricField {
            charge1: dvec2(-0.5, 0.0),
            charge1_value: 1.0,
            charge2: dvec2(0.5, 0.0),
            charge2_value: -1.0,
        };
        // midway, field runs from + to -
        assert_close(e.evaluate(&args_at(0.0, 0.0)), 0.0);
        assert!(e.evaluate(&args_at(0.5, 0.0)).is_finite());
    }

    #[test]
    fn gradient_and_hyperbolic() {
        let g = defaults::<GradientField>();
        assert_close(g.evaluate(&args_at(0.0, 1.0)), FRAC_PI_2);
        let flipped = GradientField {
            gradient_x: -1.0,
            gradient_y: 1.0,
        };
        assert_close(flipped.evaluate(&args_at(1.0, 0.0)), PI);

        let h = defaults::<HyperbolicField>();
        let (x, y) = (0.6, 0.3);
        assert_close(
            h.evaluate(&args_at(x, y)),
            (2.0 * x * y).atan2(0.5 * (x * x - y * y)),
        );
    }

    #[test]
    fn single_vortex_circulates() {
        let flow = VectorFieldFlow {
            vortex_count: 1,
            ring_radius: 0.0,
            strength: 1.0,
            divergence: 0.0,
            alternate: false,
        };
        // counter-clockwise circulation: tangent is radial + 90°
        assert_close(flow.evaluate(&args_at(0.5, 0.0)), FRAC_PI_2);
        assert_close(flow.evaluate(&args_at(0.0, 0.5)), PI);
    }

    #[test]
    fn divergence_pushes_outward() {
        let flow = VectorFieldFlow {
            vortex_count: 1,
            ring_radius: 0.0,
            strength: 0.0,
            divergence: 1.0,
            alternate: false,
        };
        assert_close(flow.evaluate(&args_at(0.0, 0.5)), FRAC_PI_2);
    }

    #[test]
    fn alternate_spins() {
        let flow = defaults::<VectorFieldFlow>();
        let spins: Vec<f64> = flow.centers().map(|(_, s)| s).collect();
        assert_eq!(spins, [1.0, -1.0, 1.0]);
    }
}
