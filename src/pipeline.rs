//! Points + shader + global parameters → one angle per point.
//!
//! Post-processing runs in a fixed order: counter-rotation, then the fixed
//! offset, then quantization. Reordering changes the output whenever more than
//! one global parameter is active.

use std::f64::consts::PI;

use glam::DVec2;

use crate::defaults::CENTER_THRESHOLD;
use crate::errors::{LookupError, ParamError};
use crate::geometry::{centroid, max_distance, normalized_to_absolute};
use crate::log::{debug, trace, warn};
use crate::param::{BoundParams, ParamBuilder, ParamDescriptor, ParamValues};
use crate::param::{angle, boolean, coordinate};
use crate::shader::{Evaluate, Registry, Shader, ShaderArgs};
use crate::types::Point;

const GLOBALS: &str = "globals";

/// Shader-independent adjustments applied around every evaluation
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlobalParams {
    /// Center override in normalized [-1,1] board space
    pub custom_centroid: Option<DVec2>,
    /// Added after the shader runs
    pub fixed_offset: f64,
    /// Negate the shader output before the fixed offset
    pub counter_rotate: bool,
    /// Added to the radial angle before the shader runs
    pub radial_offset: f64,
    /// Snap to multiples of this angle; 0 disables
    pub quantize: f64,
}

impl GlobalParams {
    pub fn params() -> Vec<ParamBuilder> {
        vec![
            coordinate("custom_centroid")
                .describe("Overrides the natural centroid, in normalized board space."),
            angle("fixed_offset", 0.0)
                .describe("Added to every angle after the shader runs.")
                .step(PI / 180.0),
            boolean("counter_rotate", false)
                .describe("Negates the shader output before the fixed offset."),
            angle("radial_offset", 0.0)
                .describe("Added to the radial angle before the shader runs.")
                .step(PI / 180.0),
            angle("quantize", 0.0)
                .describe("Rounds the final angle to a multiple of this step. 0 disables.")
                .step(PI / 180.0),
        ]
    }

    /// Build [`GlobalParams::params`]; the registry does this once at startup
    pub fn descriptors() -> Result<Vec<ParamDescriptor>, ParamError> {
        Self::params().into_iter().map(ParamBuilder::build).collect()
    }

    /// Resolve an untyped bag against the built `descriptors`, falling back to
    /// defaults like shader params do.
    ///
    /// `custom_centroid` is only set when the bag supplies a valid coordinate.
    pub fn bind(descriptors: &[ParamDescriptor], values: &ParamValues) -> Self {
        let bound = BoundParams::resolve(GLOBALS, descriptors, values);
        let centroid_supplied = descriptors
            .iter()
            .find(|d| d.name() == "custom_centroid")
            .zip(values.get("custom_centroid"))
            .is_some_and(|(d, v)| d.validate(v));
        Self {
            custom_centroid: centroid_supplied.then(|| bound.coord("custom_centroid")),
            fixed_offset: bound.number("fixed_offset"),
            counter_rotate: bound.flag("counter_rotate"),
            radial_offset: bound.number("radial_offset"),
            quantize: bound.number("quantize"),
        }
    }

    /// Post-process a shader output, in radians
    pub fn apply(&self, angle: f64) -> f64 {
        let mut a = if self.counter_rotate { -angle } else { angle };
        a += self.fixed_offset;
        if self.quantize > 0.0 {
            let steps = (a / self.quantize).round();
            // a step too small to divide by leaves the angle unquantized
            if steps.is_finite() {
                a = steps * self.quantize;
            }
        }
        a
    }
}

/// Where distances and radial angles are measured from
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CenterMode {
    /// Mean of all points, or the `custom_centroid` global when set
    #[default]
    Centroid,
    /// The position of the point with this label
    Named(String),
}

/// Bypass the shader for points sitting on the center
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearCenter {
    pub threshold_mm: f64,
    /// Used as the shader output, in radians
    pub angle: f64,
}

impl Default for NearCenter {
    fn default() -> Self {
        Self {
            threshold_mm: CENTER_THRESHOLD,
            angle: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineOptions {
    pub center: CenterMode,
    pub near_center: Option<NearCenter>,
}

/// One point's final orientation
#[derive(Debug, Clone, PartialEq)]
pub struct AngleResult {
    pub label: String,
    pub x: f64,
    pub y: f64,
    /// In [0, 360)
    pub angle_degrees: f64,
}

/// Wrap degrees into [0, 360)
pub fn wrap_degrees(degrees: f64) -> f64 {
    let d = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360
    if d >= 360.0 { 0.0 } else { d }
}

/// Radians to degrees in [0, 360)
pub fn to_degrees(radians: f64) -> f64 {
    wrap_degrees(radians * 180.0 / PI)
}

/// Look up `shader`, bind everything, and compute with default options
pub fn compute_angles(
    registry: &Registry,
    points: &[Point],
    shader: &str,
    shader_values: &ParamValues,
    global_values: &ParamValues,
) -> Result<Vec<AngleResult>, LookupError> {
    compute_angles_with(
        registry,
        points,
        shader,
        shader_values,
        global_values,
        &PipelineOptions::default(),
    )
}

pub fn compute_angles_with(
    registry: &Registry,
    points: &[Point],
    shader: &str,
    shader_values: &ParamValues,
    global_values: &ParamValues,
    options: &PipelineOptions,
) -> Result<Vec<AngleResult>, LookupError> {
    let entry = registry.lookup(shader)?;
    let shader = entry.bind(shader_values);
    let globals = GlobalParams::bind(registry.globals(), global_values);
    evaluate_points(points, &shader, &globals, options)
}

fn resolve_center(
    points: &[Point],
    globals: &GlobalParams,
    options: &PipelineOptions,
) -> Result<DVec2, LookupError> {
    match &options.center {
        CenterMode::Named(label) => points
            .iter()
            .find(|p| p.label == *label)
            .map(|p| p.pos)
            .ok_or_else(|| LookupError::UnknownCenter {
                label: label.clone(),
            }),
        CenterMode::Centroid => {
            let over = globals
                .custom_centroid
                .map(|c| normalized_to_absolute(c, points));
            Ok(centroid(points, over))
        }
    }
}

/// Run a bound shader over every point, in input order.
///
/// Fails only when a named center does not exist, before any point is
/// evaluated.
pub fn evaluate_points(
    points: &[Point],
    shader: &Shader,
    globals: &GlobalParams,
    options: &PipelineOptions,
) -> Result<Vec<AngleResult>, LookupError> {
    let center = resolve_center(points, globals, options)?;
    let max_dist = max_distance(points, center);

    let results = points
        .iter()
        .map(|point| {
            let offset = point.pos - center;
            let dist = offset.length();

            let raw = match options.near_center {
                Some(near) if dist < near.threshold_mm => {
                    debug!(label = %point.label, dist, "near center, using fixed angle");
                    near.angle
                }
                _ => {
                    let (radius, dx, dy) = if max_dist > 0.0 {
                        (dist / max_dist, offset.x / max_dist, offset.y / max_dist)
                    } else {
                        (0.0, 0.0, 0.0)
                    };
                    let args = ShaderArgs {
                        radial_angle: offset.y.atan2(offset.x) + globals.radial_offset,
                        radius,
                        dx,
                        dy,
                        label: &point.label,
                    };
                    let out = shader.evaluate(&args);
                    trace!(label = %point.label, radius, out, "evaluated");
                    out
                }
            };

            let raw = if raw.is_finite() {
                raw
            } else {
                warn!(label = %point.label, value = raw, "non-finite shader output, using 0");
                0.0
            };

            AngleResult {
                label: point.label.clone(),
                x: point.x(),
                y: point.y(),
                angle_degrees: to_degrees(globals.apply(raw)),
            }
        })
        .collect();
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::ParamValue;
    use crate::shader::Fixed;
    use glam::dvec2;
    use std::f64::consts::{FRAC_PI_2, TAU};

    fn board() -> Vec<Point> {
        vec![
            Point::new("A", 0.0, 0.0),
            Point::new("B", 10.0, 0.0),
            Point::new("C", 0.0, 10.0),
            Point::new("D", -10.0, 0.0),
        ]
    }

    fn bind(values: &ParamValues) -> GlobalParams {
        GlobalParams::bind(&GlobalParams::descriptors().unwrap(), values)
    }

    #[test]
    fn global_declarations_all_build() {
        let descriptors = GlobalParams::descriptors().unwrap();
        let names: Vec<_> = descriptors.iter().map(|d| d.name()).collect();
        assert_eq!(
            names,
            ["custom_centroid", "fixed_offset", "counter_rotate", "radial_offset", "quantize"]
        );
    }

    #[test]
    fn tiny_quantize_step_is_ignored() {
        for q in [1e-310, f64::MIN_POSITIVE / 4.0, 5e-324] {
            let g = GlobalParams {
                quantize: q,
                ..Default::default()
            };
            assert_eq!(g.apply(4.7), 4.7);
            assert_eq!(g.apply(-1.25), -1.25);
        }
        let g = GlobalParams {
            quantize: 1e-300,
            ..Default::default()
        };
        assert!((g.apply(4.7) - 4.7).abs() < 1e-12);
    }

    #[test]
    fn globals_default_to_noop() {
        let g = bind(&ParamValues::new());
        assert_eq!(g, GlobalParams::default());
        assert_eq!(g.apply(1.25), 1.25);
    }

    #[test]
    fn custom_centroid_only_when_supplied_and_valid() {
        let g = bind(&ParamValues::new().with("custom_centroid", dvec2(0.5, -0.5)));
        assert_eq!(g.custom_centroid, Some(dvec2(0.5, -0.5)));

        let g = bind(&ParamValues::new().with("custom_centroid", dvec2(2.0, 0.0)));
        assert_eq!(g.custom_centroid, None);

        let g = bind(&ParamValues::new().with("custom_centroid", 0.5));
        assert_eq!(g.custom_centroid, None);
    }

    #[test]
    fn invalid_globals_fall_back() {
        let values = ParamValues::new()
            .with("fixed_offset", 9.0)
            .with("counter_rotate", ParamValue::Number(1.0))
            .with("quantize", FRAC_PI_2);
        let g = bind(&values);
        assert_eq!(g.fixed_offset, 0.0);
        assert!(!g.counter_rotate);
        assert_eq!(g.quantize, FRAC_PI_2);
    }

    #[test]
    fn post_processing_order() {
        let g = GlobalParams {
            counter_rotate: true,
            fixed_offset: 0.5,
            quantize: 1.0,
            ..Default::default()
        };
        // -(0.8) + 0.5 = -0.3 -> rounds to 0; offsetting after quantizing would give 0.5
        assert_eq!(g.apply(0.8), 0.0);
        // -(0.2) + 0.5 = 0.3 -> 0, where the negation after the offset would give -1
        assert_eq!(g.apply(0.2), 0.0);
        assert_eq!(g.apply(-0.9), 1.0);
    }

    #[test]
    fn degrees_stay_half_open() {
        assert_eq!(to_degrees(FRAC_PI_2), 90.0);
        assert_eq!(to_degrees(-1e-17), 0.0);
        assert_eq!(to_degrees(TAU), 0.0);
        assert!((to_degrees(-FRAC_PI_2) - 270.0).abs() < 1e-9);
        assert_eq!(wrap_degrees(-360.0), 0.0);
        assert_eq!(wrap_degrees(450.0), 90.0);
    }

    #[test]
    fn named_center() {
        let options = PipelineOptions {
            center: CenterMode::Named("D".into()),
            ..Default::default()
        };
        let shader: Shader = crate::shader::Radial.into();
        let out = evaluate_points(&board(), &shader, &GlobalParams::default(), &options).unwrap();
        // B lies due east of D
        assert_eq!(out[1].angle_degrees, 0.0);
        // C is 10 right and 10 up of D
        assert!((out[2].angle_degrees - 45.0).abs() < 1e-9);

        let options = PipelineOptions {
            center: CenterMode::Named("Z".into()),
            ..Default::default()
        };
        let err = evaluate_points(&board(), &shader, &GlobalParams::default(), &options).unwrap_err();
        assert_eq!(err, LookupError::UnknownCenter { label: "Z".into() });
    }

    #[test]
    fn near_center_bypass_still_post_processes() {
        let options = PipelineOptions {
            center: CenterMode::Named("A".into()),
            near_center: Some(NearCenter {
                threshold_mm: 0.5,
                angle: FRAC_PI_2,
            }),
        };
        let globals = GlobalParams {
            fixed_offset: FRAC_PI_2,
            ..Default::default()
        };
        let shader: Shader = Fixed { angle: 0.0 }.into();
        let out = evaluate_points(&board(), &shader, &globals, &options).unwrap();
        assert!((out[0].angle_degrees - 180.0).abs() < 1e-9);
        assert_eq!(out[1].angle_degrees, 90.0);
    }

    #[test]
    fn non_finite_output_becomes_zero() {
        let shader: Shader = Fixed { angle: f64::NAN }.into();
        let out = evaluate_points(
            &board(),
            &shader,
            &GlobalParams::default(),
            &PipelineOptions::default(),
        )
        .unwrap();
        assert!(out.iter().all(|r| r.angle_degrees == 0.0));
    }
}
