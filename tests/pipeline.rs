use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

use glam::dvec2;
use ledspin::{
    CenterMode, Evaluate, GlobalParams, LookupError, Orientation, ParamValue, ParamValues, PipelineOptions,
    Point, Registry, ShaderState, Unit, compute_angles, compute_angles_with, parse_points, to_csv,
};

fn registry() -> Registry {
    Registry::builtin().expect("built-in catalog")
}

/// A(0,0) B(10,0) C(0,10) D(-10,0); natural centroid (0, 2.5)
fn cross() -> Vec<Point> {
    vec![
        Point::new("A", 0.0, 0.0),
        Point::new("B", 10.0, 0.0),
        Point::new("C", 0.0, 10.0),
        Point::new("D", -10.0, 0.0),
    ]
}

fn angles(results: &[ledspin::AngleResult]) -> Vec<f64> {
    results.iter().map(|r| r.angle_degrees).collect()
}

#[test]
fn fixed_ignores_position() {
    let values = ParamValues::new().with("angle", FRAC_PI_2);
    let out = compute_angles(&registry(), &cross(), "fixed", &values, &ParamValues::new()).unwrap();
    assert_eq!(angles(&out), [90.0; 4]);
    let labels: Vec<_> = out.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, ["A", "B", "C", "D"]);
    assert_eq!((out[1].x, out[1].y), (10.0, 0.0));
}

#[test]
fn radial_points_away_from_center() {
    let points = vec![Point::new("B", 10.0, 0.0), Point::new("D", -10.0, 0.0)];
    let out = compute_angles(&registry(), &points, "radial", &ParamValues::new(), &ParamValues::new())
        .unwrap();
    assert_eq!(out[0].angle_degrees, 0.0);
    assert!((out[1].angle_degrees - 180.0).abs() < 1e-9);
}

#[test]
fn two_spin_states_are_a_quarter_turn_apart() {
    let (s, c) = 10f64.to_radians().sin_cos();
    let points = vec![
        Point::new("P", 10.0 * c, 10.0 * s),
        Point::new("Q", -10.0 * c, -10.0 * s),
    ];
    let values = ParamValues::new().with("spin_states", 2_i64);
    let out = compute_angles(&registry(), &points, "quantum_spin", &values, &ParamValues::new())
        .unwrap();
    assert!((out[0].angle_degrees - 90.0).abs() < 1e-9, "{}", out[0].angle_degrees);
    assert!((out[1].angle_degrees - 180.0).abs() < 1e-9, "{}", out[1].angle_degrees);
}

#[test]
fn quantize_snaps_and_is_idempotent() {
    let globals = ParamValues::new().with("quantize", FRAC_PI_4);
    let out = compute_angles(&registry(), &cross(), "radial", &ParamValues::new(), &globals).unwrap();
    for a in angles(&out) {
        let steps = a / 45.0;
        assert!((steps - steps.round()).abs() < 1e-9, "{a} is not a multiple of 45");
    }

    let g = GlobalParams::bind(registry().globals(), &globals);
    for raw in [0.1, 1.0, 2.5, -3.0, 6.2] {
        let once = g.apply(raw);
        assert!((g.apply(once) - once).abs() < 1e-12);
        assert!((once - raw).abs() <= FRAC_PI_4 / 2.0 + 1e-12);
    }
}

#[test]
fn subnormal_quantize_leaves_angles_alone() {
    let registry = registry();
    let plain = compute_angles(&registry, &cross(), "radial", &ParamValues::new(), &ParamValues::new())
        .unwrap();
    for q in [1e-300, 1e-310, 5e-324] {
        let globals = ParamValues::new().with("quantize", q);
        let out = compute_angles(&registry, &cross(), "radial", &ParamValues::new(), &globals).unwrap();
        for (p, o) in plain.iter().zip(&out) {
            assert!(o.angle_degrees.is_finite(), "quantize {q} gave {}", o.angle_degrees);
            assert!((p.angle_degrees - o.angle_degrees).abs() < 1e-9, "quantize {q}");
        }
    }
}

#[test]
fn radial_offset_turns_the_input_angle() {
    let registry = registry();
    let globals = ParamValues::new().with("radial_offset", FRAC_PI_2);
    let out = compute_angles(&registry, &cross(), "radial", &ParamValues::new(), &globals).unwrap();
    insta::assert_snapshot!(to_csv(&out, Orientation::Deg0), @r"
    A,0.00
    B,75.96
    C,180.00
    D,284.04
    ");
}

#[test]
fn radial_offset_runs_before_the_shader() {
    // quantum_spin snaps its input, so a pre-shader offset is not a post-shader one
    let registry = registry();
    let ten = 10f64.to_radians();
    let before = ParamValues::new().with("radial_offset", ten);
    let after = ParamValues::new().with("fixed_offset", ten);
    let before = compute_angles(&registry, &cross(), "quantum_spin", &ParamValues::new(), &before).unwrap();
    let after = compute_angles(&registry, &cross(), "quantum_spin", &ParamValues::new(), &after).unwrap();

    // B sits at -14.04°: -4.04° snaps to state 0, -14.04° snaps to state 0 and is then offset
    assert!((before[1].angle_degrees - 22.5).abs() < 1e-9, "{}", before[1].angle_degrees);
    assert!((after[1].angle_degrees - 32.5).abs() < 1e-9, "{}", after[1].angle_degrees);
    assert_ne!(angles(&before), angles(&after));
}

#[test]
fn counter_rotate_mirrors_angles() {
    let registry = registry();
    let plain = compute_angles(&registry, &cross(), "radial", &ParamValues::new(), &ParamValues::new())
        .unwrap();
    let globals = ParamValues::new().with("counter_rotate", true);
    let mirrored = compute_angles(&registry, &cross(), "radial", &ParamValues::new(), &globals).unwrap();
    for (p, m) in plain.iter().zip(&mirrored) {
        let sum = (p.angle_degrees + m.angle_degrees) % 360.0;
        assert!(sum < 1e-9 || 360.0 - sum < 1e-9, "{} + {}", p.angle_degrees, m.angle_degrees);
    }
}

#[test]
fn custom_centroid_moves_the_center() {
    // (0, -0.25) in normalized space is (0, 0) on this board
    let globals = ParamValues::new().with("custom_centroid", dvec2(0.0, -0.25));
    let out = compute_angles(&registry(), &cross(), "radial", &ParamValues::new(), &globals).unwrap();
    assert_eq!(out[1].angle_degrees, 0.0);
    assert_eq!(out[2].angle_degrees, 90.0);
}

#[test]
fn degenerate_boards_stay_finite() {
    let registry = registry();
    let single = vec![Point::new("ONLY", 3.0, 4.0)];
    let coincident = vec![
        Point::new("A", 1.0, 1.0),
        Point::new("B", 1.0, 1.0),
        Point::new("C", 1.0, 1.0),
    ];
    for entry in registry.iter() {
        for board in [&single, &coincident] {
            let out = compute_angles(
                &registry,
                board,
                entry.name(),
                &ParamValues::new(),
                &ParamValues::new(),
            )
            .unwrap();
            assert_eq!(out.len(), board.len());
            for r in &out {
                assert!(
                    (0.0..360.0).contains(&r.angle_degrees),
                    "{}: {}",
                    entry.name(),
                    r.angle_degrees
                );
            }
        }
    }
}

#[test]
fn empty_board_gives_no_results() {
    let out = compute_angles(&registry(), &[], "vortex", &ParamValues::new(), &ParamValues::new())
        .unwrap();
    assert!(out.is_empty());
}

#[test]
fn lookup_errors_come_first() {
    let registry = registry();
    let err = compute_angles(&registry, &cross(), "vortx", &ParamValues::new(), &ParamValues::new())
        .unwrap_err();
    assert_eq!(
        err,
        LookupError::UnknownShader {
            name: "vortx".into(),
            suggestion: Some("did you mean `vortex`?".into()),
        }
    );

    let options = PipelineOptions {
        center: CenterMode::Named("Z9".into()),
        ..Default::default()
    };
    let err = compute_angles_with(
        &registry,
        &cross(),
        "radial",
        &ParamValues::new(),
        &ParamValues::new(),
        &options,
    )
    .unwrap_err();
    assert_eq!(err, LookupError::UnknownCenter { label: "Z9".into() });
}

#[test]
fn invalid_values_fall_back_to_defaults() {
    let registry = registry();
    let bad = ParamValues::new().with("angle", 42.0);
    let out = compute_angles(&registry, &cross(), "fixed", &bad, &ParamValues::new()).unwrap();
    // fixed defaults to a quarter turn
    assert_eq!(angles(&out), [90.0; 4]);

    let wrong_kind = ParamValues::new().with("angle", true);
    let out = compute_angles(&registry, &cross(), "fixed", &wrong_kind, &ParamValues::new()).unwrap();
    assert_eq!(angles(&out), [90.0; 4]);
}

#[test]
fn csv_export() {
    let out = compute_angles(&registry(), &cross(), "radial", &ParamValues::new(), &ParamValues::new())
        .unwrap();
    insta::assert_snapshot!(to_csv(&out, Orientation::Deg0), @r"
    A,270.00
    B,345.96
    C,90.00
    D,194.04
    ");
    insta::assert_snapshot!(to_csv(&out, Orientation::Deg90), @r"
    A,0.00
    B,75.96
    C,180.00
    D,284.04
    ");
}

#[test]
fn ingest_then_compute() {
    let text = "# board in mils\nA,0,0\nB,1000,0\nC,0,1000\nD,-1000,0\n";
    let points = parse_points("cross.csv", text, Unit::Mil).unwrap();
    assert!((points[1].x() - 25.4).abs() < 1e-9);
    let out = compute_angles(&registry(), &points, "radial", &ParamValues::new(), &ParamValues::new())
        .unwrap();
    let csv = to_csv(&out, Orientation::Deg0);
    assert_eq!(csv.lines().count(), 4);
    assert!(csv.starts_with("A,270.00\n"));
}

#[test]
fn shader_listing() {
    let registry = registry();
    insta::assert_snapshot!(registry.sorted_names().join("\n"), @r"
    binary_grid
    chaotic_attractor
    chaotic_rotation
    concentric_zones
    crystal_structure
    electric_field
    fibonacci_rotation
    fixed
    flower
    fractal_noise
    gradient_field
    harmonic_resonance
    hyperbolic_field
    kaleidoscopic_reflection
    lateral_wave
    lissajous_rotation
    logarithmic_spiral
    macro_pixel
    magnetic_dipole
    moire_pattern
    perlin_rotation
    pinwheel
    pixel_sector
    pulsar_rotation
    quadrant_director
    quantum_spin
    radial
    radial_circle
    radial_offset
    radial_perpendicular
    radial_symmetry
    radial_wave
    random
    ripple
    spiral_galaxy
    spiral_rotation
    threshold_angle
    turbulence
    vector_field_flow
    vortex
    wave_interference
    wormhole_twist
    ");
    assert_eq!(registry.names().next(), Some("radial"));
}

#[test]
fn state_round_trips_through_json() {
    let state = ShaderState::new("ripple")
        .param("frequency", 4.0)
        .param("sharpness", 2.5)
        .global("counter_rotate", true)
        .global("custom_centroid", dvec2(0.5, -0.25));

    let json = serde_json::to_string_pretty(&state).unwrap();
    insta::assert_snapshot!(json, @r#"
    {
      "shader": "ripple",
      "params": {
        "frequency": 4.0,
        "sharpness": 2.5
      },
      "globals": {
        "counter_rotate": true,
        "custom_centroid": {
          "x": 0.5,
          "y": -0.25
        }
      }
    }
    "#);

    let back: ShaderState = serde_json::from_str(&json).unwrap();
    assert_eq!(back, state);

    let registry = registry();
    assert_eq!(
        back.compute(&registry, &cross()).unwrap(),
        state.compute(&registry, &cross()).unwrap()
    );
}

#[test]
fn state_without_values_uses_defaults() {
    let state: ShaderState =
        serde_json::from_str(r#"{ "shader": "quantum_spin", "params": { "spin_states": 2 } }"#).unwrap();
    assert_eq!(state.params.get("spin_states"), Some(&ParamValue::Number(2.0)));
    assert!(state.globals.is_empty());
    assert_eq!(state.compute(&registry(), &cross()).unwrap().len(), 4);
}

#[test]
fn deterministic_shaders_repeat() {
    let registry = registry();
    for entry in registry.iter() {
        if !entry.with_defaults().is_deterministic() {
            continue;
        }
        let run = || {
            compute_angles(&registry, &cross(), entry.name(), &ParamValues::new(), &ParamValues::new())
                .unwrap()
        };
        assert_eq!(run(), run(), "{} is not repeatable", entry.name());
    }
}
