//! Shaders that modulate the radial angle directly.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, TAU};

use crate::defaults::{MIN_DIVISOR, golden_angle};
use crate::errors::RegistryError;
use crate::param::{BoundParams, ParamBuilder, angle, boolean, integer, number, percent};

use super::{Catalog, Evaluate, Registry, ShaderArgs};

pub(super) fn register_all(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register::<Radial>()?;
    registry.register::<RadialOffset>()?;
    registry.register::<RadialCircle>()?;
    registry.register::<RadialPerpendicular>()?;
    registry.register::<Fixed>()?;
    registry.register::<SpiralRotation>()?;
    registry.register::<FibonacciRotation>()?;
    registry.register::<RadialWave>()?;
    registry.register::<HarmonicResonance>()?;
    registry.register::<Flower>()?;
    registry.register::<Pinwheel>()?;
    registry.register::<LogarithmicSpiral>()?;
    registry.register::<WormholeTwist>()?;
    registry.register::<PulsarRotation>()?;
    registry.register::<QuantumSpin>()?;
    registry.register::<RadialSymmetry>()?;
    registry.register::<SpiralGalaxy>()?;
    registry.register::<KaleidoscopicReflection>()?;
    registry.register::<LissajousRotation>()?;
    Ok(())
}

fn angle_param(name: &str, default: f64) -> ParamBuilder {
    angle(name, default).range(0.0, TAU).step(PI / 180.0)
}

// ============================================================================
// Pass-through and fixed rotations
// ============================================================================

/// The radial angle unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct Radial;

impl Catalog for Radial {
    const NAME: &'static str = "radial";
    const DESCRIPTION: Option<&'static str> =
        Some("Points every LED away from the center along its radial angle.");

    fn params() -> Vec<ParamBuilder> {
        vec![]
    }

    fn bind(_: &BoundParams) -> Self {
        Radial
    }
}

impl Evaluate for Radial {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        args.radial_angle
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RadialOffset {
    pub offset: f64,
}

impl Catalog for RadialOffset {
    const NAME: &'static str = "radial_offset";
    const DESCRIPTION: Option<&'static str> =
        Some("The radial angle rotated by a constant offset.");

    fn params() -> Vec<ParamBuilder> {
        vec![angle_param("offset", 0.0).describe("Angular offset added to the radial angle.")]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            offset: p.number("offset"),
        }
    }
}

impl Evaluate for RadialOffset {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        args.radial_angle + self.offset
    }
}

/// Tangential orientation: radial angle plus a quarter turn
#[derive(Debug, Clone, Copy, Default)]
pub struct RadialCircle;

impl Catalog for RadialCircle {
    const NAME: &'static str = "radial_circle";
    const DESCRIPTION: Option<&'static str> =
        Some("Orients LEDs tangentially, forming concentric circles around the center.");

    fn params() -> Vec<ParamBuilder> {
        vec![]
    }

    fn bind(_: &BoundParams) -> Self {
        RadialCircle
    }
}

impl Evaluate for RadialCircle {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        args.radial_angle + FRAC_PI_2
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RadialPerpendicular;

impl Catalog for RadialPerpendicular {
    const NAME: &'static str = "radial_perpendicular";
    const DESCRIPTION: Option<&'static str> =
        Some("Mirrors the radial angle about the 45° diagonal (90° minus the radial angle).");

    fn params() -> Vec<ParamBuilder> {
        vec![]
    }

    fn bind(_: &BoundParams) -> Self {
        RadialPerpendicular
    }
}

impl Evaluate for RadialPerpendicular {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        -args.radial_angle + FRAC_PI_2
    }
}

/// One angle for every LED
#[derive(Debug, Clone, Copy)]
pub struct Fixed {
    pub angle: f64,
}

impl Catalog for Fixed {
    const NAME: &'static str = "fixed";
    const DESCRIPTION: Option<&'static str> = Some("Fixed angle.");

    fn params() -> Vec<ParamBuilder> {
        vec![angle_param("angle", FRAC_PI_2).describe("The angle every LED takes, regardless of position.")]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            angle: p.number("angle"),
        }
    }
}

impl Evaluate for Fixed {
    fn evaluate(&self, _: &ShaderArgs<'_>) -> f64 {
        self.angle
    }
}

// ============================================================================
// Spirals
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct SpiralRotation {
    pub multiplier: f64,
}

impl Catalog for SpiralRotation {
    const NAME: &'static str = "spiral_rotation";
    const DESCRIPTION: Option<&'static str> =
        Some("Rotation that grows linearly with radius, forming a spiral.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            number("multiplier", 0.1)
                .describe("Radians of extra rotation per unit of normalized radius.")
                .min(0.1)
                .step(0.1),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            multiplier: p.number("multiplier"),
        }
    }
}

impl Evaluate for SpiralRotation {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        args.radial_angle + args.radius * self.multiplier
    }
}

/// Spiral stepped by the golden angle
#[derive(Debug, Clone, Copy, Default)]
pub struct FibonacciRotation;

impl Catalog for FibonacciRotation {
    const NAME: &'static str = "fibonacci_rotation";
    const DESCRIPTION: Option<&'static str> =
        Some("Rotates by the golden angle scaled with radius, like a sunflower head.");

    fn params() -> Vec<ParamBuilder> {
        vec![]
    }

    fn bind(_: &BoundParams) -> Self {
        FibonacciRotation
    }
}

impl Evaluate for FibonacciRotation {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        args.radial_angle + golden_angle() * args.radius
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LogarithmicSpiral {
    pub growth_rate: f64,
    pub counter_rotate: bool,
}

impl Catalog for LogarithmicSpiral {
    const NAME: &'static str = "logarithmic_spiral";
    const DESCRIPTION: Option<&'static str> =
        Some("Logarithmic spiral whose winding follows ln(radius + 1).");

    fn params() -> Vec<ParamBuilder> {
        vec![
            number("growth_rate", 0.2)
                .describe("How tightly the spiral winds; smaller values wind tighter.")
                .range(0.1, 10.0)
                .step(0.1),
            boolean("counter_rotate", false).describe("Wind the spiral the other way."),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            growth_rate: p.number("growth_rate"),
            counter_rotate: p.flag("counter_rotate"),
        }
    }
}

impl Evaluate for LogarithmicSpiral {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let twist = self.growth_rate * (args.radius + 1.0).ln();
        if self.counter_rotate {
            args.radial_angle - twist
        } else {
            args.radial_angle + twist
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WormholeTwist {
    pub growth_rate: f64,
    pub twist_amplitude: f64,
    pub twist_frequency: f64,
}

impl Catalog for WormholeTwist {
    const NAME: &'static str = "wormhole_twist";
    const DESCRIPTION: Option<&'static str> =
        Some("Logarithmic spiral with a sinusoidal twist layered on top.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            number("growth_rate", 0.2)
                .describe("Tightness of the spiral.")
                .range(0.1, 10.0)
                .step(0.1),
            percent("twist_amplitude", 0.5).describe("Strength of the sinusoidal twist."),
            number("twist_frequency", 5.0)
                .describe("Oscillations of the twist across the radius.")
                .min(0.1)
                .step(0.5),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            growth_rate: p.number("growth_rate"),
            twist_amplitude: p.number("twist_amplitude"),
            twist_frequency: p.number("twist_frequency"),
        }
    }
}

impl Evaluate for WormholeTwist {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let spiral = self.growth_rate * (args.radius + 1.0).ln();
        let twist = self.twist_amplitude * (self.twist_frequency * args.radius).sin();
        args.radial_angle + spiral + twist
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SpiralGalaxy {
    pub arm_count: i64,
    pub arm_tightness: f64,
}

impl Catalog for SpiralGalaxy {
    const NAME: &'static str = "spiral_galaxy";
    const DESCRIPTION: Option<&'static str> =
        Some("Spiral arms that sweep around the center like a galaxy.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            integer("arm_count", 3)
                .describe("Number of spiral arms.")
                .range(1.0, 10.0)
                .step(1.0),
            number("arm_tightness", 0.2)
                .describe("How tightly the arms are wound.")
                .range(0.1, 1.0)
                .step(0.1),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            arm_count: p.integer("arm_count").max(1),
            arm_tightness: p.number("arm_tightness"),
        }
    }
}

impl Evaluate for SpiralGalaxy {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let per_arm = TAU / self.arm_count as f64;
        let arm = (args.radial_angle / per_arm).floor();
        args.radial_angle + arm * per_arm + args.radius * self.arm_tightness
    }
}

// ============================================================================
// Sinusoidal modulation
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub struct RadialWave {
    pub frequency: f64,
    pub amplitude: f64,
}

impl Catalog for RadialWave {
    const NAME: &'static str = "radial_wave";
    const DESCRIPTION: Option<&'static str> =
        Some("Sinusoidal variation of the radial angle along the radius.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            number("frequency", 1.5)
                .describe("Cycles of the wave per unit of normalized radius.")
                .min(0.0)
                .step(0.1),
            percent("amplitude", 0.5).describe("Strength of the angular deviation."),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            frequency: p.number("frequency"),
            amplitude: p.number("amplitude"),
        }
    }
}

impl Evaluate for RadialWave {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        args.radial_angle + (args.radius * self.frequency).sin() * self.amplitude
    }
}

/// Two sine harmonics summed onto the radial angle
#[derive(Debug, Clone, Copy)]
pub struct HarmonicResonance {
    pub amplitude1: f64,
    pub frequency1: f64,
    pub phase1: f64,
    pub amplitude2: f64,
    pub frequency2: f64,
    pub phase2: f64,
}

impl Catalog for HarmonicResonance {
    const NAME: &'static str = "harmonic_resonance";
    const DESCRIPTION: Option<&'static str> =
        Some("Two sine harmonics at different frequencies and phases modulate the angle.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            percent("amplitude1", 0.3).describe("Amplitude of the first harmonic."),
            number("frequency1", 3.0)
                .describe("Frequency of the first harmonic.")
                .min(0.1)
                .step(0.1),
            angle_param("phase1", 0.0).describe("Phase of the first harmonic."),
            percent("amplitude2", 0.2).describe("Amplitude of the second harmonic."),
            number("frequency2", 5.0)
                .describe("Frequency of the second harmonic.")
                .min(0.1)
                .step(0.1),
            angle_param("phase2", FRAC_PI_4).describe("Phase of the second harmonic."),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            amplitude1: p.number("amplitude1"),
            frequency1: p.number("frequency1"),
            phase1: p.number("phase1"),
            amplitude2: p.number("amplitude2"),
            frequency2: p.number("frequency2"),
            phase2: p.number("phase2"),
        }
    }
}

impl Evaluate for HarmonicResonance {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let h1 = self.amplitude1 * (self.frequency1 * args.radius + self.phase1).sin();
        let h2 = self.amplitude2 * (self.frequency2 * args.radius + self.phase2).sin();
        args.radial_angle + h1 + h2
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Flower {
    pub petals: i64,
    pub intensity: f64,
}

impl Catalog for Flower {
    const NAME: &'static str = "flower";
    const DESCRIPTION: Option<&'static str> =
        Some("Petal pattern from a sine of the radial angle.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            integer("petals", 5)
                .describe("Number of petals around the center.")
                .min(1.0)
                .step(1.0),
            percent("intensity", 0.3).describe("How strongly the petals bend the angle."),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            petals: p.integer("petals"),
            intensity: p.number("intensity"),
        }
    }
}

impl Evaluate for Flower {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        args.radial_angle + (args.radial_angle * self.petals as f64).sin() * self.intensity
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Pinwheel {
    pub strength: f64,
    pub offset: f64,
}

impl Catalog for Pinwheel {
    const NAME: &'static str = "pinwheel";
    const DESCRIPTION: Option<&'static str> =
        Some("Pinwheel: radial angle plus a radius-scaled rotation and a fixed offset.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            number("strength", 0.2)
                .describe("Rotation added per unit of normalized radius.")
                .min(0.0)
                .step(0.1),
            angle_param("offset", FRAC_PI_4).describe("Base rotation of the pinwheel."),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            strength: p.number("strength"),
            offset: p.number("offset"),
        }
    }
}

impl Evaluate for Pinwheel {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        args.radial_angle + self.strength * args.radius + self.offset
    }
}

#[derive(Debug, Clone, Copy)]
pub struct LissajousRotation {
    pub freq_x: f64,
    pub freq_y: f64,
    pub phase_offset: f64,
}

impl Catalog for LissajousRotation {
    const NAME: &'static str = "lissajous_rotation";
    const DESCRIPTION: Option<&'static str> =
        Some("Lissajous-style orientation from independent x and y frequencies.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            number("freq_x", 3.0)
                .describe("Frequency applied to the horizontal offset.")
                .min(0.0)
                .step(0.1),
            number("freq_y", 2.0)
                .describe("Frequency applied to the vertical offset.")
                .min(0.0)
                .step(0.1),
            number("phase_offset", FRAC_PI_4)
                .describe("Constant phase added to the pattern.")
                .range(0.0, TAU)
                .step(PI / 180.0),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            freq_x: p.number("freq_x"),
            freq_y: p.number("freq_y"),
            phase_offset: p.number("phase_offset"),
        }
    }
}

impl Evaluate for LissajousRotation {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let phase = (args.dy * self.freq_y).sin().atan2((args.dx * self.freq_x).cos());
        phase + self.phase_offset
    }
}

// ============================================================================
// Discrete states
// ============================================================================

/// Alternates between the radial angle and a shifted angle in radial bands
#[derive(Debug, Clone, Copy)]
pub struct PulsarRotation {
    pub pulse_count: i64,
    pub scaling: f64,
    pub phase_shift: f64,
}

impl Catalog for PulsarRotation {
    const NAME: &'static str = "pulsar_rotation";
    const DESCRIPTION: Option<&'static str> =
        Some("Bands of radius alternate between the radial angle and a shifted angle.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            integer("pulse_count", 6)
                .describe("Number of alternations across the radius.")
                .min(1.0)
                .step(1.0),
            number("scaling", 5.0)
                .describe("Stretches the bands; larger values give wider bands.")
                .min(0.0)
                .step(0.1),
            angle_param("phase_shift", FRAC_PI_2).describe("Rotation applied in alternate bands."),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            pulse_count: p.integer("pulse_count").max(1),
            scaling: p.number("scaling"),
            phase_shift: p.number("phase_shift"),
        }
    }
}

impl PulsarRotation {
    /// With two pulses a half-turn shift makes both states look identical,
    /// so any multiple of π becomes a quarter turn.
    fn effective_shift(&self) -> f64 {
        if self.pulse_count == 2 {
            let turns = self.phase_shift / PI;
            if self.phase_shift > 0.0 && (turns - turns.round()).abs() < 1e-9 {
                return FRAC_PI_2;
            }
        }
        self.phase_shift
    }
}

impl Evaluate for PulsarRotation {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let scaling = if self.scaling.abs() < MIN_DIVISOR {
            MIN_DIVISOR
        } else {
            self.scaling
        };
        let pulse = (args.radius * self.pulse_count as f64 / scaling).floor();
        args.radial_angle + pulse.rem_euclid(2.0) * self.effective_shift()
    }
}

/// Snaps the radial angle onto `spin_states` evenly spaced directions
#[derive(Debug, Clone, Copy)]
pub struct QuantumSpin {
    pub spin_states: i64,
}

impl Catalog for QuantumSpin {
    const NAME: &'static str = "quantum_spin";
    const DESCRIPTION: Option<&'static str> =
        Some("Quantizes the orientation into discrete spin states.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            integer("spin_states", 8)
                .describe("Number of discrete states; more states give finer steps.")
                .min(2.0)
                .step(1.0),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            spin_states: p.integer("spin_states").max(2),
        }
    }
}

impl Evaluate for QuantumSpin {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let n = self.spin_states as f64;
        let index = (args.radial_angle * n / TAU).round();
        if self.spin_states == 2 {
            // 0° and 180° are indistinguishable on a symmetric LED: use 90° and 180°
            return index.rem_euclid(2.0) * FRAC_PI_2 + FRAC_PI_2;
        }
        index * (TAU / n) + PI / n
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RadialSymmetry {
    pub symmetry_count: i64,
}

impl Catalog for RadialSymmetry {
    const NAME: &'static str = "radial_symmetry";
    const DESCRIPTION: Option<&'static str> =
        Some("Repeats the same angle sweep in every symmetric sector.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            integer("symmetry_count", 6)
                .describe("Number of symmetric sectors.")
                .range(1.0, 12.0)
                .step(1.0),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            symmetry_count: p.integer("symmetry_count").max(1),
        }
    }
}

impl Evaluate for RadialSymmetry {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        args.radial_angle % (TAU / self.symmetry_count as f64)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct KaleidoscopicReflection {
    pub sectors: i64,
    pub offset: f64,
}

impl Catalog for KaleidoscopicReflection {
    const NAME: &'static str = "kaleidoscopic_reflection";
    const DESCRIPTION: Option<&'static str> =
        Some("Folds every angle into one mirrored sector, like a kaleidoscope.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            integer("sectors", 6)
                .describe("Number of mirror sectors.")
                .min(2.0)
                .step(1.0),
            angle_param("offset", 0.0).describe("Rotation of the sector layout."),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            sectors: p.integer("sectors").max(1),
            offset: p.number("offset"),
        }
    }
}

impl Evaluate for KaleidoscopicReflection {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let sector = TAU / self.sectors as f64;
        let adjusted = (args.radial_angle - self.offset).rem_euclid(TAU);
        let mut local = adjusted % sector;
        if local > sector / 2.0 {
            local = sector - local;
        }
        local + self.offset
    }
}
