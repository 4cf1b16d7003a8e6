//! Shaders that snap points onto a small set of angles.
//!
//! Meant for sparse boards where a smooth field would be unreadable: every
//! output comes from an integer cell or sector index.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI, SQRT_2, TAU};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::defaults::{GRID_BIAS, LATTICE_PRIMES, MACRO_PIXEL_PRIMES, TETRAGONAL_ASPECT};
use crate::errors::RegistryError;
use crate::param::{BoundParams, ParamBuilder, angle, integer, number, percent};

use super::angle::circular_mean;
use super::{Catalog, Evaluate, Registry, ShaderArgs};

pub(super) fn register_all(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register::<QuadrantDirector>()?;
    registry.register::<BinaryGrid>()?;
    registry.register::<PixelSector>()?;
    registry.register::<MacroPixel>()?;
    registry.register::<CrystalStructure>()?;
    Ok(())
}

/// One angle per quadrant, optionally averaged along the axes
#[derive(Debug, Clone, Copy)]
pub struct QuadrantDirector {
    pub offset: f64,
    pub border: f64,
}

impl Catalog for QuadrantDirector {
    const NAME: &'static str = "quadrant_director";
    const DESCRIPTION: Option<&'static str> =
        Some("A distinct angle per quadrant, for clear direction patterns at low resolution.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            angle("offset", 0.0)
                .describe("Angular offset applied to all quadrants.")
                .range(0.0, PI)
                .step(FRAC_PI_4),
            percent("border", 0.0)
                .describe("Points this close to an axis take the mean of the two quadrants it separates.")
                .step(0.01),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            offset: p.number("offset"),
            border: p.number("border"),
        }
    }
}

impl QuadrantDirector {
    fn quadrant(&self, right: bool, up: bool) -> f64 {
        let base = match (right, up) {
            (true, true) => 0.0,
            (false, true) => FRAC_PI_2,
            (false, false) => PI,
            (true, false) => 3.0 * FRAC_PI_2,
        };
        base + self.offset
    }
}

impl Evaluate for QuadrantDirector {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let right = args.dx >= 0.0;
        let up = args.dy >= 0.0;
        let own = self.quadrant(right, up);
        if self.border <= 0.0 {
            return own;
        }

        let near_y_axis = args.dx.abs() < self.border;
        let near_x_axis = args.dy.abs() < self.border;
        match (near_y_axis, near_x_axis) {
            (true, false) => circular_mean(&[own, self.quadrant(!right, up)]),
            (false, true) => circular_mean(&[own, self.quadrant(right, !up)]),
            // on both axes at once there is no single neighbour pair
            _ => own,
        }
    }
}

/// Checkerboard of two angles
#[derive(Debug, Clone, Copy)]
pub struct BinaryGrid {
    pub grid_size: i64,
    pub angle1: f64,
    pub angle2: f64,
}

impl Catalog for BinaryGrid {
    const NAME: &'static str = "binary_grid";
    const DESCRIPTION: Option<&'static str> =
        Some("Binary checkerboard of two angles, for very low resolution.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            integer("grid_size", 2)
                .describe("Cells per unit of normalized offset.")
                .range(1.0, 10.0)
                .step(1.0),
            angle("angle1", 0.0)
                .describe("Angle of the odd cells.")
                .range(0.0, TAU)
                .step(FRAC_PI_4),
            angle("angle2", FRAC_PI_2)
                .describe("Angle of the even cells.")
                .range(0.0, TAU)
                .step(FRAC_PI_4),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            grid_size: p.integer("grid_size"),
            angle1: p.number("angle1"),
            angle2: p.number("angle2"),
        }
    }
}

impl Evaluate for BinaryGrid {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let g = self.grid_size as f64;
        let parity = |v: f64| ((v * g + GRID_BIAS).floor() as i64).rem_euclid(2);
        if parity(args.dx) ^ parity(args.dy) == 1 {
            self.angle1
        } else {
            self.angle2
        }
    }
}

/// Radial angle quantized into equal wedges
#[derive(Debug, Clone, Copy)]
pub struct PixelSector {
    pub sectors: i64,
    pub offset: f64,
}

impl Catalog for PixelSector {
    const NAME: &'static str = "pixel_sector";
    const DESCRIPTION: Option<&'static str> =
        Some("Discrete angular sectors for clear differentiation at low resolution.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            integer("sectors", 4)
                .describe("Number of angular sectors.")
                .range(2.0, 16.0)
                .step(1.0),
            angle("offset", 0.0)
                .describe("Angular offset of the sectors.")
                .range(0.0, TAU)
                .step(PI / 8.0),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            sectors: p.integer("sectors").max(1),
            offset: p.number("offset"),
        }
    }
}

impl Evaluate for PixelSector {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let size = TAU / self.sectors as f64;
        let index = ((args.radial_angle + self.offset) / size).floor();
        if self.sectors == 2 {
            // 0° and 180° look the same on a symmetric part
            index * size / 2.0 + size / 2.0
        } else {
            index * size + size / 2.0
        }
    }
}

/// Coarse cells, each hashed onto one of a few angles
#[derive(Debug, Clone, Copy)]
pub struct MacroPixel {
    pub pixel_size: i64,
    pub angle_count: i64,
}

impl Catalog for MacroPixel {
    const NAME: &'static str = "macro_pixel";
    const DESCRIPTION: Option<&'static str> =
        Some("Groups points into macro pixels sharing one angle, for very low resolution.");

    fn params() -> Vec<ParamBuilder> {
        vec![
            integer("pixel_size", 4)
                .describe("Cells per unit of normalized offset (higher = more distinct regions).")
                .range(2.0, 10.0)
                .step(1.0),
            integer("angle_count", 4)
                .describe("Number of distinct angles.")
                .range(2.0, 8.0)
                .step(1.0),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            pixel_size: p.integer("pixel_size"),
            angle_count: p.integer("angle_count").max(1),
        }
    }
}

impl Evaluate for MacroPixel {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let size = self.pixel_size as f64;
        let mx = (args.dx * size).floor() as i64;
        let my = (args.dy * size).floor() as i64;
        let (px, py) = MACRO_PIXEL_PRIMES;
        // truncated remainder: negative cells may land on negative angles
        let value = ((mx * px) ^ (my * py)) % self.angle_count;
        value as f64 * (TAU / self.angle_count as f64)
    }
}

/// Lattice geometry used by [`CrystalStructure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lattice {
    Cubic,
    Hexagonal,
    Tetragonal,
    Diamond,
}

impl Lattice {
    /// Selector value as exposed through the `lattice` parameter
    pub fn from_index(index: i64) -> Self {
        match index {
            1 => Lattice::Hexagonal,
            2 => Lattice::Tetragonal,
            3 => Lattice::Diamond,
            _ => Lattice::Cubic,
        }
    }

    /// Integer coordinates of the lattice site nearest to `(x, y)`
    fn nearest_site(self, x: f64, y: f64) -> (i64, i64) {
        match self {
            Lattice::Cubic => (x.round() as i64, y.round() as i64),
            Lattice::Tetragonal => (x.round() as i64, (y / TETRAGONAL_ASPECT).round() as i64),
            Lattice::Diamond => {
                let u = (x + y) / SQRT_2;
                let v = (y - x) / SQRT_2;
                (u.round() as i64, v.round() as i64)
            }
            Lattice::Hexagonal => {
                let row_height = 3f64.sqrt() / 2.0;
                let row = (y / row_height).round() as i64;
                // odd rows are shifted half a cell, so the nearest site may sit a row away
                (row - 1..=row + 1)
                    .map(|j| {
                        let shift = if j.rem_euclid(2) == 1 { 0.5 } else { 0.0 };
                        let i = (x - shift).round();
                        let d = (x - (i + shift)).hypot(y - j as f64 * row_height);
                        (d, (i as i64, j))
                    })
                    .min_by(|a, b| a.0.total_cmp(&b.0))
                    .map_or((0, row), |(_, site)| site)
            }
        }
    }
}

/// Snaps points to a lattice and gives each site a hashed angle
#[derive(Debug, Clone, Copy)]
pub struct CrystalStructure {
    pub lattice: Lattice,
    pub scale: f64,
    pub jitter: f64,
    pub seed: i64,
}

impl Catalog for CrystalStructure {
    const NAME: &'static str = "crystal_structure";
    const DESCRIPTION: Option<&'static str> = Some(
        "Assigns each point to its nearest site on a cubic, hexagonal, tetragonal or diamond lattice.",
    );

    fn params() -> Vec<ParamBuilder> {
        vec![
            integer("lattice", 0)
                .describe("0 cubic, 1 hexagonal, 2 tetragonal, 3 diamond.")
                .range(0.0, 3.0)
                .step(1.0),
            number("scale", 4.0)
                .describe("Lattice sites per unit of normalized offset.")
                .range(1.0, 20.0)
                .step(0.5),
            percent("jitter", 0.0)
                .describe("Seeded random deviation per site, as a fraction of a half turn.")
                .step(0.05),
            integer("seed", 0)
                .describe("Seed for the jitter.")
                .min(0.0)
                .step(1.0),
        ]
    }

    fn bind(p: &BoundParams) -> Self {
        Self {
            lattice: Lattice::from_index(p.integer("lattice")),
            scale: p.number("scale"),
            jitter: p.number("jitter"),
            seed: p.integer("seed"),
        }
    }
}

impl CrystalStructure {
    fn site_hash(i: i64, j: i64) -> i64 {
        let (pi, pj) = LATTICE_PRIMES;
        i.wrapping_mul(pi) ^ j.wrapping_mul(pj)
    }
}

impl Evaluate for CrystalStructure {
    fn evaluate(&self, args: &ShaderArgs<'_>) -> f64 {
        let (i, j) = self
            .lattice
            .nearest_site(args.dx * self.scale, args.dy * self.scale);
        let hash = Self::site_hash(i, j);
        let base = (hash.rem_euclid(360) as f64).to_radians();
        if self.jitter <= 0.0 {
            return base;
        }
        let mut rng = StdRng::seed_from_u64((self.seed ^ hash) as u64);
        base + rng.random_range(-1.0..1.0) * self.jitter * PI
    }
}
