//! CSV output for pick-and-place tooling.

use std::fmt;
use std::str::FromStr;

use crate::pipeline::{AngleResult, wrap_degrees};

/// Whole-board rotation added on export, for layouts placed sideways
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Orientation {
    pub fn degrees(self) -> f64 {
        match self {
            Orientation::Deg0 => 0.0,
            Orientation::Deg90 => 90.0,
            Orientation::Deg180 => 180.0,
            Orientation::Deg270 => 270.0,
        }
    }
}

impl FromStr for Orientation {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(Orientation::Deg0),
            "90" => Ok(Orientation::Deg90),
            "180" => Ok(Orientation::Deg180),
            "270" => Ok(Orientation::Deg270),
            other => Err(format!("unsupported orientation `{other}` (expected 0, 90, 180 or 270)")),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.degrees())
    }
}

/// Exported angle, rounded to hundredths and kept below 360
fn export_angle(degrees: f64, orientation: Orientation) -> f64 {
    let a = (wrap_degrees(degrees + orientation.degrees()) * 100.0).round() / 100.0;
    if a >= 360.0 { 0.0 } else { a }
}

/// `label,angle` lines in result order, angles with two decimals
pub fn to_csv(results: &[AngleResult], orientation: Orientation) -> String {
    results
        .iter()
        .map(|r| format!("{},{:.2}", r.label, export_angle(r.angle_degrees, orientation)))
        .collect::<Vec<_>>()
        .join("\n")
}
