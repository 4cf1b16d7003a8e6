//! Core data types: labelled board points and their bounds.

use glam::{DVec2, dvec2};

/// A labelled LED placement, in millimeters.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    pub label: String,
    pub pos: DVec2,
}

impl Point {
    pub fn new(label: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            label: label.into(),
            pos: dvec2(x, y),
        }
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.pos.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.pos.y
    }
}

/// Axis-aligned bounds of a point set
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub min: DVec2,
    pub max: DVec2,
}

impl Bounds {
    /// Bounds collapsed onto a single position
    pub fn at(p: DVec2) -> Self {
        Self { min: p, max: p }
    }

    /// Expand to include a point
    pub fn expand(&mut self, p: DVec2) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// The larger of width and height
    pub fn extent(&self) -> f64 {
        self.width().max(self.height())
    }
}

/// Length unit a point list is declared in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Unit {
    #[default]
    Millimeter,
    Mil,
    Inch,
}

impl Unit {
    /// Millimeters per one of this unit
    pub fn to_mm(self) -> f64 {
        match self {
            Unit::Millimeter => 1.0,
            Unit::Mil => 0.0254,
            Unit::Inch => 25.4,
        }
    }
}

impl std::str::FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" => Ok(Unit::Millimeter),
            "mil" | "mils" | "thou" => Ok(Unit::Mil),
            "in" | "inch" | "inches" => Ok(Unit::Inch),
            other => Err(format!("unknown unit `{other}` (expected mm, mil or inch)")),
        }
    }
}
