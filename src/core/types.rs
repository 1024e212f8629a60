use serde::{Deserialize, Serialize};
use std::fmt;

// ===== GEOMETRY =====

/// A point in the plotting plane
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Project a position vector onto its first two coordinates
    pub fn from_position(position: &[f64]) -> Option<Self> {
        match position {
            [x, y, ..] => Some(Self::new(*x, *y)),
            _ => None,
        }
    }
}

impl From<(f64, f64)> for Point2 {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point2> for (f64, f64) {
    fn from(p: Point2) -> Self {
        (p.x, p.y)
    }
}

/// Rectangular plotting domain spanned by the search-space corners
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Domain {
    pub fn new(x: (f64, f64), y: (f64, f64)) -> Self {
        Self { x, y }
    }

    /// Build from two corner points (lower-left, upper-right)
    pub fn from_corners(lower: Point2, upper: Point2) -> Self {
        Self::new((lower.x, upper.x), (lower.y, upper.y))
    }

    /// Finite and non-empty along both axes
    pub fn is_valid(&self) -> bool {
        let finite = [self.x.0, self.x.1, self.y.0, self.y.1]
            .iter()
            .all(|v| v.is_finite());
        finite && self.x.0 < self.x.1 && self.y.0 < self.y.1
    }

    pub fn width(&self) -> f64 {
        self.x.1 - self.x.0
    }

    pub fn height(&self) -> f64 {
        self.y.1 - self.y.0
    }

    pub fn contains(&self, p: Point2) -> bool {
        p.x >= self.x.0 && p.x <= self.x.1 && p.y >= self.y.0 && p.y <= self.y.1
    }
}

// ===== COLOURS =====

/// 8-bit RGB colour
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
    pub const WHITE: Rgb = Rgb(255, 255, 255);
    pub const RED: Rgb = Rgb(255, 0, 0);
    pub const BLUE: Rgb = Rgb(0, 0, 255);

    pub fn gray(level: u8) -> Self {
        Self(level, level, level)
    }
}

// ===== DIMENSIONS =====

/// Point dimensions a benchmark accepts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, dim: usize) -> bool {
        match *self {
            Self::Exactly(n) => dim == n,
            Self::AtLeast(n) => dim >= n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "exactly {}", n),
            Self::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}
