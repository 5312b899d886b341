use std::fmt;
use std::ops;

use serde::{Deserialize, Serialize};

use crate::trim_f64;

/// A point in the local planar frame of a city. X grows to the east, Z grows to the south, so
/// north is "up" on screen. Unit-free; the whole dataset spans a fixed size.
///
/// Persisted as a two-element array `[x, z]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct ProjectedPoint {
    pub x: f64,
    pub z: f64,
}

impl ProjectedPoint {
    pub fn new(x: f64, z: f64) -> ProjectedPoint {
        ProjectedPoint { x, z }
    }

    pub fn dist_to(self, other: ProjectedPoint) -> f64 {
        (self.x - other.x).hypot(self.z - other.z)
    }

    /// Rounds both coordinates to a few decimal places, for compact persistence.
    pub fn trimmed(self, decimals: i32) -> ProjectedPoint {
        ProjectedPoint::new(trim_f64(self.x, decimals), trim_f64(self.z, decimals))
    }

    /// Lifts the point into 3D at some height.
    pub fn at_height(self, y: f64) -> Pt3D {
        Pt3D::new(self.x, y, self.z)
    }
}

impl From<[f64; 2]> for ProjectedPoint {
    fn from(pair: [f64; 2]) -> Self {
        ProjectedPoint::new(pair[0], pair[1])
    }
}

impl From<ProjectedPoint> for [f64; 2] {
    fn from(pt: ProjectedPoint) -> Self {
        [pt.x, pt.z]
    }
}

impl fmt::Display for ProjectedPoint {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ProjectedPoint({}, {})", self.x, self.z)
    }
}

/// A point or direction in the 3D scene. Y is up.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Pt3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Pt3D {
    pub const UP: Pt3D = Pt3D {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };

    pub fn new(x: f64, y: f64, z: f64) -> Pt3D {
        Pt3D { x, y, z }
    }

    pub fn dot(self, other: Pt3D) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Pt3D) -> Pt3D {
        Pt3D::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn dist_to(self, other: Pt3D) -> f64 {
        (self - other).length()
    }

    /// Returns a unit vector in the same direction, or the zero vector if this one is too short
    /// to have a direction.
    pub fn normalized(self) -> Pt3D {
        let len = self.length();
        if len < crate::EPSILON_DIST {
            Pt3D::default()
        } else {
            self * (1.0 / len)
        }
    }

    pub fn to_f32(self) -> [f32; 3] {
        [self.x as f32, self.y as f32, self.z as f32]
    }
}

impl ops::Add for Pt3D {
    type Output = Pt3D;

    fn add(self, other: Pt3D) -> Pt3D {
        Pt3D::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl ops::Sub for Pt3D {
    type Output = Pt3D;

    fn sub(self, other: Pt3D) -> Pt3D {
        Pt3D::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl ops::Mul<f64> for Pt3D {
    type Output = Pt3D;

    fn mul(self, scalar: f64) -> Pt3D {
        Pt3D::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl ops::Neg for Pt3D {
    type Output = Pt3D;

    fn neg(self) -> Pt3D {
        Pt3D::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Pt3D {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Pt3D({}, {}, {})", self.x, self.y, self.z)
    }
}
