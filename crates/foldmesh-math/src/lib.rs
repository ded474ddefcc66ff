#![warn(missing_docs)]

//! Math types for the foldmesh kernel.
//!
//! Thin wrappers around nalgebra providing the points, vectors, directions,
//! transforms and tolerance constants shared by the geometry and topology
//! crates, plus the [`vector`] helpers used to build face frames.
//!
//! ```
//! use foldmesh_math::{vector, Vec3};
//!
//! let basis = vector::basis_from_normal(&Vec3::new(0.0, 0.0, 2.0)).unwrap();
//! assert_eq!(basis.x, Vec3::x());
//! assert!(vector::normalize(&Vec3::zeros()).is_err());
//! ```

pub mod error;
pub mod vector;

pub use error::{MathError, Result};
pub use vector::Basis;

use nalgebra::{Isometry3, Rotation3, Translation3, Unit, UnitQuaternion, Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in a face's local 2D coordinates.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// A rigid motion: rotation, then translation.
///
/// Frames and folds only ever move geometry rigidly, so there is no scale or
/// shear and the inverse always exists.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// The underlying isometry.
    pub iso: Isometry3<f64>,
}

impl Transform {
    /// No motion.
    pub fn identity() -> Self {
        Self {
            iso: Isometry3::identity(),
        }
    }

    /// Pure translation by `offset`.
    pub fn translation(offset: Vec3) -> Self {
        Self {
            iso: Isometry3::from_parts(Translation3::from(offset), UnitQuaternion::identity()),
        }
    }

    /// Local-to-world motion of an orthonormal frame.
    ///
    /// Local `(u, v, w)` lands on `origin + u*x + v*y + w*z`.
    pub fn from_frame_axes(origin: &Point3, x: &Dir3, y: &Dir3, z: &Dir3) -> Self {
        let basis = Rotation3::from_basis_unchecked(&[x.into_inner(), y.into_inner(), z.into_inner()]);
        Self {
            iso: Isometry3::from_parts(
                Translation3::from(origin.coords),
                UnitQuaternion::from_rotation_matrix(&basis),
            ),
        }
    }

    /// Turn by `angle` radians about the line through `pivot` along `axis`.
    pub fn rotation_about_axis(pivot: &Point3, axis: &Dir3, angle: f64) -> Self {
        let turn = UnitQuaternion::from_axis_angle(axis, angle);
        // Points on the axis stay put
        let shift = pivot.coords - turn * pivot.coords;
        Self {
            iso: Isometry3::from_parts(Translation3::from(shift), turn),
        }
    }

    /// Apply `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            iso: self.iso * other.iso,
        }
    }

    /// Move a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        self.iso.transform_point(p)
    }

    /// Rotate a vector; translation does not apply.
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        self.iso.transform_vector(v)
    }

    /// The motion undoing this one.
    pub fn inverse(&self) -> Self {
        Self {
            iso: self.iso.inverse(),
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Comparison tolerances, one for lengths and one for angles.
///
/// Each topology owns one. Missing fields fall back to
/// [`Tolerance::DEFAULT`] when deserialized.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerance {
    /// Distances below this are zero (model units).
    pub linear: f64,
    /// Angle differences below this are zero (radians).
    pub angular: f64,
}

impl Tolerance {
    /// 1e-6 model units, 1e-9 radians.
    pub const DEFAULT: Self = Self {
        linear: 1e-6,
        angular: 1e-9,
    };

    /// Whether `a` and `b` are closer than the linear tolerance.
    pub fn points_equal(&self, a: &Point3, b: &Point3) -> bool {
        nalgebra::distance(a, b) < self.linear
    }

    /// Whether a length or coordinate is within the linear tolerance of zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Whether two angles in radians differ by less than the angular tolerance.
    pub fn angles_equal(&self, a: f64, b: f64) -> bool {
        (a - b).abs() < self.angular
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
