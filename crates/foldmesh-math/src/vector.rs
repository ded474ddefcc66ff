//! Vector helpers for building face frames.
//!
//! Every function is pure. Degenerate input (zero-length or parallel
//! vectors) produces a [`MathError`] instead of NaN components.

use crate::{MathError, Result, Tolerance, Vec3};

/// Lengths at or below this are treated as zero.
const ZERO_LENGTH: f64 = 1e-12;

/// An orthonormal right-handed basis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Basis {
    /// First axis.
    pub x: Vec3,
    /// Second axis (`z × x`).
    pub y: Vec3,
    /// Third axis.
    pub z: Vec3,
}

/// Unit vector in the direction of `v`.
pub fn normalize(v: &Vec3) -> Result<Vec3> {
    let len = v.norm();
    if len <= ZERO_LENGTH {
        return Err(MathError::ZeroLength);
    }
    Ok(v / len)
}

/// Dot product.
pub fn dot(a: &Vec3, b: &Vec3) -> f64 {
    a.dot(b)
}

/// Cross product.
pub fn cross(a: &Vec3, b: &Vec3) -> Vec3 {
    a.cross(b)
}

/// Cross product divided by its magnitude.
pub fn cross_normalized(a: &Vec3, b: &Vec3) -> Result<Vec3> {
    let c = a.cross(b);
    let len = c.norm();
    if len <= ZERO_LENGTH {
        if a.norm() <= ZERO_LENGTH || b.norm() <= ZERO_LENGTH {
            return Err(MathError::ZeroLength);
        }
        return Err(MathError::Parallel);
    }
    Ok(c / len)
}

/// Unsigned angle between two vectors, in `[0, π]` radians.
pub fn angle_between(a: &Vec3, b: &Vec3) -> Result<f64> {
    let d = normalize(a)?.dot(&normalize(b)?);
    Ok(d.clamp(-1.0, 1.0).acos())
}

/// Basis whose Z axis is `normal`.
///
/// X lies in the global XY plane, orthogonal to the normal; its sign follows
/// `normal.z` so bases of nearby normals stay close. A normal parallel to
/// global Z gets global X (negated for a downward normal).
pub fn basis_from_normal(normal: &Vec3) -> Result<Basis> {
    let z = normalize(normal)?;
    let sign = if z.z < 0.0 { -1.0 } else { 1.0 };
    let planar = Vec3::new(-z.y, z.x, 0.0) * sign;
    let x = match normalize(&planar) {
        Ok(x) => x,
        Err(_) => Vec3::x() * sign,
    };
    let y = z.cross(&x);
    Ok(Basis { x, y, z })
}

/// Basis with X along `x` and Z along `x × y`.
///
/// `y` only needs to be non-parallel to `x`; the returned Y axis is
/// recomputed as `z × x`.
pub fn basis_from_two_vectors(x: &Vec3, y: &Vec3) -> Result<Basis> {
    let z = cross_normalized(x, y)?;
    let x = normalize(x)?;
    let y = z.cross(&x);
    Ok(Basis { x, y, z })
}

/// Coordinates of `v` in an orthogonal (not necessarily unit) basis.
///
/// Each coefficient is `dot(v, axis) / dot(axis, axis)`. Returns all zeros
/// when any axis has zero length.
pub fn change_basis(v: &Vec3, x: &Vec3, y: &Vec3, z: &Vec3) -> [f64; 3] {
    let axes = [x, y, z];
    if axes.iter().any(|a| a.norm_squared() <= ZERO_LENGTH * ZERO_LENGTH) {
        return [0.0; 3];
    }
    axes.map(|a| v.dot(a) / a.norm_squared())
}

/// Whether two vectors point along the same line (either sense).
///
/// A zero vector is parallel to everything.
pub fn is_parallel(a: &Vec3, b: &Vec3, tol: &Tolerance) -> bool {
    a.cross(b).norm() <= tol.angular.max(f64::EPSILON) * a.norm() * b.norm()
}

/// Whether two vectors are orthogonal.
///
/// A zero vector is perpendicular to everything.
pub fn is_perpendicular(a: &Vec3, b: &Vec3, tol: &Tolerance) -> bool {
    a.dot(b).abs() <= tol.angular.max(f64::EPSILON) * a.norm() * b.norm()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn assert_orthonormal(b: &Basis) {
        assert_relative_eq!(b.x.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(b.y.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(b.z.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(b.x.dot(&b.y), 0.0, epsilon = 1e-12);
        assert_relative_eq!(b.y.dot(&b.z), 0.0, epsilon = 1e-12);
        assert_relative_eq!(b.x.cross(&b.y), b.z, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize() {
        let n = normalize(&Vec3::new(3.0, 0.0, 4.0)).unwrap();
        assert_relative_eq!(n, Vec3::new(0.6, 0.0, 0.8), epsilon = 1e-12);
        assert_eq!(normalize(&Vec3::zeros()), Err(MathError::ZeroLength));
    }

    #[test]
    fn test_cross_normalized_rejects_parallel() {
        let c = cross_normalized(&Vec3::new(2.0, 0.0, 0.0), &Vec3::new(0.0, 5.0, 0.0)).unwrap();
        assert_relative_eq!(c, Vec3::z(), epsilon = 1e-12);
        assert_eq!(
            cross_normalized(&Vec3::x(), &Vec3::new(-3.0, 0.0, 0.0)),
            Err(MathError::Parallel)
        );
        assert_eq!(
            cross_normalized(&Vec3::x(), &Vec3::zeros()),
            Err(MathError::ZeroLength)
        );
    }

    #[test]
    fn test_angle_between_range() {
        assert_relative_eq!(angle_between(&Vec3::x(), &Vec3::y()).unwrap(), FRAC_PI_2);
        assert_relative_eq!(angle_between(&Vec3::x(), &-Vec3::x()).unwrap(), PI);
        assert_relative_eq!(angle_between(&Vec3::x(), &(Vec3::x() * 7.0)).unwrap(), 0.0);
        assert!(angle_between(&Vec3::zeros(), &Vec3::x()).is_err());
    }

    #[test]
    fn test_basis_from_normal_tilted() {
        let n = Vec3::new(1.0, 2.0, 3.0);
        let b = basis_from_normal(&n).unwrap();
        assert_orthonormal(&b);
        assert_relative_eq!(b.z, n.normalize(), epsilon = 1e-12);
        assert_relative_eq!(b.x.z, 0.0);
    }

    #[test]
    fn test_basis_from_normal_along_z() {
        let up = basis_from_normal(&Vec3::z()).unwrap();
        assert_orthonormal(&up);
        assert_relative_eq!(up.x, Vec3::x());

        let down = basis_from_normal(&-Vec3::z()).unwrap();
        assert_orthonormal(&down);
        assert_relative_eq!(down.x, -Vec3::x());
    }

    #[test]
    fn test_basis_from_two_vectors() {
        let b = basis_from_two_vectors(&Vec3::new(2.0, 0.0, 0.0), &Vec3::new(1.0, 1.0, 0.0)).unwrap();
        assert_orthonormal(&b);
        assert_relative_eq!(b.x, Vec3::x());
        assert_relative_eq!(b.y, Vec3::y(), epsilon = 1e-12);
        assert_relative_eq!(b.z, Vec3::z(), epsilon = 1e-12);
        assert!(basis_from_two_vectors(&Vec3::x(), &Vec3::x()).is_err());
    }

    #[test]
    fn test_change_basis_scaled_axes() {
        let v = Vec3::new(4.0, 6.0, -1.0);
        let coords = change_basis(&v, &(Vec3::x() * 2.0), &(Vec3::y() * 3.0), &Vec3::z());
        assert_relative_eq!(coords[0], 2.0);
        assert_relative_eq!(coords[1], 2.0);
        assert_relative_eq!(coords[2], -1.0);

        let degenerate = change_basis(&v, &Vec3::x(), &Vec3::zeros(), &Vec3::z());
        assert_eq!(degenerate, [0.0; 3]);
    }

    #[test]
    fn test_parallel_and_perpendicular() {
        let tol = Tolerance::DEFAULT;
        assert!(is_parallel(&Vec3::x(), &Vec3::new(-2.0, 0.0, 0.0), &tol));
        assert!(!is_parallel(&Vec3::x(), &Vec3::new(1.0, 1e-3, 0.0), &tol));
        assert!(is_perpendicular(&Vec3::x(), &Vec3::new(0.0, 3.0, 4.0), &tol));
        assert!(!is_perpendicular(&Vec3::x(), &Vec3::new(1e-3, 1.0, 0.0), &tol));
    }
}
