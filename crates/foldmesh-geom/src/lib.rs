#![warn(missing_docs)]

//! Curve and frame types for the foldmesh kernel.
//!
//! Provides the parametric curves the topology layer measures against
//! (lines, circles, and three-point arcs) and the orthonormal [`Frame`]
//! every face carries.
//!
//! ```
//! use foldmesh_geom::Arc3d;
//! use foldmesh_math::Point3;
//!
//! // Three quarters of the unit circle, the long way round through -X
//! let arc = Arc3d::through_points(
//!     Point3::new(0.0, 1.0, 0.0),
//!     Point3::new(-1.0, 0.0, 0.0),
//!     Point3::new(1.0, 0.0, 0.0),
//! )
//! .unwrap();
//! assert!((arc.sweep().to_degrees() - 270.0).abs() < 1e-9);
//! ```

pub mod error;

pub use error::{GeomError, Result};

use foldmesh_math::vector::{self, basis_from_normal, change_basis};
use foldmesh_math::{Dir3, MathError, Point2, Point3, Tolerance, Transform, Vec3};
use std::f64::consts::PI;

/// Relative size below which a triangle of points counts as collinear.
const COLLINEAR_EPS: f64 = 1e-12;

// =============================================================================
// Curve types
// =============================================================================

/// The kind of a curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// Straight line segment.
    Line,
    /// Full circle.
    Circle,
    /// Circular arc.
    Arc,
}

/// A curve the topology layer can measure edges against.
///
/// Curves are traced over a closed parameter interval.
pub trait Curve3d: Send + Sync + std::fmt::Debug {
    /// Point at parameter `t`.
    fn point_at(&self, t: f64) -> Point3;

    /// First and last parameter.
    fn parameter_range(&self) -> (f64, f64);

    /// Which kind of curve this is.
    fn kind(&self) -> CurveKind;

    /// Point at the first parameter.
    fn start_point(&self) -> Point3 {
        self.point_at(self.parameter_range().0)
    }

    /// Point at the last parameter.
    fn end_point(&self) -> Point3 {
        self.point_at(self.parameter_range().1)
    }
}

// =============================================================================
// Line3d
// =============================================================================

/// A straight segment, `origin` at `t = 0` and `origin + direction` at `t = 1`.
#[derive(Debug, Clone)]
pub struct Line3d {
    /// Starting point.
    pub origin: Point3,
    /// Direction (end minus start, not unit length).
    pub direction: Vec3,
}

impl Line3d {
    /// Segment from `start` to `end`.
    pub fn from_points(start: Point3, end: Point3) -> Self {
        Self {
            origin: start,
            direction: end - start,
        }
    }

    /// Segment length.
    pub fn length(&self) -> f64 {
        self.direction.norm()
    }

    /// Point halfway along the segment.
    pub fn midpoint(&self) -> Point3 {
        self.origin + 0.5 * self.direction
    }

    /// Distance from `p` to the closest point of the segment.
    pub fn distance_to_point(&self, p: &Point3) -> f64 {
        let len2 = self.direction.norm_squared();
        if len2 == 0.0 {
            return (p - self.origin).norm();
        }
        let t = ((p - self.origin).dot(&self.direction) / len2).clamp(0.0, 1.0);
        (p - self.point_at(t)).norm()
    }
}

impl Curve3d for Line3d {
    fn point_at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    fn parameter_range(&self) -> (f64, f64) {
        (0.0, 1.0)
    }

    fn kind(&self) -> CurveKind {
        CurveKind::Line
    }
}

// =============================================================================
// Circle3d
// =============================================================================

/// A circle traced counter-clockwise about `normal`, starting along `x_dir`.
#[derive(Debug, Clone)]
pub struct Circle3d {
    /// Center of the circle.
    pub center: Point3,
    /// Radius.
    pub radius: f64,
    /// Direction from the center to the point at `t = 0`.
    pub x_dir: Dir3,
    /// Second in-plane direction (`normal × x_dir`).
    pub y_dir: Dir3,
    /// Normal to the circle plane.
    pub normal: Dir3,
}

impl Circle3d {
    /// The unique circle through three points.
    ///
    /// `t=0` lands on `a`, and the normal is `(b - a) × (c - b)`, so walking
    /// the circle forward visits `a`, `b`, `c` in that order.
    pub fn through_points(a: Point3, b: Point3, c: Point3) -> Result<Self> {
        let u = b - a;
        let v = c - a;
        if u.norm() == 0.0 || v.norm() == 0.0 || (c - b).norm() == 0.0 {
            return Err(GeomError::CoincidentPoints);
        }
        let w = u.cross(&v);
        let w2 = w.norm_squared();
        if w.norm() <= COLLINEAR_EPS * u.norm() * v.norm() {
            return Err(GeomError::CollinearPoints);
        }

        let offset = (u.norm_squared() * v.cross(&w) + v.norm_squared() * w.cross(&u)) / (2.0 * w2);
        let center = a + offset;
        let normal = vector::normalize(&w)?;
        let x = vector::normalize(&(a - center))?;
        let y = normal.cross(&x);
        Ok(Self {
            center,
            radius: offset.norm(),
            x_dir: Dir3::new_unchecked(x),
            y_dir: Dir3::new_unchecked(y),
            normal: Dir3::new_unchecked(normal),
        })
    }

    /// Parameter of the point of this circle closest to `p`, in `[0, 2π)`.
    pub fn parameter_of(&self, p: &Point3) -> f64 {
        let d = p - self.center;
        let t = d.dot(self.y_dir.as_ref()).atan2(d.dot(self.x_dir.as_ref()));
        if t < 0.0 {
            t + 2.0 * PI
        } else {
            t
        }
    }
}

impl Curve3d for Circle3d {
    fn point_at(&self, t: f64) -> Point3 {
        let (sin, cos) = t.sin_cos();
        let radial = self.x_dir.into_inner() * cos + self.y_dir.into_inner() * sin;
        self.center + radial * self.radius
    }

    fn parameter_range(&self) -> (f64, f64) {
        (0.0, 2.0 * PI)
    }

    fn kind(&self) -> CurveKind {
        CurveKind::Circle
    }
}

// =============================================================================
// Arc3d
// =============================================================================

/// A circular arc: a span `[start_angle, end_angle]` of a [`Circle3d`].
#[derive(Debug, Clone)]
pub struct Arc3d {
    /// Supporting circle.
    pub circle: Circle3d,
    /// Parameter of the first endpoint (radians).
    pub start_angle: f64,
    /// Parameter of the last endpoint (radians), always above `start_angle`.
    pub end_angle: f64,
}

impl Arc3d {
    /// The arc that starts at `start`, passes through `mid`, and ends at `end`.
    ///
    /// The sweep lies in `(0, 2π)`: it is the side of the circle that
    /// contains `mid`, however far round that takes it.
    pub fn through_points(start: Point3, mid: Point3, end: Point3) -> Result<Self> {
        let circle = Circle3d::through_points(start, mid, end)?;
        let end_angle = circle.parameter_of(&end);
        Ok(Self {
            circle,
            start_angle: 0.0,
            end_angle,
        })
    }

    /// Angle swept from start to end, in radians.
    pub fn sweep(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Arc length.
    pub fn length(&self) -> f64 {
        self.circle.radius * self.sweep()
    }
}

impl Curve3d for Arc3d {
    fn point_at(&self, t: f64) -> Point3 {
        self.circle.point_at(t)
    }

    fn parameter_range(&self) -> (f64, f64) {
        (self.start_angle, self.end_angle)
    }

    fn kind(&self) -> CurveKind {
        CurveKind::Arc
    }
}

// =============================================================================
// Frame
// =============================================================================

/// A right-handed orthonormal coordinate frame.
///
/// Local coordinates `(u, v, w)` map to `origin + u * x_dir + v * y_dir + w * z_dir`.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Origin point.
    pub origin: Point3,
    /// Local X axis.
    pub x_dir: Dir3,
    /// Local Y axis (`z_dir × x_dir`).
    pub y_dir: Dir3,
    /// Local Z axis.
    pub z_dir: Dir3,
}

impl Frame {
    /// Frame with Z along `normal` and X along `x_hint` projected off the normal.
    pub fn new(origin: Point3, normal: Vec3, x_hint: Vec3) -> Result<Self> {
        let z = vector::normalize(&normal)?;
        let planar = x_hint - x_hint.dot(&z) * z;
        let x = vector::normalize(&planar).map_err(|_| MathError::Parallel)?;
        let y = z.cross(&x);
        Ok(Self {
            origin,
            x_dir: Dir3::new_unchecked(x),
            y_dir: Dir3::new_unchecked(y),
            z_dir: Dir3::new_unchecked(z),
        })
    }

    /// Frame with Z along `normal` and X picked by [`basis_from_normal`].
    pub fn from_normal(origin: Point3, normal: Vec3) -> Result<Self> {
        let basis = basis_from_normal(&normal)?;
        Ok(Self {
            origin,
            x_dir: Dir3::new_unchecked(basis.x),
            y_dir: Dir3::new_unchecked(basis.y),
            z_dir: Dir3::new_unchecked(basis.z),
        })
    }

    /// Local `(u, v, w)` coordinates of a world point.
    pub fn to_local(&self, p: &Point3) -> Point3 {
        let [u, v, w] = change_basis(
            &(p - self.origin),
            self.x_dir.as_ref(),
            self.y_dir.as_ref(),
            self.z_dir.as_ref(),
        );
        Point3::new(u, v, w)
    }

    /// Project a world point onto the frame's XY plane.
    pub fn project(&self, p: &Point3) -> Point2 {
        let local = self.to_local(p);
        Point2::new(local.x, local.y)
    }

    /// World point of local `(u, v, w)` coordinates.
    pub fn to_world(&self, local: &Point3) -> Point3 {
        self.transform().apply_point(local)
    }

    /// Local-to-world transform.
    pub fn transform(&self) -> Transform {
        Transform::from_frame_axes(&self.origin, &self.x_dir, &self.y_dir, &self.z_dir)
    }

    /// Signed distance from a point to the frame's XY plane.
    pub fn signed_distance(&self, p: &Point3) -> f64 {
        (p - self.origin).dot(self.z_dir.as_ref())
    }

    /// Whether the axes are unit length, mutually orthogonal, and right-handed.
    pub fn is_orthonormal(&self, tol: &Tolerance) -> bool {
        let (x, y, z) = (self.x_dir.as_ref(), self.y_dir.as_ref(), self.z_dir.as_ref());
        [x, y, z].iter().all(|a| tol.is_zero(a.norm() - 1.0))
            && tol.is_zero(x.dot(y))
            && tol.is_zero(y.dot(z))
            && tol.is_zero(z.dot(x))
            && tol.is_zero((x.cross(y) - z).norm())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_line_segment() {
        let line = Line3d::from_points(Point3::origin(), Point3::new(10.0, 0.0, 0.0));
        assert!((line.midpoint() - line.point_at(0.5)).norm() < 1e-12);
        assert_eq!(line.kind(), CurveKind::Line);
        assert!((line.length() - 10.0).abs() < 1e-12);
        assert!((line.end_point() - Point3::new(10.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((line.distance_to_point(&Point3::new(12.0, 0.0, 0.0)) - 2.0).abs() < 1e-12);
        assert!((line.distance_to_point(&Point3::new(3.0, 4.0, 0.0)) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_circle_winds_counter_clockwise() {
        let circle = Circle3d::through_points(
            Point3::new(6.0, 0.0, 2.0),
            Point3::new(1.0, 5.0, 2.0),
            Point3::new(-4.0, 0.0, 2.0),
        )
        .unwrap();
        assert!((circle.center - Point3::new(1.0, 0.0, 2.0)).norm() < 1e-12);
        assert!((circle.start_point() - Point3::new(6.0, 0.0, 2.0)).norm() < 1e-12);
        let quarter = circle.point_at(FRAC_PI_2);
        assert!((quarter - Point3::new(1.0, 5.0, 2.0)).norm() < 1e-12);
        assert!((circle.parameter_of(&quarter) - FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_circle_through_right_triangle() {
        let c = Circle3d::through_points(
            Point3::origin(),
            Point3::new(4.0, 0.0, 0.0),
            Point3::new(0.0, 3.0, 0.0),
        )
        .unwrap();
        assert!((c.radius - 2.5).abs() < 1e-12);
        assert!((c.center - Point3::new(2.0, 1.5, 0.0)).norm() < 1e-12);
        assert!((c.normal.as_ref() - Vec3::z()).norm() < 1e-12);
        assert!((c.point_at(0.0) - Point3::origin()).norm() < 1e-12);
    }

    #[test]
    fn test_circle_rejects_degenerate_points() {
        let a = Point3::origin();
        let b = Point3::new(1.0, 1.0, 1.0);
        let c = Point3::new(2.0, 2.0, 2.0);
        assert_eq!(
            Circle3d::through_points(a, b, c).unwrap_err(),
            GeomError::CollinearPoints
        );
        assert_eq!(
            Circle3d::through_points(a, a, c).unwrap_err(),
            GeomError::CoincidentPoints
        );
    }

    #[test]
    fn test_arc_sweep_follows_mid_point() {
        // Quarter arc in the YZ plane: +Y through the diagonal to -Z
        let s = std::f64::consts::FRAC_1_SQRT_2;
        let quarter = Arc3d::through_points(
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, s, -s),
            Point3::new(0.0, 0.0, -1.0),
        )
        .unwrap();
        assert!((quarter.sweep() - FRAC_PI_2).abs() < 1e-12);

        // Same endpoints, mid on the far side: three quarters of the circle
        let long = Arc3d::through_points(
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, -s, s),
            Point3::new(0.0, 0.0, -1.0),
        )
        .unwrap();
        assert!((long.sweep() - 3.0 * FRAC_PI_2).abs() < 1e-12);
        assert!((long.length() - 3.0 * FRAC_PI_2).abs() < 1e-12);
        assert!((long.end_point() - Point3::new(0.0, 0.0, -1.0)).norm() < 1e-12);
    }

    #[test]
    fn test_arc_half_circle() {
        let arc = Arc3d::through_points(
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(-1.0, 0.0, 0.0),
        )
        .unwrap();
        assert!((arc.sweep() - PI).abs() < 1e-12);
    }

    #[test]
    fn test_frame_projects_hint() {
        let f = Frame::new(
            Point3::new(1.0, 2.0, 3.0),
            Vec3::new(0.0, 0.0, 2.0),
            Vec3::new(1.0, 0.0, 5.0),
        )
        .unwrap();
        assert!(f.is_orthonormal(&Tolerance::DEFAULT));
        assert!((f.x_dir.as_ref() - Vec3::x()).norm() < 1e-12);
        assert!((f.y_dir.as_ref() - Vec3::y()).norm() < 1e-12);

        let p = Point3::new(2.0, 4.0, 6.0);
        let local = f.to_local(&p);
        assert!((local - Point3::new(1.0, 2.0, 3.0)).norm() < 1e-12);
        assert!((f.to_world(&local) - p).norm() < 1e-12);
        assert!((f.signed_distance(&p) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_frame_rejects_hint_along_normal() {
        let err = Frame::new(Point3::origin(), Vec3::z(), Vec3::new(0.0, 0.0, -3.0)).unwrap_err();
        assert_eq!(err, GeomError::Math(MathError::Parallel));
        assert!(Frame::new(Point3::origin(), Vec3::zeros(), Vec3::x()).is_err());
    }

    #[test]
    fn test_frame_from_normal() {
        let f = Frame::from_normal(Point3::origin(), Vec3::new(0.0, -1.0, 1.0)).unwrap();
        assert!(f.is_orthonormal(&Tolerance::DEFAULT));
        let uv = f.project(&(Point3::origin() + f.y_dir.as_ref() * 2.0));
        assert!(uv.x.abs() < 1e-12);
        assert!((uv.y - 2.0).abs() < 1e-12);
    }
}
