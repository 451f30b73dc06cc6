//! Geometric primitives for kit-of-parts composition.
//!
//! This module provides the value types the composition engine works with:
//!
//! - [`Point`] - A 3D location
//! - [`Vector`] - A 3D direction or offset
//! - [`Plane`] - An origin with two orthogonal axes (a local frame)
//! - [`DiagramPoint`] - A 2D position in diagram space
//! - [`Rotation`] - A 3D rotation
//! - [`Transform`] - A rigid transform (rotation followed by translation)
//!
//! Rotations and transforms are thin wrappers over `nalgebra`; conversions
//! to and from `nalgebra` vectors and points are provided.
//!
//! # Coordinate System
//!
//! World space is right-handed with the z-axis pointing up:
//!
//! ```text
//!        +Z
//!         │   +Y
//!         │  ╱
//!         │ ╱
//!         └──────► +X
//! ```
//!
//! A [`Plane`] only stores its x and y axes; the z-axis is always derived as
//! `x × y`.
//!
//! Diagram space is two dimensional with the y-axis pointing up. One unit is
//! the width of a piece icon.

use std::ops::Mul;

use nalgebra::{IsometryMatrix3, Matrix3, Point3, Rotation3, Translation3, Unit, Vector3};
use serde::{Deserialize, Serialize};

/// Tolerance used uniformly for "is zero", "is parallel", "is orthogonal"
/// and "is unit length" tests.
pub const TOLERANCE: f64 = 1e-5;

/// A 3D point representing a location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    z: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns the world origin `(0, 0, 0)`
    pub fn origin() -> Self {
        Self::default()
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the z-coordinate of the point
    pub fn z(self) -> f64 {
        self.z
    }

    /// Moves the point by the given vector
    pub fn add_vector(self, vector: Vector) -> Self {
        Self {
            x: self.x + vector.x,
            y: self.y + vector.y,
            z: self.z + vector.z,
        }
    }

    /// Returns the vector pointing from `other` to this point
    pub fn sub_point(self, other: Point) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Returns the position vector of this point (from the origin)
    pub fn to_vector(self) -> Vector {
        Vector::new(self.x, self.y, self.z)
    }

    /// Returns true if all coordinates are finite
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Returns true if both points are equal within `tolerance` per coordinate
    pub fn approx_eq(self, other: Point, tolerance: f64) -> bool {
        self.sub_point(other).max_abs_component() <= tolerance
    }
}

/// Parallelism relation between two vectors, see [`Vector::parallelism`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parallelism {
    /// Both vectors point the same way.
    Same,
    /// The vectors point in exactly opposite directions.
    Opposite,
    /// The vectors are not parallel (or one of them is zero).
    None,
}

/// A 3D vector representing a direction or an offset.
///
/// Port directions and plane axes are expected to be non-zero unit vectors;
/// that expectation is checked by validation, not enforced here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    #[serde(default)]
    z: f64,
}

impl Vector {
    /// Creates a new vector with the specified components
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// The zero vector
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// The unit x-axis `(1, 0, 0)`
    pub fn x_axis() -> Self {
        Self::new(1.0, 0.0, 0.0)
    }

    /// The unit y-axis `(0, 1, 0)`
    pub fn y_axis() -> Self {
        Self::new(0.0, 1.0, 0.0)
    }

    /// The unit z-axis `(0, 0, 1)`
    pub fn z_axis() -> Self {
        Self::new(0.0, 0.0, 1.0)
    }

    /// Returns the x-component of the vector
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-component of the vector
    pub fn y(self) -> f64 {
        self.y
    }

    /// Returns the z-component of the vector
    pub fn z(self) -> f64 {
        self.z
    }

    /// Adds another vector component-wise
    pub fn add(self, other: Vector) -> Self {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    /// Multiplies every component by `factor`
    pub fn scale(self, factor: f64) -> Self {
        Self::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Returns the vector pointing the opposite way
    pub fn reverse(self) -> Self {
        self.scale(-1.0)
    }

    /// Dot product
    pub fn dot(self, other: Vector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product `self × other`
    pub fn cross(self, other: Vector) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }

    /// Largest absolute component
    fn max_abs_component(self) -> f64 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    /// Returns true if every component is within [`TOLERANCE`] of zero
    pub fn is_zero(self) -> bool {
        self.max_abs_component() < TOLERANCE
    }

    /// Returns true if the length is within [`TOLERANCE`] of one
    pub fn is_unit(self) -> bool {
        (self.length() - 1.0).abs() <= TOLERANCE
    }

    /// Returns true if the two vectors are orthogonal within [`TOLERANCE`]
    pub fn is_orthogonal_to(self, other: Vector) -> bool {
        self.dot(other).abs() < TOLERANCE
    }

    /// Returns the unit vector in the same direction, or `None` for a
    /// (near) zero vector.
    pub fn try_normalize(self) -> Option<Self> {
        let length = self.length();
        if length < TOLERANCE {
            None
        } else {
            Some(self.scale(1.0 / length))
        }
    }

    /// Returns the unit vector in the same direction, or the zero vector for
    /// a (near) zero vector.
    pub fn normalize_or_zero(self) -> Self {
        self.try_normalize().unwrap_or_else(Self::zero)
    }

    /// Classifies how the two vectors are parallel.
    ///
    /// Both vectors are normalized first; they are parallel when the length
    /// of the cross product of the unit vectors is below [`TOLERANCE`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use joinery_core::geometry::{Parallelism, Vector};
    /// let up = Vector::z_axis();
    /// assert_eq!(up.parallelism(Vector::new(0.0, 0.0, 5.0)), Parallelism::Same);
    /// assert_eq!(up.parallelism(up.reverse()), Parallelism::Opposite);
    /// assert_eq!(up.parallelism(Vector::x_axis()), Parallelism::None);
    /// ```
    pub fn parallelism(self, other: Vector) -> Parallelism {
        let (Some(a), Some(b)) = (self.try_normalize(), other.try_normalize()) else {
            return Parallelism::None;
        };
        if a.cross(b).length() >= TOLERANCE {
            Parallelism::None
        } else if a.dot(b) > 0.0 {
            Parallelism::Same
        } else {
            Parallelism::Opposite
        }
    }

    /// Returns true if both vectors are equal within `tolerance` per component
    pub fn approx_eq(self, other: Vector, tolerance: f64) -> bool {
        self.add(other.reverse()).max_abs_component() <= tolerance
    }
}

impl Default for Vector {
    fn default() -> Self {
        Self::zero()
    }
}

/// A plane: an origin and an orientation given by two orthogonal axes.
///
/// The z-axis is derived as `x_axis × y_axis` and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plane {
    origin: Point,
    x_axis: Vector,
    y_axis: Vector,
}

impl Plane {
    /// Creates a new plane from an origin and two axes
    pub fn new(origin: Point, x_axis: Vector, y_axis: Vector) -> Self {
        Self {
            origin,
            x_axis,
            y_axis,
        }
    }

    /// The world XY plane at the origin
    pub fn world_xy() -> Self {
        Self::new(Point::origin(), Vector::x_axis(), Vector::y_axis())
    }

    /// Returns the origin of the plane
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Returns the x-axis of the plane
    pub fn x_axis(&self) -> Vector {
        self.x_axis
    }

    /// Returns the y-axis of the plane
    pub fn y_axis(&self) -> Vector {
        self.y_axis
    }

    /// Returns the derived z-axis (`x × y`)
    pub fn z_axis(&self) -> Vector {
        self.x_axis.cross(self.y_axis)
    }

    /// Returns a copy of the plane with a different origin
    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    /// Returns true if both axes are unit vectors orthogonal to each other
    pub fn is_orthonormal(&self) -> bool {
        self.x_axis.is_unit() && self.y_axis.is_unit() && self.x_axis.is_orthogonal_to(self.y_axis)
    }

    /// Returns the transform carrying the world XY plane onto this plane.
    ///
    /// The axes are re-orthonormalized: x is normalized, z is the normalized
    /// `x × y` and y is recomputed as `z × x`.
    pub fn to_world(&self) -> Transform {
        let x = self.x_axis.try_normalize().unwrap_or_else(Vector::x_axis);
        let z = x
            .cross(self.y_axis)
            .try_normalize()
            .unwrap_or_else(Vector::z_axis);
        let y = z.cross(x);
        Transform::new(Rotation::from_columns(x, y, z), self.origin.to_vector())
    }

    /// Applies a transform to the plane (origin as point, axes as vectors)
    pub fn transform(&self, transform: &Transform) -> Self {
        Self {
            origin: transform.apply_point(self.origin),
            x_axis: transform.apply_vector(self.x_axis),
            y_axis: transform.apply_vector(self.y_axis),
        }
    }

    /// Returns true if origins and axes are equal within `tolerance`
    pub fn approx_eq(&self, other: &Plane, tolerance: f64) -> bool {
        self.origin.approx_eq(other.origin, tolerance)
            && self.x_axis.approx_eq(other.x_axis, tolerance)
            && self.y_axis.approx_eq(other.y_axis, tolerance)
    }
}

impl Default for Plane {
    fn default() -> Self {
        Self::world_xy()
    }
}

/// A 2D point in diagram space. One unit is the width of a piece icon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DiagramPoint {
    #[serde(default)]
    x: f32,
    #[serde(default)]
    y: f32,
}

impl DiagramPoint {
    /// Creates a new diagram point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Checks if both x and y coordinates are zero
    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    /// Adds another point to this point, returning a new point
    pub fn add_point(self, other: DiagramPoint) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Multiplies both coordinates by the given factor
    pub fn scale(self, factor: f32) -> Self {
        Self {
            x: self.x * factor,
            y: self.y * factor,
        }
    }

    /// Calculates the hypotenuse (Euclidean distance from origin)
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }

    /// Returns the unit-length direction of this point seen as a vector.
    ///
    /// The zero point normalizes to itself.
    ///
    /// # Examples
    ///
    /// ```
    /// # use joinery_core::geometry::DiagramPoint;
    /// let direction = DiagramPoint::new(3.0, 4.0).normalize();
    /// assert_eq!(direction, DiagramPoint::new(0.6, 0.8));
    /// assert!(DiagramPoint::default().normalize().is_zero());
    /// ```
    pub fn normalize(self) -> Self {
        let length = self.hypot();
        if length == 0.0 {
            return self;
        }
        self.scale(1.0 / length)
    }
}

impl From<Vector> for Vector3<f64> {
    fn from(v: Vector) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector3<f64>> for Vector {
    fn from(v: Vector3<f64>) -> Self {
        Vector::new(v.x, v.y, v.z)
    }
}

impl From<Point> for Point3<f64> {
    fn from(p: Point) -> Self {
        Point3::new(p.x, p.y, p.z)
    }
}

impl From<Point3<f64>> for Point {
    fn from(p: Point3<f64>) -> Self {
        Point::new(p.x, p.y, p.z)
    }
}

/// A 3D rotation backed by a nalgebra rotation matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation(Rotation3<f64>);

impl Rotation {
    /// The identity rotation
    pub fn identity() -> Self {
        Self(Rotation3::identity())
    }

    /// Builds a rotation whose columns are the images of the unit axes.
    ///
    /// The columns must be orthonormal and right-handed; this is not checked.
    pub fn from_columns(x: Vector, y: Vector, z: Vector) -> Self {
        let matrix = Matrix3::from_columns(&[Vector3::from(x), Vector3::from(y), Vector3::from(z)]);
        Self(Rotation3::from_matrix_unchecked(matrix))
    }

    /// Rotation by `angle` radians about `axis` (right-hand rule).
    ///
    /// A (near) zero axis yields the identity.
    pub fn about_axis(axis: Vector, angle: f64) -> Self {
        match Unit::try_new(Vector3::from(axis), TOLERANCE) {
            Some(axis) => Self(Rotation3::from_axis_angle(&axis, angle)),
            None => Self::identity(),
        }
    }

    /// Rotation by `degrees` about `axis` (right-hand rule)
    pub fn about_axis_degrees(axis: Vector, degrees: f64) -> Self {
        Self::about_axis(axis, degrees.to_radians())
    }

    /// A half turn about a deterministic axis perpendicular to `reference`.
    ///
    /// The axis is world Z when `reference` lies in the XY plane (its z
    /// component is below [`TOLERANCE`]), otherwise `Z × reference`. When
    /// `reference` is itself parallel to Z that cross product vanishes and
    /// world X is used.
    pub fn half_turn_perpendicular_to(reference: Vector) -> Self {
        let axis = if reference.z.abs() < TOLERANCE {
            Vector::z_axis()
        } else {
            Vector::z_axis()
                .cross(reference)
                .try_normalize()
                .unwrap_or_else(Vector::x_axis)
        };
        Self::about_axis(axis, std::f64::consts::PI)
    }

    /// The minimal rotation mapping the direction `from` onto `to`.
    ///
    /// Parallel inputs yield the identity. Anti-parallel inputs have no
    /// unique minimal rotation; they yield
    /// [`half_turn_perpendicular_to(to)`](Self::half_turn_perpendicular_to).
    pub fn between(from: Vector, to: Vector) -> Self {
        let (Some(from), Some(to)) = (from.try_normalize(), to.try_normalize()) else {
            return Self::identity();
        };
        match from.parallelism(to) {
            Parallelism::Same => Self::identity(),
            Parallelism::Opposite => Self::half_turn_perpendicular_to(to),
            Parallelism::None => Rotation3::rotation_between(&Vector3::from(from), &Vector3::from(to))
                .map(Self)
                .unwrap_or_else(|| Self::half_turn_perpendicular_to(to)),
        }
    }

    /// Rotates a vector
    pub fn apply(&self, v: Vector) -> Vector {
        (self.0 * Vector3::from(v)).into()
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Rotation {
    type Output = Rotation;

    /// Matrix product: `(a * b)` applies `b` first, then `a`.
    fn mul(self, rhs: Rotation) -> Rotation {
        Rotation(self.0 * rhs.0)
    }
}

/// A rigid transform: `p ↦ rotation · p + translation`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    isometry: IsometryMatrix3<f64>,
}

impl Transform {
    /// Creates a transform from a rotation and a translation
    pub fn new(rotation: Rotation, translation: Vector) -> Self {
        Self {
            isometry: IsometryMatrix3::from_parts(
                Translation3::from(Vector3::from(translation)),
                rotation.0,
            ),
        }
    }

    /// The identity transform
    pub fn identity() -> Self {
        Self {
            isometry: IsometryMatrix3::identity(),
        }
    }

    /// A pure translation
    pub fn translation(offset: Vector) -> Self {
        Self::new(Rotation::identity(), offset)
    }

    /// A pure rotation about the origin
    pub fn rotation(rotation: Rotation) -> Self {
        Self::new(rotation, Vector::zero())
    }

    /// Transforms a point (rotation and translation)
    pub fn apply_point(&self, p: Point) -> Point {
        self.isometry.transform_point(&p.into()).into()
    }

    /// Transforms a vector (rotation only)
    pub fn apply_vector(&self, v: Vector) -> Vector {
        self.isometry.transform_vector(&v.into()).into()
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Transform {
    type Output = Transform;

    /// Composition: `(a * b)` applies `b` first, then `a`.
    fn mul(self, rhs: Transform) -> Transform {
        Transform {
            isometry: self.isometry * rhs.isometry,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::FRAC_PI_2;

    use float_cmp::assert_approx_eq;

    use super::*;

    fn assert_vector_eq(actual: Vector, expected: Vector) {
        assert!(
            actual.approx_eq(expected, 1e-9),
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn test_point_new_and_accessors() {
        let p = Point::new(1.0, 2.0, 3.0);
        assert_eq!(p.x(), 1.0);
        assert_eq!(p.y(), 2.0);
        assert_eq!(p.z(), 3.0);
        assert_eq!(Point::origin(), Point::default());
    }

    #[test]
    fn test_point_vector_arithmetic() {
        let p = Point::new(1.0, 1.0, 1.0);
        let moved = p.add_vector(Vector::new(1.0, -2.0, 0.5));
        assert_eq!(moved, Point::new(2.0, -1.0, 1.5));
        assert_eq!(moved.sub_point(p), Vector::new(1.0, -2.0, 0.5));
    }

    #[test]
    fn test_vector_cross_follows_right_hand_rule() {
        assert_vector_eq(Vector::x_axis().cross(Vector::y_axis()), Vector::z_axis());
        assert_vector_eq(Vector::y_axis().cross(Vector::z_axis()), Vector::x_axis());
        assert_vector_eq(Vector::z_axis().cross(Vector::x_axis()), Vector::y_axis());
    }

    #[test]
    fn test_vector_zero_and_unit_checks() {
        assert!(Vector::zero().is_zero());
        assert!(Vector::new(1e-6, 0.0, 0.0).is_zero());
        assert!(!Vector::new(1e-3, 0.0, 0.0).is_zero());

        assert!(Vector::x_axis().is_unit());
        assert!(!Vector::new(2.0, 0.0, 0.0).is_unit());
    }

    #[test]
    fn test_vector_normalize() {
        let n = Vector::new(3.0, 0.0, 4.0).try_normalize().unwrap();
        assert_approx_eq!(f64, n.x(), 0.6);
        assert_approx_eq!(f64, n.z(), 0.8);
        assert!(Vector::zero().try_normalize().is_none());
        assert_eq!(Vector::zero().normalize_or_zero(), Vector::zero());
    }

    #[test]
    fn test_vector_parallelism() {
        let a = Vector::new(0.0, 1.0, 0.0);
        assert_eq!(a.parallelism(Vector::new(0.0, 3.0, 0.0)), Parallelism::Same);
        assert_eq!(a.parallelism(Vector::new(0.0, -1.0, 0.0)), Parallelism::Opposite);
        assert_eq!(a.parallelism(Vector::new(1.0, 1.0, 0.0)), Parallelism::None);
        assert_eq!(a.parallelism(Vector::zero()), Parallelism::None);
    }

    #[test]
    fn test_plane_z_axis_is_derived() {
        let plane = Plane::world_xy();
        assert_vector_eq(plane.z_axis(), Vector::z_axis());
        assert!(plane.is_orthonormal());
    }

    #[test]
    fn test_plane_not_orthonormal() {
        let skewed = Plane::new(Point::origin(), Vector::x_axis(), Vector::new(1.0, 1.0, 0.0));
        assert!(!skewed.is_orthonormal());
    }

    #[test]
    fn test_plane_to_world_maps_world_xy_onto_plane() {
        let plane = Plane::new(
            Point::new(1.0, 2.0, 3.0),
            Vector::y_axis(),
            Vector::x_axis().reverse(),
        );
        let mapped = Plane::world_xy().transform(&plane.to_world());
        assert!(mapped.approx_eq(&plane, 1e-9));
    }

    #[test]
    fn test_rotation_about_z_quarter_turn() {
        let r = Rotation::about_axis(Vector::z_axis(), FRAC_PI_2);
        assert_vector_eq(r.apply(Vector::x_axis()), Vector::y_axis());
        assert_vector_eq(r.apply(Vector::y_axis()), Vector::x_axis().reverse());
    }

    #[test]
    fn test_rotation_about_zero_axis_is_identity() {
        assert_eq!(Rotation::about_axis(Vector::zero(), 1.0), Rotation::identity());
    }

    #[test]
    fn test_rotation_between_general() {
        let r = Rotation::between(Vector::x_axis(), Vector::y_axis());
        assert_vector_eq(r.apply(Vector::x_axis()), Vector::y_axis());
        // The rotation axis is z, so z is unchanged
        assert_vector_eq(r.apply(Vector::z_axis()), Vector::z_axis());
    }

    #[test]
    fn test_rotation_between_same_is_identity() {
        let r = Rotation::between(Vector::y_axis(), Vector::y_axis());
        assert_eq!(r, Rotation::identity());
    }

    #[test]
    fn test_rotation_between_opposite_in_xy_plane_turns_about_z() {
        let r = Rotation::between(Vector::y_axis().reverse(), Vector::y_axis());
        assert_vector_eq(r.apply(Vector::y_axis().reverse()), Vector::y_axis());
        assert_vector_eq(r.apply(Vector::x_axis()), Vector::x_axis().reverse());
        assert_vector_eq(r.apply(Vector::z_axis()), Vector::z_axis());
    }

    #[test]
    fn test_half_turn_for_vertical_reference_uses_x_axis() {
        let r = Rotation::half_turn_perpendicular_to(Vector::z_axis());
        assert_vector_eq(r.apply(Vector::z_axis()), Vector::z_axis().reverse());
        assert_vector_eq(r.apply(Vector::x_axis()), Vector::x_axis());
    }

    #[test]
    fn test_half_turn_for_tilted_reference_uses_cross_product() {
        let reference = Vector::new(1.0, 0.0, 1.0);
        let r = Rotation::half_turn_perpendicular_to(reference);
        // Axis is Z × reference = (0, 1, 0)
        assert_vector_eq(r.apply(Vector::y_axis()), Vector::y_axis());
        assert_vector_eq(r.apply(reference), reference.reverse());
    }

    #[test]
    fn test_transform_composition_order() {
        let rotate = Transform::rotation(Rotation::about_axis(Vector::z_axis(), FRAC_PI_2));
        let shift = Transform::translation(Vector::x_axis());

        // Rotate first, then shift
        let p = (shift * rotate).apply_point(Point::new(1.0, 0.0, 0.0));
        assert!(p.approx_eq(Point::new(1.0, 1.0, 0.0), 1e-9));

        // Shift first, then rotate
        let p = (rotate * shift).apply_point(Point::new(1.0, 0.0, 0.0));
        assert!(p.approx_eq(Point::new(0.0, 2.0, 0.0), 1e-9));
    }

    #[test]
    fn test_transform_vector_ignores_translation() {
        let t = Transform::translation(Vector::new(5.0, 5.0, 5.0));
        assert_eq!(t.apply_vector(Vector::x_axis()), Vector::x_axis());
    }

    #[test]
    fn test_diagram_point_arithmetic() {
        let p = DiagramPoint::new(1.0, 2.0).add_point(DiagramPoint::new(0.5, -1.0));
        assert_eq!(p, DiagramPoint::new(1.5, 1.0));
        assert_eq!(p.scale(2.0), DiagramPoint::new(3.0, 2.0));
    }

    #[test]
    fn test_plane_serde_uses_camel_case() {
        let json = serde_json::to_value(Plane::world_xy()).unwrap();
        assert_eq!(json["xAxis"]["x"], 1.0);
        assert_eq!(json["yAxis"]["y"], 1.0);
        assert_eq!(json["origin"]["z"], 0.0);
    }
}
