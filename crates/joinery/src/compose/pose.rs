//! Rigid-transform composition of a child piece onto its parent.
//!
//! Given the parent's world plane, both port frames and the joint
//! parameters of a connection, [`child_plane`] computes where the child
//! piece sits in world space.
//!
//! # Reference frame
//!
//! Joint parameters are measured in a frame attached to the parent port.
//! The frame is obtained by rotating the world axes with the rotation that
//! carries world Y onto the parent port direction:
//!
//! ```text
//!   world Y  ──►  gap axis    (along the parent port direction)
//!   world X  ──►  shift axis  (lateral)
//!   world Z  ──►  rise axis   (vertical)
//! ```

use joinery_core::{
    geometry::{Parallelism, Plane, Point, Rotation, Transform, Vector},
    model::Connection,
};

/// Point and direction of a port, expressed in its piece's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortFrame {
    point: Point,
    direction: Vector,
}

impl PortFrame {
    pub fn new(point: Point, direction: Vector) -> Self {
        Self { point, direction }
    }

    pub fn point(&self) -> Point {
        self.point
    }

    pub fn direction(&self) -> Vector {
        self.direction
    }

    /// Re-expresses the frame through a transform
    pub fn transformed(&self, transform: &Transform) -> Self {
        Self {
            point: transform.apply_point(self.point),
            direction: transform.apply_vector(self.direction),
        }
    }
}

/// The offsets and angles of a connection.
///
/// Angles are in degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Joint {
    pub gap: f64,
    pub shift: f64,
    pub rise: f64,
    pub rotation: f64,
    pub turn: f64,
    pub tilt: f64,
}

impl From<&Connection> for Joint {
    fn from(connection: &Connection) -> Self {
        Self {
            gap: connection.gap(),
            shift: connection.shift(),
            rise: connection.rise(),
            rotation: connection.rotation(),
            turn: connection.turn(),
            tilt: connection.tilt(),
        }
    }
}

/// Computes the transform carrying the child piece's local frame into the
/// parent piece's local frame.
///
/// The child is first centered on its port point, then oriented so its port
/// faces the parent port, rotated, turned and tilted, and finally moved
/// onto the parent port point plus the gap, shift and rise offsets.
pub fn child_transform(parent_port: &PortFrame, child_port: &PortFrame, joint: &Joint) -> Transform {
    let parent_direction = parent_port.direction;
    let child_direction = child_port.direction;

    // Equal directions leave the alignment free around the shared axis
    let alignment = match parent_direction.parallelism(child_direction) {
        Parallelism::Same => Rotation::half_turn_perpendicular_to(parent_direction),
        Parallelism::Opposite | Parallelism::None => {
            Rotation::between(child_direction.reverse(), parent_direction)
        }
    };

    let reference = Rotation::between(Vector::y_axis(), parent_direction);
    let gap_direction = reference.apply(Vector::y_axis());
    let shift_direction = reference.apply(Vector::x_axis());
    let rise_direction = reference.apply(Vector::z_axis());

    let rotate = Rotation::about_axis(parent_direction, -joint.rotation.to_radians());
    let mut orientation = rotate * alignment;
    let turn_axis = rotate.apply(rise_direction);
    let tilt_axis = rotate.apply(shift_direction);

    let turn = Rotation::about_axis(turn_axis, joint.turn.to_radians());
    orientation = turn * orientation;
    let tilt_axis = turn.apply(tilt_axis);

    let tilt = Rotation::about_axis(tilt_axis, joint.tilt.to_radians());
    orientation = tilt * orientation;

    let offset = gap_direction
        .scale(joint.gap)
        .add(shift_direction.scale(joint.shift))
        .add(rise_direction.scale(joint.rise));

    Transform::translation(parent_port.point.to_vector().add(offset))
        * Transform::rotation(orientation)
        * Transform::translation(child_port.point.to_vector().reverse())
}

/// Computes the child's world plane.
///
/// # Examples
///
/// ```
/// # use joinery::compose::{child_plane, Joint, PortFrame};
/// # use joinery_core::geometry::{Plane, Point, Vector};
/// let parent_port = PortFrame::new(Point::origin(), Vector::y_axis());
/// let child_port = PortFrame::new(Point::origin(), Vector::y_axis().reverse());
/// let joint = Joint { gap: 2.0, ..Joint::default() };
///
/// let plane = child_plane(&Plane::world_xy(), &parent_port, &child_port, &joint);
/// assert!(plane.origin().approx_eq(Point::new(0.0, 2.0, 0.0), 1e-9));
/// assert!(plane.x_axis().approx_eq(Vector::x_axis(), 1e-9));
/// ```
pub fn child_plane(
    parent_plane: &Plane,
    parent_port: &PortFrame,
    child_port: &PortFrame,
    joint: &Joint,
) -> Plane {
    let local = child_transform(parent_port, child_port, joint);
    Plane::world_xy().transform(&(parent_plane.to_world() * local))
}


#[cfg(test)]
mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    fn direction_strategy() -> impl Strategy<Value = Vector> {
        prop_oneof![
            Just(Vector::x_axis()),
            Just(Vector::y_axis()),
            Just(Vector::z_axis()),
            Just(Vector::x_axis().reverse()),
            Just(Vector::y_axis().reverse()),
            Just(Vector::z_axis().reverse()),
            (-1.0f64..1.0, -1.0f64..1.0, -1.0f64..1.0).prop_filter_map(
                "non-zero direction",
                |(x, y, z)| Vector::new(x, y, z).try_normalize().filter(|_| x.abs() + y.abs() + z.abs() > 0.1),
            ),
        ]
    }

    fn joint_strategy() -> impl Strategy<Value = Joint> {
        (
            -5.0f64..5.0,
            -5.0f64..5.0,
            -5.0f64..5.0,
            0.0f64..360.0,
            0.0f64..360.0,
            0.0f64..360.0,
        )
            .prop_map(|(gap, shift, rise, rotation, turn, tilt)| Joint {
                gap,
                shift,
                rise,
                rotation,
                turn,
                tilt,
            })
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Composed planes always have unit, mutually orthogonal axes.
    fn check_child_plane_is_orthonormal(
        parent_direction: Vector,
        child_direction: Vector,
        joint: Joint,
    ) -> Result<(), TestCaseError> {
        let parent = PortFrame::new(Point::new(0.5, 0.0, 0.0), parent_direction);
        let child = PortFrame::new(Point::new(0.0, -0.5, 0.0), child_direction);

        let plane = child_plane(&Plane::world_xy(), &parent, &child, &joint);
        prop_assert!(plane.is_orthonormal(), "{plane:?}");
        Ok(())
    }

    /// Without angles, the child port ends up facing the parent port.
    fn check_ports_face_each_other(
        parent_direction: Vector,
        child_direction: Vector,
    ) -> Result<(), TestCaseError> {
        let parent = PortFrame::new(Point::origin(), parent_direction);
        let child = PortFrame::new(Point::origin(), child_direction);

        let transform = child_transform(&parent, &child, &Joint::default());
        let facing = transform.apply_vector(child_direction).reverse();
        prop_assert!(facing.approx_eq(parent_direction, 1e-6), "{facing:?}");
        Ok(())
    }

    /// Composition is a pure function of its inputs.
    fn check_composition_is_deterministic(
        parent_direction: Vector,
        child_direction: Vector,
        joint: Joint,
    ) -> Result<(), TestCaseError> {
        let parent = PortFrame::new(Point::origin(), parent_direction);
        let child = PortFrame::new(Point::origin(), child_direction);

        let first = child_plane(&Plane::world_xy(), &parent, &child, &joint);
        let second = child_plane(&Plane::world_xy(), &parent, &child, &joint);
        prop_assert_eq!(first, second);
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn child_plane_is_orthonormal(
            parent_direction in direction_strategy(),
            child_direction in direction_strategy(),
            joint in joint_strategy(),
        ) {
            check_child_plane_is_orthonormal(parent_direction, child_direction, joint)?;
        }

        #[test]
        fn ports_face_each_other(
            parent_direction in direction_strategy(),
            child_direction in direction_strategy(),
        ) {
            check_ports_face_each_other(parent_direction, child_direction)?;
        }

        #[test]
        fn composition_is_deterministic(
            parent_direction in direction_strategy(),
            child_direction in direction_strategy(),
            joint in joint_strategy(),
        ) {
            check_composition_is_deterministic(parent_direction, child_direction, joint)?;
        }
    }
}
