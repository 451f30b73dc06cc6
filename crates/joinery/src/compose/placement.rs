//! Diagram placement: the 2D analogue of pose composition.
//!
//! A child's diagram center is its parent's center moved by the connection's
//! offset plus one more unit in the offset's direction, so that icons one
//! unit wide never touch along a connection. There is no rotation and no
//! collision solving.

use log::warn;

use joinery_core::geometry::DiagramPoint;

/// Computes the diagram center of a child piece.
///
/// A zero offset contributes a zero nudge, so the child lands on its
/// parent's center.
///
/// # Examples
///
/// ```
/// # use joinery::compose::child_center;
/// # use joinery_core::geometry::DiagramPoint;
/// let center = child_center(DiagramPoint::new(1.0, 1.0), DiagramPoint::new(0.0, 1.0));
/// assert_eq!(center, DiagramPoint::new(1.0, 3.0));
/// ```
pub fn child_center(parent_center: DiagramPoint, offset: DiagramPoint) -> DiagramPoint {
    if offset.is_zero() {
        warn!("Connection has a zero diagram offset, child overlaps its parent");
    }
    parent_center
        .add_point(offset)
        .add_point(offset.normalize())
}
