//! Geometric primitives for pipeline diagram layout.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in diagram space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangular bounding box defined by minimum and maximum coordinates
//!
//! # Coordinate System
//!
//! Stagegraph uses a coordinate system consistent with SVG and most diagram
//! renderers:
//!
//! ```text
//!   (0,0) ────────► +X   (data flows this way)
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Node positions are the **top-left** corner of the node, which is what
//! renderers consume directly. Use [`Bounds::new_from_top_left`] to get the
//! full box.

use serde::{Deserialize, Serialize};

/// A 2D point in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use stagegraph_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let mid = p1.midpoint(p2);
/// assert_eq!(mid.x(), 7.5);
/// assert_eq!(mid.y(), 12.5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
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

    /// Creates a new point with the specified y-coordinate
    pub fn with_y(mut self, y: f32) -> Self {
        self.y = y;
        self
    }

    /// Calculates the midpoint between this point and another point
    pub fn midpoint(self, other: Point) -> Self {
        Self {
            x: (self.x + other.x) / 2.0,
            y: (self.y + other.y) / 2.0,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f32 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f32 {
        self.height
    }

    /// Returns a new size with `extra` added to the width
    pub fn widen(self, extra: f32) -> Self {
        Self {
            width: self.width + extra,
            height: self.height,
        }
    }

    /// Returns true if either dimension is zero or negative
    pub fn is_degenerate(self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Represents a rectangular bounding box with minimum and maximum coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    min_x: f32,
    min_y: f32,
    max_x: f32,
    max_y: f32,
}

impl Bounds {
    /// Creates a new bounds from a top-left point and a size
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            min_x: top_left.x,
            min_y: top_left.y,
            max_x: top_left.x + size.width,
            max_y: top_left.y + size.height,
        }
    }

    /// Returns the minimum x-coordinate of the bounds
    pub fn min_x(self) -> f32 {
        self.min_x
    }

    /// Returns the minimum y-coordinate of the bounds
    pub fn min_y(self) -> f32 {
        self.min_y
    }

    /// Returns the maximum x-coordinate of the bounds
    pub fn max_x(self) -> f32 {
        self.max_x
    }

    /// Returns the maximum y-coordinate of the bounds
    pub fn max_y(self) -> f32 {
        self.max_y
    }

    /// Returns the width of the bounds
    pub fn width(self) -> f32 {
        self.max_x - self.min_x
    }

    /// Returns the height of the bounds
    pub fn height(self) -> f32 {
        self.max_y - self.min_y
    }

    /// Returns the center point of the bounds
    pub fn center(self) -> Point {
        Point::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Midpoint of the left edge, where incoming edges attach.
    pub fn left_middle(self) -> Point {
        Point::new(self.min_x, (self.min_y + self.max_y) / 2.0)
    }

    /// Midpoint of the right edge, where outgoing edges attach.
    pub fn right_middle(self) -> Point {
        Point::new(self.max_x, (self.min_y + self.max_y) / 2.0)
    }

    /// Returns true if the horizontal extents of both bounds overlap.
    ///
    /// Touching edges do not count as overlap.
    pub fn overlaps_horizontally(&self, other: &Self) -> bool {
        self.min_x < other.max_x && other.min_x < self.max_x
    }

    /// Returns true if `other` lies entirely within these bounds.
    pub fn contains(&self, other: &Self) -> bool {
        self.min_x <= other.min_x
            && self.min_y <= other.min_y
            && self.max_x >= other.max_x
            && self.max_y >= other.max_y
    }
}


#[cfg(test)]
mod proptest_tests {
    use float_cmp::approx_eq;
    use proptest::prelude::*;

    use super::*;

    fn bounds_strategy() -> impl Strategy<Value = Bounds> {
        (
            -1000.0f32..1000.0,
            -1000.0f32..1000.0,
            1.0f32..500.0,
            1.0f32..500.0,
        )
            .prop_map(|(x, y, w, h)| Bounds::new_from_top_left(Point::new(x, y), Size::new(w, h)))
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-1000.0f32..1000.0, -1000.0f32..1000.0).prop_map(|(x, y)| Point::new(x, y))
    }

    /// Midpoint should always be between (or equal to) both points.
    fn check_midpoint_is_between_points(p1: Point, p2: Point) -> Result<(), TestCaseError> {
        let mid = p1.midpoint(p2);

        prop_assert!(mid.x() >= p1.x().min(p2.x()) && mid.x() <= p1.x().max(p2.x()));
        prop_assert!(mid.y() >= p1.y().min(p2.y()) && mid.y() <= p1.y().max(p2.y()));
        Ok(())
    }

    /// Bounds always contain themselves.
    fn check_bounds_contains_itself(bounds: Bounds) -> Result<(), TestCaseError> {
        prop_assert!(bounds.contains(&bounds));
        prop_assert!(!bounds.overlaps_horizontally(&Bounds::new_from_top_left(
            bounds.right_middle(),
            Size::new(1.0, 1.0)
        )));
        Ok(())
    }

    /// Anchors sit on the vertical center line of the bounds.
    fn check_anchors_share_center_line(bounds: Bounds) -> Result<(), TestCaseError> {
        let center = bounds.center();

        prop_assert!(approx_eq!(f32, bounds.left_middle().y(), center.y()));
        prop_assert!(approx_eq!(f32, bounds.right_middle().y(), center.y()));
        prop_assert!(bounds.left_middle().x() <= bounds.right_middle().x());
        Ok(())
    }

    proptest! {
        #[test]
        fn midpoint_is_between_points(p1 in point_strategy(), p2 in point_strategy()) {
            check_midpoint_is_between_points(p1, p2)?;
        }

        #[test]
        fn bounds_contains_itself(bounds in bounds_strategy()) {
            check_bounds_contains_itself(bounds)?;
        }

        #[test]
        fn anchors_share_center_line(bounds in bounds_strategy()) {
            check_anchors_share_center_line(bounds)?;
        }
    }
}
