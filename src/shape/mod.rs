mod circle;
mod line;
mod polygon;

pub use circle::CircleShape;
pub use line::LineShape;
pub use polygon::PolygonShape;

use crate::error::{GeometryError, Result};
use crate::geometry::PolygonMetrics;
use crate::math::distance_2d::{distance, is_near, near_mask};
use crate::math::{Point, Vector2};
use crate::recognition::Identity;

/// What a pointer position touches on a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The editable vertex at this position in [`ShapeGeometry::points`].
    Vertex(usize),
    Center,
    Miss,
}

/// Common behaviour of recognised shapes.
pub trait ShapeGeometry {
    /// Returns the kind of shape.
    fn identity(&self) -> Identity;

    /// Returns the shape's center.
    fn center(&self) -> Point;

    /// Returns the editable vertices.
    fn points(&self) -> &[Point];

    /// Returns the metrics of the underlying point set.
    fn metrics(&self) -> &PolygonMetrics;

    /// Re-derives the center after the vertices changed.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the center became undefined.
    fn update(&mut self) -> Result<()>;

    /// Moves one editable vertex and updates the shape.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::VertexOutOfRange` for an unknown vertex, or the
    /// error from [`update`](Self::update).
    fn set_vertex(&mut self, index: usize, x: f64, y: f64) -> Result<()>;

    /// Translates the shape so its center lands on `target`.
    ///
    /// # Errors
    ///
    /// Returns the error from [`update`](Self::update).
    fn center_on(&mut self, target: &Point) -> Result<()>;

    /// Remaps the shape from an `old_width`×`old_height` surface to a
    /// `new_width`×`new_height` one.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if either size is empty or not finite.
    fn rescale(
        &mut self,
        old_width: f64,
        old_height: f64,
        new_width: f64,
        new_height: f64,
    ) -> Result<()>;

    /// Returns one flag per vertex telling whether it lies within `bounds` of `coord`.
    fn is_near_vertices(&self, coord: &Point, bounds: f64) -> Vec<bool> {
        near_mask(self.points(), coord, bounds)
    }

    /// Returns the positions of the vertices within `bounds` of `coord`.
    fn vertices_near(&self, coord: &Point, bounds: f64) -> Vec<usize> {
        self.is_near_vertices(coord, bounds)
            .into_iter()
            .enumerate()
            .filter_map(|(i, near)| near.then_some(i))
            .collect()
    }

    /// Returns whether the center lies within `bounds` of `coord`.
    fn is_near_center(&self, coord: &Point, bounds: f64) -> bool {
        is_near(&self.center(), coord, bounds)
    }

    /// Resolves a pointer position to the closest vertex, then the center.
    fn hit_test(&self, coord: &Point, bounds: f64) -> Hit {
        let points = self.points();
        let closest = self
            .vertices_near(coord, bounds)
            .into_iter()
            .min_by(|&a, &b| {
                distance(&points[a], coord).total_cmp(&distance(&points[b], coord))
            });
        match closest {
            Some(i) => Hit::Vertex(i),
            None if self.is_near_center(coord, bounds) => Hit::Center,
            None => Hit::Miss,
        }
    }
}

/// A recognised shape.
#[derive(Debug, Clone)]
pub enum Shape {
    /// Rectangle, triangle or freeform stroke.
    Polygon(PolygonShape),
    Line(LineShape),
    Circle(CircleShape),
}

impl Shape {
    /// Returns the radius of a circle.
    #[must_use]
    pub fn radius(&self) -> Option<f64> {
        match self {
            Shape::Circle(circle) => Some(circle.radius()),
            Shape::Polygon(_) | Shape::Line(_) => None,
        }
    }
}

impl ShapeGeometry for Shape {
    fn identity(&self) -> Identity {
        match self {
            Shape::Polygon(s) => s.identity(),
            Shape::Line(s) => s.identity(),
            Shape::Circle(s) => s.identity(),
        }
    }

    fn center(&self) -> Point {
        match self {
            Shape::Polygon(s) => s.center(),
            Shape::Line(s) => s.center(),
            Shape::Circle(s) => s.center(),
        }
    }

    fn points(&self) -> &[Point] {
        match self {
            Shape::Polygon(s) => s.points(),
            Shape::Line(s) => s.points(),
            Shape::Circle(s) => s.points(),
        }
    }

    fn metrics(&self) -> &PolygonMetrics {
        match self {
            Shape::Polygon(s) => s.metrics(),
            Shape::Line(s) => s.metrics(),
            Shape::Circle(s) => s.metrics(),
        }
    }

    fn update(&mut self) -> Result<()> {
        match self {
            Shape::Polygon(s) => s.update(),
            Shape::Line(s) => s.update(),
            Shape::Circle(s) => s.update(),
        }
    }

    fn set_vertex(&mut self, index: usize, x: f64, y: f64) -> Result<()> {
        match self {
            Shape::Polygon(s) => s.set_vertex(index, x, y),
            Shape::Line(s) => s.set_vertex(index, x, y),
            Shape::Circle(s) => s.set_vertex(index, x, y),
        }
    }

    fn center_on(&mut self, target: &Point) -> Result<()> {
        match self {
            Shape::Polygon(s) => s.center_on(target),
            Shape::Line(s) => s.center_on(target),
            Shape::Circle(s) => s.center_on(target),
        }
    }

    fn rescale(
        &mut self,
        old_width: f64,
        old_height: f64,
        new_width: f64,
        new_height: f64,
    ) -> Result<()> {
        match self {
            Shape::Polygon(s) => s.rescale(old_width, old_height, new_width, new_height),
            Shape::Line(s) => s.rescale(old_width, old_height, new_width, new_height),
            Shape::Circle(s) => s.rescale(old_width, old_height, new_width, new_height),
        }
    }
}

/// Per-axis factors mapping an old surface size onto a new one.
///
/// `None` when the sizes are equal and nothing needs to move.
#[allow(clippy::float_cmp)]
pub(crate) fn rescale_factors(
    old_width: f64,
    old_height: f64,
    new_width: f64,
    new_height: f64,
) -> Result<Option<Vector2>> {
    let sizes = [old_width, old_height, new_width, new_height];
    if sizes.iter().any(|s| !s.is_finite() || *s <= 0.0) {
        return Err(GeometryError::Degenerate(format!(
            "cannot rescale from {old_width}x{old_height} to {new_width}x{new_height}"
        ))
        .into());
    }
    if old_width == new_width && old_height == new_height {
        return Ok(None);
    }
    Ok(Some(Vector2::new(new_width / old_width, new_height / old_height)))
}
