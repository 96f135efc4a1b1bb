use std::slice;

use crate::error::{GeometryError, Result};
use crate::geometry::PolygonMetrics;
use crate::math::{Point, TOLERANCE};
use crate::recognition::Identity;

use super::{rescale_factors, ShapeGeometry};

/// A circle given by center and radius; its only editable vertex is the center.
#[derive(Debug, Clone)]
pub struct CircleShape {
    metrics: PolygonMetrics,
    center: Point,
    radius: f64,
}

impl CircleShape {
    /// Creates a circle over the stroke it was recognised from.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the radius is zero or not finite.
    pub fn new(metrics: PolygonMetrics, center: Point, radius: f64) -> Result<Self> {
        if !radius.is_finite() || radius < TOLERANCE {
            return Err(GeometryError::Degenerate(format!("circle radius {radius}")).into());
        }
        Ok(Self {
            metrics,
            center,
            radius,
        })
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl ShapeGeometry for CircleShape {
    fn identity(&self) -> Identity {
        Identity::Circle
    }

    fn center(&self) -> Point {
        self.center
    }

    fn points(&self) -> &[Point] {
        slice::from_ref(&self.center)
    }

    fn metrics(&self) -> &PolygonMetrics {
        &self.metrics
    }

    /// Refreshes the stroke measurements; a circle has no hull to rebuild.
    fn update(&mut self) -> Result<()> {
        self.metrics.update_all_except_hull();
        Ok(())
    }

    fn set_vertex(&mut self, index: usize, x: f64, y: f64) -> Result<()> {
        if index != 0 {
            return Err(GeometryError::VertexOutOfRange { index, len: 1 }.into());
        }
        self.center_on(&Point::new(x, y, self.center.index))
    }

    fn center_on(&mut self, target: &Point) -> Result<()> {
        let offset = self.center.vector_to(target);
        self.center.translate(offset);
        self.metrics.translate(offset);
        self.update()
    }

    fn rescale(
        &mut self,
        old_width: f64,
        old_height: f64,
        new_width: f64,
        new_height: f64,
    ) -> Result<()> {
        let Some(factors) = rescale_factors(old_width, old_height, new_width, new_height)? else {
            return Ok(());
        };
        self.center.scale(factors);
        self.radius *= (factors.x + factors.y) / 2.0;
        self.metrics.scale(factors);
        self.update()
    }
}
