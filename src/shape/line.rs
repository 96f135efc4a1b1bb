use crate::error::{GeometryError, Result};
use crate::geometry::PolygonMetrics;
use crate::math::line_2d::line_equation_y;
use crate::math::Point;
use crate::recognition::Identity;

use super::{rescale_factors, ShapeGeometry};

/// A straight stroke, edited through its two endpoints.
///
/// The underlying metrics keep every drawn sample; endpoint edits are mirrored
/// onto the first and last sample.
#[derive(Debug, Clone)]
pub struct LineShape {
    metrics: PolygonMetrics,
    endpoints: [Point; 2],
}

impl LineShape {
    /// Creates a line from a stroke and its two endpoints.
    #[must_use]
    pub fn new(metrics: PolygonMetrics, start: Point, end: Point) -> Self {
        Self {
            metrics,
            endpoints: [start, end],
        }
    }

    /// Returns the first endpoint.
    #[must_use]
    pub fn start(&self) -> &Point {
        &self.endpoints[0]
    }

    /// Returns the second endpoint.
    #[must_use]
    pub fn end(&self) -> &Point {
        &self.endpoints[1]
    }

    fn metrics_index(&self, endpoint: usize) -> usize {
        if endpoint == 0 {
            0
        } else {
            self.metrics.point_count() - 1
        }
    }
}

impl ShapeGeometry for LineShape {
    fn identity(&self) -> Identity {
        Identity::Line
    }

    /// The midpoint of the endpoints, read off the line equation.
    fn center(&self) -> Point {
        let [a, b] = &self.endpoints;
        let x = (a.x + b.x) / 2.0;
        let y = line_equation_y(a, b).map_or((a.y + b.y) / 2.0, |f| f(x));
        Point::new(x, y, 0)
    }

    fn points(&self) -> &[Point] {
        &self.endpoints
    }

    fn metrics(&self) -> &PolygonMetrics {
        &self.metrics
    }

    fn update(&mut self) -> Result<()> {
        self.metrics.update_all_except_hull();
        Ok(())
    }

    fn set_vertex(&mut self, index: usize, x: f64, y: f64) -> Result<()> {
        let endpoint = self
            .endpoints
            .get_mut(index)
            .ok_or(GeometryError::VertexOutOfRange { index, len: 2 })?;
        endpoint.x = x;
        endpoint.y = y;
        let sample = self.metrics_index(index);
        self.metrics.set_point(sample, x, y)?;
        self.update()
    }

    fn center_on(&mut self, target: &Point) -> Result<()> {
        let offset = self.center().vector_to(target);
        for p in &mut self.endpoints {
            p.translate(offset);
        }
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
        for p in &mut self.endpoints {
            p.scale(factors);
        }
        self.metrics.scale(factors);
        self.metrics.update_all();
        Ok(())
    }
}
