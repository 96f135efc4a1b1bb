use crate::error::Result;
use crate::geometry::PolygonMetrics;
use crate::math::Point;
use crate::recognition::Identity;

use super::{rescale_factors, ShapeGeometry};

/// A closed polygonal shape: an idealised rectangle or triangle, or a freeform stroke.
#[derive(Debug, Clone)]
pub struct PolygonShape {
    identity: Identity,
    metrics: PolygonMetrics,
    center: Point,
}

impl PolygonShape {
    /// Creates a polygon shape centered on the centroid of `metrics`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` if the points enclose no area.
    pub fn new(identity: Identity, mut metrics: PolygonMetrics) -> Result<Self> {
        metrics.update_all_except_hull();
        let center = metrics.centroid()?;
        Ok(Self {
            identity,
            metrics,
            center,
        })
    }
}

impl ShapeGeometry for PolygonShape {
    fn identity(&self) -> Identity {
        self.identity
    }

    fn center(&self) -> Point {
        self.center
    }

    fn points(&self) -> &[Point] {
        self.metrics.points()
    }

    fn metrics(&self) -> &PolygonMetrics {
        &self.metrics
    }

    fn update(&mut self) -> Result<()> {
        self.metrics.update_all_except_hull();
        self.center = self.metrics.centroid()?;
        Ok(())
    }

    fn set_vertex(&mut self, index: usize, x: f64, y: f64) -> Result<()> {
        self.metrics.set_point(index, x, y)?;
        self.update()
    }

    fn center_on(&mut self, target: &Point) -> Result<()> {
        self.metrics.translate(self.center.vector_to(target));
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
        self.metrics.scale(factors);
        self.metrics.update_all();
        self.center = self.metrics.centroid()?;
        Ok(())
    }
}
