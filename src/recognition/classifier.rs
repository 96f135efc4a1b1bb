use tracing::{debug, trace};

use crate::error::{GeometryError, RecognitionError, Result};
use crate::geometry::PolygonMetrics;
use crate::math::distance_2d::{distance, point_to_segment_dist};
use crate::math::line_2d::slope;
use crate::math::polygon_2d::signed_area;
use crate::math::{Point, TOLERANCE};
use crate::shape::{CircleShape, LineShape, PolygonShape, Shape};

use super::candidates::Candidates;
use super::criteria::Criteria;
use super::reconstruct::{idealized_square, idealized_triangle};
use super::Identity;

/// The two straightness scores of a stroke.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineLikelihood {
    /// Endpoint distance over travelled distance; 1 means no backtracking.
    pub distance_ratio: f64,
    /// Largest perpendicular deviation from the endpoint segment, relative to
    /// its length; 0 means perfectly straight.
    pub perp_distance_ratio: f64,
}

/// Decides which canonical shape a stroke is and rebuilds it in clean form.
///
/// Predicates are checked in a fixed priority order
/// (line, random, circle, rectangle, triangle); the first to accept wins and a
/// stroke nothing accepts is kept as a freeform shape.
#[derive(Debug, Clone)]
pub struct ShapeClassifier {
    metrics: PolygonMetrics,
    criteria: Criteria,
    candidates: Candidates,
    identity: Option<Identity>,
}

impl ShapeClassifier {
    /// Creates a classifier for a stroke, computing its hull if still missing.
    #[must_use]
    pub fn new(mut metrics: PolygonMetrics) -> Self {
        if metrics.hull().is_err() {
            metrics.update_all();
        }
        Self {
            metrics,
            criteria: Criteria::default(),
            candidates: Candidates::default(),
            identity: None,
        }
    }

    /// Replaces the default thresholds.
    #[must_use]
    pub fn with_criteria(mut self, criteria: Criteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Returns the stroke metrics.
    #[must_use]
    pub fn metrics(&self) -> &PolygonMetrics {
        &self.metrics
    }

    /// Returns the thresholds in use.
    #[must_use]
    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    /// Returns the current candidate vertices.
    #[must_use]
    pub fn candidates(&self) -> &Candidates {
        &self.candidates
    }

    /// Returns the identity chosen by the last [`identify`](Self::identify).
    #[must_use]
    pub fn identity(&self) -> Option<Identity> {
        self.identity
    }

    /// Estimates candidate vertices for every shape kind.
    pub fn update_estimated_vertices(&mut self) {
        self.candidates = Candidates::estimate(&self.metrics, self.criteria.triangle.max_hull_points);
    }

    // --- Likelihoods ---

    /// Returns the larger of the two diagonal slope ratios; near 1 for a rectangle.
    ///
    /// `None` without a rectangle candidate or when a slope is undefined.
    #[must_use]
    pub fn likelihood_rectangle(&self) -> Option<f64> {
        let corners = self.candidates.rectangle?;
        let center = self.metrics.hull().and_then(PolygonMetrics::centroid).ok()?;
        let axis1 = slope_ratio(&corners.top_left, &corners.bottom_right, &center)?;
        let axis2 = slope_ratio(&corners.bottom_left, &corners.top_right, &center)?;
        Some(axis1.max(axis2))
    }

    /// Returns `perimeter efficiency × hull point ratio × area / hull area`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stroke or its hull is degenerate.
    pub fn likelihood_circle(&self) -> Result<f64> {
        let hull = self.metrics.hull()?;
        let hull_area = hull.area()?;
        if hull_area < TOLERANCE {
            return Err(GeometryError::Degenerate("hull has zero area".to_owned()).into());
        }
        let efficiency = self.metrics.perimeter_efficiency()?;
        let n_ratio = self.metrics.hull_n_ratio()?;
        let area_ratio = self.metrics.area()? / hull_area;
        Ok(efficiency * n_ratio * area_ratio)
    }

    /// Returns `hull area / best inscribed triangle area`; infinite without a candidate.
    ///
    /// # Errors
    ///
    /// Returns an error if the hull has not been computed.
    pub fn likelihood_triangle(&self) -> Result<f64> {
        let Some(triangle) = self.candidates.triangle else {
            return Ok(f64::INFINITY);
        };
        let hull_area = self.metrics.hull()?.area()?;
        Ok(hull_area / signed_area(&triangle).abs())
    }

    /// Measures how straight the stroke is.
    #[must_use]
    pub fn likelihood_line(&self) -> LineLikelihood {
        let points = self.metrics.points();
        let (Some(first), Some(last)) = (points.first(), points.last()) else {
            return LineLikelihood {
                distance_ratio: 0.0,
                perp_distance_ratio: f64::INFINITY,
            };
        };
        let span = distance(first, last);
        let travelled: f64 = points.windows(2).map(|w| distance(&w[0], &w[1])).sum();
        if span < TOLERANCE || travelled < TOLERANCE {
            return LineLikelihood {
                distance_ratio: 0.0,
                perp_distance_ratio: f64::INFINITY,
            };
        }

        let interior = &points[1..points.len() - 1];
        let perp_distance_ratio = interior
            .iter()
            .map(|p| point_to_segment_dist(p, first, last) / span)
            .fold(0.0, f64::max);

        LineLikelihood {
            distance_ratio: span / travelled,
            perp_distance_ratio,
        }
    }

    /// Returns the stroke's perimeter efficiency.
    ///
    /// # Errors
    ///
    /// Returns an error if the stroke has a zero-length perimeter.
    pub fn likelihood_random(&self) -> Result<f64> {
        self.metrics.perimeter_efficiency()
    }

    // --- Predicates ---

    /// Returns whether the stroke passes the rectangle test.
    #[must_use]
    pub fn is_rectangle(&self) -> bool {
        let threshold = self.criteria.rectangle.axis_ratio_threshold;
        self.likelihood_rectangle()
            .is_some_and(|ratio| (ratio - 1.0).abs() < threshold)
    }

    /// Returns whether the stroke passes the circle test.
    #[must_use]
    pub fn is_circle(&self) -> bool {
        let criteria = self.criteria.circle;
        let enough_points = self
            .metrics
            .hull()
            .is_ok_and(|hull| hull.point_count() >= criteria.min_hull_points);
        enough_points
            && self
                .likelihood_circle()
                .inspect_err(|e| trace!(error = %e, "circle likelihood unavailable"))
                .is_ok_and(|confidence| confidence > criteria.global_threshold)
    }

    /// Returns whether the stroke passes the triangle test.
    #[must_use]
    pub fn is_triangle(&self) -> bool {
        let threshold = self.criteria.triangle.global_threshold;
        self.likelihood_triangle()
            .is_ok_and(|score| score < threshold)
    }

    /// Returns whether the stroke passes the line test.
    #[must_use]
    pub fn is_line(&self) -> bool {
        let criteria = self.criteria.line;
        let estimate = self.likelihood_line();
        estimate.distance_ratio - 1.0 < criteria.distance_threshold
            && estimate.perp_distance_ratio < criteria.perp_distance_threshold
    }

    /// Returns whether the stroke passes the freeform test.
    #[must_use]
    pub fn is_random(&self) -> bool {
        let threshold = self.criteria.random.global_threshold;
        self.likelihood_random()
            .is_ok_and(|efficiency| efficiency < threshold)
    }

    // --- Decision ---

    /// Runs the predicates in priority order and records the first match.
    pub fn identify(&mut self) -> Option<Identity> {
        let identity = if self.is_line() {
            Some(Identity::Line)
        } else if self.is_random() {
            Some(Identity::Random)
        } else if self.is_circle() {
            Some(Identity::Circle)
        } else if self.is_rectangle() {
            Some(Identity::Rectangle)
        } else if self.is_triangle() {
            Some(Identity::Triangle)
        } else {
            None
        };
        debug!(
            identity = identity.map_or("undefined", Identity::label),
            points = self.metrics.point_count(),
            hull_points = self.metrics.hull().map_or(0, PolygonMetrics::point_count),
            "classified stroke"
        );
        self.identity = identity;
        identity
    }

    /// Builds the canonical shape for the chosen identity.
    ///
    /// Rectangles and triangles are rebuilt as idealised figures; lines,
    /// circles and freeform strokes keep the stroke's own metrics. Without an
    /// identity the stroke is kept as freeform.
    ///
    /// # Errors
    ///
    /// Returns `RecognitionError::MissingCandidate` if the identity's estimate
    /// is missing, or a geometry error when the shape has no defined center.
    pub fn detected_shape(&self) -> Result<Shape> {
        let identity = self.identity.unwrap_or(Identity::Random);
        let missing = || RecognitionError::MissingCandidate(identity);
        let shape = match identity {
            Identity::Line => {
                let [start, end] = self.candidates.line.ok_or_else(missing)?;
                Shape::Line(LineShape::new(self.metrics.clone(), start, end))
            }
            Identity::Rectangle => {
                let corners = self.candidates.rectangle.ok_or_else(missing)?;
                Shape::Polygon(PolygonShape::new(
                    Identity::Rectangle,
                    idealized_square(&corners)?,
                )?)
            }
            Identity::Triangle => {
                let corners = self.candidates.triangle.ok_or_else(missing)?;
                let center = self.metrics.hull()?.centroid()?;
                Shape::Polygon(PolygonShape::new(
                    Identity::Triangle,
                    idealized_triangle(&center, &corners)?,
                )?)
            }
            Identity::Circle => {
                let estimate = self.candidates.circle.ok_or_else(missing)?;
                Shape::Circle(CircleShape::new(
                    self.metrics.clone(),
                    estimate.center,
                    estimate.radius(),
                )?)
            }
            Identity::Random => {
                Shape::Polygon(PolygonShape::new(Identity::Random, self.metrics.clone())?)
            }
        };
        Ok(shape)
    }
}

/// Ratio of the corner-to-centroid slopes to the diagonal's own slope.
///
/// Near 1 when both corners sit on one straight diagonal through the centroid.
fn slope_ratio(a: &Point, b: &Point, center: &Point) -> Option<f64> {
    let slope_a = slope(a, center)?;
    let slope_b = slope(b, center)?;
    let slope_ab = slope(a, b)?;
    if slope_ab.abs() < TOLERANCE {
        return None;
    }
    Some((slope_a / slope_ab) * (slope_b / slope_ab))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point2;
    use crate::shape::ShapeGeometry;
    use approx::assert_abs_diff_eq;

    fn classifier(positions: &[(f64, f64)]) -> ShapeClassifier {
        let positions: Vec<Point2> = positions.iter().map(|&(x, y)| Point2::new(x, y)).collect();
        let mut c = ShapeClassifier::new(PolygonMetrics::from_positions(&positions).unwrap());
        c.update_estimated_vertices();
        c
    }

    fn dented_triangle() -> ShapeClassifier {
        classifier(&[
            (0.0, 0.0),
            (50.0, 10.0),
            (100.0, 0.0),
            (70.0, 40.0),
            (50.0, 90.0),
            (30.0, 40.0),
        ])
    }

    #[test]
    fn square_rectangle_ratio_is_one() {
        let c = classifier(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        assert_abs_diff_eq!(c.likelihood_rectangle().unwrap(), 1.0, epsilon = 1e-9);
        assert!(c.is_rectangle());
    }

    #[test]
    fn bare_square_is_not_a_circle() {
        let c = classifier(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        assert!(c.likelihood_circle().unwrap() > 0.5);
        assert!(!c.is_circle());
    }

    #[test]
    fn straight_stroke_line_scores() {
        let c = classifier(&[(0.0, 0.0), (5.0, 0.1), (10.0, -0.1), (20.0, 0.0)]);
        let ll = c.likelihood_line();
        assert!(ll.distance_ratio <= 1.0);
        assert!(ll.perp_distance_ratio < 0.01);
        assert!(c.is_line());
    }

    #[test]
    fn closed_loop_is_not_a_line() {
        let c = classifier(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 0.0)]);
        assert!(c.likelihood_line().perp_distance_ratio.is_infinite());
        assert!(!c.is_line());
    }

    #[test]
    fn dented_triangle_scores() {
        let c = dented_triangle();
        assert!(c.candidates().rectangle.is_none());
        assert_abs_diff_eq!(c.likelihood_triangle().unwrap(), 1.0, epsilon = 1e-9);
        assert!(c.likelihood_circle().unwrap() < 0.5);
        assert!(c.likelihood_random().unwrap() > 0.5);
    }

    #[test]
    fn dented_triangle_identified() {
        let mut c = dented_triangle();
        assert_eq!(c.identify(), Some(Identity::Triangle));
        let shape = c.detected_shape().unwrap();
        assert_eq!(shape.identity(), Identity::Triangle);
        assert_eq!(shape.points().len(), 3);
    }

    #[test]
    fn undefined_identity_falls_back_to_random() {
        let mut criteria = Criteria::default();
        criteria.triangle.global_threshold = 0.0;
        let positions: Vec<Point2> = [
            (0.0, 0.0),
            (50.0, 10.0),
            (100.0, 0.0),
            (70.0, 40.0),
            (50.0, 90.0),
            (30.0, 40.0),
        ]
        .iter()
        .map(|&(x, y)| Point2::new(x, y))
        .collect();
        let mut c = ShapeClassifier::new(PolygonMetrics::from_positions(&positions).unwrap())
            .with_criteria(criteria);
        c.update_estimated_vertices();
        assert_eq!(c.identify(), None);
        assert_eq!(c.detected_shape().unwrap().identity(), Identity::Random);
    }

    #[test]
    fn missing_candidate_is_reported() {
        let mut c = dented_triangle();
        c.identity = Some(Identity::Rectangle);
        assert!(matches!(
            c.detected_shape(),
            Err(crate::StrokeformError::Recognition(
                RecognitionError::MissingCandidate(Identity::Rectangle)
            ))
        ));
    }
}
