use crate::error::{GeometryError, Result};
use crate::geometry::PolygonMetrics;
use crate::math::Point2;
use crate::shape::Shape;
use crate::stroke::{prepare, StrokeParams};

use super::classifier::ShapeClassifier;
use super::criteria::Criteria;

/// Classifies a finished stroke and returns its canonical shape.
///
/// The stroke is resampled and stripped of repeated samples, measured,
/// classified and rebuilt.
#[derive(Debug, Clone)]
pub struct RecognizeStroke {
    points: Vec<Point2>,
    criteria: Criteria,
    params: StrokeParams,
}

impl RecognizeStroke {
    /// Creates a new recognition operation with default thresholds.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self {
            points,
            criteria: Criteria::default(),
            params: StrokeParams::default(),
        }
    }

    /// Sets custom classification thresholds.
    #[must_use]
    pub fn with_criteria(mut self, criteria: Criteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Sets custom preprocessing parameters.
    #[must_use]
    pub fn with_params(mut self, params: StrokeParams) -> Self {
        self.params = params;
        self
    }

    /// Executes the recognition.
    ///
    /// # Errors
    ///
    /// - `GeometryError::EmptyInput` if the stroke has no points
    /// - `GeometryError::Degenerate` if it has non-finite coordinates, fewer than
    ///   two distinct samples, or zero area where a centroid is needed
    /// - `RecognitionError::InvalidCriteria` for bad thresholds
    pub fn execute(&self) -> Result<Shape> {
        self.criteria.validate()?;

        if self.points.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
            return Err(
                GeometryError::Degenerate("stroke has non-finite coordinates".to_owned()).into(),
            );
        }

        let prepared = prepare(&self.points, self.params);
        if prepared.is_empty() {
            return Err(GeometryError::EmptyInput.into());
        }
        if prepared.len() < 2 {
            return Err(GeometryError::Degenerate(
                "a stroke needs at least two distinct points".to_owned(),
            )
            .into());
        }

        let mut metrics = PolygonMetrics::from_positions(&prepared)?;
        metrics.update_all();

        let mut classifier = ShapeClassifier::new(metrics).with_criteria(self.criteria);
        classifier.update_estimated_vertices();
        classifier.identify();
        classifier.detected_shape()
    }
}
