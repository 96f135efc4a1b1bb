//! Stroke preprocessing applied before recognition.

use crate::error::{RecognitionError, Result};
use crate::math::Point2;

/// Preprocessing parameters for raw strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrokeParams {
    max_points: usize,
}

impl StrokeParams {
    /// Creates new stroke parameters.
    ///
    /// # Errors
    ///
    /// Returns `RecognitionError::InvalidCriteria` if `max_points` is zero.
    pub fn new(max_points: usize) -> Result<Self> {
        if max_points == 0 {
            return Err(RecognitionError::InvalidCriteria(
                "max_points must be positive".to_owned(),
            )
            .into());
        }
        Ok(Self { max_points })
    }

    /// Returns the largest number of samples kept by [`resample`].
    #[must_use]
    pub fn max_points(&self) -> usize {
        self.max_points
    }
}

impl Default for StrokeParams {
    fn default() -> Self {
        Self { max_points: 256 }
    }
}

/// Thins a stroke to at most `max_points` samples by keeping every
/// `ceil(len / max_points)`-th one, starting with the first.
#[must_use]
pub fn resample(points: &[Point2], max_points: usize) -> Vec<Point2> {
    if max_points == 0 || points.len() <= max_points {
        return points.to_vec();
    }
    let step = points.len().div_ceil(max_points);
    points.iter().step_by(step).copied().collect()
}

/// Collapses runs of consecutive samples at the same position.
#[must_use]
pub fn dedup(points: &[Point2]) -> Vec<Point2> {
    let mut out = points.to_vec();
    out.dedup();
    out
}

/// Resamples then deduplicates a stroke.
#[must_use]
pub fn prepare(points: &[Point2], params: StrokeParams) -> Vec<Point2> {
    dedup(&resample(points, params.max_points))
}
