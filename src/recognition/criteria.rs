use crate::error::{RecognitionError, Result};

/// Rectangle acceptance: `|axis ratio - 1| < axis_ratio_threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleCriteria {
    pub axis_ratio_threshold: f64,
}

/// Circle acceptance: `confidence > global_threshold` on a hull of at least
/// `min_hull_points` vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleCriteria {
    pub global_threshold: f64,
    pub min_hull_points: usize,
}

/// Triangle acceptance: `hull area / best triangle area < global_threshold`.
///
/// Corner enumeration is cubic in the hull size and is skipped for hulls
/// larger than `max_hull_points`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleCriteria {
    pub global_threshold: f64,
    pub max_hull_points: usize,
}

/// Line acceptance: both the endpoint distance ratio and the largest
/// perpendicular deviation must be under their thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineCriteria {
    pub distance_threshold: f64,
    pub perp_distance_threshold: f64,
}

/// Freeform acceptance: `perimeter efficiency < global_threshold`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RandomCriteria {
    pub global_threshold: f64,
}

/// Per-shape thresholds used by the classifier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Criteria {
    pub rectangle: RectangleCriteria,
    pub circle: CircleCriteria,
    pub triangle: TriangleCriteria,
    pub line: LineCriteria,
    pub random: RandomCriteria,
}

impl Default for Criteria {
    fn default() -> Self {
        Self {
            rectangle: RectangleCriteria {
                axis_ratio_threshold: 0.5,
            },
            circle: CircleCriteria {
                global_threshold: 0.5,
                min_hull_points: 5,
            },
            triangle: TriangleCriteria {
                global_threshold: 10.0,
                max_hull_points: 256,
            },
            line: LineCriteria {
                distance_threshold: 0.4,
                perp_distance_threshold: 0.05,
            },
            random: RandomCriteria {
                global_threshold: 0.5,
            },
        }
    }
}

impl Criteria {
    /// Checks that every threshold is finite and non-negative.
    ///
    /// # Errors
    ///
    /// Returns `RecognitionError::InvalidCriteria` naming the first bad threshold.
    pub fn validate(&self) -> Result<()> {
        let thresholds = [
            ("rectangle axis ratio", self.rectangle.axis_ratio_threshold),
            ("circle global", self.circle.global_threshold),
            ("triangle global", self.triangle.global_threshold),
            ("line distance", self.line.distance_threshold),
            ("line perpendicular distance", self.line.perp_distance_threshold),
            ("random global", self.random.global_threshold),
        ];
        for (name, value) in thresholds {
            if !value.is_finite() || value < 0.0 {
                return Err(RecognitionError::InvalidCriteria(format!(
                    "{name} threshold must be finite and non-negative, got {value}"
                ))
                .into());
            }
        }
        if self.triangle.max_hull_points < 3 {
            return Err(RecognitionError::InvalidCriteria(
                "triangle enumeration needs room for at least 3 hull points".to_owned(),
            )
            .into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Criteria::default().validate().is_ok());
    }

    #[test]
    fn negative_threshold_rejected() {
        let mut criteria = Criteria::default();
        criteria.line.perp_distance_threshold = -0.1;
        assert!(criteria.validate().is_err());
    }

    #[test]
    fn nan_threshold_rejected() {
        let mut criteria = Criteria::default();
        criteria.circle.global_threshold = f64::NAN;
        assert!(criteria.validate().is_err());
    }

    #[test]
    fn tiny_triangle_cap_rejected() {
        let mut criteria = Criteria::default();
        criteria.triangle.max_hull_points = 2;
        assert!(criteria.validate().is_err());
    }
}
