mod candidates;
mod classifier;
mod criteria;
mod reconstruct;
mod recognize;

pub use candidates::{
    estimate_circle, estimate_line, estimate_rectangle, estimate_triangle, Candidates,
    CircleEstimate, RectangleCorners,
};
pub use classifier::{LineLikelihood, ShapeClassifier};
pub use criteria::{
    CircleCriteria, Criteria, LineCriteria, RandomCriteria, RectangleCriteria, TriangleCriteria,
};
pub use reconstruct::{idealized_square, idealized_triangle};
pub use recognize::RecognizeStroke;

use std::fmt;

/// The canonical shape a stroke was recognised as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Identity {
    Line,
    Rectangle,
    Triangle,
    Circle,
    /// Freeform stroke kept as drawn.
    Random,
}

impl Identity {
    /// Returns the lowercase label used by collaborators.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Identity::Line => "line",
            Identity::Rectangle => "rectangle",
            Identity::Triangle => "triangle",
            Identity::Circle => "circle",
            Identity::Random => "random",
        }
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
