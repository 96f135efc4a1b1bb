//! Freehand stroke recognition.
//!
//! A finished stroke is measured as a polygon, scored against a small set of
//! canonical shapes (line, rectangle, triangle, circle) and rebuilt as the
//! best match, or kept as a freeform shape when nothing fits.

pub mod board;
pub mod error;
pub mod geometry;
pub mod math;
pub mod recognition;
pub mod shape;
pub mod stroke;

pub use board::{ShapeBoard, SlotId, SurfaceSize};
pub use error::{BoardError, GeometryError, RecognitionError, Result, StrokeformError};
pub use geometry::PolygonMetrics;
pub use math::Point;
pub use recognition::{Criteria, Identity, RecognizeStroke, ShapeClassifier};
pub use shape::{Hit, Shape, ShapeGeometry};
pub use stroke::StrokeParams;
