use std::f64::consts::PI;

use super::distance_2d::distance;
use super::{Point, TOLERANCE};

/// Computes the signed area of the closed ring through `points` (shoelace formula).
///
/// The ring is closed implicitly: the last point connects back to the first.
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Computes the perimeter of the closed ring through `points`.
#[must_use]
pub fn perimeter(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 2 {
        return 0.0;
    }
    (0..n).map(|i| distance(&points[i], &points[(i + 1) % n])).sum()
}

/// Computes the area-weighted centroid of the closed ring through `points`.
///
/// `signed_area` must be the ring's signed area. Returns `None` when it is zero,
/// since the centroid of a collapsed ring is undefined.
#[must_use]
pub fn centroid(points: &[Point], signed_area: f64) -> Option<Point> {
    if signed_area.abs() < TOLERANCE {
        return None;
    }
    let n = points.len();
    let mut cx = 0.0;
    let mut cy = 0.0;
    for i in 0..n {
        let a = &points[i];
        let b = &points[(i + 1) % n];
        let cross = a.x * b.y - b.x * a.y;
        cx += (a.x + b.x) * cross;
        cy += (a.y + b.y) * cross;
    }
    let denom = 6.0 * signed_area;
    Some(Point::new(cx / denom, cy / denom, 0))
}

/// Isoperimetric ratio `2·sqrt(π·area) / perimeter`.
///
/// Exactly 1 for a circle and smaller for anything elongated or jagged.
/// Returns `None` for a zero-length perimeter.
#[must_use]
pub fn perimeter_efficiency(area: f64, perimeter: f64) -> Option<f64> {
    if perimeter < TOLERANCE {
        return None;
    }
    Some(2.0 * (PI * area.abs()).sqrt() / perimeter)
}

/// Arithmetic mean, `None` for an empty slice.
#[must_use]
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let n = values.len() as f64;
    Some(values.iter().sum::<f64>() / n)
}
