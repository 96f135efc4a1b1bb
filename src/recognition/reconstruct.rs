use crate::error::{GeometryError, Result};
use crate::geometry::PolygonMetrics;
use crate::math::distance_2d::{consecutive_distances, distances_from};
use crate::math::polygon_2d::mean;
use crate::math::Point;

use super::candidates::RectangleCorners;

/// Idealised triangles are pulled in by this factor from the mean corner distance.
const TRIANGLE_SHRINK: f64 = 0.9;

/// Replaces four estimated corners with an axis-aligned square.
///
/// The corners are ordered into a ring by polar angle; the square's side is
/// the ring's mean edge length and it is centered on the ring's centroid.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if the corners enclose no area.
pub fn idealized_square(corners: &RectangleCorners) -> Result<PolygonMetrics> {
    let mut ring = PolygonMetrics::new(&corners.to_array())?;
    ring.reorder_by_polar_angle();
    ring.update_all_except_hull();

    let mut closed = ring.copy_points();
    if let Some(&first) = closed.first() {
        closed.push(first);
    }
    let side = mean(&consecutive_distances(&closed))
        .ok_or_else(|| GeometryError::Degenerate("rectangle without edges".to_owned()))?;
    let center = ring.centroid()?;
    let half = side / 2.0;

    let mut square = PolygonMetrics::new(&[
        Point::new(center.x - half, center.y - half, 0),
        Point::new(center.x - half, center.y + half, 1),
        Point::new(center.x + half, center.y + half, 2),
        Point::new(center.x + half, center.y - half, 3),
    ])?;
    square.update_all();
    Ok(square)
}

/// Replaces three estimated corners with a symmetric triangle around `center`.
///
/// The apex points up the drawing surface (towards smaller y); the two base
/// corners sit below it to either side, all at 90% of the mean corner distance.
///
/// # Errors
///
/// Returns `GeometryError::Degenerate` if every corner coincides with `center`.
pub fn idealized_triangle(center: &Point, corners: &[Point; 3]) -> Result<PolygonMetrics> {
    let reach = mean(&distances_from(center, corners)).unwrap_or(0.0) * TRIANGLE_SHRINK;
    if reach <= 0.0 {
        return Err(GeometryError::Degenerate("triangle collapsed onto its center".to_owned()).into());
    }

    let mut triangle = PolygonMetrics::new(&[
        Point::new(center.x, center.y - reach, 0),
        Point::new(center.x - reach, center.y + reach, 1),
        Point::new(center.x + reach, center.y + reach, 2),
    ])?;
    triangle.update_all();
    Ok(triangle)
}
