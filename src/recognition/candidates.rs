use tracing::warn;

use crate::geometry::PolygonMetrics;
use crate::math::distance_2d::distance;
use crate::math::polygon_2d::signed_area;
use crate::math::{Point, TOLERANCE};

/// Corner candidates for a rectangle, one per quadrant around the hull centroid.
///
/// Quadrant names follow the drawing surface's y-down convention.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RectangleCorners {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub bottom_right: Point,
}

impl RectangleCorners {
    /// Returns the corners as `[top_left, top_right, bottom_left, bottom_right]`.
    #[must_use]
    pub fn to_array(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_left,
            self.bottom_right,
        ]
    }
}

/// Circle candidate: the hull centroid and a rim point straight below it.
///
/// The rim sits at the mean hull-point distance, so `rim.y - center.y` is the radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleEstimate {
    pub center: Point,
    pub rim: Point,
}

impl CircleEstimate {
    /// Returns the radius encoded by the rim point.
    #[must_use]
    pub fn radius(&self) -> f64 {
        self.rim.y - self.center.y
    }
}

/// Estimated vertices for every shape kind, computed once per stroke.
#[derive(Debug, Clone, Default)]
pub struct Candidates {
    pub rectangle: Option<RectangleCorners>,
    pub triangle: Option<[Point; 3]>,
    pub circle: Option<CircleEstimate>,
    pub line: Option<[Point; 2]>,
}

impl Candidates {
    /// Estimates every candidate from a stroke whose hull has been computed.
    ///
    /// Candidates that cannot be derived (missing or zero-area hull, empty
    /// quadrant, oversized hull) are left as `None`.
    #[must_use]
    pub fn estimate(metrics: &PolygonMetrics, max_triangle_hull: usize) -> Self {
        let hull = metrics.hull().ok();
        Self {
            rectangle: hull.and_then(estimate_rectangle),
            triangle: hull.and_then(|h| estimate_triangle(h, max_triangle_hull)),
            circle: hull.and_then(estimate_circle),
            line: estimate_line(metrics),
        }
    }
}

/// Picks, in each quadrant around the hull centroid, the hull point farthest
/// from the centroid.
///
/// Points lying exactly on either axis belong to no quadrant. Returns `None`
/// when any quadrant is empty or the hull has no centroid.
#[must_use]
pub fn estimate_rectangle(hull: &PolygonMetrics) -> Option<RectangleCorners> {
    let c = hull.centroid().ok()?;
    let farthest = |keep: &dyn Fn(&Point) -> bool| -> Option<Point> {
        hull.points()
            .iter()
            .filter(|p| keep(p))
            .fold(None, |best: Option<(Point, f64)>, p| {
                let d = distance(&c, p);
                match best {
                    Some((_, best_d)) if best_d >= d => best,
                    _ => Some((*p, d)),
                }
            })
            .map(|(p, _)| p)
    };

    Some(RectangleCorners {
        top_left: farthest(&|p| p.x < c.x && p.y > c.y)?,
        top_right: farthest(&|p| p.x > c.x && p.y > c.y)?,
        bottom_left: farthest(&|p| p.x < c.x && p.y < c.y)?,
        bottom_right: farthest(&|p| p.x > c.x && p.y < c.y)?,
    })
}

/// Finds the largest-area triangle spanned by three hull points.
///
/// Returns `None` for hulls with fewer than three points, for collinear hulls,
/// and for hulls larger than `max_hull_points`.
#[must_use]
pub fn estimate_triangle(hull: &PolygonMetrics, max_hull_points: usize) -> Option<[Point; 3]> {
    let points = hull.points();
    let n = points.len();
    if n < 3 {
        return None;
    }
    if n > max_hull_points {
        warn!(
            hull_points = n,
            limit = max_hull_points,
            "hull too large for triangle enumeration"
        );
        return None;
    }

    let mut best: Option<([Point; 3], f64)> = None;
    for i in 0..n {
        for j in (i + 1)..n {
            for k in (j + 1)..n {
                let tri = [points[i], points[j], points[k]];
                let area = signed_area(&tri).abs();
                if best.is_none_or(|(_, best_area)| area > best_area) {
                    best = Some((tri, area));
                }
            }
        }
    }
    best.filter(|(_, area)| *area > TOLERANCE).map(|(tri, _)| tri)
}

/// Returns the hull centroid and a rim point at the mean hull radius below it.
#[must_use]
pub fn estimate_circle(hull: &PolygonMetrics) -> Option<CircleEstimate> {
    let center = hull.centroid().ok()?;
    let radius = hull.mean_distance_from(&center);
    Some(CircleEstimate {
        center,
        rim: Point::new(center.x, center.y + radius, 0),
    })
}

/// Returns the first and last points of the stroke in drawing order.
#[must_use]
pub fn estimate_line(metrics: &PolygonMetrics) -> Option<[Point; 2]> {
    let points = metrics.points();
    Some([*points.first()?, *points.last()?])
}
