use super::Point;

/// Returns the Euclidean distance between two points.
#[must_use]
pub fn distance(a: &Point, b: &Point) -> f64 {
    nalgebra::distance(&a.position(), &b.position())
}

/// Returns the distance from `origin` to every point of `points`, in order.
#[must_use]
pub fn distances_from(origin: &Point, points: &[Point]) -> Vec<f64> {
    points.iter().map(|p| distance(origin, p)).collect()
}

/// Returns the lengths of the segments joining consecutive points.
///
/// The list is one shorter than `points`; the ring is not closed.
#[must_use]
pub fn consecutive_distances(points: &[Point]) -> Vec<f64> {
    points.windows(2).map(|w| distance(&w[0], &w[1])).collect()
}

/// Returns the minimum distance from `p` to the segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist(p: &Point, a: &Point, b: &Point) -> f64 {
    let ab = a.vector_to(b);
    let len_sq = ab.norm_squared();

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return distance(p, a);
    }

    // Project point onto the infinite line, clamp to [0, 1].
    let t = (a.vector_to(p).dot(&ab) / len_sq).clamp(0.0, 1.0);
    let closest = a.position() + ab * t;

    nalgebra::distance(&p.position(), &closest)
}

/// Returns whether `a` lies within `bounds` of `b`.
#[must_use]
pub fn is_near(a: &Point, b: &Point, bounds: f64) -> bool {
    distance(a, b) <= bounds
}

/// Returns one flag per point telling whether it lies within `bounds` of `reference`.
#[must_use]
pub fn near_mask(points: &[Point], reference: &Point, bounds: f64) -> Vec<bool> {
    points.iter().map(|p| is_near(p, reference, bounds)).collect()
}
