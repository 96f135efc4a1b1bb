//! Graham-scan convex hull over polar angles measured in degrees.

use tracing::trace;

use crate::math::Point;

/// Polar angle (degrees) of `to` seen from `from`, folded into one 360° window.
///
/// Coincident points have angle 0. Normally angles at or above 0 are lifted by
/// 360 so the window starts at 180°; with `reverse` set, only negative angles
/// are lifted and the window is `[0, 360)`. Either way a point straight right
/// of `from` sorts before every other point above it.
#[must_use]
pub fn polar_angle(from: &Point, to: &Point, reverse: bool) -> f64 {
    let dx = to.x - from.x;
    let dy = to.y - from.y;
    if dx == 0.0 && dy == 0.0 {
        return 0.0;
    }
    let angle = dy.atan2(dx).to_degrees();
    let lift = if reverse { angle < 0.0 } else { angle >= 0.0 };
    if lift {
        angle + 360.0
    } else {
        angle
    }
}

/// Returns whether `p0 → p1 → p2` fails to turn counter-clockwise.
///
/// Compares the polar angles of `p1` and `p2` seen from `p0`: the turn is not
/// convex when the forward sweep from the first to the second is zero or at
/// least half a revolution.
#[must_use]
pub fn turns_clockwise(p0: &Point, p1: &Point, p2: &Point) -> bool {
    let first = polar_angle(p0, p1, false);
    let second = polar_angle(p0, p2, false);
    let sweep = (second - first).rem_euclid(360.0);
    sweep == 0.0 || sweep >= 180.0
}

/// Returns true when every point lies strictly in the negative quadrant.
///
/// In that case the polar-angle window is flipped before sorting.
#[must_use]
pub fn needs_reverse(points: &[Point]) -> bool {
    points.iter().all(|p| p.x < 0.0 && p.y < 0.0)
}

/// Sorts `points` in place by polar angle around `anchor`.
///
/// The sort is stable, so equal angles keep their relative order.
pub fn sort_by_polar_angle(anchor: &Point, points: &mut [Point], reverse: bool) {
    points.sort_by(|a, b| {
        polar_angle(anchor, a, reverse).total_cmp(&polar_angle(anchor, b, reverse))
    });
}

/// Computes the convex hull of `anchor` plus `others`.
///
/// `anchor` must be the lowest point (minimum y, then minimum x). `others` is
/// sorted in place by polar angle. The result starts at the anchor and winds
/// counter-clockwise. With fewer than three other points every point is returned.
#[must_use]
pub fn graham_scan(anchor: &Point, others: &mut [Point]) -> Vec<Point> {
    let reverse = needs_reverse(others);
    sort_by_polar_angle(anchor, others, reverse);

    if others.len() < 3 {
        let mut all = Vec::with_capacity(others.len() + 1);
        all.push(*anchor);
        all.extend_from_slice(others);
        return all;
    }

    let mut candidates = others.to_vec();
    let mut pass = 0;
    loop {
        let before = candidates.len();
        if before < 3 {
            break;
        }
        let mut hull = Vec::with_capacity(before);
        hull.extend_from_slice(&candidates[..2]);
        for p in &candidates[2..] {
            hull.push(*p);
            let n = hull.len();
            if turns_clockwise(&hull[n - 3], &hull[n - 2], &hull[n - 1]) {
                hull.remove(n - 2);
            }
        }
        pass += 1;
        trace!(pass, before, after = hull.len(), "hull scan pass");
        let stable = hull.len() == before;
        candidates = hull;
        if stable {
            break;
        }
    }

    if !candidates.iter().any(|p| p.same_position(anchor)) {
        candidates.insert(0, *anchor);
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y, 0)
    }

    #[test]
    fn polar_angle_window() {
        let o = p(0.0, 0.0);
        assert!((polar_angle(&o, &p(1.0, 0.0), false) - 360.0).abs() < 1e-9);
        assert!((polar_angle(&o, &p(0.0, 1.0), false) - 450.0).abs() < 1e-9);
        assert!((polar_angle(&o, &p(0.0, -1.0), false) + 90.0).abs() < 1e-9);
        assert!(polar_angle(&o, &p(1.0, 0.0), true).abs() < 1e-9);
        assert!((polar_angle(&o, &p(0.0, 1.0), true) - 90.0).abs() < 1e-9);
        assert!((polar_angle(&o, &p(0.0, -1.0), true) - 270.0).abs() < 1e-9);
        assert!(polar_angle(&o, &o, false).abs() < 1e-12);
    }

    #[test]
    fn left_turn_is_kept() {
        assert!(!turns_clockwise(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, 1.0)));
    }

    #[test]
    fn right_turn_and_collinear_are_dropped() {
        assert!(turns_clockwise(&p(0.0, 0.0), &p(1.0, 0.0), &p(1.0, -1.0)));
        assert!(turns_clockwise(&p(0.0, 0.0), &p(1.0, 0.0), &p(2.0, 0.0)));
    }

    #[test]
    fn sort_is_stable_for_equal_angles() {
        let anchor = p(0.0, 0.0);
        let mut pts = vec![
            Point::new(0.0, 4.0, 1),
            Point::new(3.0, 0.0, 2),
            Point::new(0.0, 2.0, 3),
        ];
        sort_by_polar_angle(&anchor, &mut pts, false);
        let order: Vec<usize> = pts.iter().map(|p| p.index).collect();
        assert_eq!(order, vec![2, 1, 3]);
    }

    #[test]
    fn square_with_interior_point() {
        let anchor = p(0.0, 0.0);
        let mut others = vec![p(4.0, 0.0), p(2.0, 1.0), p(4.0, 4.0), p(0.0, 4.0)];
        let hull = graham_scan(&anchor, &mut others);
        assert_eq!(hull.len(), 4);
        assert!(hull[0].same_position(&anchor));
        assert!(!hull.iter().any(|q| q.same_position(&p(2.0, 1.0))));
    }

    #[test]
    fn negative_quadrant_square_keeps_its_corners() {
        let anchor = p(-100.0, -100.0);
        let mut others = vec![
            p(-50.0, -100.0),
            p(-50.0, -50.0),
            p(-100.0, -50.0),
            p(-75.0, -75.0),
            p(-60.0, -90.0),
        ];
        assert!(needs_reverse(&others));
        let hull = graham_scan(&anchor, &mut others);
        assert_eq!(hull.len(), 4);
        assert!(hull[0].same_position(&anchor));
        assert!(hull[1].same_position(&p(-50.0, -100.0)));
        assert!(hull[2].same_position(&p(-50.0, -50.0)));
        assert!(hull[3].same_position(&p(-100.0, -50.0)));
    }

    #[test]
    fn reverse_sort_puts_anchor_row_first() {
        let anchor = p(-10.0, -10.0);
        let mut pts = vec![p(-10.0, -5.0), p(-8.0, -8.0), p(-5.0, -10.0)];
        sort_by_polar_angle(&anchor, &mut pts, true);
        assert!(pts[0].same_position(&p(-5.0, -10.0)));
        assert!(pts[2].same_position(&p(-10.0, -5.0)));
    }

    #[test]
    fn tiny_sets_are_returned_whole() {
        let anchor = p(0.0, 0.0);
        let mut others = vec![p(1.0, 1.0), p(2.0, 0.5)];
        let hull = graham_scan(&anchor, &mut others);
        assert_eq!(hull.len(), 3);
        assert!(hull[0].same_position(&anchor));
    }

    #[test]
    fn dented_triangle_collapses_to_corners() {
        let anchor = p(0.0, 0.0);
        let mut others = vec![
            p(50.0, 10.0),
            p(100.0, 0.0),
            p(70.0, 40.0),
            p(50.0, 90.0),
            p(30.0, 40.0),
        ];
        let hull = graham_scan(&anchor, &mut others);
        assert_eq!(hull.len(), 3);
        assert!(hull[1].same_position(&p(100.0, 0.0)));
        assert!(hull[2].same_position(&p(50.0, 90.0)));
    }
}
