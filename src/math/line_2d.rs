use super::distance_2d::distance;
use super::{Point, TOLERANCE};

/// Returns the slope of the line through `a` and `b`, or `None` if it is vertical.
#[must_use]
pub fn slope(a: &Point, b: &Point) -> Option<f64> {
    let dx = b.x - a.x;
    if dx.abs() < TOLERANCE {
        return None;
    }
    Some((b.y - a.y) / dx)
}

/// Returns `y = f(x)` for the line through `a` and `b`.
///
/// `None` for vertical lines.
pub fn line_equation_y(a: &Point, b: &Point) -> Option<impl Fn(f64) -> f64> {
    let m = slope(a, b)?;
    let intercept = b.y - m * b.x;
    Some(move |x: f64| m * x + intercept)
}

/// Returns `x = f(y)` for the line through `a` and `b`.
///
/// `None` for vertical and horizontal lines.
pub fn line_equation_x(a: &Point, b: &Point) -> Option<impl Fn(f64) -> f64> {
    let m = slope(a, b)?;
    if m.abs() < TOLERANCE {
        return None;
    }
    let intercept = b.y - m * b.x;
    Some(move |y: f64| (y - intercept) / m)
}

/// Returns the angle (radians) at `vertex` between the rays to `a` and `b`,
/// using the law of cosines.
///
/// `None` if either ray has zero length.
#[must_use]
pub fn angle_at(vertex: &Point, a: &Point, b: &Point) -> Option<f64> {
    let va = distance(vertex, a);
    let vb = distance(vertex, b);
    if va < TOLERANCE || vb < TOLERANCE {
        return None;
    }
    let ab = distance(a, b);
    let cos = (va * va + vb * vb - ab * ab) / (2.0 * va * vb);
    Some(cos.clamp(-1.0, 1.0).acos())
}

/// Returns whether `p` lies within `bounds` of the infinite line through `a` and `b`,
/// measured along the y axis (along x for vertical lines).
#[must_use]
pub fn does_intersect(p: &Point, a: &Point, b: &Point, bounds: f64) -> bool {
    match line_equation_y(a, b) {
        Some(f) => (f(p.x) - p.y).abs() <= bounds,
        None => (p.x - a.x).abs() <= bounds,
    }
}
