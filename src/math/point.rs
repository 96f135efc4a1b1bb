use super::{Point2, Vector2};

/// A stroke sample: a 2D position plus the order in which it was drawn.
///
/// `index` survives sorting and hull construction, so the earliest drawn
/// point of any derived point set can always be recovered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
    pub index: usize,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub fn new(x: f64, y: f64, index: usize) -> Self {
        Self { x, y, index }
    }

    /// Creates a point from a position with index 0.
    #[must_use]
    pub fn at(position: Point2) -> Self {
        Self::new(position.x, position.y, 0)
    }

    /// Returns the position as an `nalgebra` point.
    #[must_use]
    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }

    /// Returns the vector from `self` to `other`.
    #[must_use]
    pub fn vector_to(&self, other: &Point) -> Vector2 {
        other.position() - self.position()
    }

    /// Returns whether both points have exactly the same coordinates.
    #[must_use]
    pub fn same_position(&self, other: &Point) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Moves the point by `offset`.
    pub fn translate(&mut self, offset: Vector2) {
        self.x += offset.x;
        self.y += offset.y;
    }

    /// Adds `amount` to both coordinates.
    pub fn shift(&mut self, amount: f64) {
        self.x += amount;
        self.y += amount;
    }

    /// Multiplies each coordinate by the matching component of `factors`.
    pub fn scale(&mut self, factors: Vector2) {
        self.x *= factors.x;
        self.y *= factors.y;
    }

    /// Divides each coordinate by the matching component of `divisors`.
    pub fn divide(&mut self, divisors: Vector2) {
        self.x /= divisors.x;
        self.y /= divisors.y;
    }
}

impl From<Point2> for Point {
    fn from(position: Point2) -> Self {
        Self::at(position)
    }
}
