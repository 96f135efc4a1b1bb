use crate::error::{GeometryError, Result};
use crate::math::distance_2d::{consecutive_distances, distance, near_mask};
use crate::math::line_2d::{angle_at, does_intersect, line_equation_x, line_equation_y};
use crate::math::polygon_2d::{centroid, perimeter, perimeter_efficiency, signed_area};
use crate::math::{Point, Point2, Vector2};

use super::hull::{graham_scan, needs_reverse, sort_by_polar_angle};

/// A derived value that is filled in by the update methods.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Metric<T> {
    /// Not computed since construction.
    Pending,
    /// Computed, but undefined for this point set.
    Degenerate(&'static str),
    Ready(T),
}

impl<T: Copy> Metric<T> {
    fn get(&self, name: &'static str) -> Result<T> {
        match *self {
            Metric::Pending => Err(GeometryError::NotComputed(name).into()),
            Metric::Degenerate(reason) => {
                Err(GeometryError::Degenerate(format!("{name}: {reason}")).into())
            }
            Metric::Ready(value) => Ok(value),
        }
    }

    fn from_option(value: Option<T>, reason: &'static str) -> Self {
        value.map_or(Metric::Degenerate(reason), Metric::Ready)
    }
}

/// An ordered point set with the polygon measurements used for recognition.
///
/// The insertion order of `points` defines the polygon boundary. Area,
/// perimeter and centroid treat the sequence as a closed ring without ever
/// storing the closing point. The lowest point (minimum y, then minimum x) is
/// tracked as the hull anchor while points are inserted.
///
/// Derived values are cached and refreshed by [`update_all_except_hull`] (cheap,
/// run after every vertex edit) or [`update_all`] (also rebuilds the convex hull).
/// A hull is itself a `PolygonMetrics` flagged as hull level; its hull is itself.
///
/// [`update_all_except_hull`]: PolygonMetrics::update_all_except_hull
/// [`update_all`]: PolygonMetrics::update_all
#[derive(Debug, Clone)]
pub struct PolygonMetrics {
    points: Vec<Point>,
    points_sans_anchor: Vec<Point>,
    anchor: Point,
    first: Point,
    is_hull_level: bool,
    hull: Option<Box<PolygonMetrics>>,
    area: Metric<f64>,
    signed_area: Metric<f64>,
    perimeter: Metric<f64>,
    centroid: Metric<Point>,
    perimeter_efficiency: Metric<f64>,
    hull_area_ratio: Metric<f64>,
    hull_n_ratio: Metric<f64>,
}

impl PolygonMetrics {
    /// Creates metrics over `points`, keeping each point's own index.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::EmptyInput` if `points` is empty.
    pub fn new(points: &[Point]) -> Result<Self> {
        let (head, tail) = points.split_first().ok_or(GeometryError::EmptyInput)?;
        let mut metrics = Self::seeded(*head);
        metrics.add_points_with_index(tail);
        Ok(metrics)
    }

    /// Creates metrics over plain positions, indexing them by their order.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::EmptyInput` if `positions` is empty.
    pub fn from_positions(positions: &[Point2]) -> Result<Self> {
        let points: Vec<Point> = positions
            .iter()
            .enumerate()
            .map(|(i, p)| Point::new(p.x, p.y, i))
            .collect();
        Self::new(&points)
    }

    fn seeded(point: Point) -> Self {
        Self {
            points: vec![point],
            points_sans_anchor: Vec::new(),
            anchor: point,
            first: point,
            is_hull_level: false,
            hull: None,
            area: Metric::Pending,
            signed_area: Metric::Pending,
            perimeter: Metric::Pending,
            centroid: Metric::Pending,
            perimeter_efficiency: Metric::Pending,
            hull_area_ratio: Metric::Pending,
            hull_n_ratio: Metric::Pending,
        }
    }

    /// Appends a point, keeping the anchor and first-drawn point up to date.
    pub fn add_point(&mut self, x: f64, y: f64, index: usize) {
        let point = Point::new(x, y, index);
        let anchor = self.anchor;
        if y < anchor.y || (y == anchor.y && x < anchor.x) {
            self.points_sans_anchor.push(anchor);
            self.anchor = point;
        } else {
            self.points_sans_anchor.push(point);
        }
        self.points.push(point);
        if point.index < self.first.index {
            self.first = point;
        }
    }

    /// Appends positions, indexing them by their order in `positions`.
    pub fn add_points(&mut self, positions: &[Point2]) {
        for (i, p) in positions.iter().enumerate() {
            self.add_point(p.x, p.y, i);
        }
    }

    /// Appends points, keeping each point's own index.
    pub fn add_points_with_index(&mut self, points: &[Point]) {
        for p in points {
            self.add_point(p.x, p.y, p.index);
        }
    }

    /// Rebuilds the anchor bookkeeping after the points were edited in place.
    fn reseat(&mut self) {
        let points = std::mem::take(&mut self.points);
        let (head, tail) = match points.split_first() {
            Some(split) => split,
            None => return,
        };
        self.points = vec![*head];
        self.points_sans_anchor.clear();
        self.anchor = *head;
        self.first = *head;
        self.add_points_with_index(tail);
    }

    // --- Accessors ---

    /// Returns the points in boundary order.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Returns the number of points.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Returns every point except the anchor.
    ///
    /// Insertion order until the hull has been computed, polar-angle order after.
    #[must_use]
    pub fn points_sans_anchor(&self) -> &[Point] {
        &self.points_sans_anchor
    }

    /// Returns the lowest point (minimum y, then minimum x).
    #[must_use]
    pub fn anchor(&self) -> &Point {
        &self.anchor
    }

    /// Returns the point with the smallest drawing index.
    #[must_use]
    pub fn first_point(&self) -> &Point {
        &self.first
    }

    /// Returns whether these metrics describe a convex hull.
    #[must_use]
    pub fn is_hull_level(&self) -> bool {
        self.is_hull_level
    }

    /// Returns copies of the points.
    #[must_use]
    pub fn copy_points(&self) -> Vec<Point> {
        self.points.clone()
    }

    /// Returns the absolute polygon area.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NotComputed` before the first update.
    pub fn area(&self) -> Result<f64> {
        self.area.get("area")
    }

    /// Returns the signed polygon area; positive for counter-clockwise rings.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NotComputed` before the first update.
    pub fn signed_area(&self) -> Result<f64> {
        self.signed_area.get("signed area")
    }

    /// Returns the perimeter of the closed ring.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NotComputed` before the first update.
    pub fn perimeter(&self) -> Result<f64> {
        self.perimeter.get("perimeter")
    }

    /// Returns the area-weighted centroid.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for zero-area rings and
    /// `GeometryError::NotComputed` before the first update.
    pub fn centroid(&self) -> Result<Point> {
        self.centroid.get("centroid")
    }

    /// Returns the isoperimetric ratio, 1 for a perfect circle.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for a zero-length perimeter and
    /// `GeometryError::NotComputed` before the first update.
    pub fn perimeter_efficiency(&self) -> Result<f64> {
        self.perimeter_efficiency.get("perimeter efficiency")
    }

    /// Returns the convex hull. A hull-level instance returns itself.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NotComputed` before [`update_all`](Self::update_all).
    pub fn hull(&self) -> Result<&PolygonMetrics> {
        if self.is_hull_level {
            return Ok(self);
        }
        self.hull
            .as_deref()
            .ok_or_else(|| GeometryError::NotComputed("hull").into())
    }

    /// Returns `hull area / area`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for zero-area rings and
    /// `GeometryError::NotComputed` before [`update_all`](Self::update_all).
    pub fn hull_area_ratio(&self) -> Result<f64> {
        self.hull_area_ratio.get("hull area ratio")
    }

    /// Returns `hull point count / point count`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::NotComputed` before [`update_all`](Self::update_all).
    pub fn hull_n_ratio(&self) -> Result<f64> {
        self.hull_n_ratio.get("hull point ratio")
    }

    // --- Mutation ---

    /// Moves the point at `index` (position in boundary order).
    ///
    /// Cached metrics are left untouched; call an update method afterwards.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::VertexOutOfRange` if `index` is out of range.
    pub fn set_point(&mut self, index: usize, x: f64, y: f64) -> Result<()> {
        let len = self.points.len();
        let point = self
            .points
            .get_mut(index)
            .ok_or(GeometryError::VertexOutOfRange { index, len })?;
        point.x = x;
        point.y = y;
        self.reseat();
        Ok(())
    }

    /// Moves every point by `offset`.
    pub fn translate(&mut self, offset: Vector2) {
        for p in &mut self.points {
            p.translate(offset);
        }
        self.reseat();
    }

    /// Multiplies every coordinate by the matching component of `factors`.
    pub fn scale(&mut self, factors: Vector2) {
        for p in &mut self.points {
            p.scale(factors);
        }
        self.reseat();
    }

    /// Reorders the points as the anchor followed by the others sorted by
    /// polar angle around it, which turns a convex point set into a simple ring.
    pub fn reorder_by_polar_angle(&mut self) {
        let reverse = needs_reverse(&self.points_sans_anchor);
        sort_by_polar_angle(&self.anchor, &mut self.points_sans_anchor, reverse);
        let mut ordered = Vec::with_capacity(self.points.len());
        ordered.push(self.anchor);
        ordered.extend_from_slice(&self.points_sans_anchor);
        self.points = ordered;
    }

    // --- Updates ---

    /// Recomputes perimeter, area, perimeter efficiency and centroid.
    ///
    /// Linear in the number of points; safe to call on every vertex drag.
    pub fn update_all_except_hull(&mut self) {
        self.update_perimeter();
        self.update_area();
        self.update_perimeter_efficiency();
        self.update_centroid();
    }

    /// Recomputes everything, including the convex hull and the hull ratios.
    pub fn update_all(&mut self) {
        self.update_all_except_hull();
        self.update_hull();
        self.update_hull_area_ratio();
        self.update_hull_n_ratio();
    }

    fn update_perimeter(&mut self) {
        self.perimeter = Metric::Ready(perimeter(&self.points));
    }

    fn update_area(&mut self) {
        let signed = signed_area(&self.points);
        self.signed_area = Metric::Ready(signed);
        self.area = Metric::Ready(signed.abs());
    }

    fn update_perimeter_efficiency(&mut self) {
        if let (Metric::Ready(area), Metric::Ready(perim)) = (self.area, self.perimeter) {
            self.perimeter_efficiency =
                Metric::from_option(perimeter_efficiency(area, perim), "zero-length perimeter");
        }
    }

    fn update_centroid(&mut self) {
        if let Metric::Ready(signed) = self.signed_area {
            self.centroid =
                Metric::from_option(centroid(&self.points, signed), "zero-area polygon");
        }
    }

    fn update_hull(&mut self) {
        if self.is_hull_level {
            return;
        }
        let hull_points = graham_scan(&self.anchor, &mut self.points_sans_anchor);
        let mut hull = match hull_points.split_first() {
            Some((head, tail)) => {
                let mut hull = Self::seeded(*head);
                hull.add_points_with_index(tail);
                hull
            }
            None => Self::seeded(self.anchor),
        };
        hull.is_hull_level = true;
        hull.update_all_except_hull();
        hull.hull_area_ratio = match hull.area {
            Metric::Ready(area) if area > 0.0 => Metric::Ready(1.0),
            _ => Metric::Degenerate("zero-area polygon"),
        };
        hull.hull_n_ratio = Metric::Ready(1.0);
        self.hull = Some(Box::new(hull));
    }

    fn update_hull_area_ratio(&mut self) {
        let (Some(hull), Metric::Ready(area)) = (self.hull.as_deref(), self.area) else {
            return;
        };
        self.hull_area_ratio = match hull.area {
            Metric::Ready(hull_area) if area > 0.0 => Metric::Ready(hull_area / area),
            _ => Metric::Degenerate("zero-area polygon"),
        };
    }

    fn update_hull_n_ratio(&mut self) {
        if let Some(hull) = self.hull.as_deref() {
            #[allow(clippy::cast_precision_loss)]
            let ratio = hull.points.len() as f64 / self.points.len() as f64;
            self.hull_n_ratio = Metric::Ready(ratio);
        }
    }

    // --- Measurements over arbitrary points ---

    /// Returns the distance from `origin` to each of `points`.
    #[must_use]
    pub fn distances_from(&self, origin: &Point, points: &[Point]) -> Vec<f64> {
        crate::math::distance_2d::distances_from(origin, points)
    }

    /// Returns the lengths of consecutive segments along `points`.
    #[must_use]
    pub fn consecutive_distances(&self, points: &[Point]) -> Vec<f64> {
        consecutive_distances(points)
    }

    /// Returns the x on the line through `a` and `b` at height `y`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for horizontal or vertical lines.
    pub fn x_along_line_at_y(&self, y: f64, a: &Point, b: &Point) -> Result<f64> {
        let f = line_equation_x(a, b).ok_or_else(|| {
            GeometryError::Degenerate("line has no x(y) form".to_owned())
        })?;
        Ok(f(y))
    }

    /// Returns the y on the line through `a` and `b` at `x`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::Degenerate` for vertical lines.
    pub fn y_along_line_at_x(&self, x: f64, a: &Point, b: &Point) -> Result<f64> {
        let f = line_equation_y(a, b).ok_or_else(|| {
            GeometryError::Degenerate("vertical line has no y(x) form".to_owned())
        })?;
        Ok(f(x))
    }

    /// Returns whether `p` lies within `bounds` of the line through `a` and `b`.
    #[must_use]
    pub fn does_intersect(&self, p: &Point, a: &Point, b: &Point, bounds: f64) -> bool {
        does_intersect(p, a, b, bounds)
    }

    /// Returns the interior angle, in radians, at the point at `index` of the closed ring.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::VertexOutOfRange` for a bad index and
    /// `GeometryError::Degenerate` if a neighbour coincides with the vertex.
    pub fn angle_at(&self, index: usize) -> Result<f64> {
        let len = self.points.len();
        let vertex = self
            .points
            .get(index)
            .ok_or(GeometryError::VertexOutOfRange { index, len })?;
        let prev = &self.points[(index + len - 1) % len];
        let next = &self.points[(index + 1) % len];
        angle_at(vertex, prev, next).ok_or_else(|| {
            GeometryError::Degenerate(format!("no angle at vertex {index}")).into()
        })
    }

    /// Returns one flag per owned point telling whether it lies within `bounds` of `reference`.
    #[must_use]
    pub fn is_near_vertices(&self, reference: &Point, bounds: f64) -> Vec<bool> {
        near_mask(&self.points, reference, bounds)
    }

    /// Returns the mean distance from `origin` to the owned points.
    #[must_use]
    pub fn mean_distance_from(&self, origin: &Point) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let n = self.points.len() as f64;
        self.points.iter().map(|p| distance(origin, p)).sum::<f64>() / n
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn square(side: f64) -> PolygonMetrics {
        PolygonMetrics::from_positions(&[
            Point2::new(0.0, 0.0),
            Point2::new(side, 0.0),
            Point2::new(side, side),
            Point2::new(0.0, side),
        ])
        .unwrap()
    }

    fn regular_polygon(n: usize, radius: f64) -> PolygonMetrics {
        let positions: Vec<Point2> = (0..n)
            .map(|k| {
                #[allow(clippy::cast_precision_loss)]
                let t = 2.0 * PI * k as f64 / n as f64;
                Point2::new(radius * t.cos(), radius * t.sin())
            })
            .collect();
        PolygonMetrics::from_positions(&positions).unwrap()
    }

    #[test]
    fn empty_input_rejected() {
        assert!(matches!(
            PolygonMetrics::new(&[]),
            Err(crate::StrokeformError::Geometry(GeometryError::EmptyInput))
        ));
    }

    #[test]
    fn anchor_is_lowest_then_leftmost() {
        let m = PolygonMetrics::from_positions(&[
            Point2::new(5.0, 3.0),
            Point2::new(4.0, 1.0),
            Point2::new(9.0, 1.0),
            Point2::new(2.0, 1.0),
            Point2::new(7.0, 2.0),
        ])
        .unwrap();
        assert_eq!(m.anchor().index, 3);
        assert_eq!(m.points_sans_anchor().len(), 4);
        assert!(m.points_sans_anchor().iter().all(|p| p.index != 3));
        assert_eq!(m.points().len(), 5);
    }

    #[test]
    fn first_point_tracks_smallest_index() {
        let m = PolygonMetrics::new(&[
            Point::new(0.0, 0.0, 4),
            Point::new(1.0, 0.0, 2),
            Point::new(1.0, 1.0, 6),
        ])
        .unwrap();
        assert_eq!(m.first_point().index, 2);
    }

    #[test]
    fn metrics_pending_before_update() {
        let m = square(1.0);
        assert!(matches!(
            m.area(),
            Err(crate::StrokeformError::Geometry(GeometryError::NotComputed(_)))
        ));
        assert!(m.hull().is_err());
    }

    #[test]
    fn square_measurements() {
        let mut m = square(10.0);
        m.update_all();
        assert_abs_diff_eq!(m.area().unwrap(), 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(m.signed_area().unwrap(), 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(m.perimeter().unwrap(), 40.0, epsilon = 1e-9);
        let c = m.centroid().unwrap();
        assert_abs_diff_eq!(c.x, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.y, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(
            m.perimeter_efficiency().unwrap(),
            2.0 * (PI * 100.0).sqrt() / 40.0,
            epsilon = 1e-12
        );
        assert_eq!(m.points().len(), 4);
    }

    #[test]
    fn hull_is_its_own_hull() {
        let mut m = square(2.0);
        m.update_all();
        let hull = m.hull().unwrap();
        assert!(hull.is_hull_level());
        assert!(std::ptr::eq(hull.hull().unwrap(), hull));
        assert_abs_diff_eq!(m.hull_area_ratio().unwrap(), 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.hull_n_ratio().unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn hull_drops_interior_points() {
        let mut m = PolygonMetrics::from_positions(&[
            Point2::new(0.0, 0.0),
            Point2::new(4.0, 0.0),
            Point2::new(2.0, 1.0),
            Point2::new(4.0, 4.0),
            Point2::new(2.0, 2.0),
            Point2::new(0.0, 4.0),
        ])
        .unwrap();
        m.update_all();
        let hull = m.hull().unwrap();
        assert_eq!(hull.point_count(), 4);
        assert_abs_diff_eq!(m.hull_n_ratio().unwrap(), 4.0 / 6.0, epsilon = 1e-12);
        assert!(m.hull_area_ratio().unwrap() > 1.0);
    }

    #[test]
    fn collinear_points_have_no_centroid() {
        let mut m = PolygonMetrics::from_positions(&[
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 1.0),
            Point2::new(2.0, 2.0),
        ])
        .unwrap();
        m.update_all();
        assert_abs_diff_eq!(m.area().unwrap(), 0.0);
        assert!(matches!(
            m.centroid(),
            Err(crate::StrokeformError::Geometry(GeometryError::Degenerate(_)))
        ));
        assert_abs_diff_eq!(m.perimeter_efficiency().unwrap(), 0.0);
    }

    #[test]
    fn single_point_is_degenerate() {
        let mut m = PolygonMetrics::from_positions(&[Point2::new(3.0, 3.0)]).unwrap();
        m.update_all();
        assert!(m.centroid().is_err());
        assert!(m.perimeter_efficiency().is_err());
    }

    #[test]
    fn update_except_hull_is_idempotent() {
        let mut m = regular_polygon(7, 3.0);
        m.update_all_except_hull();
        let first = (m.area().unwrap(), m.perimeter().unwrap(), m.centroid().unwrap());
        m.update_all_except_hull();
        let second = (m.area().unwrap(), m.perimeter().unwrap(), m.centroid().unwrap());
        assert_eq!(first, second);
    }

    #[test]
    fn efficiency_grows_with_polygon_order() {
        let mut previous = 0.0;
        for n in [3, 4, 6, 12, 48, 256] {
            let mut m = regular_polygon(n, 10.0);
            m.update_all_except_hull();
            let e = m.perimeter_efficiency().unwrap();
            assert!(e > previous, "n={n}: {e} <= {previous}");
            assert!(e <= 1.0);
            previous = e;
        }
        assert_abs_diff_eq!(previous, 1.0, epsilon = 1e-3);
    }

    #[test]
    fn set_point_moves_anchor() {
        let mut m = square(4.0);
        m.set_point(2, 1.0, -3.0).unwrap();
        assert_eq!(m.anchor().index, 2);
        assert!(m.set_point(9, 0.0, 0.0).is_err());
    }

    #[test]
    fn translate_shifts_centroid() {
        let mut m = square(2.0);
        m.translate(Vector2::new(10.0, -5.0));
        m.update_all_except_hull();
        let c = m.centroid().unwrap();
        assert_abs_diff_eq!(c.x, 11.0, epsilon = 1e-9);
        assert_abs_diff_eq!(c.y, -4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(m.anchor().x, 10.0);
    }

    #[test]
    fn right_angles_of_square() {
        let m = square(4.0);
        for i in 0..4 {
            assert_abs_diff_eq!(m.angle_at(i).unwrap(), PI / 2.0, epsilon = 1e-9);
        }
        assert!(m.angle_at(4).is_err());
        assert!(m.does_intersect(
            &Point::new(2.0, 0.5, 0),
            &Point::new(0.0, 0.0, 0),
            &Point::new(4.0, 0.0, 0),
            1.0
        ));
    }

    #[test]
    fn scale_stretches_area() {
        let mut m = square(2.0);
        m.scale(Vector2::new(3.0, 0.5));
        m.update_all_except_hull();
        assert_abs_diff_eq!(m.area().unwrap(), 6.0, epsilon = 1e-9);
    }

    #[test]
    fn reorder_turns_scattered_corners_into_ring() {
        let mut m = PolygonMetrics::from_positions(&[
            Point2::new(0.0, 10.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
        ])
        .unwrap();
        m.reorder_by_polar_angle();
        m.update_all_except_hull();
        assert_abs_diff_eq!(m.area().unwrap(), 100.0, epsilon = 1e-9);
        assert!(m.points()[0].same_position(&Point::new(0.0, 0.0, 0)));
    }

    #[test]
    fn line_helpers() {
        let m = square(1.0);
        let a = Point::new(0.0, 0.0, 0);
        let b = Point::new(2.0, 4.0, 1);
        assert_abs_diff_eq!(m.y_along_line_at_x(1.0, &a, &b).unwrap(), 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(m.x_along_line_at_y(2.0, &a, &b).unwrap(), 1.0, epsilon = 1e-12);
        assert!(m.y_along_line_at_x(1.0, &a, &Point::new(0.0, 5.0, 2)).is_err());
    }
}
