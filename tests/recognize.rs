#![allow(clippy::unwrap_used)]

use std::f64::consts::PI;

use approx::assert_abs_diff_eq;
use nalgebra::Point2;
use strokeform::{
    GeometryError, Identity, RecognizeStroke, Shape, ShapeGeometry, StrokeformError,
};
use tracing_subscriber::EnvFilter;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn stroke(positions: &[(f64, f64)]) -> Vec<Point2<f64>> {
    positions.iter().map(|&(x, y)| Point2::new(x, y)).collect()
}

fn recognize(points: Vec<Point2<f64>>) -> Shape {
    init_tracing();
    RecognizeStroke::new(points).execute().unwrap()
}

#[test]
fn square_corners_become_rectangle() {
    let shape = recognize(stroke(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]));
    assert_eq!(shape.identity(), Identity::Rectangle);
    assert_eq!(shape.points().len(), 4);
    assert_abs_diff_eq!(shape.center().x, 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(shape.center().y, 5.0, epsilon = 1e-9);
    let side = shape.points()[2].x - shape.points()[0].x;
    assert_abs_diff_eq!(side, 10.0, epsilon = 1e-9);
}

#[test]
fn sampled_square_becomes_rectangle() {
    let mut positions = Vec::new();
    for i in 0..10 {
        positions.push((f64::from(i) * 10.0, 0.0));
    }
    for i in 0..10 {
        positions.push((100.0, f64::from(i) * 10.0));
    }
    for i in 0..10 {
        positions.push((100.0 - f64::from(i) * 10.0, 100.0));
    }
    for i in 0..10 {
        positions.push((0.0, 100.0 - f64::from(i) * 10.0));
    }
    let shape = recognize(stroke(&positions));
    assert_eq!(shape.identity(), Identity::Rectangle);
    assert_abs_diff_eq!(shape.center().x, 50.0, epsilon = 1e-6);
    assert_abs_diff_eq!(shape.center().y, 50.0, epsilon = 1e-6);
}

#[test]
fn sampled_circle_becomes_circle() {
    let positions: Vec<(f64, f64)> = (0..64)
        .map(|k| {
            let t = 2.0 * PI * f64::from(k) / 64.0;
            (100.0 + 50.0 * t.cos(), 100.0 + 50.0 * t.sin())
        })
        .collect();
    let shape = recognize(stroke(&positions));
    assert_eq!(shape.identity(), Identity::Circle);
    assert_abs_diff_eq!(shape.center().x, 100.0, epsilon = 1e-6);
    assert_abs_diff_eq!(shape.center().y, 100.0, epsilon = 1e-6);
    assert_abs_diff_eq!(shape.radius().unwrap(), 50.0, epsilon = 1e-6);
}

#[test]
fn wobbly_stroke_becomes_line() {
    let mut positions = vec![(0.0, 0.0)];
    for i in 1..=20 {
        let t = f64::from(i) / 21.0;
        let wobble = if i % 2 == 0 { 1.0 } else { -1.0 };
        positions.push((100.0 * t, 5.0 * t + wobble));
    }
    positions.push((100.0, 5.0));

    let shape = recognize(stroke(&positions));
    assert_eq!(shape.identity(), Identity::Line);
    assert_eq!(shape.points().len(), 2);
    assert_abs_diff_eq!(shape.center().x, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(shape.center().y, 2.5, epsilon = 1e-9);
}

#[test]
fn dented_triangle_becomes_triangle() {
    let shape = recognize(stroke(&[
        (0.0, 0.0),
        (50.0, 10.0),
        (100.0, 0.0),
        (70.0, 40.0),
        (50.0, 90.0),
        (30.0, 40.0),
    ]));
    assert_eq!(shape.identity(), Identity::Triangle);
    assert_eq!(shape.points().len(), 3);
    assert!(shape.radius().is_none());
}

#[test]
fn corners_with_inner_noise_become_triangle() {
    let shape = recognize(stroke(&[
        (0.0, 0.0),
        (100.0, 0.0),
        (50.0, 90.0),
        (50.0, 30.0),
        (45.0, 40.0),
    ]));
    assert_eq!(shape.identity(), Identity::Triangle);
    assert_eq!(shape.points().len(), 3);
}

#[test]
fn square_in_negative_quadrant_becomes_rectangle() {
    let shape = recognize(stroke(&[
        (-100.0, -100.0),
        (-90.0, -100.0),
        (-90.0, -90.0),
        (-100.0, -90.0),
    ]));
    assert_eq!(shape.identity(), Identity::Rectangle);
    assert_abs_diff_eq!(shape.center().x, -95.0, epsilon = 1e-9);
    assert_abs_diff_eq!(shape.center().y, -95.0, epsilon = 1e-9);
}

#[test]
fn zigzag_stays_freeform() {
    let shape = recognize(stroke(&[
        (0.0, 0.0),
        (100.0, 10.0),
        (10.0, 20.0),
        (100.0, 30.0),
        (0.0, 40.0),
        (100.0, 50.0),
    ]));
    assert_eq!(shape.identity(), Identity::Random);
    assert_eq!(shape.points().len(), 6);
    assert!(shape.center().x.is_finite());
    assert!(shape.center().y.is_finite());
}

#[test]
fn single_point_is_degenerate() {
    init_tracing();
    let result = RecognizeStroke::new(stroke(&[(3.0, 4.0)])).execute();
    assert!(matches!(
        result,
        Err(StrokeformError::Geometry(GeometryError::Degenerate(_)))
    ));
}

#[test]
fn empty_stroke_is_rejected() {
    init_tracing();
    let result = RecognizeStroke::new(Vec::new()).execute();
    assert!(matches!(
        result,
        Err(StrokeformError::Geometry(GeometryError::EmptyInput))
    ));
}

#[test]
fn recognised_shape_can_be_dragged() {
    let mut shape = recognize(stroke(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]));
    shape.center_on(&strokeform::Point::new(50.0, 50.0, 0)).unwrap();
    assert_abs_diff_eq!(shape.center().x, 50.0, epsilon = 1e-9);
    assert_abs_diff_eq!(shape.center().y, 50.0, epsilon = 1e-9);
}
