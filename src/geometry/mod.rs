pub mod hull;
pub mod polygon_metrics;

pub use polygon_metrics::PolygonMetrics;
