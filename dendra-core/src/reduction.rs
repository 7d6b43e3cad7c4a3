//! Reduction of caller-defined records to planar points.

use crate::point::Point;

/// Maps one record to the point it is clustered as.
///
/// Any `Fn(&R) -> Point` is a reduction, so closures and plain functions can
/// be passed directly.
///
/// # Examples
/// ```
/// use dendra_core::{FeatureReduction, Point};
///
/// struct Stats {
///     attack: f64,
///     defense: f64,
/// }
///
/// let reduce = |stats: &Stats| Point::new(stats.attack, stats.defense);
/// let point = reduce.reduce(&Stats { attack: 49.0, defense: 65.0 });
/// assert_eq!(point, Point::new(49.0, 65.0));
/// ```
pub trait FeatureReduction<R: ?Sized> {
    /// Returns the point for `record`.
    fn reduce(&self, record: &R) -> Point;
}

impl<R: ?Sized, F> FeatureReduction<R> for F
where
    F: Fn(&R) -> Point,
{
    fn reduce(&self, record: &R) -> Point {
        self(record)
    }
}

/// Reduces every record in order.
///
/// # Examples
/// ```
/// use dendra_core::{Point, project};
///
/// let pairs = [(1.0, 2.0), (3.0, 4.0)];
/// let points = project(&pairs, |&(x, y): &(f64, f64)| Point::new(x + y, x - y));
/// assert_eq!(points, vec![Point::new(3.0, -1.0), Point::new(7.0, -1.0)]);
/// ```
pub fn project<R, F>(records: &[R], reduction: F) -> Vec<Point>
where
    F: FeatureReduction<R>,
{
    records
        .iter()
        .map(|record| reduction.reduce(record))
        .collect()
}
