//! Planar points clustered by the linkage builder.

/// A point in the plane.
///
/// # Examples
/// ```
/// use dendra_core::Point;
///
/// let origin = Point::new(0.0, 0.0);
/// let other = Point::from((3.0, 4.0));
/// assert_eq!(origin.distance(&other), 5.0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates a point from its coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns whether both coordinates are finite.
    ///
    /// # Examples
    /// ```
    /// use dendra_core::Point;
    ///
    /// assert!(Point::new(1.0, 2.0).is_finite());
    /// assert!(!Point::new(f64::NAN, 2.0).is_finite());
    /// assert!(!Point::new(1.0, f64::INFINITY).is_finite());
    /// ```
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Returns the Euclidean distance to `other`.
    #[must_use]
    pub fn distance(&self, other: &Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Self::new(x, y)
    }
}

/// Drops every point with a NaN or infinite coordinate.
///
/// Survivors keep their relative order, so leaf `i` of a subsequent build
/// refers to the `i`-th finite point of `points`.
///
/// # Examples
/// ```
/// use dendra_core::{Point, retain_finite};
///
/// let points = [
///     Point::new(0.0, 0.0),
///     Point::new(f64::NAN, 1.0),
///     Point::new(2.0, 2.0),
/// ];
/// assert_eq!(
///     retain_finite(&points),
///     vec![Point::new(0.0, 0.0), Point::new(2.0, 2.0)],
/// );
/// ```
#[must_use]
pub fn retain_finite(points: &[Point]) -> Vec<Point> {
    points.iter().copied().filter(Point::is_finite).collect()
}
