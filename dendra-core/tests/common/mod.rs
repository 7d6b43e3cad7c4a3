use dendra_core::Point;

/// Per-record statistics reduced to points by the integration tests.
#[derive(Clone, Debug)]
pub struct Creature {
    pub attack: f64,
    pub defense: f64,
}

impl Creature {
    #[must_use]
    pub fn new(attack: f64, defense: f64) -> Self {
        Self { attack, defense }
    }
}

#[must_use]
pub fn points(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().copied().map(Point::from).collect()
}

/// Two nearby points and a distant outlier.
#[must_use]
pub fn outlier_scenario() -> Vec<Point> {
    points(&[(0.0, 0.0), (0.0, 1.0), (10.0, 10.0)])
}

/// Two unit-distance pairs sharing leaf 0, plus a distant point.
#[must_use]
pub fn tie_scenario() -> Vec<Point> {
    points(&[(0.0, 0.0), (1.0, 0.0), (0.0, 1.0), (5.0, 5.0)])
}
