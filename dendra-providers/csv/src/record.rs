//! Typed stat rows and their reduction to the offense/defense plane.
use dendra_core::Point;
use serde::{Deserialize, Serialize};

/// One row of a creature statistics table.
///
/// Field names follow the column headers of the source file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatRecord {
    /// National index number.
    #[serde(rename = "#")]
    pub number: u32,
    /// Display name.
    #[serde(rename = "Name")]
    pub name: String,
    /// Primary elemental type.
    #[serde(rename = "Type 1")]
    pub primary_type: String,
    /// Secondary elemental type; empty cells read as `None`.
    #[serde(rename = "Type 2")]
    pub secondary_type: Option<String>,
    /// Sum of the six base stats as recorded in the file.
    #[serde(rename = "Total")]
    pub total: u32,
    /// Base hit points.
    #[serde(rename = "HP")]
    pub hp: u32,
    /// Base physical attack.
    #[serde(rename = "Attack")]
    pub attack: u32,
    /// Base physical defense.
    #[serde(rename = "Defense")]
    pub defense: u32,
    /// Base special attack.
    #[serde(rename = "Sp. Atk")]
    pub special_attack: u32,
    /// Base special defense.
    #[serde(rename = "Sp. Def")]
    pub special_defense: u32,
    /// Base speed.
    #[serde(rename = "Speed")]
    pub speed: u32,
}

/// Reduces a record to `(attack + special attack + speed, defense + special
/// defense + hp)`.
///
/// # Examples
/// ```
/// use dendra_core::Point;
/// use dendra_providers_csv::{StatRecord, offense_defense};
///
/// let record = StatRecord {
///     number: 1,
///     name: "Bulbasaur".into(),
///     primary_type: "Grass".into(),
///     secondary_type: Some("Poison".into()),
///     total: 318,
///     hp: 45,
///     attack: 49,
///     defense: 49,
///     special_attack: 65,
///     special_defense: 65,
///     speed: 45,
/// };
/// assert_eq!(offense_defense(&record), Point::new(159.0, 159.0));
/// ```
#[must_use]
pub fn offense_defense(record: &StatRecord) -> Point {
    let offense =
        f64::from(record.attack) + f64::from(record.special_attack) + f64::from(record.speed);
    let defense =
        f64::from(record.defense) + f64::from(record.special_defense) + f64::from(record.hp);
    Point::new(offense, defense)
}
