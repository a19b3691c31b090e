//! Diet log entry: one record per (username, date, meal_type), with a
//! body-weight snapshot and nutrition totals.

use serde::Deserialize;

use crate::store::Record;

use super::join_tags;

/// Column set of the diet log table, in header order.
pub const DIET_COLUMNS: &[&str] = &[
    "username",
    "date",
    "weight_kg",
    "meal_type",
    "calories",
    "protein_g",
    "carbs_g",
    "fat_g",
    "fooditem",
];

/// Incoming diet log payload.
///
/// `fooditem` stays an `Option` so a missing list can be rejected;
/// an empty list is a valid (if pointless) entry.
#[derive(Debug, Clone, Deserialize)]
pub struct DietEntry {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub weight_kg: f64,
    #[serde(default)]
    pub meal_type: String,
    #[serde(default)]
    pub calories: f64,
    #[serde(default)]
    pub protein_g: f64,
    #[serde(default)]
    pub carbs_g: f64,
    #[serde(default)]
    pub fat_g: f64,
    pub fooditem: Option<Vec<String>>,
}

impl DietEntry {
    /// Converts the entry to its stored form. Every numeric field is
    /// rounded to the nearest integer before storage; the table only
    /// ever holds integer-quantized nutrition values.
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("username".to_string(), self.username.clone());
        record.insert("date".to_string(), self.date.clone());
        record.insert("weight_kg".to_string(), round_field(self.weight_kg));
        record.insert("meal_type".to_string(), self.meal_type.clone());
        record.insert("calories".to_string(), round_field(self.calories));
        record.insert("protein_g".to_string(), round_field(self.protein_g));
        record.insert("carbs_g".to_string(), round_field(self.carbs_g));
        record.insert("fat_g".to_string(), round_field(self.fat_g));
        record.insert(
            "fooditem".to_string(),
            join_tags(self.fooditem.as_deref().unwrap_or(&[])),
        );
        record
    }
}

/// Rounds to the nearest integer and formats without a decimal point.
pub(crate) fn round_field(value: f64) -> String {
    (value.round() as i64).to_string()
}
