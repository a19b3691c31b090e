//! Post-workout feedback entry: performance numbers for one exercise
//! plus a denormalized snapshot of the user's current measurements.

use serde::{Deserialize, Serialize};

use crate::store::Record;

use super::diet::round_field;

/// Column set of the feedback log table, in header order.
pub const FEEDBACK_COLUMNS: &[&str] = &[
    "username",
    "date",
    "exercise_name",
    "category",
    "actual_reps",
    "actual_weight",
    "number_of_sets",
    "pain_level",
    "intensity",
    "fitness_level",
    "gender",
    "bicep_cm",
    "chest_cm",
    "shoulder_cm",
    "lat_cm",
    "waist_cm",
    "abs_cm",
    "thigh_cm",
    "calf_cm",
    "blood_sugar_mg_dl",
    "cholesterol_mg_dl",
    "height_cm",
    "weight_kg",
];

/// Incoming feedback payload. Numeric fields default to 0 and are
/// rounded on storage; `fitness_level` and `gender` default to empty.
#[derive(Debug, Clone, Deserialize)]
pub struct FeedbackEntry {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub exercise_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub actual_reps: f64,
    #[serde(default)]
    pub actual_weight: f64,
    #[serde(default)]
    pub number_of_sets: f64,
    #[serde(default)]
    pub pain_level: f64,
    #[serde(default)]
    pub intensity: f64,
    #[serde(default)]
    pub fitness_level: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub bicep_cm: f64,
    #[serde(default)]
    pub chest_cm: f64,
    #[serde(default)]
    pub shoulder_cm: f64,
    #[serde(default)]
    pub lat_cm: f64,
    #[serde(default)]
    pub waist_cm: f64,
    #[serde(default)]
    pub abs_cm: f64,
    #[serde(default)]
    pub thigh_cm: f64,
    #[serde(default)]
    pub calf_cm: f64,
    #[serde(default)]
    pub blood_sugar_mg_dl: f64,
    #[serde(default)]
    pub cholesterol_mg_dl: f64,
    #[serde(default)]
    pub height_cm: f64,
    #[serde(default)]
    pub weight_kg: f64,
}

impl FeedbackEntry {
    pub fn to_record(&self) -> Record {
        let mut record = Record::new();
        record.insert("username".to_string(), self.username.clone());
        record.insert("date".to_string(), self.date.clone());
        record.insert("exercise_name".to_string(), self.exercise_name.clone());
        record.insert("category".to_string(), self.category.clone());
        record.insert("actual_reps".to_string(), round_field(self.actual_reps));
        record.insert("actual_weight".to_string(), round_field(self.actual_weight));
        record.insert(
            "number_of_sets".to_string(),
            round_field(self.number_of_sets),
        );
        record.insert("pain_level".to_string(), round_field(self.pain_level));
        record.insert("intensity".to_string(), round_field(self.intensity));
        record.insert("fitness_level".to_string(), self.fitness_level.clone());
        record.insert("gender".to_string(), self.gender.clone());
        record.insert("bicep_cm".to_string(), round_field(self.bicep_cm));
        record.insert("chest_cm".to_string(), round_field(self.chest_cm));
        record.insert("shoulder_cm".to_string(), round_field(self.shoulder_cm));
        record.insert("lat_cm".to_string(), round_field(self.lat_cm));
        record.insert("waist_cm".to_string(), round_field(self.waist_cm));
        record.insert("abs_cm".to_string(), round_field(self.abs_cm));
        record.insert("thigh_cm".to_string(), round_field(self.thigh_cm));
        record.insert("calf_cm".to_string(), round_field(self.calf_cm));
        record.insert(
            "blood_sugar_mg_dl".to_string(),
            round_field(self.blood_sugar_mg_dl),
        );
        record.insert(
            "cholesterol_mg_dl".to_string(),
            round_field(self.cholesterol_mg_dl),
        );
        record.insert("height_cm".to_string(), round_field(self.height_cm));
        record.insert("weight_kg".to_string(), round_field(self.weight_kg));
        record
    }
}

/// The projection returned by the per-day feedback query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExerciseSummary {
    pub category: String,
    pub exercise_name: String,
}
