//! User profile: identity, anthropometric measurements, and health
//! markers, one record per username.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::store::Record;

use super::split_tags;

/// Column set of the profile table, in header order.
pub const PROFILE_COLUMNS: &[&str] = &[
    "username",
    "name",
    "age",
    "height_cm",
    "weight_kg",
    "email",
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
    "medical_history",
    "dietary_restrictions",
];

/// One incoming profile field: clients send strings, numbers, or (for
/// `dietary_restrictions`) string arrays. Everything coerces to the
/// store's string form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    List(Vec<String>),
    Null,
}

impl FieldValue {
    /// Coerces the value to its column string form. Lists flatten to
    /// `|`-joined strings; integral numbers print without a decimal
    /// point.
    pub fn to_field(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::List(items) => items.join("|"),
            FieldValue::Null => String::new(),
        }
    }

    /// True when the value would coerce to an empty field. Empty input
    /// never overrides a stored value on profile update.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(_) => false,
            FieldValue::List(items) => items.is_empty(),
            FieldValue::Null => true,
        }
    }
}

/// Incoming profile save payload: an open mapping from column name to
/// field value. Unknown keys are accepted and ignored by the merge.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProfileInput(pub HashMap<String, FieldValue>);

impl ProfileInput {
    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.0.get(column)
    }

    /// The username field coerced to a string; empty if absent.
    pub fn username(&self) -> String {
        self.get("username")
            .map(FieldValue::to_field)
            .unwrap_or_default()
    }
}

/// A stored profile as returned to callers. All values are the raw
/// column strings except `dietary_restrictions`, which is always
/// presented as a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub username: String,
    pub name: String,
    pub age: String,
    pub height_cm: String,
    pub weight_kg: String,
    pub email: String,
    pub fitness_level: String,
    pub gender: String,
    pub bicep_cm: String,
    pub chest_cm: String,
    pub shoulder_cm: String,
    pub lat_cm: String,
    pub waist_cm: String,
    pub abs_cm: String,
    pub thigh_cm: String,
    pub calf_cm: String,
    pub blood_sugar_mg_dl: String,
    pub cholesterol_mg_dl: String,
    pub medical_history: String,
    pub dietary_restrictions: Vec<String>,
}

impl Profile {
    /// Builds a profile from a stored record, splitting
    /// `dietary_restrictions` back into a list. Missing columns read
    /// as empty.
    pub fn from_record(record: &Record) -> Self {
        let field = |name: &str| record.get(name).cloned().unwrap_or_default();
        Self {
            username: field("username"),
            name: field("name"),
            age: field("age"),
            height_cm: field("height_cm"),
            weight_kg: field("weight_kg"),
            email: field("email"),
            fitness_level: field("fitness_level"),
            gender: field("gender"),
            bicep_cm: field("bicep_cm"),
            chest_cm: field("chest_cm"),
            shoulder_cm: field("shoulder_cm"),
            lat_cm: field("lat_cm"),
            waist_cm: field("waist_cm"),
            abs_cm: field("abs_cm"),
            thigh_cm: field("thigh_cm"),
            calf_cm: field("calf_cm"),
            blood_sugar_mg_dl: field("blood_sugar_mg_dl"),
            cholesterol_mg_dl: field("cholesterol_mg_dl"),
            medical_history: field("medical_history"),
            dietary_restrictions: split_tags(&field("dietary_restrictions")),
        }
    }
}
