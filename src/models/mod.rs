mod diet;
mod feedback;
mod profile;

pub use diet::{DietEntry, DIET_COLUMNS};
pub use feedback::{ExerciseSummary, FeedbackEntry, FEEDBACK_COLUMNS};
pub use profile::{FieldValue, Profile, ProfileInput, PROFILE_COLUMNS};

/// Flattens a list of tags to its at-rest form: a `|`-joined string.
pub fn join_tags(tags: &[String]) -> String {
    tags.join("|")
}

/// Splits a `|`-joined column value back into a list. An empty value
/// is an empty list, not a list containing one empty string.
pub fn split_tags(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split('|').map(str::to_string).collect()
}
