//! Feedback log repository: every save appends, even for a repeated
//! (username, date, exercise_name) triple. Unlike the diet log there
//! is no duplicate check; repeated sets of the same exercise on the
//! same day are separate rows.

use chrono::Utc;

use crate::models::{ExerciseSummary, FeedbackEntry};
use crate::store::Table;

use super::RepoError;

pub struct FeedbackRepository {
    table: Table,
}

impl FeedbackRepository {
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    /// Appends a feedback entry.
    pub fn save(&self, entry: &FeedbackEntry) -> Result<(), RepoError> {
        if entry.username.is_empty()
            || entry.date.is_empty()
            || entry.exercise_name.is_empty()
            || entry.category.is_empty()
        {
            return Err(RepoError::Validation(
                "username, date, exercise_name and category are required",
            ));
        }

        self.table.append(&entry.to_record())?;
        Ok(())
    }

    /// Returns the (category, exercise_name) pairs logged by `username`
    /// on `date` (`YYYY-MM-DD`). Username matching is case-insensitive.
    ///
    /// An empty result is reported as [`RepoError::NotFound`].
    pub fn for_day(&self, username: &str, date: &str) -> Result<Vec<ExerciseSummary>, RepoError> {
        let needle = username.to_lowercase();
        let records = self.table.load()?;

        let summaries: Vec<ExerciseSummary> = records
            .iter()
            .filter(|r| {
                r.get("username")
                    .is_some_and(|u| u.to_lowercase() == needle)
                    && r.get("date").map(String::as_str) == Some(date)
            })
            .map(|r| ExerciseSummary {
                category: r.get("category").cloned().unwrap_or_default(),
                exercise_name: r.get("exercise_name").cloned().unwrap_or_default(),
            })
            .collect();

        if summaries.is_empty() {
            return Err(RepoError::NotFound);
        }
        Ok(summaries)
    }

    /// [`Self::for_day`] for the current UTC calendar date.
    pub fn today(&self, username: &str) -> Result<Vec<ExerciseSummary>, RepoError> {
        let today = Utc::now().format("%Y-%m-%d").to_string();
        self.for_day(username, &today)
    }
}
