//! Profile repository: at most one record per username, maintained by
//! find-and-replace over the whole table.

use crate::models::{join_tags, FieldValue, Profile, ProfileInput};
use crate::store::{Record, Table};

use super::RepoError;

/// Whether a save created a new profile or updated an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSaveOutcome {
    Created,
    Updated,
}

pub struct ProfileRepository {
    table: Table,
}

impl ProfileRepository {
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    /// Creates or updates the profile identified by the input's
    /// `username`.
    ///
    /// On update, each stored column is overridden only when the input
    /// supplies a non-empty value for it; `dietary_restrictions` is
    /// replaced whenever the input supplies a list, regardless of the
    /// emptiness rule. On create, every column of the table's schema
    /// is filled from the input, defaulting to empty. The whole table
    /// is written back either way.
    pub fn save(&self, input: &ProfileInput) -> Result<ProfileSaveOutcome, RepoError> {
        let username = input.username();
        if username.is_empty() {
            return Err(RepoError::Validation("username is required"));
        }

        let mut records = self.table.load()?;
        let position = records
            .iter()
            .position(|r| r.get("username").map(String::as_str) == Some(username.as_str()));

        let outcome = match position {
            Some(i) => {
                merge_into(&mut records[i], input);
                ProfileSaveOutcome::Updated
            }
            None => {
                records.push(self.build_record(input));
                ProfileSaveOutcome::Created
            }
        };

        self.table.rewrite(&records)?;
        Ok(outcome)
    }

    /// Looks up a profile by username, case-insensitively.
    pub fn get(&self, username: &str) -> Result<Profile, RepoError> {
        let needle = username.to_lowercase();
        let records = self.table.load()?;
        records
            .iter()
            .find(|r| {
                r.get("username")
                    .is_some_and(|u| u.to_lowercase() == needle)
            })
            .map(Profile::from_record)
            .ok_or(RepoError::NotFound)
    }

    /// Builds a fresh record over the table's column set.
    fn build_record(&self, input: &ProfileInput) -> Record {
        self.table
            .columns()
            .iter()
            .map(|column| {
                let value = match input.get(column) {
                    Some(FieldValue::List(items)) if column == "dietary_restrictions" => {
                        join_tags(items)
                    }
                    Some(value) => value.to_field(),
                    None => String::new(),
                };
                (column.clone(), value)
            })
            .collect()
    }
}

/// Merges input fields into an existing record in place.
fn merge_into(existing: &mut Record, input: &ProfileInput) {
    let columns: Vec<String> = existing.keys().cloned().collect();
    for column in columns {
        match input.get(&column) {
            Some(FieldValue::List(items)) if column == "dietary_restrictions" => {
                existing.insert(column, join_tags(items));
            }
            Some(value) if column != "dietary_restrictions" && !value.is_empty() => {
                existing.insert(column, value.to_field());
            }
            _ => {}
        }
    }
}
