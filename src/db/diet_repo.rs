//! Diet log repository: append-only, with duplicate suppression on
//! the (username, date, meal_type) natural key.

use crate::models::DietEntry;
use crate::store::Table;

use super::RepoError;

/// Whether a save stored a new entry or found an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietSaveOutcome {
    Created,
    /// An entry with the same (username, date, meal_type) already
    /// exists; the table was left unchanged.
    Duplicate,
}

pub struct DietRepository {
    table: Table,
}

impl DietRepository {
    pub fn new(table: Table) -> Self {
        Self { table }
    }

    /// Stores a diet log entry unless one already exists for the same
    /// (username, date, meal_type).
    ///
    /// The duplicate scan is linear in table size with an early exit;
    /// fine for per-user daily logs. The first entry wins: a duplicate
    /// save never updates the stored macros.
    pub fn save(&self, entry: &DietEntry) -> Result<DietSaveOutcome, RepoError> {
        if entry.username.is_empty() {
            return Err(RepoError::Validation("username is required"));
        }
        if entry.meal_type.is_empty() {
            return Err(RepoError::Validation("meal_type is required"));
        }
        if entry.fooditem.is_none() {
            return Err(RepoError::Validation("fooditem must be a list"));
        }

        if self.entry_exists(entry)? {
            return Ok(DietSaveOutcome::Duplicate);
        }

        self.table.append(&entry.to_record())?;
        Ok(DietSaveOutcome::Created)
    }

    fn entry_exists(&self, entry: &DietEntry) -> Result<bool, RepoError> {
        let records = self.table.load()?;
        Ok(records.iter().any(|r| {
            r.get("username").map(String::as_str) == Some(entry.username.as_str())
                && r.get("date").map(String::as_str) == Some(entry.date.as_str())
                && r.get("meal_type").map(String::as_str) == Some(entry.meal_type.as_str())
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DIET_COLUMNS;
    use tempfile::TempDir;

    fn setup() -> (DietRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let table = Table::open(temp_dir.path().join("diet_logs.csv"), DIET_COLUMNS).unwrap();
        (DietRepository::new(table), temp_dir)
    }

    fn entry(json: &str) -> DietEntry {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_save_validates_required_fields() {
        let (repo, _temp) = setup();

        let missing_username =
            entry(r#"{"meal_type": "lunch", "fooditem": ["rice"]}"#);
        assert!(matches!(
            repo.save(&missing_username),
            Err(RepoError::Validation(_))
        ));

        let missing_meal_type = entry(r#"{"username": "alice", "fooditem": ["rice"]}"#);
        assert!(matches!(
            repo.save(&missing_meal_type),
            Err(RepoError::Validation(_))
        ));

        let missing_fooditem = entry(r#"{"username": "alice", "meal_type": "lunch"}"#);
        assert!(matches!(
            repo.save(&missing_fooditem),
            Err(RepoError::Validation(_))
        ));
    }

    #[test]
    fn test_save_appends_entry() {
        let (repo, _temp) = setup();

        let outcome = repo
            .save(&entry(
                r#"{
                    "username": "alice",
                    "date": "2024-06-01",
                    "meal_type": "breakfast",
                    "calories": 512.4,
                    "fooditem": ["oats", "milk"]
                }"#,
            ))
            .unwrap();

        assert_eq!(outcome, DietSaveOutcome::Created);

        let records = repo.table.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["calories"], "512");
        assert_eq!(records[0]["fooditem"], "oats|milk");
    }

    #[test]
    fn test_duplicate_key_suppressed_first_entry_wins() {
        let (repo, _temp) = setup();

        repo.save(&entry(
            r#"{
                "username": "alice",
                "date": "2024-06-01",
                "meal_type": "breakfast",
                "calories": 500,
                "fooditem": ["oats"]
            }"#,
        ))
        .unwrap();

        // Same key, different macros: must not be stored.
        let outcome = repo
            .save(&entry(
                r#"{
                    "username": "alice",
                    "date": "2024-06-01",
                    "meal_type": "breakfast",
                    "calories": 900,
                    "fooditem": ["pancakes"]
                }"#,
            ))
            .unwrap();

        assert_eq!(outcome, DietSaveOutcome::Duplicate);

        let records = repo.table.load().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["calories"], "500");
        assert_eq!(records[0]["fooditem"], "oats");
    }

    #[test]
    fn test_different_meal_type_is_not_duplicate() {
        let (repo, _temp) = setup();

        repo.save(&entry(
            r#"{"username": "alice", "date": "2024-06-01", "meal_type": "breakfast", "fooditem": ["oats"]}"#,
        ))
        .unwrap();
        let outcome = repo
            .save(&entry(
                r#"{"username": "alice", "date": "2024-06-01", "meal_type": "lunch", "fooditem": ["rice"]}"#,
            ))
            .unwrap();

        assert_eq!(outcome, DietSaveOutcome::Created);
        assert_eq!(repo.table.load().unwrap().len(), 2);
    }

    #[test]
    fn test_different_date_is_not_duplicate() {
        let (repo, _temp) = setup();

        repo.save(&entry(
            r#"{"username": "alice", "date": "2024-06-01", "meal_type": "breakfast", "fooditem": ["oats"]}"#,
        ))
        .unwrap();
        let outcome = repo
            .save(&entry(
                r#"{"username": "alice", "date": "2024-06-02", "meal_type": "breakfast", "fooditem": ["oats"]}"#,
            ))
            .unwrap();

        assert_eq!(outcome, DietSaveOutcome::Created);
    }

    #[test]
    fn test_empty_food_list_is_valid() {
        let (repo, _temp) = setup();

        let outcome = repo
            .save(&entry(
                r#"{"username": "alice", "date": "2024-06-01", "meal_type": "snack", "fooditem": []}"#,
            ))
            .unwrap();

        assert_eq!(outcome, DietSaveOutcome::Created);
    }
}
