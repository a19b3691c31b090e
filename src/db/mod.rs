//! Entity repositories over the flat CSV table store.
//!
//! Each repository wraps one [`Table`](crate::store::Table) handle,
//! adds entity-specific validation and coercion, and decides its own
//! duplicate/merge policy: profiles upsert in place, diet entries
//! suppress duplicates on their natural key, feedback entries always
//! append.

mod diet_repo;
mod feedback_repo;
mod profile_repo;

pub use diet_repo::{DietRepository, DietSaveOutcome};
pub use feedback_repo::FeedbackRepository;
pub use profile_repo::{ProfileRepository, ProfileSaveOutcome};

use crate::store::StoreError;

/// Errors surfaced by repository operations.
#[derive(Debug)]
pub enum RepoError {
    /// Required input was missing or malformed. A client error.
    Validation(&'static str),
    /// No matching record. A client error, not a fault.
    NotFound,
    /// Filesystem failure in the underlying store.
    Store(StoreError),
}

impl std::fmt::Display for RepoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RepoError::Validation(reason) => write!(f, "Validation failed: {}", reason),
            RepoError::NotFound => write!(f, "No matching record"),
            RepoError::Store(e) => write!(f, "Storage error: {}", e),
        }
    }
}

impl std::error::Error for RepoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RepoError::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for RepoError {
    fn from(e: StoreError) -> Self {
        RepoError::Store(e)
    }
}
