//! Repository Module
//!
//! CRUD and domain queries over the SurrealDB tables. Handlers never
//! talk to the database directly; they go through a repository.

pub mod feedback;
pub mod inventory;
pub mod menu;
pub mod order;
pub mod reservation;
pub mod user;

pub use feedback::FeedbackRepository;
pub use inventory::InventoryRepository;
pub use menu::MenuRepository;
pub use order::OrderRepository;
pub use reservation::ReservationRepository;
pub use user::UserRepository;

use surrealdb::{RecordId, Surreal};
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse an incoming ID into a RecordId on `table`.
///
/// Accepts both the full `"table:id"` form and the bare key; a full
/// form naming a different table is rejected.
pub fn parse_id(table: &str, id: &str) -> RepoResult<RecordId> {
    if id.is_empty() {
        return Err(RepoError::Validation("Empty ID".to_string()));
    }
    if id.contains(':') {
        let rid: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        if rid.table() != table {
            return Err(RepoError::Validation(format!(
                "ID '{}' does not belong to '{}'",
                id, table
            )));
        }
        Ok(rid)
    } else {
        Ok(RecordId::from_table_key(table, id))
    }
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id_accepts_both_forms() {
        let full = parse_id("orders", "orders:abc123").unwrap();
        assert_eq!(full.table(), "orders");
        assert_eq!(full.key().to_string(), "abc123");

        let bare = parse_id("orders", "abc123").unwrap();
        assert_eq!(bare.table(), "orders");
    }

    #[test]
    fn test_parse_id_rejects_wrong_table() {
        assert!(parse_id("orders", "user:abc").is_err());
        assert!(parse_id("orders", "").is_err());
    }
}
