//! Database Module
//!
//! Embedded SurrealDB: connection setup, schema definitions, models and
//! repositories.

pub mod models;
pub mod repository;

use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

use crate::utils::AppError;

const NAMESPACE: &str = "restaurant";
const DATABASE: &str = "main";

/// Database service owning the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database and apply schema definitions
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;

        Self::initialize(db).await
    }

    /// Open a fresh in-memory database (tests)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;

        Self::initialize(db).await
    }

    async fn initialize(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        Self::define_schema(&db).await?;

        tracing::info!("Database ready (ns={NAMESPACE}, db={DATABASE})");
        Ok(Self { db })
    }

    /// Apply idempotent schema definitions.
    ///
    /// Uniqueness that the application depends on lives here: order
    /// numbers, user emails and the one-feedback-per-order rule.
    async fn define_schema(db: &Surreal<Db>) -> Result<(), AppError> {
        db.query(
            "
            DEFINE INDEX IF NOT EXISTS idx_order_number ON TABLE orders COLUMNS order_number UNIQUE;
            DEFINE INDEX IF NOT EXISTS idx_user_email ON TABLE user COLUMNS email UNIQUE;
            DEFINE INDEX IF NOT EXISTS idx_feedback_order ON TABLE feedback COLUMNS order_id UNIQUE;
            DEFINE INDEX IF NOT EXISTS idx_reservation_table ON TABLE reservation COLUMNS table_number;
            ",
        )
        .await
        .map_err(|e| AppError::database(format!("Failed to define schema: {e}")))?
        .check()
        .map_err(|e| AppError::database(format!("Schema definition rejected: {e}")))?;

        Ok(())
    }
}
