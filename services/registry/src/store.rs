//! Vehicle registry store backed by SQLite.
//!
//! The registry is sparse and read-mostly: many plates have no record, and
//! absence is a normal lookup outcome, not an error. The pipeline never
//! writes owner data; `ensure_schema` only exists so a fresh deployment
//! starts with the table in place.

use crate::config::DatabaseConfig;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::FromRow;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// A registered vehicle and its owner, keyed by plate
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RegistryRecord {
    /// License plate number
    pub plate: String,
    /// Vehicle make
    pub make: String,
    /// Vehicle model
    pub model: String,
    /// Vehicle color
    pub color: String,
    /// Registered owner's name
    pub owner_name: String,
    /// Owner's contact address for notifications
    pub owner_contact: String,
    /// Owner's preferred notification language (human-readable name)
    pub preferred_language: String,
}

/// Registry store with a shared connection pool
pub struct RegistryStore {
    pool: SqlitePool,
}

impl RegistryStore {
    /// Create a new registry store with a connection pool
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await
            .context("Failed to connect to registry database")?;

        info!("Connected to registry database");

        Ok(Self { pool })
    }

    /// Create the vehicles table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS vehicles (
                plate TEXT PRIMARY KEY,
                make TEXT NOT NULL,
                model TEXT NOT NULL,
                color TEXT NOT NULL,
                owner_name TEXT NOT NULL,
                owner_contact TEXT NOT NULL,
                preferred_language TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to ensure registry schema")?;

        Ok(())
    }

    /// Look up the vehicle registered under a plate.
    ///
    /// Returns `None` for unregistered plates.
    #[instrument(skip(self), fields(plate = %plate))]
    pub async fn find_vehicle(&self, plate: &str) -> Result<Option<RegistryRecord>> {
        let record = sqlx::query_as::<_, RegistryRecord>(
            r#"
            SELECT plate, make, model, color, owner_name, owner_contact, preferred_language
            FROM vehicles
            WHERE plate = ?
            "#,
        )
        .bind(plate)
        .fetch_optional(&self.pool)
        .await
        .context("Registry lookup failed")?;

        debug!(found = record.is_some(), "Registry lookup completed");

        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_store() -> RegistryStore {
        // A single connection keeps every query on the same in-memory
        // database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        let store = RegistryStore { pool };
        store.ensure_schema().await.unwrap();
        store
    }

    async fn seed(store: &RegistryStore, record: &RegistryRecord) {
        sqlx::query(
            r#"
            INSERT INTO vehicles
                (plate, make, model, color, owner_name, owner_contact, preferred_language)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&record.plate)
        .bind(&record.make)
        .bind(&record.model)
        .bind(&record.color)
        .bind(&record.owner_name)
        .bind(&record.owner_contact)
        .bind(&record.preferred_language)
        .execute(&store.pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_find_registered_vehicle() {
        let store = test_store().await;
        seed(
            &store,
            &RegistryRecord {
                plate: "7ABC123".to_string(),
                make: "Toyota".to_string(),
                model: "Corolla".to_string(),
                color: "Red".to_string(),
                owner_name: "Sam Petrov".to_string(),
                owner_contact: "sam@example.com".to_string(),
                preferred_language: "Russian".to_string(),
            },
        )
        .await;

        let found = store.find_vehicle("7ABC123").await.unwrap().unwrap();
        assert_eq!(found.make, "Toyota");
        assert_eq!(found.owner_contact, "sam@example.com");
        assert_eq!(found.preferred_language, "Russian");
    }

    #[tokio::test]
    async fn test_unknown_plate_is_none() {
        let store = test_store().await;
        let found = store.find_vehicle("8Z9Q111").await.unwrap();
        assert!(found.is_none());
    }
}
