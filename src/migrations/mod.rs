//! Database migrations and the runner that applies them.
//!
//! Applied migrations are recorded in the `changelog` collection, one document
//! per migration id, so `up` only runs what is pending and `down` knows what
//! to revert.

mod logs_index;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};

use crate::{
    error::{MigrationError, StoreError},
    store::{document_id, Document, DocumentStore},
};

pub use logs_index::{LogsTimestampIndex, LOGS_COLLECTION};

pub const CHANGELOG_COLLECTION: &str = "changelog";

const APPLIED_AT_FIELD: &str = "appliedAt";

#[async_trait]
pub trait Migration: Send + Sync {
    /// Sortable, unique id, prefixed with the creation timestamp.
    fn id(&self) -> &'static str;

    async fn up(&self, store: &dyn DocumentStore) -> Result<(), StoreError>;

    async fn down(&self, store: &dyn DocumentStore) -> Result<(), StoreError>;
}

/// Every migration, oldest first.
pub fn all() -> Vec<Box<dyn Migration>> {
    vec![Box::new(LogsTimestampIndex)]
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    pub id: String,
    pub applied_at: Option<String>,
}

pub struct Migrator {
    store: Arc<dyn DocumentStore>,
    migrations: Vec<Box<dyn Migration>>,
}

impl Migrator {
    pub fn new(store: Arc<dyn DocumentStore>, migrations: Vec<Box<dyn Migration>>) -> Self {
        Self { store, migrations }
    }

    /// Changelog entries as (id, appliedAt), oldest first.
    async fn applied(&self) -> Result<Vec<(String, String)>, StoreError> {
        let mut entries: Vec<(String, String)> = self
            .store
            .list(CHANGELOG_COLLECTION)
            .await?
            .iter()
            .filter_map(|entry| {
                let id = document_id(entry)?;
                let applied_at = entry
                    .get(APPLIED_AT_FIELD)
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string();
                Some((id, applied_at))
            })
            .collect();

        // RFC 3339 stamps sort chronologically; ids break ties
        entries.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        Ok(entries)
    }

    pub async fn status(&self) -> Result<Vec<MigrationStatus>, MigrationError> {
        let applied = self.applied().await?;

        Ok(self
            .migrations
            .iter()
            .map(|migration| MigrationStatus {
                id: migration.id().to_string(),
                applied_at: applied
                    .iter()
                    .find(|(id, _)| id == migration.id())
                    .map(|(_, at)| at.clone()),
            })
            .collect())
    }

    /// Applies pending migrations in order and returns their ids. Stops at the
    /// first failure; migrations applied before it stay recorded.
    pub async fn up(&self) -> Result<Vec<String>, MigrationError> {
        let applied = self.applied().await?;
        let mut ran = Vec::new();

        for migration in &self.migrations {
            let id = migration.id();
            if applied.iter().any(|(done, _)| done == id) {
                continue;
            }

            info!("Applying migration {id}");
            migration
                .up(self.store.as_ref())
                .await
                .map_err(|source| MigrationError::Failed {
                    id: id.to_string(),
                    source,
                })?;

            let mut entry = Document::new();
            entry.insert(APPLIED_AT_FIELD.into(), Value::String(Utc::now().to_rfc3339()));
            self.store.put(CHANGELOG_COLLECTION, id, entry).await?;

            ran.push(id.to_string());
        }

        if ran.is_empty() {
            info!("No pending migrations");
        }
        Ok(ran)
    }

    /// Reverts the most recently applied migration, if any.
    pub async fn down(&self) -> Result<Option<String>, MigrationError> {
        let applied = self.applied().await?;
        let Some((last, _)) = applied.last() else {
            info!("Nothing to revert");
            return Ok(None);
        };

        let Some(migration) = self.migrations.iter().find(|m| m.id() == last) else {
            warn!("Changelog lists {last}, which is not a known migration");
            return Err(MigrationError::Unknown { id: last.clone() });
        };

        info!("Reverting migration {last}");
        migration
            .down(self.store.as_ref())
            .await
            .map_err(|source| MigrationError::Failed {
                id: last.clone(),
                source,
            })?;
        self.store.delete(CHANGELOG_COLLECTION, last).await?;

        Ok(Some(last.clone()))
    }
}
