//! Record stores.
//!
//! Every collection lives behind [`RecordStore`], an ordered sequence of
//! records keyed by id. The in-memory backend keeps insertion order; the
//! PostgreSQL backend keeps it through a serial position column.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain::models::EntityKind;
use domain::Record;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{} {id} not found", .kind.singular())]
    NotFound { kind: EntityKind, id: Uuid },

    #[error("{} {id} already exists", .kind.singular())]
    Conflict { kind: EntityKind, id: Uuid },

    #[error("{kind} record could not be serialized: {source}")]
    Serialization {
        kind: EntityKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("Record store unavailable: {0}")]
    Unavailable(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    pub fn not_found(kind: EntityKind, id: Uuid) -> Self {
        StoreError::NotFound { kind, id }
    }

    /// Whether the failure is the store being unreachable rather than a
    /// problem with the request.
    pub fn is_unavailable(&self) -> bool {
        match self {
            StoreError::Unavailable(_) => true,
            StoreError::Database(err) => matches!(
                err,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            _ => false,
        }
    }
}

/// An ordered collection of records of one kind.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// Every record, in insertion order.
    async fn list(&self) -> Result<Vec<R>, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<R>, StoreError>;

    /// Appends a record; fails with `Conflict` if the id is taken.
    async fn insert(&self, record: R) -> Result<R, StoreError>;

    /// Replaces the record with the same id, keeping its position.
    async fn update(&self, record: R) -> Result<R, StoreError>;

    /// Removes a record. Returns `false` if it did not exist.
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;

    /// Cheap reachability check used by readiness probes.
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Outcome of a delete request.
#[derive(Debug, Clone, PartialEq)]
pub enum Removal<R> {
    Deleted,
    /// The record was kept with its retired state.
    Retired(R),
}

/// Deletes a record, or retires it in place for kinds that are never
/// removed (users are deactivated).
pub async fn remove_or_retire<R: Record>(
    store: &dyn RecordStore<R>,
    id: Uuid,
    now: DateTime<Utc>,
) -> Result<Removal<R>, StoreError> {
    let mut record = store
        .get(id)
        .await?
        .ok_or_else(|| StoreError::not_found(R::KIND, id))?;

    if record.retire(now) {
        let retired = store.update(record).await?;
        return Ok(Removal::Retired(retired));
    }

    if store.delete(id).await? {
        Ok(Removal::Deleted)
    } else {
        Err(StoreError::not_found(R::KIND, id))
    }
}

/// Loads `records` into `store` if it is empty. Returns how many were
/// inserted.
pub async fn seed_if_empty<R: Record>(
    store: &dyn RecordStore<R>,
    records: Vec<R>,
) -> Result<usize, StoreError> {
    if !store.list().await?.is_empty() {
        return Ok(0);
    }
    let count = records.len();
    for record in records {
        store.insert(record).await?;
    }
    tracing::info!(kind = %R::KIND, count, "Seeded record store");
    Ok(count)
}
