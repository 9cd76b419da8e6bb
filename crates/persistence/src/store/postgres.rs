//! PostgreSQL record store.
//!
//! All collections share one `records` table. A row holds the record as
//! JSONB, keyed by `(kind, id)`; `position` is a serial that preserves
//! insertion order across updates.

use std::marker::PhantomData;

use async_trait::async_trait;
use domain::Record;
use sqlx::PgPool;
use uuid::Uuid;

use super::{RecordStore, StoreError};
use crate::metrics::QueryTimer;

pub struct PgStore<R> {
    pool: PgPool,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> PgStore<R> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _record: PhantomData,
        }
    }

    fn decode(body: serde_json::Value) -> Result<R, StoreError> {
        serde_json::from_value(body).map_err(|source| StoreError::Serialization {
            kind: R::KIND,
            source,
        })
    }

    fn encode(record: &R) -> Result<serde_json::Value, StoreError> {
        serde_json::to_value(record).map_err(|source| StoreError::Serialization {
            kind: R::KIND,
            source,
        })
    }
}

impl<R> Clone for PgStore<R> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _record: PhantomData,
        }
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for PgStore<R> {
    async fn list(&self) -> Result<Vec<R>, StoreError> {
        let timer = QueryTimer::new(R::KIND, "list");
        let rows = sqlx::query_scalar::<_, serde_json::Value>(
            r#"
            SELECT body
            FROM records
            WHERE kind = $1
            ORDER BY position
            "#,
        )
        .bind(R::KIND.as_str())
        .fetch_all(&self.pool)
        .await;
        timer.record();

        rows?.into_iter().map(Self::decode).collect()
    }

    async fn get(&self, id: Uuid) -> Result<Option<R>, StoreError> {
        let timer = QueryTimer::new(R::KIND, "get");
        let row = sqlx::query_scalar::<_, serde_json::Value>(
            r#"
            SELECT body
            FROM records
            WHERE kind = $1 AND id = $2
            "#,
        )
        .bind(R::KIND.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();

        row?.map(Self::decode).transpose()
    }

    async fn insert(&self, record: R) -> Result<R, StoreError> {
        let body = Self::encode(&record)?;
        let timer = QueryTimer::new(R::KIND, "insert");
        let result = sqlx::query(
            r#"
            INSERT INTO records (kind, id, body)
            VALUES ($1, $2, $3)
            ON CONFLICT (kind, id) DO NOTHING
            "#,
        )
        .bind(R::KIND.as_str())
        .bind(record.id())
        .bind(body)
        .execute(&self.pool)
        .await;
        timer.record();

        if result?.rows_affected() == 0 {
            return Err(StoreError::Conflict {
                kind: R::KIND,
                id: record.id(),
            });
        }
        Ok(record)
    }

    async fn update(&self, record: R) -> Result<R, StoreError> {
        let body = Self::encode(&record)?;
        let timer = QueryTimer::new(R::KIND, "update");
        let result = sqlx::query(
            r#"
            UPDATE records
            SET body = $3, updated_at = NOW()
            WHERE kind = $1 AND id = $2
            "#,
        )
        .bind(R::KIND.as_str())
        .bind(record.id())
        .bind(body)
        .execute(&self.pool)
        .await;
        timer.record();

        if result?.rows_affected() == 0 {
            return Err(StoreError::not_found(R::KIND, record.id()));
        }
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let timer = QueryTimer::new(R::KIND, "delete");
        let result = sqlx::query("DELETE FROM records WHERE kind = $1 AND id = $2")
            .bind(R::KIND.as_str())
            .bind(id)
            .execute(&self.pool)
            .await;
        timer.record();

        Ok(result?.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        Ok(())
    }
}
