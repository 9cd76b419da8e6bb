//! In-memory record store.

use async_trait::async_trait;
use domain::Record;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{RecordStore, StoreError};

/// A `Vec` behind a read/write lock. Reads clone a snapshot.
#[derive(Debug)]
pub struct MemoryStore<R> {
    records: RwLock<Vec<R>>,
}

impl<R: Record> MemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    pub fn with_records(records: Vec<R>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<R: Record> Default for MemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> RecordStore<R> for MemoryStore<R> {
    async fn list(&self) -> Result<Vec<R>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn get(&self, id: Uuid) -> Result<Option<R>, StoreError> {
        Ok(self
            .records
            .read()
            .await
            .iter()
            .find(|r| r.id() == id)
            .cloned())
    }

    async fn insert(&self, record: R) -> Result<R, StoreError> {
        let mut records = self.records.write().await;
        if records.iter().any(|r| r.id() == record.id()) {
            return Err(StoreError::Conflict {
                kind: R::KIND,
                id: record.id(),
            });
        }
        records.push(record.clone());
        Ok(record)
    }

    async fn update(&self, record: R) -> Result<R, StoreError> {
        let mut records = self.records.write().await;
        let slot = records
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or_else(|| StoreError::not_found(R::KIND, record.id()))?;
        *slot = record.clone();
        Ok(record)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, StoreError> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|r| r.id() != id);
        Ok(records.len() != before)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{remove_or_retire, seed_if_empty, Removal};
    use chrono::Utc;
    use domain::models::course::{Course, CourseForm, CourseLevel, CourseStatus};
    use domain::models::user::{Role, UserForm, UserRecord, UserStatus};
    use domain::Resource;
    use tokio_test::{assert_err, assert_ok};

    fn course(name: &str) -> Course {
        Course::create(
            CourseForm {
                name: name.to_string(),
                description: String::new(),
                category: "Design".to_string(),
                level: CourseLevel::Beginner,
                duration_weeks: 4,
                price: 750_000.0,
                capacity: 20,
                status: CourseStatus::Active,
                modules: vec![],
            },
            Uuid::new_v4(),
            Utc::now(),
        )
    }

    fn user() -> UserRecord {
        UserRecord::create(
            UserForm {
                name: "Lina Marlina".to_string(),
                email: "lina@school.id".to_string(),
                phone: "081298765432".to_string(),
                role: Role::Teacher,
                status: UserStatus::Active,
            },
            Uuid::new_v4(),
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order() {
        let store = MemoryStore::new();
        for name in ["UI Basics", "Figma", "Typography"] {
            store.insert(course(name)).await.unwrap();
        }
        let names: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["UI Basics", "Figma", "Typography"]);
    }

    #[tokio::test]
    async fn test_insert_duplicate_conflicts() {
        let store = MemoryStore::new();
        let c = course("Figma");
        assert_ok!(store.insert(c.clone()).await);
        let err = assert_err!(store.insert(c).await);
        assert!(matches!(err, StoreError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_in_place() {
        let store = MemoryStore::with_records(vec![course("A"), course("B"), course("C")]);
        let mut b = store.list().await.unwrap()[1].clone();
        b.name = "B2".to_string();
        store.update(b.clone()).await.unwrap();

        let listed = store.list().await.unwrap();
        assert_eq!(listed[1].name, "B2");
        assert_eq!(store.get(b.id).await.unwrap().unwrap().name, "B2");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let store: MemoryStore<Course> = MemoryStore::new();
        let err = assert_err!(store.update(course("Ghost")).await);
        assert!(matches!(err, StoreError::NotFound { .. }));
        assert!(err.to_string().starts_with("Course "));
    }

    #[tokio::test]
    async fn test_delete() {
        let c = course("A");
        let store = MemoryStore::with_records(vec![c.clone()]);
        assert!(store.delete(c.id).await.unwrap());
        assert!(!store.delete(c.id).await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_remove_or_retire_users_are_deactivated() {
        let u = user();
        let store = MemoryStore::with_records(vec![u.clone()]);
        let removal = remove_or_retire(&store, u.id, Utc::now()).await.unwrap();
        match removal {
            Removal::Retired(retired) => assert_eq!(retired.status, UserStatus::Inactive),
            Removal::Deleted => panic!("users must not be removed"),
        }
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_remove_or_retire_courses_are_deleted() {
        let c = course("A");
        let store = MemoryStore::with_records(vec![c.clone()]);
        let removal = remove_or_retire(&store, c.id, Utc::now()).await.unwrap();
        assert_eq!(removal, Removal::Deleted);
        assert!(store.is_empty().await);

        let err = remove_or_retire(&store, c.id, Utc::now()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_seed_if_empty() {
        let store = MemoryStore::new();
        assert_eq!(seed_if_empty(&store, vec![course("A"), course("B")]).await.unwrap(), 2);
        assert_eq!(seed_if_empty(&store, vec![course("C")]).await.unwrap(), 0);
        assert_eq!(store.len().await, 2);
    }
}
