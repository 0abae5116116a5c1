//! services/api/src/adapters/memory.rs
//!
//! An in-process `UserRecordStore` used when no database is configured.
//! Records live only as long as the process.

use async_trait::async_trait;
use chrono::Utc;
use medisign_core::domain::{NewUserOnboarding, UserOnboardingRecord};
use medisign_core::ports::{CreateOnce, PortResult, UserRecordStore};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Default)]
pub struct InMemoryUserStore {
    records: RwLock<HashMap<String, UserOnboardingRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl UserRecordStore for InMemoryUserStore {
    async fn find_user(&self, uid: &str) -> PortResult<Option<UserOnboardingRecord>> {
        Ok(self.records.read().await.get(uid).cloned())
    }

    async fn create_once(&self, record: NewUserOnboarding) -> PortResult<CreateOnce> {
        let mut records = self.records.write().await;
        if let Some(existing) = records.get(&record.uid) {
            return Ok(CreateOnce::AlreadyExists(existing.clone()));
        }

        let stored = UserOnboardingRecord {
            uid: record.uid.clone(),
            email: record.email,
            role: record.role,
            onboarding_message: record.onboarding_message,
            created_at: Utc::now(),
        };
        records.insert(record.uid, stored.clone());
        Ok(CreateOnce::Created(stored))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use medisign_core::domain::Role;

    fn new_record(uid: &str, message: &str) -> NewUserOnboarding {
        NewUserOnboarding {
            uid: uid.to_string(),
            email: format!("{uid}@example.com"),
            role: Role::User,
            onboarding_message: message.to_string(),
        }
    }

    #[tokio::test]
    async fn second_write_for_a_uid_returns_the_first_record() {
        let store = InMemoryUserStore::new();

        let first = store.create_once(new_record("u1", "first")).await.unwrap();
        let second = store.create_once(new_record("u1", "second")).await.unwrap();

        let CreateOnce::Created(created) = first else {
            panic!("first write should create");
        };
        assert_eq!(second, CreateOnce::AlreadyExists(created.clone()));
        assert_eq!(store.find_user("u1").await.unwrap(), Some(created));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_uid_is_none() {
        let store = InMemoryUserStore::new();
        assert!(store.is_empty().await);
        assert_eq!(store.find_user("missing").await.unwrap(), None);
    }
}
