//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `UserRecordStore` port from the `core` crate. It handles all interactions
//! with the PostgreSQL database using `sqlx`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use medisign_core::domain::{NewUserOnboarding, Role, UserOnboardingRecord};
use medisign_core::ports::{CreateOnce, PortError, PortResult, UserRecordStore};
use sqlx::{FromRow, PgPool};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `UserRecordStore` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRecord {
    uid: String,
    email: String,
    role: String,
    onboarding_message: String,
    created_at: DateTime<Utc>,
}

impl UserRecord {
    fn to_domain(self) -> PortResult<UserOnboardingRecord> {
        let role = Role::parse(&self.role).ok_or_else(|| {
            PortError::Storage(format!("Unknown role '{}' for user {}", self.role, self.uid))
        })?;
        Ok(UserOnboardingRecord {
            uid: self.uid,
            email: self.email,
            role,
            onboarding_message: self.onboarding_message,
            created_at: self.created_at,
        })
    }
}

fn storage_error(e: sqlx::Error) -> PortError {
    PortError::Storage(e.to_string())
}

//=========================================================================================
// `UserRecordStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl UserRecordStore for DbAdapter {
    async fn find_user(&self, uid: &str) -> PortResult<Option<UserOnboardingRecord>> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT uid, email, role, onboarding_message, created_at FROM users WHERE uid = $1",
        )
        .bind(uid)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        record.map(UserRecord::to_domain).transpose()
    }

    async fn create_once(&self, record: NewUserOnboarding) -> PortResult<CreateOnce> {
        // created_at comes from the column default, so the database clock is authoritative.
        let inserted = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (uid, email, role, onboarding_message) VALUES ($1, $2, $3, $4) \
             ON CONFLICT (uid) DO NOTHING \
             RETURNING uid, email, role, onboarding_message, created_at",
        )
        .bind(&record.uid)
        .bind(&record.email)
        .bind(record.role.as_str())
        .bind(&record.onboarding_message)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        if let Some(row) = inserted {
            return Ok(CreateOnce::Created(row.to_domain()?));
        }

        let existing = self.find_user(&record.uid).await?.ok_or_else(|| {
            PortError::Storage(format!("User {} conflicted on insert but was not found", record.uid))
        })?;
        Ok(CreateOnce::AlreadyExists(existing))
    }
}
