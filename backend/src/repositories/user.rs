//! User persistence

use super::{unavailable, StoreResult, UserRepository};
use async_trait::async_trait;
use catalog_shared::{NewUser, User};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// User record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub tel: Option<i64>,
    pub password_hash: String,
    pub profile_pic: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        User {
            id: record.id,
            name: record.name,
            email: record.email,
            tel: record.tel,
            password_hash: record.password_hash,
            profile_pic: record.profile_pic,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

const USER_COLUMNS: &str =
    "id, name, email, tel, password_hash, profile_pic, created_at, updated_at";

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            r#"
            INSERT INTO users (id, name, email, tel, password_hash, profile_pic)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(Uuid::new_v4())
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.tel)
        .bind(&user.password_hash)
        .bind(&user.profile_pic)
        .fetch_one(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(record.into())
    }

    async fn find_all(&self) -> StoreResult<Vec<User>> {
        let records = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY created_at"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(records.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(record.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        // Email is not unique at the schema level; the oldest match wins
        let record = sqlx::query_as::<_, UserRecord>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1 ORDER BY created_at LIMIT 1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(unavailable)?;

        Ok(record.map(User::from))
    }

    async fn ping(&self) -> StoreResult<()> {
        crate::db::health_check(&self.pool)
            .await
            .map_err(|e| catalog_shared::StoreError::Unavailable(e.to_string()))
    }
}

/// In-memory user repository for tests and local runs
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: NewUser) -> StoreResult<User> {
        let user = user.into_user(Uuid::new_v4(), Utc::now());
        self.users.write().await.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_all(&self) -> StoreResult<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.values().cloned().collect();
        users.sort_by_key(|u| u.created_at);
        Ok(users)
    }

    async fn find_by_id(&self, id: Uuid) -> StoreResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .filter(|u| u.email == email)
            .min_by_key(|u| u.created_at)
            .cloned())
    }

    async fn ping(&self) -> StoreResult<()> {
        Ok(())
    }
}
