use async_trait::async_trait;

use crate::domain::users::User;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    /// Already hashed by the caller.
    pub password_hash: String,
}

#[derive(Debug, Clone, Default)]
pub struct UserFilter {
    pub username: Option<String>,
    pub email: Option<String>,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_all(&self, filter: &UserFilter) -> anyhow::Result<Vec<User>>;
    /// Always 0: user counting was never wired up and the stub value is
    /// part of the observable contract.
    async fn count(&self, filter: &UserFilter) -> anyhow::Result<i64>;
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<User>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>>;
    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<User>>;
    /// Inserts the user and persists a freshly issued session token in the
    /// same transaction. Returns the row including the token.
    async fn create(&self, new: &NewUser) -> anyhow::Result<User>;
    /// Full replace of mutable fields by id. No re-fetch.
    async fn update(&self, user: &User) -> anyhow::Result<()>;
    /// Issues a fresh token for the user and persists it, replacing any
    /// prior session.
    async fn rotate_token(&self, user: &User) -> anyhow::Result<String>;
    async fn change_password(&self, id: i32, password_hash: &str) -> anyhow::Result<()>;
    /// Deletion is a stub: users are never hard-deleted.
    async fn delete(&self, id: i32) -> anyhow::Result<u64>;
}
