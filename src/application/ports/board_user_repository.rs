use async_trait::async_trait;

use crate::domain::boards::{BoardUser, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipKey {
    pub board_id: i32,
    pub user_id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct BoardUserFilter {
    pub board_id: Option<i32>,
    pub user_id: Option<i32>,
    pub role: Option<Role>,
    pub starred: Option<bool>,
}

#[async_trait]
pub trait BoardUserRepository: Send + Sync {
    async fn find_all(&self, filter: &BoardUserFilter) -> anyhow::Result<Vec<BoardUser>>;
    /// Grand total; the filter is not applied (observable contract).
    async fn count(&self, filter: &BoardUserFilter) -> anyhow::Result<i64>;
    async fn create(&self, membership: &BoardUser) -> anyhow::Result<BoardUser>;
    /// Full replace of role and starred by the composite key.
    async fn update(&self, membership: &BoardUser) -> anyhow::Result<()>;
    async fn delete(&self, key: MembershipKey) -> anyhow::Result<u64>;
}
