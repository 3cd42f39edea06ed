use async_trait::async_trait;

use crate::domain::lists::List;

#[derive(Debug, Clone)]
pub struct NewList {
    pub name: String,
    pub board_id: i32,
    pub position: i32,
}

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub name: Option<String>,
    pub board_id: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct ListPatch {
    pub id: i32,
    pub name: Option<String>,
    pub board_id: Option<i32>,
    pub position: Option<i32>,
}

#[async_trait]
pub trait ListRepository: Send + Sync {
    async fn find_all(&self, filter: &ListFilter) -> anyhow::Result<Vec<List>>;
    /// Grand total; the filter is not applied (observable contract).
    async fn count(&self, filter: &ListFilter) -> anyhow::Result<i64>;
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<List>>;
    async fn create(&self, new: &NewList) -> anyhow::Result<List>;
    async fn update(&self, list: &List) -> anyhow::Result<()>;
    async fn patch(&self, patch: &ListPatch) -> anyhow::Result<u64>;
    /// Removes the list and its cards in one transaction.
    async fn delete(&self, id: i32) -> anyhow::Result<u64>;
}
