use async_trait::async_trait;

use crate::domain::boards::Board;

#[derive(Debug, Clone)]
pub struct NewBoard {
    pub name: String,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub created_by: i32,
}

#[derive(Debug, Clone, Default)]
pub struct BoardFilter {
    pub name: Option<String>,
    pub created_by: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct BoardPatch {
    pub id: i32,
    pub name: Option<String>,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
}

#[async_trait]
pub trait BoardRepository: Send + Sync {
    async fn find_all(&self, filter: &BoardFilter) -> anyhow::Result<Vec<Board>>;
    /// Grand total; the filter is not applied (observable contract).
    async fn count(&self, filter: &BoardFilter) -> anyhow::Result<i64>;
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Board>>;
    /// Inserts the board and its owner membership row in one transaction:
    /// readers never observe a board without an owner.
    async fn create(&self, new: &NewBoard) -> anyhow::Result<Board>;
    async fn update(&self, board: &Board) -> anyhow::Result<()>;
    /// Writes only the supplied fields. Returns the number of rows touched.
    async fn patch(&self, patch: &BoardPatch) -> anyhow::Result<u64>;
    /// Removes the board together with its memberships, lists and the
    /// cards of those lists, in one transaction.
    async fn delete(&self, id: i32) -> anyhow::Result<u64>;
}
