use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::cards::Card;

#[derive(Debug, Clone)]
pub struct NewCard {
    pub name: String,
    pub list_id: i32,
    pub position: i32,
    pub due_date: Option<DateTime<Utc>>,
    /// Defaults to now() when absent; importers may supply it.
    pub created_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CardFilter {
    pub name: Option<String>,
    pub list_id: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct CardPatch {
    pub id: i32,
    pub name: Option<String>,
    pub list_id: Option<i32>,
    pub position: Option<i32>,
    pub due_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

#[async_trait]
pub trait CardRepository: Send + Sync {
    async fn find_all(&self, filter: &CardFilter) -> anyhow::Result<Vec<Card>>;
    /// Grand total; the filter is not applied (observable contract).
    async fn count(&self, filter: &CardFilter) -> anyhow::Result<i64>;
    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Card>>;
    async fn create(&self, new: &NewCard) -> anyhow::Result<Card>;
    async fn update(&self, card: &Card) -> anyhow::Result<()>;
    async fn patch(&self, patch: &CardPatch) -> anyhow::Result<u64>;
    async fn delete(&self, id: i32) -> anyhow::Result<u64>;
}
