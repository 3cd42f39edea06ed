use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder, Row};

use crate::application::ports::card_repository::{
    CardFilter, CardPatch, CardRepository, NewCard,
};
use crate::domain::cards::Card;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::query::{EqFilter, SetList};

pub struct SqlxCardRepository {
    pool: PgPool,
}

impl SqlxCardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CARD_COLUMNS: &str = "id, name, list_id, position, due_date, created_at, description";

fn map_card(row: &sqlx::postgres::PgRow) -> Card {
    Card {
        id: row.get("id"),
        name: row.get("name"),
        list_id: row.get("list_id"),
        position: row.get("position"),
        due_date: row.get("due_date"),
        created_at: row.get("created_at"),
        description: row.get("description"),
    }
}

fn select_cards(filter: &CardFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {CARD_COLUMNS} FROM cards"));
    EqFilter::new(&mut qb)
        .eq("name", filter.name.clone())
        .eq("list_id", filter.list_id);
    qb
}

fn update_cards(patch: &CardPatch) -> Option<QueryBuilder<'static, Postgres>> {
    let mut qb = QueryBuilder::new("UPDATE cards SET ");
    let mut sets = SetList::new(&mut qb);
    sets.set("name", patch.name.clone())
        .set("list_id", patch.list_id)
        .set("position", patch.position)
        .set("due_date", patch.due_date)
        .set("description", patch.description.clone());
    if sets.is_empty() {
        return None;
    }
    qb.push(" WHERE id = ").push_bind(patch.id);
    Some(qb)
}

#[async_trait]
impl CardRepository for SqlxCardRepository {
    async fn find_all(&self, filter: &CardFilter) -> anyhow::Result<Vec<Card>> {
        let rows = select_cards(filter).build().fetch_all(&self.pool).await?;
        Ok(rows.iter().map(map_card).collect())
    }

    async fn count(&self, _filter: &CardFilter) -> anyhow::Result<i64> {
        // Grand total regardless of filter; kept for drop-in compatibility.
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cards")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Card>> {
        let row = sqlx::query(&format!("SELECT {CARD_COLUMNS} FROM cards WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_card))
    }

    async fn create(&self, new: &NewCard) -> anyhow::Result<Card> {
        let row = sqlx::query(&format!(
            r#"INSERT INTO cards (name, list_id, position, due_date, created_at, description)
               VALUES ($1, $2, $3, $4, COALESCE($5, now()), $6)
               RETURNING {CARD_COLUMNS}"#
        ))
        .bind(&new.name)
        .bind(new.list_id)
        .bind(new.position)
        .bind(new.due_date)
        .bind(new.created_at)
        .bind(&new.description)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_card(&row))
    }

    async fn update(&self, card: &Card) -> anyhow::Result<()> {
        sqlx::query(
            r#"UPDATE cards SET name = $2, list_id = $3, position = $4, due_date = $5,
               created_at = $6, description = $7 WHERE id = $1"#,
        )
        .bind(card.id)
        .bind(&card.name)
        .bind(card.list_id)
        .bind(card.position)
        .bind(card.due_date)
        .bind(card.created_at)
        .bind(&card.description)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn patch(&self, patch: &CardPatch) -> anyhow::Result<u64> {
        let Some(mut qb) = update_cards(patch) else {
            return Ok(0);
        };
        let res = qb.build().execute(&self.pool).await?;
        Ok(res.rows_affected())
    }

    async fn delete(&self, id: i32) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM cards WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_scopes_to_a_list() {
        let filter = CardFilter {
            list_id: Some(12),
            ..Default::default()
        };
        assert_eq!(
            select_cards(&filter).sql(),
            "SELECT id, name, list_id, position, due_date, created_at, description FROM cards \
             WHERE list_id = $1"
        );
    }

    #[test]
    fn patch_moves_between_lists() {
        let patch = CardPatch {
            id: 3,
            list_id: Some(8),
            position: Some(0),
            ..Default::default()
        };
        assert_eq!(
            update_cards(&patch).unwrap().sql(),
            "UPDATE cards SET list_id = $1, position = $2 WHERE id = $3"
        );
    }

    #[test]
    fn empty_patch_builds_no_statement() {
        assert!(
            update_cards(&CardPatch {
                id: 3,
                ..Default::default()
            })
            .is_none()
        );
    }
}
