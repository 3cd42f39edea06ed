use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder, Row};

use crate::application::ports::list_repository::{
    ListFilter, ListPatch, ListRepository, NewList,
};
use crate::domain::lists::List;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::query::{EqFilter, SetList};

pub struct SqlxListRepository {
    pool: PgPool,
}

impl SqlxListRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_list(row: &sqlx::postgres::PgRow) -> List {
    List {
        id: row.get("id"),
        name: row.get("name"),
        board_id: row.get("board_id"),
        position: row.get("position"),
    }
}

fn select_lists(filter: &ListFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT id, name, board_id, position FROM lists");
    EqFilter::new(&mut qb)
        .eq("name", filter.name.clone())
        .eq("board_id", filter.board_id);
    qb
}

fn update_lists(patch: &ListPatch) -> Option<QueryBuilder<'static, Postgres>> {
    let mut qb = QueryBuilder::new("UPDATE lists SET ");
    let mut sets = SetList::new(&mut qb);
    sets.set("name", patch.name.clone())
        .set("board_id", patch.board_id)
        .set("position", patch.position);
    if sets.is_empty() {
        return None;
    }
    qb.push(" WHERE id = ").push_bind(patch.id);
    Some(qb)
}

#[async_trait]
impl ListRepository for SqlxListRepository {
    async fn find_all(&self, filter: &ListFilter) -> anyhow::Result<Vec<List>> {
        let rows = select_lists(filter).build().fetch_all(&self.pool).await?;
        Ok(rows.iter().map(map_list).collect())
    }

    async fn count(&self, _filter: &ListFilter) -> anyhow::Result<i64> {
        // Grand total regardless of filter; kept for drop-in compatibility.
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM lists")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<List>> {
        let row = sqlx::query("SELECT id, name, board_id, position FROM lists WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.as_ref().map(map_list))
    }

    async fn create(&self, new: &NewList) -> anyhow::Result<List> {
        let row = sqlx::query(
            r#"INSERT INTO lists (name, board_id, position) VALUES ($1, $2, $3)
               RETURNING id, name, board_id, position"#,
        )
        .bind(&new.name)
        .bind(new.board_id)
        .bind(new.position)
        .fetch_one(&self.pool)
        .await?;
        Ok(map_list(&row))
    }

    async fn update(&self, list: &List) -> anyhow::Result<()> {
        sqlx::query("UPDATE lists SET name = $2, board_id = $3, position = $4 WHERE id = $1")
            .bind(list.id)
            .bind(&list.name)
            .bind(list.board_id)
            .bind(list.position)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn patch(&self, patch: &ListPatch) -> anyhow::Result<u64> {
        let Some(mut qb) = update_lists(patch) else {
            return Ok(0);
        };
        let res = qb.build().execute(&self.pool).await?;
        Ok(res.rows_affected())
    }

    async fn delete(&self, id: i32) -> anyhow::Result<u64> {
        // Cards fall with their list, in the same transaction.
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM cards WHERE list_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let res = sqlx::query("DELETE FROM lists WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(res.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_scopes_to_a_board() {
        let filter = ListFilter {
            board_id: Some(5),
            ..Default::default()
        };
        assert_eq!(
            select_lists(&filter).sql(),
            "SELECT id, name, board_id, position FROM lists WHERE board_id = $1"
        );
    }

    #[test]
    fn empty_filter_selects_everything() {
        assert_eq!(
            select_lists(&ListFilter::default()).sql(),
            "SELECT id, name, board_id, position FROM lists"
        );
    }

    #[test]
    fn patch_can_move_and_reposition() {
        let patch = ListPatch {
            id: 9,
            board_id: Some(2),
            position: Some(4),
            ..Default::default()
        };
        assert_eq!(
            update_lists(&patch).unwrap().sql(),
            "UPDATE lists SET board_id = $1, position = $2 WHERE id = $3"
        );
    }
}
