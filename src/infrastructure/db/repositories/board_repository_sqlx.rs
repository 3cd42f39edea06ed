use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder, Row};

use crate::application::ports::board_repository::{
    BoardFilter, BoardPatch, BoardRepository, NewBoard,
};
use crate::domain::boards::{Board, Role};
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::query::{EqFilter, SetList};

pub struct SqlxBoardRepository {
    pool: PgPool,
}

impl SqlxBoardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_board(row: &sqlx::postgres::PgRow) -> Board {
    Board {
        id: row.get("id"),
        name: row.get("name"),
        background_color: row.get("background_color"),
        text_color: row.get("text_color"),
        created_by: row.get("created_by"),
    }
}

fn select_boards(filter: &BoardFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        "SELECT id, name, background_color, text_color, created_by FROM boards",
    );
    EqFilter::new(&mut qb)
        .eq("name", filter.name.clone())
        .eq("created_by", filter.created_by);
    qb
}

fn update_boards(patch: &BoardPatch) -> Option<QueryBuilder<'static, Postgres>> {
    let mut qb = QueryBuilder::new("UPDATE boards SET ");
    let mut sets = SetList::new(&mut qb);
    sets.set("name", patch.name.clone())
        .set("background_color", patch.background_color.clone())
        .set("text_color", patch.text_color.clone());
    if sets.is_empty() {
        return None;
    }
    qb.push(" WHERE id = ").push_bind(patch.id);
    Some(qb)
}

#[async_trait]
impl BoardRepository for SqlxBoardRepository {
    async fn find_all(&self, filter: &BoardFilter) -> anyhow::Result<Vec<Board>> {
        let rows = select_boards(filter).build().fetch_all(&self.pool).await?;
        Ok(rows.iter().map(map_board).collect())
    }

    async fn count(&self, _filter: &BoardFilter) -> anyhow::Result<i64> {
        // Grand total regardless of filter; kept for drop-in compatibility.
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM boards")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Board>> {
        let row = sqlx::query(
            "SELECT id, name, background_color, text_color, created_by FROM boards WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_board))
    }

    async fn create(&self, new: &NewBoard) -> anyhow::Result<Board> {
        // Board and owner membership commit together or not at all.
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(
            r#"INSERT INTO boards (name, background_color, text_color, created_by)
               VALUES ($1, $2, $3, $4)
               RETURNING id, name, background_color, text_color, created_by"#,
        )
        .bind(&new.name)
        .bind(&new.background_color)
        .bind(&new.text_color)
        .bind(new.created_by)
        .fetch_one(&mut *tx)
        .await?;
        let board = map_board(&row);
        sqlx::query(
            "INSERT INTO board_users (board_id, user_id, role, starred) VALUES ($1, $2, $3, FALSE)",
        )
        .bind(board.id)
        .bind(board.created_by)
        .bind(Role::Owner.as_str())
        .execute(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(board)
    }

    async fn update(&self, board: &Board) -> anyhow::Result<()> {
        sqlx::query(
            r#"UPDATE boards SET name = $2, background_color = $3, text_color = $4, created_by = $5
               WHERE id = $1"#,
        )
        .bind(board.id)
        .bind(&board.name)
        .bind(&board.background_color)
        .bind(&board.text_color)
        .bind(board.created_by)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn patch(&self, patch: &BoardPatch) -> anyhow::Result<u64> {
        let Some(mut qb) = update_boards(patch) else {
            return Ok(0);
        };
        let res = qb.build().execute(&self.pool).await?;
        Ok(res.rows_affected())
    }

    async fn delete(&self, id: i32) -> anyhow::Result<u64> {
        // Full cascade in one transaction: cards under the board's lists,
        // the lists, the memberships, then the board itself.
        let mut tx = self.pool.begin().await?;
        sqlx::query("DELETE FROM cards WHERE list_id IN (SELECT id FROM lists WHERE board_id = $1)")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM lists WHERE board_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM board_users WHERE board_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        let res = sqlx::query("DELETE FROM boards WHERE id = $1")
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
    fn select_filters_by_creator() {
        let filter = BoardFilter {
            created_by: Some(7),
            ..Default::default()
        };
        assert_eq!(
            select_boards(&filter).sql(),
            "SELECT id, name, background_color, text_color, created_by FROM boards WHERE created_by = $1"
        );
    }

    #[test]
    fn patch_writes_only_supplied_fields() {
        let patch = BoardPatch {
            id: 4,
            text_color: Some("#222".into()),
            ..Default::default()
        };
        assert_eq!(
            update_boards(&patch).unwrap().sql(),
            "UPDATE boards SET text_color = $1 WHERE id = $2"
        );
    }

    #[test]
    fn empty_patch_builds_no_statement() {
        let patch = BoardPatch {
            id: 4,
            ..Default::default()
        };
        assert!(update_boards(&patch).is_none());
    }
}
