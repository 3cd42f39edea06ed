use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder, Row};

use crate::application::ports::board_user_repository::{
    BoardUserFilter, BoardUserRepository, MembershipKey,
};
use crate::domain::boards::{BoardUser, Role};
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::query::EqFilter;

pub struct SqlxBoardUserRepository {
    pool: PgPool,
}

impl SqlxBoardUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_membership(row: &sqlx::postgres::PgRow) -> anyhow::Result<BoardUser> {
    Ok(BoardUser {
        board_id: row.get("board_id"),
        user_id: row.get("user_id"),
        role: Role::parse(row.get("role"))?,
        starred: row.get("starred"),
    })
}

fn select_memberships(filter: &BoardUserFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT board_id, user_id, role, starred FROM board_users");
    EqFilter::new(&mut qb)
        .eq("board_id", filter.board_id)
        .eq("user_id", filter.user_id)
        .eq("role", filter.role.map(|r| r.as_str()))
        .eq("starred", filter.starred);
    qb
}

#[async_trait]
impl BoardUserRepository for SqlxBoardUserRepository {
    async fn find_all(&self, filter: &BoardUserFilter) -> anyhow::Result<Vec<BoardUser>> {
        let rows = select_memberships(filter)
            .build()
            .fetch_all(&self.pool)
            .await?;
        rows.iter().map(map_membership).collect()
    }

    async fn count(&self, _filter: &BoardUserFilter) -> anyhow::Result<i64> {
        // Grand total regardless of filter; kept for drop-in compatibility.
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM board_users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn create(&self, membership: &BoardUser) -> anyhow::Result<BoardUser> {
        let row = sqlx::query(
            r#"INSERT INTO board_users (board_id, user_id, role, starred)
               VALUES ($1, $2, $3, $4)
               RETURNING board_id, user_id, role, starred"#,
        )
        .bind(membership.board_id)
        .bind(membership.user_id)
        .bind(membership.role.as_str())
        .bind(membership.starred)
        .fetch_one(&self.pool)
        .await?;
        map_membership(&row)
    }

    async fn update(&self, membership: &BoardUser) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE board_users SET role = $3, starred = $4 WHERE board_id = $1 AND user_id = $2",
        )
        .bind(membership.board_id)
        .bind(membership.user_id)
        .bind(membership.role.as_str())
        .bind(membership.starred)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, key: MembershipKey) -> anyhow::Result<u64> {
        let res = sqlx::query("DELETE FROM board_users WHERE board_id = $1 AND user_id = $2")
            .bind(key.board_id)
            .bind(key.user_id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_supports_every_filter_field() {
        let filter = BoardUserFilter {
            board_id: Some(5),
            user_id: Some(2),
            role: Some(Role::Viewer),
            starred: Some(false),
        };
        assert_eq!(
            select_memberships(&filter).sql(),
            "SELECT board_id, user_id, role, starred FROM board_users \
             WHERE board_id = $1 AND user_id = $2 AND role = $3 AND starred = $4"
        );
    }

    #[test]
    fn empty_filter_selects_everything() {
        assert_eq!(
            select_memberships(&BoardUserFilter::default()).sql(),
            "SELECT board_id, user_id, role, starred FROM board_users"
        );
    }
}
