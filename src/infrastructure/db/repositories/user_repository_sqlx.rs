use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Postgres, QueryBuilder, Row};

use crate::application::ports::token_issuer::{TokenIdentity, TokenIssuer};
use crate::application::ports::user_repository::{NewUser, UserFilter, UserRepository};
use crate::domain::users::User;
use crate::infrastructure::db::PgPool;
use crate::infrastructure::db::query::EqFilter;

pub struct SqlxUserRepository {
    pool: PgPool,
    tokens: Arc<dyn TokenIssuer>,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool, tokens: Arc<dyn TokenIssuer>) -> Self {
        Self { pool, tokens }
    }
}

fn map_user(row: &sqlx::postgres::PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        email: row.get("email"),
        password: row.get("password"),
        token: row.get("token"),
    }
}

fn select_users(filter: &UserFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb =
        QueryBuilder::new("SELECT id, username, email, password, token FROM users");
    EqFilter::new(&mut qb)
        .eq("username", filter.username.clone())
        .eq("email", filter.email.clone());
    qb
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn find_all(&self, filter: &UserFilter) -> anyhow::Result<Vec<User>> {
        let rows = select_users(filter).build().fetch_all(&self.pool).await?;
        Ok(rows.iter().map(map_user).collect())
    }

    async fn count(&self, _filter: &UserFilter) -> anyhow::Result<i64> {
        // Stub; clients depend on the constant 0 here.
        Ok(0)
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, email, password, token FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_user))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, email, password, token FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_user))
    }

    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, username, email, password, token FROM users WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_user))
    }

    async fn create(&self, new: &NewUser) -> anyhow::Result<User> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query(
            r#"INSERT INTO users (username, email, password) VALUES ($1, $2, $3)
               RETURNING id, username, email"#,
        )
        .bind(&new.username)
        .bind(&new.email)
        .bind(&new.password_hash)
        .fetch_one(&mut *tx)
        .await?;
        let id: i32 = row.get("id");
        let token = self.tokens.issue(&TokenIdentity {
            id,
            username: new.username.clone(),
            email: new.email.clone(),
        })?;
        sqlx::query("UPDATE users SET token = $1 WHERE id = $2")
            .bind(&token)
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        Ok(User {
            id,
            username: new.username.clone(),
            email: new.email.clone(),
            password: Some(new.password_hash.clone()),
            token: Some(token),
        })
    }

    async fn update(&self, user: &User) -> anyhow::Result<()> {
        sqlx::query(
            "UPDATE users SET username = $2, email = $3, password = $4, token = $5 WHERE id = $1",
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password)
        .bind(&user.token)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn rotate_token(&self, user: &User) -> anyhow::Result<String> {
        let token = self.tokens.issue(&TokenIdentity {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
        })?;
        sqlx::query("UPDATE users SET token = $1 WHERE id = $2")
            .bind(&token)
            .bind(user.id)
            .execute(&self.pool)
            .await?;
        Ok(token)
    }

    async fn change_password(&self, id: i32, password_hash: &str) -> anyhow::Result<()> {
        sqlx::query("UPDATE users SET password = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn delete(&self, _id: i32) -> anyhow::Result<u64> {
        // Users are never hard-deleted; the route exists but is a no-op.
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn select_all_without_filter() {
        let filter = UserFilter::default();
        assert_eq!(
            select_users(&filter).sql(),
            "SELECT id, username, email, password, token FROM users"
        );
    }

    #[test]
    fn select_binds_filter_fields() {
        let filter = UserFilter {
            username: Some("ana".into()),
            email: Some("ana@example.com".into()),
        };
        assert_eq!(
            select_users(&filter).sql(),
            "SELECT id, username, email, password, token FROM users WHERE username = $1 AND email = $2"
        );
    }
}
