use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, AtomicU64, Ordering};

use async_trait::async_trait;

use crate::application::ports::user_repository::{NewUser, UserFilter, UserRepository};
use crate::domain::users::User;

/// In-memory stand-in for the user store, mirroring its contract closely
/// enough for the auth use cases: ids are assigned on insert and a session
/// token is issued with the row.
#[derive(Default)]
pub(crate) struct MemoryUserRepo {
    rows: Mutex<Vec<User>>,
    next_id: AtomicI32,
    token_seq: AtomicU64,
}

impl MemoryUserRepo {
    fn next_token(&self, id: i32) -> String {
        let seq = self.token_seq.fetch_add(1, Ordering::SeqCst);
        format!("session-{id}-{seq}")
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepo {
    async fn find_all(&self, filter: &UserFilter) -> anyhow::Result<Vec<User>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|u| {
                filter.username.as_deref().is_none_or(|v| u.username == v)
                    && filter.email.as_deref().is_none_or(|v| u.email == v)
            })
            .cloned()
            .collect())
    }

    async fn count(&self, _filter: &UserFilter) -> anyhow::Result<i64> {
        Ok(0)
    }

    async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<User>> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<User>> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.token.as_deref() == Some(token))
            .cloned())
    }

    async fn create(&self, new: &NewUser) -> anyhow::Result<User> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let user = User {
            id,
            username: new.username.clone(),
            email: new.email.clone(),
            password: Some(new.password_hash.clone()),
            token: Some(self.next_token(id)),
        };
        self.rows.lock().unwrap().push(user.clone());
        Ok(user)
    }

    async fn update(&self, user: &User) -> anyhow::Result<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|u| u.id == user.id) {
            *row = user.clone();
        }
        Ok(())
    }

    async fn rotate_token(&self, user: &User) -> anyhow::Result<String> {
        let token = self.next_token(user.id);
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|u| u.id == user.id) {
            row.token = Some(token.clone());
        }
        Ok(token)
    }

    async fn change_password(&self, id: i32, password_hash: &str) -> anyhow::Result<()> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|u| u.id == id) {
            row.password = Some(password_hash.to_string());
        }
        Ok(())
    }

    async fn delete(&self, _id: i32) -> anyhow::Result<u64> {
        Ok(0)
    }
}
