use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::User;

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    /// Verifies the credentials and rotates the session token. Any prior
    /// token stops resolving: one active session per user.
    pub async fn execute(&self, req: &LoginRequest) -> anyhow::Result<Option<User>> {
        let mut user = match self.repo.find_by_email(&req.email).await? {
            Some(u) => u,
            None => return Ok(None),
        };
        let hash = user.password.clone().unwrap_or_default();
        let parsed = PasswordHash::new(&hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_err()
        {
            return Ok(None);
        }
        let token = self.repo.rotate_token(&user).await?;
        user.token = Some(token);
        user.password = None;
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::application::ports::user_repository::{NewUser, UserRepository as _};
    use crate::application::use_cases::auth::register::{Register, RegisterRequest};
    use crate::application::use_cases::auth::test_support::MemoryUserRepo;

    async fn seed(repo: &MemoryUserRepo) -> User {
        Register { repo }
            .execute(&RegisterRequest {
                username: "ana".into(),
                email: "ana@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn rotates_the_token_on_success() {
        let repo = MemoryUserRepo::default();
        let registered = seed(&repo).await;
        let first_token = registered.token.clone().unwrap();

        let logged_in = Login { repo: &repo }
            .execute(&LoginRequest {
                email: "ana@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap()
            .expect("credentials match");

        let fresh = logged_in.token.unwrap();
        assert_ne!(fresh, first_token);
        // the fresh token resolves, the stale one no longer does
        let by_token = repo.find_by_token(&fresh).await.unwrap().unwrap();
        assert_eq!(by_token.id, registered.id);
        assert!(repo.find_by_token(&first_token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn rejects_a_wrong_password() {
        let repo = MemoryUserRepo::default();
        seed(&repo).await;
        let out = Login { repo: &repo }
            .execute(&LoginRequest {
                email: "ana@example.com".into(),
                password: "wrong".into(),
            })
            .await
            .unwrap();
        assert!(out.is_none());
    }

    #[tokio::test]
    async fn rejects_an_unknown_email() {
        let repo = MemoryUserRepo::default();
        repo.create(&NewUser {
            username: "ana".into(),
            email: "ana@example.com".into(),
            password_hash: "x".into(),
        })
        .await
        .unwrap();
        let out = Login { repo: &repo }
            .execute(&LoginRequest {
                email: "nobody@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();
        assert!(out.is_none());
    }
}
