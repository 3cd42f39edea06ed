use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::ports::user_repository::{NewUser, UserRepository};
use crate::domain::users::User;

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    /// Hashes the password and inserts the user; the repository issues and
    /// persists the first session token in the same transaction.
    pub async fn execute(&self, req: &RegisterRequest) -> anyhow::Result<User> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
            .to_string();
        let user = self
            .repo
            .create(&NewUser {
                username: req.username.clone(),
                email: req.email.clone(),
                password_hash: hash,
            })
            .await?;
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    use crate::application::use_cases::auth::test_support::MemoryUserRepo;

    #[tokio::test]
    async fn stores_a_hash_not_the_plaintext() {
        let repo = MemoryUserRepo::default();
        let uc = Register { repo: &repo };
        let user = uc
            .execute(&RegisterRequest {
                username: "ana".into(),
                email: "ana@example.com".into(),
                password: "secret".into(),
            })
            .await
            .unwrap();

        let stored = user.password.expect("hash persisted");
        assert_ne!(stored, "secret");
        let parsed = PasswordHash::new(&stored).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"secret", &parsed)
                .is_ok()
        );
        assert!(user.token.is_some(), "session token issued at registration");
    }
}
