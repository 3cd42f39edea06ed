use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::ports::user_repository::UserRepository;

pub struct ChangePassword<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> ChangePassword<'a, R> {
    /// Overwrites the stored hash for `id`. The route accepts the current
    /// password in its body but it is not checked here — see DESIGN.md.
    pub async fn execute(&self, id: i32, new_password: &str) -> anyhow::Result<()> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(new_password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
            .to_string();
        self.repo.change_password(id, &hash).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argon2::password_hash::{PasswordHash, PasswordVerifier};

    use crate::application::ports::user_repository::UserRepository as _;
    use crate::application::use_cases::auth::register::{Register, RegisterRequest};
    use crate::application::use_cases::auth::test_support::MemoryUserRepo;

    #[tokio::test]
    async fn overwrites_with_a_fresh_hash() {
        let repo = MemoryUserRepo::default();
        let user = Register { repo: &repo }
            .execute(&RegisterRequest {
                username: "ana".into(),
                email: "ana@example.com".into(),
                password: "old".into(),
            })
            .await
            .unwrap();

        ChangePassword { repo: &repo }
            .execute(user.id, "brand-new")
            .await
            .unwrap();

        let stored = repo
            .find_by_email("ana@example.com")
            .await
            .unwrap()
            .unwrap()
            .password
            .unwrap();
        assert_ne!(stored, "brand-new");
        let parsed = PasswordHash::new(&stored).unwrap();
        assert!(
            Argon2::default()
                .verify_password(b"brand-new", &parsed)
                .is_ok()
        );
        assert!(
            Argon2::default().verify_password(b"old", &parsed).is_err()
        );
    }
}
