use crate::application::ports::token_issuer::{TokenIdentity, TokenIssuer};
use crate::application::ports::user_repository::UserRepository;
use crate::domain::users::User;

/// Entity family a route acts on, taken from the second path segment
/// (`/api/boards/3` -> `Boards`). Recorded on the request span during
/// permission evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteEntity {
    Users,
    Boards,
    BoardUsers,
    Lists,
    Cards,
}

impl RouteEntity {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteEntity::Users => "users",
            RouteEntity::Boards => "boards",
            RouteEntity::BoardUsers => "board-users",
            RouteEntity::Lists => "lists",
            RouteEntity::Cards => "cards",
        }
    }

    pub fn from_path(path: &str) -> Option<RouteEntity> {
        let segment = path.trim_start_matches('/').split('/').nth(1)?;
        match segment {
            "users" => Some(RouteEntity::Users),
            "boards" => Some(RouteEntity::Boards),
            "board-users" => Some(RouteEntity::BoardUsers),
            "lists" => Some(RouteEntity::Lists),
            "cards" => Some(RouteEntity::Cards),
            _ => None,
        }
    }
}

/// Why a bearer token was rejected. The presentation layer maps these onto
/// status codes.
#[derive(Debug)]
pub enum AccessError {
    /// Missing/invalid/expired token, or no session matches it.
    Unauthenticated,
    /// The token decoded but does not map onto the session's user.
    Forbidden,
    /// The credential store itself failed.
    Store(anyhow::Error),
}

/// Resolves a bearer token to its user. One canonical path: the token must
/// decode under the shared secret AND match the persisted session, and the
/// decoded identity must be the session's user.
pub async fn authenticate<R, T>(repo: &R, tokens: &T, token: &str) -> Result<User, AccessError>
where
    R: UserRepository + ?Sized,
    T: TokenIssuer + ?Sized,
{
    let identity: TokenIdentity = tokens
        .decode(token)
        .map_err(|_| AccessError::Unauthenticated)?;
    let user = repo
        .find_by_token(token)
        .await
        .map_err(AccessError::Store)?
        .ok_or(AccessError::Unauthenticated)?;
    if user.id != identity.id {
        return Err(AccessError::Forbidden);
    }
    Ok(user)
}

// Board roles (owner/editor/viewer) are intentionally not consulted here:
// route-level access only requires a live session. See DESIGN.md.

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::application::ports::user_repository::{NewUser, UserFilter};

    struct StaticIssuer;

    impl TokenIssuer for StaticIssuer {
        fn issue(&self, identity: &TokenIdentity) -> anyhow::Result<String> {
            Ok(format!("tok-{}", identity.id))
        }
        fn decode(&self, token: &str) -> anyhow::Result<TokenIdentity> {
            let id: i32 = token
                .strip_prefix("tok-")
                .ok_or_else(|| anyhow::anyhow!("bad token"))?
                .parse()?;
            Ok(TokenIdentity {
                id,
                username: "u".into(),
                email: "u@example.com".into(),
            })
        }
    }

    struct FixedUserRepo {
        user: Mutex<Option<User>>,
    }

    #[async_trait]
    impl UserRepository for FixedUserRepo {
        async fn find_all(&self, _filter: &UserFilter) -> anyhow::Result<Vec<User>> {
            Ok(vec![])
        }
        async fn count(&self, _filter: &UserFilter) -> anyhow::Result<i64> {
            Ok(0)
        }
        async fn find_by_id(&self, _id: i32) -> anyhow::Result<Option<User>> {
            Ok(self.user.lock().unwrap().clone())
        }
        async fn find_by_email(&self, _email: &str) -> anyhow::Result<Option<User>> {
            Ok(self.user.lock().unwrap().clone())
        }
        async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<User>> {
            Ok(self
                .user
                .lock()
                .unwrap()
                .clone()
                .filter(|u| u.token.as_deref() == Some(token)))
        }
        async fn create(&self, _new: &NewUser) -> anyhow::Result<User> {
            unimplemented!()
        }
        async fn update(&self, _user: &User) -> anyhow::Result<()> {
            Ok(())
        }
        async fn rotate_token(&self, _user: &User) -> anyhow::Result<String> {
            unimplemented!()
        }
        async fn change_password(&self, _id: i32, _hash: &str) -> anyhow::Result<()> {
            Ok(())
        }
        async fn delete(&self, _id: i32) -> anyhow::Result<u64> {
            Ok(0)
        }
    }

    fn seeded(id: i32, token: &str) -> FixedUserRepo {
        FixedUserRepo {
            user: Mutex::new(Some(User {
                id,
                username: "ana".into(),
                email: "ana@example.com".into(),
                password: None,
                token: Some(token.into()),
            })),
        }
    }

    #[tokio::test]
    async fn accepts_matching_session() {
        let repo = seeded(7, "tok-7");
        let user = authenticate(&repo, &StaticIssuer, "tok-7").await.unwrap();
        assert_eq!(user.id, 7);
    }

    #[tokio::test]
    async fn rejects_unknown_token() {
        let repo = seeded(7, "tok-7");
        let err = authenticate(&repo, &StaticIssuer, "tok-9").await.unwrap_err();
        assert!(matches!(err, AccessError::Unauthenticated));
    }

    #[tokio::test]
    async fn rejects_undecodable_token() {
        let repo = seeded(7, "tok-7");
        let err = authenticate(&repo, &StaticIssuer, "garbage").await.unwrap_err();
        assert!(matches!(err, AccessError::Unauthenticated));
    }

    #[tokio::test]
    async fn rejects_session_user_mismatch() {
        // Session row carries the token, but the token decodes to someone else.
        let repo = FixedUserRepo {
            user: Mutex::new(Some(User {
                id: 8,
                username: "bo".into(),
                email: "bo@example.com".into(),
                password: None,
                token: Some("tok-7".into()),
            })),
        };
        let err = authenticate(&repo, &StaticIssuer, "tok-7").await.unwrap_err();
        assert!(matches!(err, AccessError::Forbidden));
    }

    #[test]
    fn route_entity_from_path() {
        assert_eq!(
            RouteEntity::from_path("/api/boards/12"),
            Some(RouteEntity::Boards)
        );
        assert_eq!(
            RouteEntity::from_path("/api/board-users"),
            Some(RouteEntity::BoardUsers)
        );
        assert_eq!(
            RouteEntity::from_path("/api/users/count"),
            Some(RouteEntity::Users)
        );
        assert_eq!(RouteEntity::from_path("/api"), None);
        assert_eq!(RouteEntity::from_path("/api/unknown"), None);
    }
}
