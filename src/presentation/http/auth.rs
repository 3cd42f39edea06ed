use axum::extract::{FromRequestParts, Request, State};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use tracing::debug;

use crate::application::access::{self, RouteEntity};
use crate::bootstrap::app_context::AppContext;
use crate::domain::users::User;
use crate::presentation::http::error::ApiError;

/// The authenticated user, attached to the request by [`require_auth`] for
/// handlers that need the actor.
#[derive(Clone)]
pub struct CurrentUser(pub User);

pub fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

/// Credential + permission gate for every route except register/login.
/// Rejects before any lookup when the header is absent; otherwise the
/// token must both decode and match a live session (see
/// `application::access`).
pub async fn require_auth(
    State(ctx): State<AppContext>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(req.headers())
        .ok_or_else(|| ApiError::Unauthenticated("header without authorization".into()))?;
    let repo = ctx.user_repo();
    let tokens = ctx.token_issuer();
    let user = access::authenticate(repo.as_ref(), tokens.as_ref(), &token).await?;
    let entity = RouteEntity::from_path(req.uri().path());
    debug!(
        user_id = user.id,
        entity = entity.map(|e| e.as_str()).unwrap_or("-"),
        method = %req.method(),
        "request authorized"
    );
    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or_else(|| ApiError::Unauthenticated("header without authorization".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn strips_the_bearer_prefix() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc.def.ghi"),
        );
        assert_eq!(bearer_token(&headers).as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn missing_header_yields_none() {
        assert!(bearer_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn non_bearer_scheme_yields_none() {
        let mut headers = HeaderMap::new();
        headers.insert(
            axum::http::header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwdw=="),
        );
        assert!(bearer_token(&headers).is_none());
    }
}
