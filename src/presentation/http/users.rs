use axum::{
    Json, Router,
    extract::{Path, Query, State},
    middleware,
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::user_repository::UserFilter;
use crate::application::use_cases::auth::change_password::ChangePassword;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::domain::users as domain;
use crate::presentation::http::auth;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::responses::{CountResponse, DeleteResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct User {
    pub id: i32,
    pub username: String,
    pub email: String,
    /// Present only on register/login responses.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn public_user(u: domain::User) -> User {
    User {
        id: u.id,
        username: u.username,
        email: u.email,
        token: None,
    }
}

fn session_user(u: domain::User) -> User {
    User {
        id: u.id,
        username: u.username,
        email: u.email,
        token: u.token,
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateUserRequest {
    pub username: String,
    pub email: String,
    /// Re-hashed when supplied; other body fields are ignored.
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ChangePasswordRequest {
    /// The current password also arrives in this body; it is not verified.
    #[serde(rename = "newPassword")]
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ListUsersQuery {
    pub username: Option<String>,
    pub email: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    let public = Router::new()
        .route("/api/users/register", post(register))
        .route("/api/users/login", post(login));
    let protected = Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users/count", get(count_users))
        .route("/api/users/:id", get(get_user).put(update_user).delete(delete_user))
        .route("/api/users/change-password/:id", put(change_password))
        .route_layer(middleware::from_fn_with_state(
            ctx.clone(),
            auth::require_auth,
        ));
    public.merge(protected).with_state(ctx)
}

#[utoipa::path(get, path = "/api/users", tag = "Users",
    params(
        ("username" = Option<String>, Query, description = "Filter by username"),
        ("email" = Option<String>, Query, description = "Filter by email")
    ),
    responses((status = 200, body = [User])))]
pub async fn list_users(
    State(ctx): State<AppContext>,
    Query(q): Query<ListUsersQuery>,
) -> Result<Json<Vec<User>>, ApiError> {
    let filter = UserFilter {
        username: q.username,
        email: q.email,
    };
    let users = ctx.user_repo().find_all(&filter).await?;
    Ok(Json(users.into_iter().map(public_user).collect()))
}

#[utoipa::path(get, path = "/api/users/count", tag = "Users",
    responses((status = 200, body = CountResponse)))]
pub async fn count_users(State(ctx): State<AppContext>) -> Result<Json<CountResponse>, ApiError> {
    let count = ctx.user_repo().count(&UserFilter::default()).await?;
    Ok(Json(CountResponse { count }))
}

#[utoipa::path(get, path = "/api/users/{id}", tag = "Users",
    params(("id" = i32, Path, description = "User id")),
    responses((status = 200, body = User)))]
pub async fn get_user(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Result<Json<User>, ApiError> {
    let user = ctx
        .user_repo()
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(public_user(user)))
}

#[utoipa::path(post, path = "/api/users/register", tag = "Users", request_body = RegisterRequest,
    security(()),
    responses((status = 200, body = User)))]
pub async fn register(
    State(ctx): State<AppContext>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<User>, ApiError> {
    let repo = ctx.user_repo();
    let uc = RegisterUc {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(&RegisterDto {
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;
    Ok(Json(session_user(user)))
}

#[utoipa::path(post, path = "/api/users/login", tag = "Users", request_body = LoginRequest,
    security(()),
    responses((status = 200, body = User)))]
pub async fn login(
    State(ctx): State<AppContext>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<User>, ApiError> {
    let repo = ctx.user_repo();
    let uc = LoginUc {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(&LoginDto {
            email: req.email,
            password: req.password,
        })
        .await?
        .ok_or_else(|| ApiError::Unauthenticated("Authentication failed!".into()))?;
    Ok(Json(session_user(user)))
}

#[utoipa::path(put, path = "/api/users/{id}", tag = "Users", request_body = UpdateUserRequest,
    params(("id" = i32, Path, description = "User id")),
    responses((status = 200, body = User)))]
pub async fn update_user(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateUserRequest>,
) -> Result<Json<User>, ApiError> {
    let repo = ctx.user_repo();
    let mut user = repo.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    user.username = req.username;
    user.email = req.email;
    repo.update(&user).await?;
    if let Some(password) = req.password {
        ChangePassword {
            repo: repo.as_ref(),
        }
        .execute(id, &password)
        .await?;
    }
    Ok(Json(public_user(user)))
}

#[utoipa::path(put, path = "/api/users/change-password/{id}", tag = "Users",
    request_body = ChangePasswordRequest,
    params(("id" = i32, Path, description = "User id")),
    responses((status = 200, body = User)))]
pub async fn change_password(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<Json<User>, ApiError> {
    let repo = ctx.user_repo();
    let user = repo.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    ChangePassword {
        repo: repo.as_ref(),
    }
    .execute(id, &req.new_password)
    .await?;
    Ok(Json(public_user(user)))
}

#[utoipa::path(delete, path = "/api/users/{id}", tag = "Users",
    params(("id" = i32, Path, description = "User id")),
    responses((status = 200, body = DeleteResponse)))]
pub async fn delete_user(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = ctx.user_repo().delete(id).await?;
    Ok(Json(DeleteResponse { deleted }))
}
