use axum::{
    Json, Router,
    extract::{Query, State},
    middleware,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::board_user_repository::{BoardUserFilter, MembershipKey};
use crate::bootstrap::app_context::AppContext;
use crate::domain::boards::{BoardUser as DomainBoardUser, Role};
use crate::presentation::http::auth;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::responses::{CountResponse, DeleteResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct BoardUser {
    pub board_id: i32,
    pub user_id: i32,
    pub role: String,
    pub starred: bool,
}

impl From<DomainBoardUser> for BoardUser {
    fn from(m: DomainBoardUser) -> Self {
        BoardUser {
            board_id: m.board_id,
            user_id: m.user_id,
            role: m.role.as_str().to_string(),
            starred: m.starred,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MembershipRequest {
    pub board_id: i32,
    pub user_id: i32,
    pub role: String,
    #[serde(default)]
    pub starred: bool,
}

impl MembershipRequest {
    fn into_domain(self) -> Result<DomainBoardUser, ApiError> {
        let role = Role::parse(&self.role).map_err(|e| ApiError::Validation(e.to_string()))?;
        Ok(DomainBoardUser {
            board_id: self.board_id,
            user_id: self.user_id,
            role,
            starred: self.starred,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ListMembershipsQuery {
    pub board_id: Option<i32>,
    pub user_id: Option<i32>,
    pub role: Option<String>,
    pub starred: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct MembershipKeyQuery {
    pub board_id: Option<i32>,
    pub user_id: Option<i32>,
}

fn filter_from(q: ListMembershipsQuery) -> Result<BoardUserFilter, ApiError> {
    let role = match q.role.as_deref() {
        Some(r) => Some(Role::parse(r).map_err(|e| ApiError::Validation(e.to_string()))?),
        None => None,
    };
    Ok(BoardUserFilter {
        board_id: q.board_id,
        user_id: q.user_id,
        role,
        starred: q.starred,
    })
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/api/board-users",
            get(list_memberships)
                .post(create_membership)
                .put(update_membership)
                .delete(delete_membership),
        )
        .route("/api/board-users/count", get(count_memberships))
        .route_layer(middleware::from_fn_with_state(
            ctx.clone(),
            auth::require_auth,
        ))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/board-users", tag = "BoardUsers",
    params(
        ("board_id" = Option<i32>, Query, description = "Filter by board"),
        ("user_id" = Option<i32>, Query, description = "Filter by user"),
        ("role" = Option<String>, Query, description = "Filter by role"),
        ("starred" = Option<bool>, Query, description = "Filter by starred flag")
    ),
    responses((status = 200, body = [BoardUser])))]
pub async fn list_memberships(
    State(ctx): State<AppContext>,
    Query(q): Query<ListMembershipsQuery>,
) -> Result<Json<Vec<BoardUser>>, ApiError> {
    let filter = filter_from(q)?;
    let memberships = ctx.board_user_repo().find_all(&filter).await?;
    Ok(Json(memberships.into_iter().map(BoardUser::from).collect()))
}

#[utoipa::path(get, path = "/api/board-users/count", tag = "BoardUsers",
    responses((status = 200, body = CountResponse)))]
pub async fn count_memberships(
    State(ctx): State<AppContext>,
) -> Result<Json<CountResponse>, ApiError> {
    let count = ctx
        .board_user_repo()
        .count(&BoardUserFilter::default())
        .await?;
    Ok(Json(CountResponse { count }))
}

#[utoipa::path(post, path = "/api/board-users", tag = "BoardUsers",
    request_body = MembershipRequest,
    responses((status = 200, body = BoardUser)))]
pub async fn create_membership(
    State(ctx): State<AppContext>,
    Json(req): Json<MembershipRequest>,
) -> Result<Json<BoardUser>, ApiError> {
    let membership = req.into_domain()?;
    let created = ctx.board_user_repo().create(&membership).await?;
    Ok(Json(created.into()))
}

#[utoipa::path(put, path = "/api/board-users", tag = "BoardUsers",
    request_body = MembershipRequest,
    responses((status = 200, body = BoardUser)))]
pub async fn update_membership(
    State(ctx): State<AppContext>,
    Json(req): Json<MembershipRequest>,
) -> Result<Json<BoardUser>, ApiError> {
    let membership = req.into_domain()?;
    ctx.board_user_repo().update(&membership).await?;
    Ok(Json(membership.into()))
}

#[utoipa::path(delete, path = "/api/board-users", tag = "BoardUsers",
    params(
        ("board_id" = i32, Query, description = "Board id"),
        ("user_id" = i32, Query, description = "User id")
    ),
    responses((status = 200, body = DeleteResponse)))]
pub async fn delete_membership(
    State(ctx): State<AppContext>,
    Query(q): Query<MembershipKeyQuery>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let (Some(board_id), Some(user_id)) = (q.board_id, q.user_id) else {
        return Err(ApiError::Validation(
            "board_id and user_id are required".into(),
        ));
    };
    let deleted = ctx
        .board_user_repo()
        .delete(MembershipKey { board_id, user_id })
        .await?;
    Ok(Json(DeleteResponse { deleted }))
}
