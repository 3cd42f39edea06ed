use axum::{
    Json, Router,
    extract::{Path, Query, State},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::board_repository::{BoardFilter, BoardPatch, NewBoard};
use crate::application::use_cases::boards::create_board::CreateBoard;
use crate::application::use_cases::boards::delete_board::DeleteBoard;
use crate::application::use_cases::boards::patch_board::PatchBoard;
use crate::bootstrap::app_context::AppContext;
use crate::domain::boards as domain;
use crate::presentation::http::auth::{self, CurrentUser};
use crate::presentation::http::error::ApiError;
use crate::presentation::http::responses::{CountResponse, DeleteResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct Board {
    pub id: i32,
    pub name: String,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    pub created_by: i32,
}

impl From<domain::Board> for Board {
    fn from(b: domain::Board) -> Self {
        Board {
            id: b.id,
            name: b.name,
            background_color: b.background_color,
            text_color: b.text_color,
            created_by: b.created_by,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBoardRequest {
    pub name: String,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
    /// Defaults to the authenticated user.
    pub created_by: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateBoardRequest {
    pub name: String,
    pub background_color: Option<String>,
    pub text_color: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PatchBoardRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

/// Echoed back when a patch matches no row.
#[derive(Debug, Serialize)]
struct PatchBoardEcho {
    id: i32,
    #[serde(flatten)]
    fields: PatchBoardRequest,
}

#[derive(Debug, Deserialize)]
pub struct ListBoardsQuery {
    pub user_id: Option<i32>,
    pub name: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/api/boards", get(list_boards).post(create_board))
        .route("/api/boards/count", get(count_boards))
        .route(
            "/api/boards/:id",
            get(get_board)
                .put(update_board)
                .patch(patch_board)
                .delete(delete_board),
        )
        .route_layer(middleware::from_fn_with_state(
            ctx.clone(),
            auth::require_auth,
        ))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/boards", tag = "Boards",
    params(
        ("user_id" = Option<i32>, Query, description = "Filter by creator"),
        ("name" = Option<String>, Query, description = "Filter by name")
    ),
    responses((status = 200, body = [Board])))]
pub async fn list_boards(
    State(ctx): State<AppContext>,
    Query(q): Query<ListBoardsQuery>,
) -> Result<Json<Vec<Board>>, ApiError> {
    let filter = BoardFilter {
        name: q.name,
        created_by: q.user_id,
    };
    let boards = ctx.board_repo().find_all(&filter).await?;
    Ok(Json(boards.into_iter().map(Board::from).collect()))
}

#[utoipa::path(get, path = "/api/boards/count", tag = "Boards",
    responses((status = 200, body = CountResponse)))]
pub async fn count_boards(
    State(ctx): State<AppContext>,
    Query(q): Query<ListBoardsQuery>,
) -> Result<Json<CountResponse>, ApiError> {
    let filter = BoardFilter {
        name: q.name,
        created_by: q.user_id,
    };
    let count = ctx.board_repo().count(&filter).await?;
    Ok(Json(CountResponse { count }))
}

#[utoipa::path(get, path = "/api/boards/{id}", tag = "Boards",
    params(("id" = i32, Path, description = "Board id")),
    responses((status = 200, body = Board)))]
pub async fn get_board(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Result<Json<Board>, ApiError> {
    let board = ctx
        .board_repo()
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(board.into()))
}

#[utoipa::path(post, path = "/api/boards", tag = "Boards", request_body = CreateBoardRequest,
    responses((status = 200, body = Board)))]
pub async fn create_board(
    State(ctx): State<AppContext>,
    CurrentUser(actor): CurrentUser,
    Json(req): Json<CreateBoardRequest>,
) -> Result<Json<Board>, ApiError> {
    let repo = ctx.board_repo();
    let uc = CreateBoard {
        repo: repo.as_ref(),
    };
    let board = uc
        .execute(&NewBoard {
            name: req.name,
            background_color: req.background_color,
            text_color: req.text_color,
            created_by: req.created_by.unwrap_or(actor.id),
        })
        .await?;
    Ok(Json(board.into()))
}

#[utoipa::path(put, path = "/api/boards/{id}", tag = "Boards", request_body = UpdateBoardRequest,
    params(("id" = i32, Path, description = "Board id")),
    responses((status = 200, body = Board)))]
pub async fn update_board(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateBoardRequest>,
) -> Result<Json<Board>, ApiError> {
    let repo = ctx.board_repo();
    let mut board = repo.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    board.name = req.name;
    board.background_color = req.background_color;
    board.text_color = req.text_color;
    repo.update(&board).await?;
    Ok(Json(board.into()))
}

#[utoipa::path(patch, path = "/api/boards/{id}", tag = "Boards", request_body = PatchBoardRequest,
    params(("id" = i32, Path, description = "Board id")),
    responses((status = 200, body = Board)))]
pub async fn patch_board(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
    Json(req): Json<PatchBoardRequest>,
) -> Result<Response, ApiError> {
    let repo = ctx.board_repo();
    let uc = PatchBoard {
        repo: repo.as_ref(),
    };
    let patch = BoardPatch {
        id,
        name: req.name.clone(),
        background_color: req.background_color.clone(),
        text_color: req.text_color.clone(),
    };
    match uc.execute(&patch).await? {
        Some(board) => Ok(Json(Board::from(board)).into_response()),
        // no matching row: hand the partial input back untouched
        None => Ok(Json(PatchBoardEcho { id, fields: req }).into_response()),
    }
}

#[utoipa::path(delete, path = "/api/boards/{id}", tag = "Boards",
    params(("id" = i32, Path, description = "Board id")),
    responses((status = 200, body = DeleteResponse)))]
pub async fn delete_board(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let repo = ctx.board_repo();
    let uc = DeleteBoard {
        repo: repo.as_ref(),
    };
    let deleted = uc.execute(id).await?;
    Ok(Json(DeleteResponse { deleted }))
}
