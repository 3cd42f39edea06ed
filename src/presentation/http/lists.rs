use axum::{
    Json, Router,
    extract::{Path, Query, State},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::list_repository::{ListFilter, ListPatch, NewList};
use crate::application::use_cases::lists::delete_list::DeleteList;
use crate::application::use_cases::lists::patch_list::PatchList;
use crate::bootstrap::app_context::AppContext;
use crate::domain::lists as domain;
use crate::presentation::http::auth;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::responses::{CountResponse, DeleteResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct List {
    pub id: i32,
    pub name: String,
    pub board_id: i32,
    pub position: i32,
}

impl From<domain::List> for List {
    fn from(l: domain::List) -> Self {
        List {
            id: l.id,
            name: l.name,
            board_id: l.board_id,
            position: l.position,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateListRequest {
    pub name: String,
    pub board_id: i32,
    pub position: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateListRequest {
    pub name: String,
    pub board_id: i32,
    pub position: i32,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PatchListRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
}

#[derive(Debug, Serialize)]
struct PatchListEcho {
    id: i32,
    #[serde(flatten)]
    fields: PatchListRequest,
}

#[derive(Debug, Deserialize)]
pub struct ListListsQuery {
    pub board_id: Option<i32>,
    pub name: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/api/lists", get(list_lists).post(create_list))
        .route("/api/lists/count", get(count_lists))
        .route(
            "/api/lists/:id",
            get(get_list)
                .put(update_list)
                .patch(patch_list)
                .delete(delete_list),
        )
        .route_layer(middleware::from_fn_with_state(
            ctx.clone(),
            auth::require_auth,
        ))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/lists", tag = "Lists",
    params(
        ("board_id" = Option<i32>, Query, description = "Scope to one board"),
        ("name" = Option<String>, Query, description = "Filter by name")
    ),
    responses((status = 200, body = [List])))]
pub async fn list_lists(
    State(ctx): State<AppContext>,
    Query(q): Query<ListListsQuery>,
) -> Result<Json<Vec<List>>, ApiError> {
    let filter = ListFilter {
        name: q.name,
        board_id: q.board_id,
    };
    let lists = ctx.list_repo().find_all(&filter).await?;
    Ok(Json(lists.into_iter().map(List::from).collect()))
}

#[utoipa::path(get, path = "/api/lists/count", tag = "Lists",
    responses((status = 200, body = CountResponse)))]
pub async fn count_lists(State(ctx): State<AppContext>) -> Result<Json<CountResponse>, ApiError> {
    let count = ctx.list_repo().count(&ListFilter::default()).await?;
    Ok(Json(CountResponse { count }))
}

#[utoipa::path(get, path = "/api/lists/{id}", tag = "Lists",
    params(("id" = i32, Path, description = "List id")),
    responses((status = 200, body = List)))]
pub async fn get_list(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Result<Json<List>, ApiError> {
    let list = ctx
        .list_repo()
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(list.into()))
}

#[utoipa::path(post, path = "/api/lists", tag = "Lists", request_body = CreateListRequest,
    responses((status = 200, body = List)))]
pub async fn create_list(
    State(ctx): State<AppContext>,
    Json(req): Json<CreateListRequest>,
) -> Result<Json<List>, ApiError> {
    // No parent existence check here: the store's foreign key has the
    // final word on a dangling board_id.
    let list = ctx
        .list_repo()
        .create(&NewList {
            name: req.name,
            board_id: req.board_id,
            position: req.position,
        })
        .await?;
    Ok(Json(list.into()))
}

#[utoipa::path(put, path = "/api/lists/{id}", tag = "Lists", request_body = UpdateListRequest,
    params(("id" = i32, Path, description = "List id")),
    responses((status = 200, body = List)))]
pub async fn update_list(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateListRequest>,
) -> Result<Json<List>, ApiError> {
    let list = domain::List {
        id,
        name: req.name,
        board_id: req.board_id,
        position: req.position,
    };
    ctx.list_repo().update(&list).await?;
    Ok(Json(list.into()))
}

#[utoipa::path(patch, path = "/api/lists/{id}", tag = "Lists", request_body = PatchListRequest,
    params(("id" = i32, Path, description = "List id")),
    responses((status = 200, body = List)))]
pub async fn patch_list(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
    Json(req): Json<PatchListRequest>,
) -> Result<Response, ApiError> {
    let repo = ctx.list_repo();
    let uc = PatchList {
        repo: repo.as_ref(),
    };
    let patch = ListPatch {
        id,
        name: req.name.clone(),
        board_id: req.board_id,
        position: req.position,
    };
    match uc.execute(&patch).await? {
        Some(list) => Ok(Json(List::from(list)).into_response()),
        None => Ok(Json(PatchListEcho { id, fields: req }).into_response()),
    }
}

#[utoipa::path(delete, path = "/api/lists/{id}", tag = "Lists",
    params(("id" = i32, Path, description = "List id")),
    responses((status = 200, body = DeleteResponse)))]
pub async fn delete_list(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let repo = ctx.list_repo();
    let uc = DeleteList {
        repo: repo.as_ref(),
    };
    let deleted = uc.execute(id).await?;
    Ok(Json(DeleteResponse { deleted }))
}
