use axum::{
    Json, Router,
    extract::{Path, Query, State},
    middleware,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::ports::card_repository::{CardFilter, CardPatch, NewCard};
use crate::application::use_cases::cards::patch_card::PatchCard;
use crate::bootstrap::app_context::AppContext;
use crate::domain::cards as domain;
use crate::presentation::http::auth;
use crate::presentation::http::error::ApiError;
use crate::presentation::http::responses::{CountResponse, DeleteResponse};

#[derive(Debug, Serialize, ToSchema)]
pub struct Card {
    pub id: i32,
    pub name: String,
    pub list_id: i32,
    pub position: i32,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub description: Option<String>,
}

impl From<domain::Card> for Card {
    fn from(c: domain::Card) -> Self {
        Card {
            id: c.id,
            name: c.name,
            list_id: c.list_id,
            position: c.position,
            due_date: c.due_date,
            created_at: c.created_at,
            description: c.description,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateCardRequest {
    pub name: String,
    pub list_id: i32,
    pub position: i32,
    pub due_date: Option<DateTime<Utc>>,
    /// Store-assigned when absent.
    pub created_at: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCardRequest {
    pub name: String,
    pub list_id: i32,
    pub position: i32,
    pub due_date: Option<DateTime<Utc>>,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PatchCardRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub list_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Serialize)]
struct PatchCardEcho {
    id: i32,
    #[serde(flatten)]
    fields: PatchCardRequest,
}

#[derive(Debug, Deserialize)]
pub struct ListCardsQuery {
    pub list_id: Option<i32>,
    pub name: Option<String>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/api/cards", get(list_cards).post(create_card))
        .route("/api/cards/count", get(count_cards))
        .route(
            "/api/cards/:id",
            get(get_card)
                .put(update_card)
                .patch(patch_card)
                .delete(delete_card),
        )
        .route_layer(middleware::from_fn_with_state(
            ctx.clone(),
            auth::require_auth,
        ))
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/cards", tag = "Cards",
    params(
        ("list_id" = Option<i32>, Query, description = "Scope to one list"),
        ("name" = Option<String>, Query, description = "Filter by name")
    ),
    responses((status = 200, body = [Card])))]
pub async fn list_cards(
    State(ctx): State<AppContext>,
    Query(q): Query<ListCardsQuery>,
) -> Result<Json<Vec<Card>>, ApiError> {
    let filter = CardFilter {
        name: q.name,
        list_id: q.list_id,
    };
    let cards = ctx.card_repo().find_all(&filter).await?;
    Ok(Json(cards.into_iter().map(Card::from).collect()))
}

#[utoipa::path(get, path = "/api/cards/count", tag = "Cards",
    responses((status = 200, body = CountResponse)))]
pub async fn count_cards(State(ctx): State<AppContext>) -> Result<Json<CountResponse>, ApiError> {
    let count = ctx.card_repo().count(&CardFilter::default()).await?;
    Ok(Json(CountResponse { count }))
}

#[utoipa::path(get, path = "/api/cards/{id}", tag = "Cards",
    params(("id" = i32, Path, description = "Card id")),
    responses((status = 200, body = Card)))]
pub async fn get_card(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Result<Json<Card>, ApiError> {
    let card = ctx
        .card_repo()
        .find_by_id(id)
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(Json(card.into()))
}

#[utoipa::path(post, path = "/api/cards", tag = "Cards", request_body = CreateCardRequest,
    responses((status = 200, body = Card)))]
pub async fn create_card(
    State(ctx): State<AppContext>,
    Json(req): Json<CreateCardRequest>,
) -> Result<Json<Card>, ApiError> {
    let card = ctx
        .card_repo()
        .create(&NewCard {
            name: req.name,
            list_id: req.list_id,
            position: req.position,
            due_date: req.due_date,
            created_at: req.created_at,
            description: req.description,
        })
        .await?;
    Ok(Json(card.into()))
}

#[utoipa::path(put, path = "/api/cards/{id}", tag = "Cards", request_body = UpdateCardRequest,
    params(("id" = i32, Path, description = "Card id")),
    responses((status = 200, body = Card)))]
pub async fn update_card(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
    Json(req): Json<UpdateCardRequest>,
) -> Result<Json<Card>, ApiError> {
    let repo = ctx.card_repo();
    let mut card = repo.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
    card.name = req.name;
    card.list_id = req.list_id;
    card.position = req.position;
    card.due_date = req.due_date;
    card.description = req.description;
    repo.update(&card).await?;
    Ok(Json(card.into()))
}

#[utoipa::path(patch, path = "/api/cards/{id}", tag = "Cards", request_body = PatchCardRequest,
    params(("id" = i32, Path, description = "Card id")),
    responses((status = 200, body = Card)))]
pub async fn patch_card(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
    Json(req): Json<PatchCardRequest>,
) -> Result<Response, ApiError> {
    let repo = ctx.card_repo();
    let uc = PatchCard {
        repo: repo.as_ref(),
    };
    let patch = CardPatch {
        id,
        name: req.name.clone(),
        list_id: req.list_id,
        position: req.position,
        due_date: req.due_date,
        description: req.description.clone(),
    };
    match uc.execute(&patch).await? {
        Some(card) => Ok(Json(Card::from(card)).into_response()),
        None => Ok(Json(PatchCardEcho { id, fields: req }).into_response()),
    }
}

#[utoipa::path(delete, path = "/api/cards/{id}", tag = "Cards",
    params(("id" = i32, Path, description = "Card id")),
    responses((status = 200, body = DeleteResponse)))]
pub async fn delete_card(
    State(ctx): State<AppContext>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let deleted = ctx.card_repo().delete(id).await?;
    Ok(Json(DeleteResponse { deleted }))
}
