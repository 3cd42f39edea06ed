use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::extract::{DefaultBodyLimit, MatchedPath};
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

use taskboard_api::bootstrap::app_context::{AppContext, AppServices};
use taskboard_api::bootstrap::config::Config;
use taskboard_api::infrastructure::crypto::JwtTokenIssuer;
use taskboard_api::presentation::http::error::not_found_response;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        taskboard_api::presentation::http::users::list_users,
        taskboard_api::presentation::http::users::count_users,
        taskboard_api::presentation::http::users::get_user,
        taskboard_api::presentation::http::users::register,
        taskboard_api::presentation::http::users::login,
        taskboard_api::presentation::http::users::update_user,
        taskboard_api::presentation::http::users::change_password,
        taskboard_api::presentation::http::users::delete_user,
        taskboard_api::presentation::http::boards::list_boards,
        taskboard_api::presentation::http::boards::count_boards,
        taskboard_api::presentation::http::boards::get_board,
        taskboard_api::presentation::http::boards::create_board,
        taskboard_api::presentation::http::boards::update_board,
        taskboard_api::presentation::http::boards::patch_board,
        taskboard_api::presentation::http::boards::delete_board,
        taskboard_api::presentation::http::board_users::list_memberships,
        taskboard_api::presentation::http::board_users::count_memberships,
        taskboard_api::presentation::http::board_users::create_membership,
        taskboard_api::presentation::http::board_users::update_membership,
        taskboard_api::presentation::http::board_users::delete_membership,
        taskboard_api::presentation::http::lists::list_lists,
        taskboard_api::presentation::http::lists::count_lists,
        taskboard_api::presentation::http::lists::get_list,
        taskboard_api::presentation::http::lists::create_list,
        taskboard_api::presentation::http::lists::update_list,
        taskboard_api::presentation::http::lists::patch_list,
        taskboard_api::presentation::http::lists::delete_list,
        taskboard_api::presentation::http::cards::list_cards,
        taskboard_api::presentation::http::cards::count_cards,
        taskboard_api::presentation::http::cards::get_card,
        taskboard_api::presentation::http::cards::create_card,
        taskboard_api::presentation::http::cards::update_card,
        taskboard_api::presentation::http::cards::patch_card,
        taskboard_api::presentation::http::cards::delete_card,
        taskboard_api::presentation::http::health::health,
    ),
    components(schemas(
        taskboard_api::presentation::http::users::User,
        taskboard_api::presentation::http::users::RegisterRequest,
        taskboard_api::presentation::http::users::LoginRequest,
        taskboard_api::presentation::http::users::UpdateUserRequest,
        taskboard_api::presentation::http::users::ChangePasswordRequest,
        taskboard_api::presentation::http::boards::Board,
        taskboard_api::presentation::http::boards::CreateBoardRequest,
        taskboard_api::presentation::http::boards::UpdateBoardRequest,
        taskboard_api::presentation::http::boards::PatchBoardRequest,
        taskboard_api::presentation::http::board_users::BoardUser,
        taskboard_api::presentation::http::board_users::MembershipRequest,
        taskboard_api::presentation::http::lists::List,
        taskboard_api::presentation::http::lists::CreateListRequest,
        taskboard_api::presentation::http::lists::UpdateListRequest,
        taskboard_api::presentation::http::lists::PatchListRequest,
        taskboard_api::presentation::http::cards::Card,
        taskboard_api::presentation::http::cards::CreateCardRequest,
        taskboard_api::presentation::http::cards::UpdateCardRequest,
        taskboard_api::presentation::http::cards::PatchCardRequest,
        taskboard_api::presentation::http::responses::CountResponse,
        taskboard_api::presentation::http::responses::DeleteResponse,
        taskboard_api::presentation::http::health::HealthResponse,
    )),
    tags(
        (name = "Users", description = "Registration, sessions and profiles"),
        (name = "Boards", description = "Board management"),
        (name = "BoardUsers", description = "Board membership and roles"),
        (name = "Lists", description = "Lists within a board"),
        (name = "Cards", description = "Cards within a list"),
        (name = "Health", description = "System health checks")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "taskboard_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting taskboard backend");

    // Database
    let pool = taskboard_api::infrastructure::db::connect_pool(
        &cfg.database_url,
        cfg.db_max_connections,
    )
    .await?;
    taskboard_api::infrastructure::db::run_migrations(&pool).await?;

    let token_issuer = Arc::new(JwtTokenIssuer::new(
        cfg.jwt_secret.clone(),
        cfg.jwt_expires_secs,
    ));
    let user_repo = Arc::new(
        taskboard_api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository::new(
            pool.clone(),
            token_issuer.clone(),
        ),
    );
    let board_repo = Arc::new(
        taskboard_api::infrastructure::db::repositories::board_repository_sqlx::SqlxBoardRepository::new(
            pool.clone(),
        ),
    );
    let board_user_repo = Arc::new(
        taskboard_api::infrastructure::db::repositories::board_user_repository_sqlx::SqlxBoardUserRepository::new(
            pool.clone(),
        ),
    );
    let list_repo = Arc::new(
        taskboard_api::infrastructure::db::repositories::list_repository_sqlx::SqlxListRepository::new(
            pool.clone(),
        ),
    );
    let card_repo = Arc::new(
        taskboard_api::infrastructure::db::repositories::card_repository_sqlx::SqlxCardRepository::new(
            pool.clone(),
        ),
    );

    let services = AppServices::new(
        user_repo,
        board_repo,
        board_user_repo,
        list_repo,
        card_repo,
        token_issuer,
    );
    let ctx = AppContext::new(cfg.clone(), services);

    // Build CORS
    let cors = match cfg
        .frontend_url
        .as_deref()
        .and_then(|o| HeaderValue::from_str(o).ok())
    {
        Some(origin) => CorsLayer::new().allow_origin(origin),
        None if cfg.is_production => {
            // FRONTEND_URL unset in production: deny cross-origin callers
            CorsLayer::new().allow_origin(AllowOrigin::exact(HeaderValue::from_static(
                "http://invalid",
            )))
        }
        None => CorsLayer::new().allow_origin(AllowOrigin::mirror_request()),
    }
    .allow_methods([
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::PATCH,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ])
    .allow_headers([http::header::CONTENT_TYPE, http::header::AUTHORIZATION]);

    let app = Router::new()
        .nest(
            "/api",
            taskboard_api::presentation::http::health::routes(pool.clone()),
        )
        .merge(taskboard_api::presentation::http::users::routes(ctx.clone()))
        .merge(taskboard_api::presentation::http::boards::routes(ctx.clone()))
        .merge(taskboard_api::presentation::http::board_users::routes(
            ctx.clone(),
        ))
        .merge(taskboard_api::presentation::http::lists::routes(ctx.clone()))
        .merge(taskboard_api::presentation::http::cards::routes(ctx.clone()))
        .nest_service("/public", ServeDir::new(&cfg.public_dir))
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .fallback(|| async { not_found_response() })
        .layer(cors)
        .layer(DefaultBodyLimit::max(cfg.body_limit_bytes))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;
    Ok(())
}
