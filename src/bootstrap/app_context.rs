use std::sync::Arc;

use crate::application::ports::board_repository::BoardRepository;
use crate::application::ports::board_user_repository::BoardUserRepository;
use crate::application::ports::card_repository::CardRepository;
use crate::application::ports::list_repository::ListRepository;
use crate::application::ports::token_issuer::TokenIssuer;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

/// Explicitly passed store/context handle: every layer receives its
/// dependencies from here instead of reaching for process-wide state.
#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    board_repo: Arc<dyn BoardRepository>,
    board_user_repo: Arc<dyn BoardUserRepository>,
    list_repo: Arc<dyn ListRepository>,
    card_repo: Arc<dyn CardRepository>,
    token_issuer: Arc<dyn TokenIssuer>,
}

impl AppServices {
    pub fn new(
        user_repo: Arc<dyn UserRepository>,
        board_repo: Arc<dyn BoardRepository>,
        board_user_repo: Arc<dyn BoardUserRepository>,
        list_repo: Arc<dyn ListRepository>,
        card_repo: Arc<dyn CardRepository>,
        token_issuer: Arc<dyn TokenIssuer>,
    ) -> Self {
        Self {
            user_repo,
            board_repo,
            board_user_repo,
            list_repo,
            card_repo,
            token_issuer,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn board_repo(&self) -> Arc<dyn BoardRepository> {
        self.services.board_repo.clone()
    }

    pub fn board_user_repo(&self) -> Arc<dyn BoardUserRepository> {
        self.services.board_user_repo.clone()
    }

    pub fn list_repo(&self) -> Arc<dyn ListRepository> {
        self.services.list_repo.clone()
    }

    pub fn card_repo(&self) -> Arc<dyn CardRepository> {
        self.services.card_repo.clone()
    }

    pub fn token_issuer(&self) -> Arc<dyn TokenIssuer> {
        self.services.token_issuer.clone()
    }
}
