pub mod board_repository;
pub mod board_user_repository;
pub mod card_repository;
pub mod list_repository;
pub mod token_issuer;
pub mod user_repository;
