pub mod board_repository_sqlx;
pub mod board_user_repository_sqlx;
pub mod card_repository_sqlx;
pub mod list_repository_sqlx;
pub mod user_repository_sqlx;
