use crate::application::ports::board_repository::{BoardRepository, NewBoard};
use crate::domain::boards::Board;

pub struct CreateBoard<'a, R: BoardRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BoardRepository + ?Sized> CreateBoard<'a, R> {
    /// The repository writes the board and its owner membership as one unit
    /// of work; the creator comes back as role `owner`, unstarred.
    pub async fn execute(&self, new: &NewBoard) -> anyhow::Result<Board> {
        self.repo.create(new).await
    }
}
