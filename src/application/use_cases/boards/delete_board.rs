use crate::application::ports::board_repository::BoardRepository;

pub struct DeleteBoard<'a, R: BoardRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BoardRepository + ?Sized> DeleteBoard<'a, R> {
    /// Cascades through memberships, lists and cards; no descendant row
    /// survives the board.
    pub async fn execute(&self, id: i32) -> anyhow::Result<u64> {
        self.repo.delete(id).await
    }
}
