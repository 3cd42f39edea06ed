use crate::application::ports::list_repository::ListRepository;

pub struct DeleteList<'a, R: ListRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ListRepository + ?Sized> DeleteList<'a, R> {
    /// Cards of the list go with it, in the same unit of work.
    pub async fn execute(&self, id: i32) -> anyhow::Result<u64> {
        self.repo.delete(id).await
    }
}
