use crate::application::ports::list_repository::{ListPatch, ListRepository};
use crate::domain::lists::List;

pub struct PatchList<'a, R: ListRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: ListRepository + ?Sized> PatchList<'a, R> {
    /// Same contract as board patching: `None` means the id matched no row
    /// and the store is untouched.
    pub async fn execute(&self, patch: &ListPatch) -> anyhow::Result<Option<List>> {
        let touched = self.repo.patch(patch).await?;
        if touched == 0 {
            return Ok(None);
        }
        self.repo.find_by_id(patch.id).await
    }
}
