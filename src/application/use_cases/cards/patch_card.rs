use crate::application::ports::card_repository::{CardPatch, CardRepository};
use crate::domain::cards::Card;

pub struct PatchCard<'a, R: CardRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: CardRepository + ?Sized> PatchCard<'a, R> {
    pub async fn execute(&self, patch: &CardPatch) -> anyhow::Result<Option<Card>> {
        let touched = self.repo.patch(patch).await?;
        if touched == 0 {
            return Ok(None);
        }
        self.repo.find_by_id(patch.id).await
    }
}
