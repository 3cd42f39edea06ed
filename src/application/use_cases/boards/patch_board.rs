use crate::application::ports::board_repository::{BoardPatch, BoardRepository};
use crate::domain::boards::Board;

pub struct PatchBoard<'a, R: BoardRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: BoardRepository + ?Sized> PatchBoard<'a, R> {
    /// Writes the supplied fields and re-fetches the row. `None` means no
    /// row matched: the caller echoes its partial input back unchanged.
    pub async fn execute(&self, patch: &BoardPatch) -> anyhow::Result<Option<Board>> {
        let touched = self.repo.patch(patch).await?;
        if touched == 0 {
            return Ok(None);
        }
        self.repo.find_by_id(patch.id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    use crate::application::ports::board_repository::{BoardFilter, NewBoard};

    struct MemoryBoardRepo {
        rows: Mutex<Vec<Board>>,
    }

    #[async_trait]
    impl BoardRepository for MemoryBoardRepo {
        async fn find_all(&self, _filter: &BoardFilter) -> anyhow::Result<Vec<Board>> {
            Ok(self.rows.lock().unwrap().clone())
        }
        async fn count(&self, _filter: &BoardFilter) -> anyhow::Result<i64> {
            Ok(self.rows.lock().unwrap().len() as i64)
        }
        async fn find_by_id(&self, id: i32) -> anyhow::Result<Option<Board>> {
            Ok(self.rows.lock().unwrap().iter().find(|b| b.id == id).cloned())
        }
        async fn create(&self, _new: &NewBoard) -> anyhow::Result<Board> {
            unimplemented!()
        }
        async fn update(&self, _board: &Board) -> anyhow::Result<()> {
            Ok(())
        }
        async fn patch(&self, patch: &BoardPatch) -> anyhow::Result<u64> {
            let mut rows = self.rows.lock().unwrap();
            match rows.iter_mut().find(|b| b.id == patch.id) {
                Some(row) => {
                    if let Some(name) = &patch.name {
                        row.name = name.clone();
                    }
                    if let Some(bg) = &patch.background_color {
                        row.background_color = Some(bg.clone());
                    }
                    if let Some(fg) = &patch.text_color {
                        row.text_color = Some(fg.clone());
                    }
                    Ok(1)
                }
                None => Ok(0),
            }
        }
        async fn delete(&self, _id: i32) -> anyhow::Result<u64> {
            Ok(0)
        }
    }

    fn seeded() -> MemoryBoardRepo {
        MemoryBoardRepo {
            rows: Mutex::new(vec![Board {
                id: 4,
                name: "Sprint".into(),
                background_color: Some("#fff".into()),
                text_color: Some("#000".into()),
                created_by: 1,
            }]),
        }
    }

    #[tokio::test]
    async fn returns_the_refetched_row_when_matched() {
        let repo = seeded();
        let out = PatchBoard { repo: &repo }
            .execute(&BoardPatch {
                id: 4,
                name: Some("Sprint 2".into()),
                ..Default::default()
            })
            .await
            .unwrap()
            .expect("row matched");
        assert_eq!(out.name, "Sprint 2");
        // untouched fields survive
        assert_eq!(out.background_color.as_deref(), Some("#fff"));
    }

    #[tokio::test]
    async fn missing_id_touches_nothing_and_yields_none() {
        let repo = seeded();
        let out = PatchBoard { repo: &repo }
            .execute(&BoardPatch {
                id: 99,
                name: Some("ghost".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(out.is_none());
        assert_eq!(repo.rows.lock().unwrap().len(), 1);
        assert_eq!(repo.rows.lock().unwrap()[0].name, "Sprint");
    }
}
