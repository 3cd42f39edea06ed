use sqlx::{Postgres, QueryBuilder};

/// Equality-AND filter clause over a fixed set of typed columns. Every
/// value travels as a bind parameter; absent fields contribute nothing.
pub struct EqFilter<'qb, 'args> {
    qb: &'qb mut QueryBuilder<'args, Postgres>,
    any: bool,
}

impl<'qb, 'args> EqFilter<'qb, 'args> {
    pub fn new(qb: &'qb mut QueryBuilder<'args, Postgres>) -> Self {
        Self { qb, any: false }
    }

    pub fn eq<T>(&mut self, column: &str, value: Option<T>) -> &mut Self
    where
        T: 'args + sqlx::Encode<'args, Postgres> + sqlx::Type<Postgres>,
    {
        if let Some(v) = value {
            self.qb.push(if self.any { " AND " } else { " WHERE " });
            self.qb.push(column);
            self.qb.push(" = ");
            self.qb.push_bind(v);
            self.any = true;
        }
        self
    }
}

/// Comma-separated `column = $n` assignment list for partial updates.
pub struct SetList<'qb, 'args> {
    qb: &'qb mut QueryBuilder<'args, Postgres>,
    any: bool,
}

impl<'qb, 'args> SetList<'qb, 'args> {
    pub fn new(qb: &'qb mut QueryBuilder<'args, Postgres>) -> Self {
        Self { qb, any: false }
    }

    pub fn set<T>(&mut self, column: &str, value: Option<T>) -> &mut Self
    where
        T: 'args + sqlx::Encode<'args, Postgres> + sqlx::Type<Postgres>,
    {
        if let Some(v) = value {
            if self.any {
                self.qb.push(", ");
            }
            self.qb.push(column);
            self.qb.push(" = ");
            self.qb.push_bind(v);
            self.any = true;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        !self.any
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_adds_no_clause() {
        let mut qb = QueryBuilder::new("SELECT id FROM lists");
        EqFilter::new(&mut qb).eq::<i32>("board_id", None);
        assert_eq!(qb.sql(), "SELECT id FROM lists");
    }

    #[test]
    fn fields_chain_with_and() {
        let mut qb = QueryBuilder::new("SELECT id FROM board_users");
        EqFilter::new(&mut qb)
            .eq("board_id", Some(5))
            .eq::<i32>("user_id", None)
            .eq("role", Some("owner"))
            .eq("starred", Some(true));
        assert_eq!(
            qb.sql(),
            "SELECT id FROM board_users WHERE board_id = $1 AND role = $2 AND starred = $3"
        );
    }

    #[test]
    fn set_list_joins_with_commas() {
        let mut qb = QueryBuilder::new("UPDATE cards SET ");
        let mut sets = SetList::new(&mut qb);
        sets.set("name", Some("Task"))
            .set::<i32>("list_id", None)
            .set("position", Some(3));
        assert!(!sets.is_empty());
        qb.push(" WHERE id = ").push_bind(9);
        assert_eq!(
            qb.sql(),
            "UPDATE cards SET name = $1, position = $2 WHERE id = $3"
        );
    }

    #[test]
    fn set_list_reports_empty_patch() {
        let mut qb = QueryBuilder::new("UPDATE cards SET ");
        let sets = SetList::new(&mut qb);
        assert!(sets.is_empty());
    }
}
