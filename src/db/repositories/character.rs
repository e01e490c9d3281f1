use crate::entities::{characters, prelude::*, quotes};
use crate::models::{CharacterFilter, CharacterInput};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
    sea_query::{Expr, LikeExpr},
};

pub struct CharacterRepository {
    conn: DatabaseConnection,
}

impl CharacterRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    /// The search term is bound as a parameter with its wildcards escaped.
    /// `SQLite`'s LIKE already ignores ASCII case.
    pub async fn list(&self, filter: &CharacterFilter) -> Result<Vec<characters::Model>> {
        let mut query = Characters::find();

        if let Some(show_id) = filter.show_id {
            query = query.filter(characters::Column::ShowId.eq(show_id));
        }

        if let Some(term) = filter
            .search
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        {
            let pattern = substring_pattern(term);
            query = query.filter(
                Condition::any()
                    .add(
                        Expr::col(characters::Column::Name)
                            .like(LikeExpr::new(pattern.clone()).escape('\\')),
                    )
                    .add(
                        Expr::col(characters::Column::ActorName)
                            .like(LikeExpr::new(pattern).escape('\\')),
                    ),
            );
        }

        let rows = query
            .order_by_asc(characters::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<characters::Model>> {
        Ok(Characters::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn create(&self, input: &CharacterInput) -> Result<characters::Model> {
        let model = characters::ActiveModel {
            show_id: Set(input.show_id),
            name: Set(input.name.trim().to_string()),
            actor_name: Set(input.actor_name.clone()),
            bio: Set(input.bio.clone()),
            is_main_character: Set(input.is_main_character),
            status: Set(input.status.trim().to_string()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;
        Ok(model)
    }

    pub async fn update(
        &self,
        id: i32,
        input: &CharacterInput,
    ) -> Result<Option<characters::Model>> {
        let Some(existing) = Characters::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: characters::ActiveModel = existing.into();
        active.show_id = Set(input.show_id);
        active.name = Set(input.name.trim().to_string());
        active.actor_name = Set(input.actor_name.clone());
        active.bio = Set(input.bio.clone());
        active.is_main_character = Set(input.is_main_character);
        active.status = Set(input.status.trim().to_string());

        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        Quotes::delete_many()
            .filter(quotes::Column::CharacterId.eq(id))
            .exec(&txn)
            .await?;
        let result = Characters::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }
}

/// `%term%` with `\`, `%` and `_` escaped, so the term only matches itself.
fn substring_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_substring_pattern_escapes_wildcards() {
        assert_eq!(substring_pattern("white"), "%white%");
        assert_eq!(substring_pattern("_"), "%\\_%");
        assert_eq!(substring_pattern("100%"), "%100\\%%");
        assert_eq!(substring_pattern("a\\b"), "%a\\\\b%");
    }
}
