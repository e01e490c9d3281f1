use crate::entities::{prelude::*, quotes};
use crate::models::{QuoteFilter, QuoteInput};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, sea_query::Expr,
};

pub struct QuoteRepository {
    conn: DatabaseConnection,
}

impl QuoteRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, filter: &QuoteFilter) -> Result<Vec<quotes::Model>> {
        let mut query = Quotes::find();

        if let Some(show_id) = filter.show_id {
            query = query.filter(quotes::Column::ShowId.eq(show_id));
        }
        if let Some(character_id) = filter.character_id {
            query = query.filter(quotes::Column::CharacterId.eq(character_id));
        }
        if let Some(episode_id) = filter.episode_id {
            query = query.filter(quotes::Column::EpisodeId.eq(episode_id));
        }
        if let Some(famous) = filter.famous {
            query = query.filter(quotes::Column::IsFamous.eq(famous));
        }

        let rows = query
            .order_by_asc(quotes::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<quotes::Model>> {
        Ok(Quotes::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn count_for_episode(&self, episode_id: i32) -> Result<u64> {
        Ok(Quotes::find()
            .filter(quotes::Column::EpisodeId.eq(episode_id))
            .count(&self.conn)
            .await?)
    }

    pub async fn count_for_character(&self, character_id: i32) -> Result<u64> {
        Ok(Quotes::find()
            .filter(quotes::Column::CharacterId.eq(character_id))
            .count(&self.conn)
            .await?)
    }

    pub async fn create(&self, input: &QuoteInput) -> Result<quotes::Model> {
        let model = quotes::ActiveModel {
            show_id: Set(input.show_id),
            character_id: Set(input.character_id),
            episode_id: Set(input.episode_id),
            quote_text: Set(input.quote_text.trim().to_string()),
            is_famous: Set(input.is_famous),
            likes: Set(0),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;
        Ok(model)
    }

    /// Replaces the writable fields; `likes` is left untouched.
    pub async fn update(&self, id: i32, input: &QuoteInput) -> Result<Option<quotes::Model>> {
        let Some(existing) = Quotes::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: quotes::ActiveModel = existing.into();
        active.show_id = Set(input.show_id);
        active.character_id = Set(input.character_id);
        active.episode_id = Set(input.episode_id);
        active.quote_text = Set(input.quote_text.trim().to_string());
        active.is_famous = Set(input.is_famous);

        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let result = Quotes::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    /// Single-statement increment, so concurrent likes never lose updates.
    pub async fn like(&self, id: i32) -> Result<Option<quotes::Model>> {
        let result = Quotes::update_many()
            .col_expr(
                quotes::Column::Likes,
                Expr::col(quotes::Column::Likes).add(1),
            )
            .filter(quotes::Column::Id.eq(id))
            .exec(&self.conn)
            .await?;

        if result.rows_affected == 0 {
            return Ok(None);
        }

        self.get(id).await
    }
}
