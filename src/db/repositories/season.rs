use crate::entities::{episodes, prelude::*, quotes, seasons};
use crate::models::{SeasonFilter, SeasonInput};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

pub struct SeasonRepository {
    conn: DatabaseConnection,
}

impl SeasonRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, filter: &SeasonFilter) -> Result<Vec<seasons::Model>> {
        let mut query = Seasons::find();

        if let Some(show_id) = filter.show_id {
            query = query.filter(seasons::Column::ShowId.eq(show_id));
        }

        let rows = query
            .order_by_asc(seasons::Column::ShowId)
            .order_by_asc(seasons::Column::SeasonNumber)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<seasons::Model>> {
        Ok(Seasons::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn create(&self, input: &SeasonInput) -> Result<seasons::Model> {
        let model = seasons::ActiveModel {
            show_id: Set(input.show_id),
            season_number: Set(input.season_number),
            title: Set(input.title.trim().to_string()),
            episode_count: Set(input.episode_count),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;
        Ok(model)
    }

    pub async fn update(&self, id: i32, input: &SeasonInput) -> Result<Option<seasons::Model>> {
        let Some(existing) = Seasons::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: seasons::ActiveModel = existing.into();
        active.show_id = Set(input.show_id);
        active.season_number = Set(input.season_number);
        active.title = Set(input.title.trim().to_string());
        active.episode_count = Set(input.episode_count);

        Ok(Some(active.update(&self.conn).await?))
    }

    /// Removes the season, its episodes and the quotes pointing at them.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        let episode_ids: Vec<i32> = Episodes::find()
            .select_only()
            .column(episodes::Column::Id)
            .filter(episodes::Column::SeasonId.eq(id))
            .into_tuple()
            .all(&txn)
            .await?;

        if !episode_ids.is_empty() {
            Quotes::delete_many()
                .filter(quotes::Column::EpisodeId.is_in(episode_ids))
                .exec(&txn)
                .await?;
        }

        Episodes::delete_many()
            .filter(episodes::Column::SeasonId.eq(id))
            .exec(&txn)
            .await?;

        let result = Seasons::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }
}
