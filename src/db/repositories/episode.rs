use crate::entities::{episodes, prelude::*, quotes};
use crate::models::{EpisodeFilter, EpisodeInput};
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

pub struct EpisodeRepository {
    conn: DatabaseConnection,
}

impl EpisodeRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self, filter: &EpisodeFilter) -> Result<Vec<episodes::Model>> {
        let mut query = Episodes::find();

        if let Some(show_id) = filter.show_id {
            query = query.filter(episodes::Column::ShowId.eq(show_id));
        }
        if let Some(season_id) = filter.season_id {
            query = query.filter(episodes::Column::SeasonId.eq(season_id));
        }

        let rows = query
            .order_by_asc(episodes::Column::SeasonId)
            .order_by_asc(episodes::Column::EpisodeNumber)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<episodes::Model>> {
        Ok(Episodes::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn count_in_season(&self, season_id: i32) -> Result<u64> {
        Ok(Episodes::find()
            .filter(episodes::Column::SeasonId.eq(season_id))
            .count(&self.conn)
            .await?)
    }

    pub async fn create(&self, input: &EpisodeInput) -> Result<episodes::Model> {
        let model = episodes::ActiveModel {
            show_id: Set(input.show_id),
            season_id: Set(input.season_id),
            episode_number: Set(input.episode_number),
            title: Set(input.title.trim().to_string()),
            description: Set(input.description.clone()),
            runtime_minutes: Set(input.runtime_minutes),
            air_date: Set(input.air_date),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;
        Ok(model)
    }

    pub async fn update(&self, id: i32, input: &EpisodeInput) -> Result<Option<episodes::Model>> {
        let Some(existing) = Episodes::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: episodes::ActiveModel = existing.into();
        active.show_id = Set(input.show_id);
        active.season_id = Set(input.season_id);
        active.episode_number = Set(input.episode_number);
        active.title = Set(input.title.trim().to_string());
        active.description = Set(input.description.clone());
        active.runtime_minutes = Set(input.runtime_minutes);
        active.air_date = Set(input.air_date);

        Ok(Some(active.update(&self.conn).await?))
    }

    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        Quotes::delete_many()
            .filter(quotes::Column::EpisodeId.eq(id))
            .exec(&txn)
            .await?;
        let result = Episodes::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;
        Ok(result.rows_affected > 0)
    }
}
