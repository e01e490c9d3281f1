use crate::entities::{characters, episodes, prelude::*, quotes, seasons, shows};
use crate::models::ShowInput;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use tracing::info;

pub struct ShowRepository {
    conn: DatabaseConnection,
}

impl ShowRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn list(&self) -> Result<Vec<shows::Model>> {
        let rows = Shows::find()
            .order_by_asc(shows::Column::Id)
            .all(&self.conn)
            .await?;
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Option<shows::Model>> {
        Ok(Shows::find_by_id(id).one(&self.conn).await?)
    }

    pub async fn exists(&self, id: i32) -> Result<bool> {
        let count = Shows::find()
            .filter(shows::Column::Id.eq(id))
            .count(&self.conn)
            .await?;
        Ok(count > 0)
    }

    pub async fn count(&self) -> Result<u64> {
        Ok(Shows::find().count(&self.conn).await?)
    }

    pub async fn create(&self, input: &ShowInput) -> Result<shows::Model> {
        let model = shows::ActiveModel {
            title: Set(input.title.trim().to_string()),
            description: Set(input.description.clone()),
            genre: Set(input.genre.clone()),
            start_year: Set(input.start_year),
            end_year: Set(input.end_year),
            network: Set(input.network.clone()),
            ..Default::default()
        }
        .insert(&self.conn)
        .await?;

        info!(show_id = model.id, "Created show: {}", model.title);
        Ok(model)
    }

    pub async fn update(&self, id: i32, input: &ShowInput) -> Result<Option<shows::Model>> {
        let Some(existing) = Shows::find_by_id(id).one(&self.conn).await? else {
            return Ok(None);
        };

        let mut active: shows::ActiveModel = existing.into();
        active.title = Set(input.title.trim().to_string());
        active.description = Set(input.description.clone());
        active.genre = Set(input.genre.clone());
        active.start_year = Set(input.start_year);
        active.end_year = Set(input.end_year);
        active.network = Set(input.network.clone());

        Ok(Some(active.update(&self.conn).await?))
    }

    /// Removes the show together with everything that hangs off it.
    pub async fn delete(&self, id: i32) -> Result<bool> {
        let txn = self.conn.begin().await?;

        Quotes::delete_many()
            .filter(quotes::Column::ShowId.eq(id))
            .exec(&txn)
            .await?;
        Characters::delete_many()
            .filter(characters::Column::ShowId.eq(id))
            .exec(&txn)
            .await?;
        Episodes::delete_many()
            .filter(episodes::Column::ShowId.eq(id))
            .exec(&txn)
            .await?;
        Seasons::delete_many()
            .filter(seasons::Column::ShowId.eq(id))
            .exec(&txn)
            .await?;

        let result = Shows::delete_by_id(id).exec(&txn).await?;
        txn.commit().await?;

        if result.rows_affected > 0 {
            info!(show_id = id, "Deleted show and its dependents");
        }
        Ok(result.rows_affected > 0)
    }
}
