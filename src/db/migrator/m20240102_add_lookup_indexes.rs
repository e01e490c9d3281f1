use crate::entities::{characters, episodes, prelude::*, quotes, seasons};
use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_seasons_show_id")
                    .table(Seasons)
                    .col(seasons::Column::ShowId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_episodes_season_id")
                    .table(Episodes)
                    .col(episodes::Column::SeasonId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_characters_show_id")
                    .table(Characters)
                    .col(characters::Column::ShowId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_quotes_character_id")
                    .table(Quotes)
                    .col(quotes::Column::CharacterId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_quotes_character_id",
            "idx_characters_show_id",
            "idx_episodes_season_id",
            "idx_seasons_show_id",
        ] {
            manager
                .drop_index(Index::drop().if_exists().name(name).to_owned())
                .await?;
        }

        Ok(())
    }
}
