use crate::entities::prelude::*;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{EntityTrait, Schema};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let schema = Schema::new(manager.get_database_backend());

        create_from_entity(manager, &schema, Shows).await?;
        create_from_entity(manager, &schema, Seasons).await?;
        create_from_entity(manager, &schema, Episodes).await?;
        create_from_entity(manager, &schema, Characters).await?;
        create_from_entity(manager, &schema, Quotes).await?;
        create_from_entity(manager, &schema, Users).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Users).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Quotes).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Characters).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Episodes).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Seasons).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Shows).to_owned())
            .await?;

        Ok(())
    }
}

async fn create_from_entity<E: EntityTrait>(
    manager: &SchemaManager<'_>,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr> {
    manager
        .create_table(
            schema
                .create_table_from_entity(entity)
                .if_not_exists()
                .to_owned(),
        )
        .await
}
