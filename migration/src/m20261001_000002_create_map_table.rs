use sea_orm_migration::{prelude::*, schema::*};

use super::m20261001_000001_create_user_table::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Map::Table)
                    .if_not_exists()
                    .col(pk_auto(Map::Id))
                    .col(string(Map::Name))
                    .col(string(Map::MapType))
                    .col(integer(Map::CreatorId))
                    .col(
                        timestamp_with_time_zone(Map::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_map_creator_id")
                            .from(Map::Table, Map::CreatorId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Map::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Map {
    Table,
    Id,
    Name,
    MapType,
    CreatorId,
    CreatedAt,
}
