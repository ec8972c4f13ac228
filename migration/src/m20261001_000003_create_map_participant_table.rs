use sea_orm_migration::{prelude::*, schema::*};

use super::{m20261001_000001_create_user_table::User, m20261001_000002_create_map_table::Map};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MapParticipant::Table)
                    .if_not_exists()
                    .col(pk_auto(MapParticipant::Id))
                    .col(integer(MapParticipant::MapId))
                    .col(integer(MapParticipant::UserId))
                    .col(string(MapParticipant::Role))
                    .col(string(MapParticipant::AssignedColor))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_map_participant_map_id")
                            .from(MapParticipant::Table, MapParticipant::MapId)
                            .to(Map::Table, Map::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_map_participant_user_id")
                            .from(MapParticipant::Table, MapParticipant::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_map_participant_map_user")
                    .table(MapParticipant::Table)
                    .col(MapParticipant::MapId)
                    .col(MapParticipant::UserId)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(MapParticipant::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum MapParticipant {
    Table,
    Id,
    MapId,
    UserId,
    Role,
    AssignedColor,
}
