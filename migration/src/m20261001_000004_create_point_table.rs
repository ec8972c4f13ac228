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
                    .table(Point::Table)
                    .if_not_exists()
                    .col(pk_auto(Point::Id))
                    .col(integer(Point::MapId))
                    .col(integer(Point::UserId))
                    .col(double(Point::Latitude))
                    .col(double(Point::Longitude))
                    .col(string_null(Point::City))
                    .col(string_null(Point::Region))
                    .col(string_null(Point::Country))
                    .col(string_null(Point::Continent))
                    .col(string_null(Point::Category))
                    .col(text_null(Point::Description))
                    .col(
                        timestamp_with_time_zone(Point::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(timestamp_with_time_zone_null(Point::HiddenAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_point_map_id")
                            .from(Point::Table, Point::MapId)
                            .to(Map::Table, Map::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_point_user_id")
                            .from(Point::Table, Point::UserId)
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
                    .name("idx_point_user_hidden")
                    .table(Point::Table)
                    .col(Point::UserId)
                    .col(Point::HiddenAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Point::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Point {
    Table,
    Id,
    MapId,
    UserId,
    Latitude,
    Longitude,
    City,
    Region,
    Country,
    Continent,
    Category,
    Description,
    CreatedAt,
    HiddenAt,
}
