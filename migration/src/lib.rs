pub use sea_orm_migration::prelude::*;

mod m20261001_000001_create_user_table;
mod m20261001_000002_create_map_table;
mod m20261001_000003_create_map_participant_table;
mod m20261001_000004_create_point_table;
mod m20261001_000005_create_notification_table;
mod m20261001_000006_create_route_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261001_000001_create_user_table::Migration),
            Box::new(m20261001_000002_create_map_table::Migration),
            Box::new(m20261001_000003_create_map_participant_table::Migration),
            Box::new(m20261001_000004_create_point_table::Migration),
            Box::new(m20261001_000005_create_notification_table::Migration),
            Box::new(m20261001_000006_create_route_table::Migration),
        ]
    }
}
