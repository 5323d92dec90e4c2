pub use sea_orm_migration::prelude::*;

mod m20260810_100000_charities;
mod m20260810_110000_resources;
mod m20260810_120000_resource_transit;
mod m20260815_090000_notifications;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260810_100000_charities::Migration),
            Box::new(m20260810_110000_resources::Migration),
            Box::new(m20260810_120000_resource_transit::Migration),
            Box::new(m20260815_090000_notifications::Migration),
        ]
    }
}
