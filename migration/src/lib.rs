pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_catalog_tables;
mod m20240101_000002_create_fan_page_tables;
mod m20240115_000001_create_release_links;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_catalog_tables::Migration),
            Box::new(m20240101_000002_create_fan_page_tables::Migration),
            Box::new(m20240115_000001_create_release_links::Migration),
        ]
    }
}
