pub use sea_orm_migration::prelude::*;

mod m20250801_000001_create_marketplace_schema;

pub struct Migrator;

impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(
            m20250801_000001_create_marketplace_schema::Migration,
        )]
    }
}
