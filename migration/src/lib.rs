pub use sea_orm_migration::prelude::*;

pub mod entities;
mod m20261016_000001_ip_blocks;
mod m20261016_000002_seed_runs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261016_000001_ip_blocks::Migration),
            Box::new(m20261016_000002_seed_runs::Migration),
        ]
    }
}
