use sea_orm_migration::prelude::*;

use crate::migrations;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(migrations::m20250101_000001_create_participants::Migration),
            Box::new(migrations::m20250101_000002_create_sessions::Migration),
            Box::new(migrations::m20250101_000003_create_attendances::Migration),
            Box::new(migrations::m20250101_000004_create_settings::Migration),
        ]
    }
}
