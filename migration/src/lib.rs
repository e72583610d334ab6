//! Database migrations for the CMDB metadata catalog.
//!
//! This module contains all database migrations using SeaORM Migration.

pub use sea_orm_migration::prelude::*;

mod m2026_10_01_000001_create_classifications;
mod m2026_10_01_000002_create_object_models;
mod m2026_10_01_000003_create_attribute_groups;
mod m2026_10_01_000004_create_attributes;
mod m2026_10_01_000005_add_single_default_group_index;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m2026_10_01_000001_create_classifications::Migration),
            Box::new(m2026_10_01_000002_create_object_models::Migration),
            Box::new(m2026_10_01_000003_create_attribute_groups::Migration),
            Box::new(m2026_10_01_000004_create_attributes::Migration),
            Box::new(m2026_10_01_000005_add_single_default_group_index::Migration),
        ]
    }
}
