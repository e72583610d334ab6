//! Test utilities for database testing.
//!
//! This module provides utilities for setting up in-memory SQLite databases
//! with migrations applied, and a few fixtures for building catalogs.

#![allow(dead_code)]

use anyhow::Result;
use cmdb_catalog::catalog::{Catalog, Classification, Model, Saver};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::sync::Arc;

/// Tenant used by [`test_catalog`].
pub const TEST_SUPPLIER_ACCOUNT: &str = "0";

/// Sets up an in-memory SQLite database with all migrations applied.
///
/// Every connection to `sqlite::memory:` opens its own database, so the pool
/// is pinned to a single connection.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Sets up an in-memory SQLite database with all migrations applied and returns an Arc.
pub async fn setup_test_db_arc() -> Result<Arc<DatabaseConnection>> {
    let db = setup_test_db().await?;
    Ok(Arc::new(db))
}

/// A catalog for [`TEST_SUPPLIER_ACCOUNT`] over a fresh database.
pub async fn test_catalog() -> Result<Catalog> {
    let db = setup_test_db_arc().await?;
    Ok(Catalog::new(db, TEST_SUPPLIER_ACCOUNT))
}

/// Saves a classification with the given ID and name.
pub async fn create_classification(
    catalog: &Catalog,
    id: &str,
    name: &str,
) -> Result<Classification> {
    let mut classification = catalog.new_classification();
    classification.set_id(id).set_name(name);
    classification.save().await?;
    Ok(classification)
}

/// Saves a model with the given ID and name under `classification`.
pub async fn create_model(classification: &Classification, id: &str, name: &str) -> Result<Model> {
    let mut model = classification.create_model();
    model.set_id(id).set_name(name);
    model.save().await?;
    Ok(model)
}

/// Saves the `bk_host_manage` classification and a `host` model in it.
pub async fn host_model(catalog: &Catalog) -> Result<Model> {
    let classification = create_classification(catalog, "bk_host_manage", "Host").await?;
    create_model(&classification, "host", "Host").await
}
