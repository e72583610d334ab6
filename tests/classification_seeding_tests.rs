//! Tests for built-in classification seeding.

use anyhow::Result;
use cmdb_catalog::catalog::{Catalog, Saver};
use cmdb_catalog::seeds::{BUILTIN_CLASSIFICATIONS, seed_classifications};

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{TEST_SUPPLIER_ACCOUNT, setup_test_db_arc};

#[tokio::test]
async fn seed_classifications_populates_expected_rows() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let created = seed_classifications(&db).await?;
    assert_eq!(created, BUILTIN_CLASSIFICATIONS.len());

    let catalog = Catalog::new(db, TEST_SUPPLIER_ACCOUNT);
    let host = catalog.get_classification("bk_host_manage").await?;
    assert_eq!(host.name(), "Host");
    assert_eq!(host.icon(), "icon-cc-host");

    let all = catalog
        .find_classifications_like_name("")
        .await?
        .collect()
        .await?;
    let ids: Vec<_> = all.iter().filter_map(|c| c.id()).collect();
    assert_eq!(
        ids,
        vec![
            "bk_biz_topo",
            "bk_host_manage",
            "bk_network",
            "bk_organization",
            "bk_uncategorized",
        ]
    );
    Ok(())
}

#[tokio::test]
async fn seeding_is_idempotent() -> Result<()> {
    let db = setup_test_db_arc().await?;
    seed_classifications(&db).await?;
    let created_again = seed_classifications(&db).await?;
    assert_eq!(created_again, 0);

    let catalog = Catalog::new(db, TEST_SUPPLIER_ACCOUNT);
    let all = catalog
        .find_classifications_like_name("")
        .await?
        .collect()
        .await?;
    assert_eq!(all.len(), BUILTIN_CLASSIFICATIONS.len());
    Ok(())
}

#[tokio::test]
async fn seeding_leaves_operator_edits_alone() -> Result<()> {
    let db = setup_test_db_arc().await?;
    seed_classifications(&db).await?;

    let catalog = Catalog::new(db.clone(), TEST_SUPPLIER_ACCOUNT);
    let mut network = catalog.get_classification("bk_network").await?;
    network.set_name("Network Devices");
    network.save().await?;

    seed_classifications(&db).await?;
    assert_eq!(
        catalog.get_classification("bk_network").await?.name(),
        "Network Devices"
    );
    Ok(())
}
