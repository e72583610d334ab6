//! Storage-level behaviour of the catalog repositories.

use anyhow::Result;
use cmdb_catalog::catalog::Saver;
use cmdb_catalog::models::{Attribute, AttributeGroup, ObjectModel, attribute_group, classification};
use cmdb_catalog::repositories::{AttributeGroupRepository, ClassificationRepository};
use sea_orm::{ColumnTrait, EntityTrait, NotSet, PaginatorTrait, QueryFilter, Set, SqlErr};

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{TEST_SUPPLIER_ACCOUNT, host_model, test_catalog};

#[tokio::test]
async fn classification_upsert_overwrites_by_id() -> Result<()> {
    let catalog = test_catalog().await?;
    let repo = ClassificationRepository::new(std::sync::Arc::new(catalog.connection().clone()));

    for name in ["Host", "Hosts"] {
        repo.upsert(classification::ActiveModel {
            id: Set("bk_host_manage".to_string()),
            name: Set(name.to_string()),
            icon: Set(String::new()),
            created_at: NotSet,
            updated_at: NotSet,
        })
        .await?;
    }

    let stored = repo.find_by_id("bk_host_manage").await?.expect("row exists");
    assert_eq!(stored.name, "Hosts");
    assert_eq!(
        repo.select_all().count(catalog.connection()).await?,
        1
    );
    Ok(())
}

#[tokio::test]
async fn deleting_a_model_cascades_to_groups_and_attributes() -> Result<()> {
    let catalog = test_catalog().await?;
    let model = host_model(&catalog).await?;

    let mut attribute = model.create_attribute();
    attribute.set_id("hostname").set_name("Hostname");
    attribute.save().await?;

    ObjectModel::delete_by_id((TEST_SUPPLIER_ACCOUNT.to_string(), "host".to_string()))
        .exec(catalog.connection())
        .await?;

    let groups = AttributeGroup::find()
        .filter(attribute_group::Column::ModelId.eq("host"))
        .count(catalog.connection())
        .await?;
    assert_eq!(groups, 0);
    assert_eq!(Attribute::find().count(catalog.connection()).await?, 0);
    Ok(())
}

#[tokio::test]
async fn group_repository_demotes_siblings_in_one_write() -> Result<()> {
    let catalog = test_catalog().await?;
    host_model(&catalog).await?;
    let repo = AttributeGroupRepository::new(std::sync::Arc::new(catalog.connection().clone()));

    let saved = repo
        .save(attribute_group::ActiveModel {
            supplier_account: Set(TEST_SUPPLIER_ACCOUNT.to_string()),
            model_id: Set("host".to_string()),
            id: Set("network".to_string()),
            name: Set("Network".to_string()),
            group_index: Set(3),
            is_default: Set(true),
            created_at: NotSet,
            updated_at: NotSet,
        })
        .await?;
    assert!(saved.is_default);

    let default = repo
        .find_default(TEST_SUPPLIER_ACCOUNT, "host")
        .await?
        .expect("a default group exists");
    assert_eq!(default.id, "network");

    let previous = repo
        .find_by_id(TEST_SUPPLIER_ACCOUNT, "host", "default")
        .await?
        .expect("implicit group still exists");
    assert!(!previous.is_default);
    Ok(())
}

#[tokio::test]
async fn schema_rejects_a_second_default_group_written_behind_the_repository() -> Result<()> {
    let catalog = test_catalog().await?;
    host_model(&catalog).await?;

    let err = AttributeGroup::insert(attribute_group::ActiveModel {
        supplier_account: Set(TEST_SUPPLIER_ACCOUNT.to_string()),
        model_id: Set("host".to_string()),
        id: Set("rogue".to_string()),
        name: Set("Rogue".to_string()),
        group_index: Set(0),
        is_default: Set(true),
        created_at: NotSet,
        updated_at: NotSet,
    })
    .exec_without_returning(catalog.connection())
    .await
    .unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));

    let defaults = AttributeGroup::find()
        .filter(attribute_group::Column::ModelId.eq("host"))
        .filter(attribute_group::Column::IsDefault.eq(true))
        .count(catalog.connection())
        .await?;
    assert_eq!(defaults, 1);

    // Non-default siblings are unaffected by the index.
    for id in ["extra_a", "extra_b"] {
        AttributeGroup::insert(attribute_group::ActiveModel {
            supplier_account: Set(TEST_SUPPLIER_ACCOUNT.to_string()),
            model_id: Set("host".to_string()),
            id: Set(id.to_string()),
            name: Set(id.to_string()),
            group_index: Set(0),
            is_default: Set(false),
            created_at: NotSet,
            updated_at: NotSet,
        })
        .exec_without_returning(catalog.connection())
        .await?;
    }
    Ok(())
}
