//! Finder and iterator behaviour.

use anyhow::Result;
use cmdb_catalog::catalog::{Catalog, Saver};
use cmdb_catalog::condition::{Condition, Operator};
use cmdb_catalog::config::MAX_CATALOG_PAGE_SIZE;
use cmdb_catalog::error::CatalogError;
use sea_orm::{ConnectionTrait, Statement};
use serde_json::json;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{
    TEST_SUPPLIER_ACCOUNT, create_classification, create_model, host_model, setup_test_db_arc,
    test_catalog,
};

#[tokio::test]
async fn like_name_finds_cpu_cores_only() -> Result<()> {
    let catalog = test_catalog().await?;
    let model = host_model(&catalog).await?;

    for (id, name) in [("cpu_cores", "cpu_cores"), ("memory", "memory")] {
        let mut attribute = model.create_attribute();
        attribute.set_id(id).set_name(name);
        attribute.save().await?;
    }

    let mut found = model.find_attributes_like_name("cpu").await?;
    let first = found.next().await?.expect("cpu_cores matches");
    assert_eq!(first.name(), "cpu_cores");
    assert!(found.next().await?.is_none());
    assert!(found.is_exhausted());
    Ok(())
}

#[tokio::test]
async fn exhaustion_is_idempotent() -> Result<()> {
    let catalog = test_catalog().await?;
    create_classification(&catalog, "bk_network", "Network").await?;

    let mut found = catalog.find_classifications_like_name("net").await?;
    assert!(found.next().await?.is_some());
    for _ in 0..3 {
        assert!(found.next().await?.is_none());
    }
    assert!(found.is_exhausted());
    found.close();
    Ok(())
}

#[tokio::test]
async fn condition_matching_nothing_yields_an_empty_iterator() -> Result<()> {
    let catalog = test_catalog().await?;
    host_model(&catalog).await?;

    let mut found = catalog
        .find_models_by_condition(&Condition::eq("name", "does-not-exist"))
        .await?;
    assert!(found.next().await?.is_none());
    assert!(found.next().await?.is_none());
    Ok(())
}

#[tokio::test]
async fn like_name_ignores_ascii_case() -> Result<()> {
    let catalog = test_catalog().await?;
    let host = create_classification(&catalog, "bk_host_manage", "Host").await?;
    create_model(&host, "linux", "Linux Server").await?;
    create_model(&host, "windows", "Windows SERVER").await?;
    create_model(&host, "mainframe", "Mainframe").await?;

    let names: Vec<String> = host
        .find_models_like_name("server")
        .await?
        .collect()
        .await?
        .iter()
        .map(|m| m.name().to_string())
        .collect();
    assert_eq!(names, vec!["Linux Server", "Windows SERVER"]);

    let upper = host.find_models_like_name("SeRvEr").await?.collect().await?;
    assert_eq!(upper.len(), 2);
    Ok(())
}

#[tokio::test]
async fn like_name_treats_wildcards_literally() -> Result<()> {
    let catalog = test_catalog().await?;
    let model = host_model(&catalog).await?;

    for (id, name) in [("disk_pct", "disk 100%"), ("disk_total", "disk 1000")] {
        let mut attribute = model.create_attribute();
        attribute.set_id(id).set_name(name);
        attribute.save().await?;
    }

    let found = model.find_attributes_like_name("100%").await?.collect().await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id(), Some("disk_pct"));
    Ok(())
}

#[tokio::test]
async fn iterators_page_through_large_results() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let catalog = Catalog::new(db, TEST_SUPPLIER_ACCOUNT).with_page_size(2);
    let host = create_classification(&catalog, "bk_host_manage", "Host").await?;

    for i in 0..5 {
        create_model(&host, &format!("model_{i}"), &format!("Model {i}")).await?;
    }

    let mut found = host.find_models_like_name("model").await?;
    let mut ids = Vec::new();
    while let Some(model) = found.next().await? {
        ids.push(model.id().unwrap_or_default().to_string());
    }
    assert_eq!(
        ids,
        vec!["model_0", "model_1", "model_2", "model_3", "model_4"]
    );
    assert!(found.next().await?.is_none());
    Ok(())
}

#[tokio::test]
async fn page_size_is_clamped_to_the_configured_bounds() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let huge = Catalog::new(db.clone(), TEST_SUPPLIER_ACCOUNT).with_page_size(u64::MAX);
    assert_eq!(huge.page_size(), MAX_CATALOG_PAGE_SIZE);
    assert_eq!(huge.clone().with_page_size(0).page_size(), 1);

    create_classification(&huge, "a", "Alpha").await?;
    create_classification(&huge, "b", "Beta").await?;
    let mut found = huge.find_classifications_like_name("").await?;
    assert!(found.next().await?.is_some());
    assert!(found.next().await?.is_some());
    assert!(found.next().await?.is_none());
    assert!(found.is_exhausted());
    Ok(())
}

#[tokio::test]
async fn exact_page_boundary_ends_cleanly() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let catalog = Catalog::new(db, TEST_SUPPLIER_ACCOUNT).with_page_size(2);
    create_classification(&catalog, "a", "Alpha").await?;
    create_classification(&catalog, "b", "Beta").await?;

    let all = catalog
        .find_classifications_by_condition(&Condition::all(Vec::new()))
        .await?
        .collect()
        .await?;
    assert_eq!(all.len(), 2);
    Ok(())
}

#[tokio::test]
async fn failed_iterator_repeats_its_error() -> Result<()> {
    let db = setup_test_db_arc().await?;
    let catalog = Catalog::new(db.clone(), TEST_SUPPLIER_ACCOUNT).with_page_size(1);
    create_classification(&catalog, "a", "Alpha").await?;
    create_classification(&catalog, "b", "Beta").await?;

    let mut found = catalog.find_classifications_like_name("").await?;
    assert!(found.next().await?.is_some());

    db.execute(Statement::from_string(
        db.get_database_backend(),
        "DROP TABLE classifications".to_string(),
    ))
    .await?;

    // A missing table will not come back on retry.
    let first = found.next().await.unwrap_err();
    assert!(matches!(first, CatalogError::QueryMalformed(_)));
    assert!(!first.is_retryable());
    assert_eq!(found.next().await.unwrap_err(), first);
    assert!(!found.is_exhausted());
    Ok(())
}

#[tokio::test]
async fn conditions_filter_models() -> Result<()> {
    let catalog = test_catalog().await?;
    let host = create_classification(&catalog, "bk_host_manage", "Host").await?;
    let network = create_classification(&catalog, "bk_network", "Network").await?;

    create_model(&host, "host", "Host").await?;
    let mut switch = create_model(&network, "switch", "Switch").await?;
    switch.set_creator("netops").set_paused();
    switch.save().await?;
    create_model(&network, "router", "Router").await?;

    let paused = catalog
        .find_models_by_condition(&Condition::eq("paused", true))
        .await?
        .collect()
        .await?;
    assert_eq!(paused.len(), 1);
    assert_eq!(paused[0].id(), Some("switch"));

    let either = catalog
        .find_models_by_condition(&Condition::any([
            Condition::eq("creator", "netops"),
            Condition::eq("id", "host"),
        ]))
        .await?
        .collect()
        .await?;
    let ids: Vec<_> = either.iter().filter_map(|m| m.id()).collect();
    assert_eq!(ids, vec!["host", "switch"]);

    let network_only = network
        .find_models_by_condition(&Condition::field("name", Operator::Ne, "Switch"))
        .await?
        .collect()
        .await?;
    assert_eq!(network_only.len(), 1);
    assert_eq!(network_only[0].id(), Some("router"));
    Ok(())
}

#[tokio::test]
async fn conditions_from_json_filter_attributes() -> Result<()> {
    let catalog = test_catalog().await?;
    let model = host_model(&catalog).await?;

    for (id, required) in [("hostname", true), ("comment", false), ("os_type", true)] {
        let mut attribute = model.create_attribute();
        attribute.set_id(id).set_name(id);
        if required {
            attribute.set_required();
        }
        attribute.save().await?;
    }

    let condition: Condition = serde_json::from_value(json!({
        "kind": "all",
        "conditions": [
            {"kind": "field", "field": "required", "op": "eq", "value": true},
            {"kind": "field", "field": "id", "op": "not_in", "value": ["os_type"]}
        ]
    }))?;
    let found = model
        .find_attributes_by_condition(&condition)
        .await?
        .collect()
        .await?;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id(), Some("hostname"));
    Ok(())
}

#[tokio::test]
async fn group_finders_only_see_their_own_attributes() -> Result<()> {
    let catalog = test_catalog().await?;
    let model = host_model(&catalog).await?;

    let mut hardware = model.create_group();
    hardware.set_id("hardware").set_name("Hardware").set_index(1);
    hardware.save().await?;

    let mut cpu = hardware.create_attribute();
    cpu.set_id("cpu_model").set_name("CPU model");
    cpu.save().await?;
    assert_eq!(cpu.group_id(), Some("hardware"));

    let mut owner = model.create_attribute();
    owner.set_id("owner").set_name("Owner");
    owner.save().await?;

    let in_hardware = hardware
        .find_attributes_by_condition(&Condition::all(Vec::new()))
        .await?
        .collect()
        .await?;
    assert_eq!(in_hardware.len(), 1);
    assert_eq!(in_hardware[0].id(), Some("cpu_model"));

    let in_model = model.find_attributes_like_name("").await?.collect().await?;
    assert_eq!(in_model.len(), 2);

    let groups = model
        .find_groups_by_condition(&Condition::eq("default", false))
        .await?
        .collect()
        .await?;
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].id(), Some("hardware"));
    Ok(())
}

#[tokio::test]
async fn malformed_conditions_are_rejected_by_the_finder() -> Result<()> {
    let catalog = test_catalog().await?;
    let model = host_model(&catalog).await?;

    assert!(matches!(
        catalog
            .find_models_by_condition(&Condition::eq("bk_obj_id", "host"))
            .await,
        Err(CatalogError::QueryMalformed(_))
    ));
    assert!(matches!(
        model
            .find_groups_by_condition(&Condition::any(Vec::new()))
            .await,
        Err(CatalogError::QueryMalformed(_))
    ));
    assert!(matches!(
        catalog
            .find_classifications_by_condition(&Condition::field("name", Operator::In, "x"))
            .await,
        Err(CatalogError::QueryMalformed(_))
    ));
    Ok(())
}

#[tokio::test]
async fn conditions_of_the_wrong_type_are_rejected_before_querying() -> Result<()> {
    let catalog = test_catalog().await?;
    let model = host_model(&catalog).await?;

    for condition in [Condition::like("paused", "t"), Condition::eq("paused", "abc")] {
        let err = catalog.find_models_by_condition(&condition).await.err();
        assert!(
            matches!(err, Some(CatalogError::QueryMalformed(_))),
            "{condition:?}: {err:?}"
        );
        assert!(err.is_some_and(|e| !e.is_retryable()));
    }

    assert!(matches!(
        model
            .find_groups_by_condition(&Condition::field("index", Operator::Gt, "x"))
            .await
            .err(),
        Some(CatalogError::QueryMalformed(_))
    ));
    assert!(matches!(
        model
            .find_attributes_by_condition(&Condition::eq("required", "yes"))
            .await
            .err(),
        Some(CatalogError::QueryMalformed(_))
    ));
    Ok(())
}

#[tokio::test]
async fn unsaved_parents_have_nothing_to_find() -> Result<()> {
    let catalog = test_catalog().await?;
    let unsaved = catalog.new_classification();

    let mut models = unsaved.find_models_like_name("").await?;
    assert!(models.next().await?.is_none());
    assert!(models.is_exhausted());

    let model = unsaved.create_model();
    assert!(model.find_groups_like_name("").await?.next().await?.is_none());
    Ok(())
}
